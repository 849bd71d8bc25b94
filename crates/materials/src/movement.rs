//! Stock movements: goods receipts (inbound) and consumptions (outbound).
//!
//! Both streams are append-only from the stock engine's point of view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zencore_core::{
    ConsumptionId, DomainError, DomainResult, Entity, MaterialId, PurchaseOrderId, ReceiptId,
    VendorId, ensure_non_negative, ensure_not_blank,
};

/// Inbound quantity event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ReceiptId,
    pub receipt_number: String,
    pub material_id: MaterialId,
    pub vendor_id: VendorId,
    pub purchase_order_id: Option<PurchaseOrderId>,
    pub quantity: f64,
    pub unit_price: f64,
    pub received_at: DateTime<Utc>,
    pub batch_number: Option<String>,
}

impl Receipt {
    pub fn total_amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

impl Entity for Receipt {
    type Id = ReceiptId;

    fn id(&self) -> ReceiptId {
        self.id
    }
}

/// Input for recording a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReceipt {
    pub receipt_number: String,
    pub material_id: MaterialId,
    pub vendor_id: VendorId,
    pub purchase_order_id: Option<PurchaseOrderId>,
    pub quantity: f64,
    pub unit_price: f64,
    pub received_at: DateTime<Utc>,
    pub batch_number: Option<String>,
}

impl NewReceipt {
    pub fn build(self) -> DomainResult<Receipt> {
        ensure_not_blank("receipt_number", &self.receipt_number)?;
        ensure_positive("quantity", self.quantity)?;
        ensure_non_negative("unit_price", self.unit_price)?;

        Ok(Receipt {
            id: ReceiptId::new(),
            receipt_number: self.receipt_number,
            material_id: self.material_id,
            vendor_id: self.vendor_id,
            purchase_order_id: self.purchase_order_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            received_at: self.received_at,
            batch_number: self.batch_number,
        })
    }
}

/// Outbound quantity event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumption {
    pub id: ConsumptionId,
    pub consumption_number: String,
    pub material_id: MaterialId,
    pub quantity: f64,
    pub consumed_at: DateTime<Utc>,
    /// Project or work order the material was used for.
    pub project: Option<String>,
    pub cost_center: Option<String>,
}

impl Entity for Consumption {
    type Id = ConsumptionId;

    fn id(&self) -> ConsumptionId {
        self.id
    }
}

/// Input for recording a consumption.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConsumption {
    pub consumption_number: String,
    pub material_id: MaterialId,
    pub quantity: f64,
    pub consumed_at: DateTime<Utc>,
    pub project: Option<String>,
    pub cost_center: Option<String>,
}

impl NewConsumption {
    pub fn build(self) -> DomainResult<Consumption> {
        ensure_not_blank("consumption_number", &self.consumption_number)?;
        ensure_positive("quantity", self.quantity)?;

        Ok(Consumption {
            id: ConsumptionId::new(),
            consumption_number: self.consumption_number,
            material_id: self.material_id,
            quantity: self.quantity,
            consumed_at: self.consumed_at,
            project: self.project,
            cost_center: self.cost_center,
        })
    }
}

fn ensure_positive(field: &str, value: f64) -> DomainResult<()> {
    ensure_non_negative(field, value)?;
    if value == 0.0 {
        return Err(DomainError::validation(format!("{field} cannot be zero")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_receipt(quantity: f64) -> NewReceipt {
        NewReceipt {
            receipt_number: "RC-2024-001".to_string(),
            material_id: MaterialId::new(),
            vendor_id: VendorId::new(),
            purchase_order_id: None,
            quantity,
            unit_price: 12.5,
            received_at: Utc::now(),
            batch_number: Some("B-17".to_string()),
        }
    }

    #[test]
    fn receipt_total_is_quantity_times_price() {
        let receipt = new_receipt(4.0).build().unwrap();
        assert_eq!(receipt.total_amount(), 50.0);
    }

    #[test]
    fn zero_quantity_receipt_is_rejected() {
        let err = new_receipt(0.0).build().unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("quantity cannot be zero") => {}
            other => panic!("expected zero-quantity validation error, got {other:?}"),
        }
    }

    #[test]
    fn negative_consumption_is_rejected() {
        let err = NewConsumption {
            consumption_number: "CN-1".to_string(),
            material_id: MaterialId::new(),
            quantity: -2.0,
            consumed_at: Utc::now(),
            project: None,
            cost_center: None,
        }
        .build()
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
