use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zencore_core::{
    DomainError, DomainResult, Entity, MaterialId, PurchaseOrderId, VendorId, ensure_non_negative,
    ensure_not_blank,
};

/// Purchase order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

crate::material::impl_from_snake_case!(PurchaseOrderStatus, "purchase order status", {
    "pending" => PurchaseOrderStatus::Pending,
    "confirmed" => PurchaseOrderStatus::Confirmed,
    "delivered" => PurchaseOrderStatus::Delivered,
    "cancelled" => PurchaseOrderStatus::Cancelled,
});

impl PurchaseOrderStatus {
    /// Pending orders are the ones the dashboard reports as active.
    pub fn is_pending(&self) -> bool {
        matches!(self, PurchaseOrderStatus::Pending)
    }
}

/// Purchase order for a single material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub po_number: String,
    pub material_id: MaterialId,
    pub vendor_id: VendorId,
    pub quantity: f64,
    pub unit_price: f64,
    pub ordered_at: DateTime<Utc>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub status: PurchaseOrderStatus,
}

impl PurchaseOrder {
    pub fn total_amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

impl Entity for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> PurchaseOrderId {
        self.id
    }
}

/// Input for placing a purchase order. New orders start as `Pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchaseOrder {
    pub po_number: String,
    pub material_id: MaterialId,
    pub vendor_id: VendorId,
    pub quantity: f64,
    pub unit_price: f64,
    pub ordered_at: DateTime<Utc>,
    pub expected_delivery: Option<DateTime<Utc>>,
}

impl NewPurchaseOrder {
    pub fn build(self) -> DomainResult<PurchaseOrder> {
        ensure_not_blank("po_number", &self.po_number)?;
        ensure_non_negative("quantity", self.quantity)?;
        ensure_non_negative("unit_price", self.unit_price)?;
        if self.quantity == 0.0 {
            return Err(DomainError::validation("quantity cannot be zero"));
        }
        if let Some(expected) = self.expected_delivery {
            if expected < self.ordered_at {
                return Err(DomainError::invariant(
                    "expected delivery cannot precede the order date",
                ));
            }
        }

        Ok(PurchaseOrder {
            id: PurchaseOrderId::new(),
            po_number: self.po_number,
            material_id: self.material_id,
            vendor_id: self.vendor_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            ordered_at: self.ordered_at,
            expected_delivery: self.expected_delivery,
            status: PurchaseOrderStatus::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_order() -> NewPurchaseOrder {
        NewPurchaseOrder {
            po_number: "PO-0042".to_string(),
            material_id: MaterialId::new(),
            vendor_id: VendorId::new(),
            quantity: 25.0,
            unit_price: 4.0,
            ordered_at: Utc::now(),
            expected_delivery: None,
        }
    }

    #[test]
    fn new_order_starts_pending() {
        let order = new_order().build().unwrap();
        assert_eq!(order.status, PurchaseOrderStatus::Pending);
        assert!(order.status.is_pending());
        assert_eq!(order.total_amount(), 100.0);
    }

    #[test]
    fn delivery_before_order_date_is_rejected() {
        let mut cmd = new_order();
        cmd.expected_delivery = Some(cmd.ordered_at - Duration::days(1));
        let err = cmd.build().unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("expected delivery") => {}
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn parses_stored_status() {
        assert_eq!("cancelled".parse::<PurchaseOrderStatus>().unwrap(), PurchaseOrderStatus::Cancelled);
        assert!("open".parse::<PurchaseOrderStatus>().is_err());
    }

    #[test]
    fn only_pending_counts_as_active() {
        assert!(!PurchaseOrderStatus::Confirmed.is_pending());
        assert!(!PurchaseOrderStatus::Delivered.is_pending());
        assert!(!PurchaseOrderStatus::Cancelled.is_pending());
    }
}
