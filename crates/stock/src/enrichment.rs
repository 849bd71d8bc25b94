//! Material Enrichment: one material plus its derived stock figures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zencore_core::MaterialId;
use zencore_materials::Material;

use crate::calculator::current_stock;
use crate::error::LedgerError;
use crate::ledger::{LedgerReader, LedgerTotals};
use crate::reorder::recommended_po;
use crate::status::{StockStatus, classify};

/// Enriched material view.
///
/// Derived on every request and never persisted. Serializes as the material's
/// attributes with the derived fields alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMaterial {
    #[serde(flatten)]
    pub material: Material,
    pub current_stock: f64,
    pub recommended_po: f64,
    pub stock_status: StockStatus,
    pub last_receipt_date: Option<DateTime<Utc>>,
    pub last_consumption_date: Option<DateTime<Utc>>,
}

impl EnrichedMaterial {
    /// Compose the view from a material snapshot and its ledger totals.
    pub fn from_parts(material: Material, totals: LedgerTotals) -> Self {
        let stock = current_stock(
            material.opening_stock,
            totals.total_receipts,
            totals.total_consumptions,
        );
        let status = classify(stock, material.safety_stock);
        let po = recommended_po(material.safety_stock, material.monthly_forecast, stock);

        Self {
            material,
            current_stock: stock,
            recommended_po: po,
            stock_status: status,
            last_receipt_date: totals.last_receipt_date,
            last_consumption_date: totals.last_consumption_date,
        }
    }

    pub fn id(&self) -> MaterialId {
        self.material.id
    }

    pub fn needs_attention(&self) -> bool {
        self.stock_status.needs_attention()
    }
}

/// Enrich a material record the caller already holds.
pub fn enrich_material<R>(reader: &R, material: Material) -> Result<EnrichedMaterial, LedgerError>
where
    R: LedgerReader + ?Sized,
{
    let totals = LedgerTotals::read(reader, material.id)?;
    Ok(EnrichedMaterial::from_parts(material, totals))
}
