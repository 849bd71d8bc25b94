//! Ledger Reader: the read-only persistence contract the engine consumes.
//!
//! Implementations live in infrastructure (in-memory ledger, point-in-time
//! snapshots loaded from Postgres). The engine issues several reads per
//! enrichment; implementations should serve them from one consistent view.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zencore_core::MaterialId;
use zencore_materials::{ItemType, Material};

use crate::error::LedgerError;

/// One receipt or consumption, reduced to what aggregation needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerMovement {
    pub material_id: MaterialId,
    pub quantity: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Read-only accessor over materials and the two transaction streams.
///
/// Absence of transactions is not an error: sums are `0.0` and dates `None`.
pub trait LedgerReader: Send + Sync {
    /// Look up one material (active or not). `Ok(None)` when it does not exist.
    fn get_material(&self, material_id: MaterialId) -> Result<Option<Material>, LedgerError>;

    /// Active materials, optionally restricted to one item type, in persistence order.
    fn list_active_materials(
        &self,
        item_type: Option<ItemType>,
    ) -> Result<Vec<Material>, LedgerError>;

    /// Sum of all receipt quantities for a material.
    fn sum_receipts(&self, material_id: MaterialId) -> Result<f64, LedgerError>;

    /// Sum of all consumption quantities for a material.
    fn sum_consumptions(&self, material_id: MaterialId) -> Result<f64, LedgerError>;

    /// Timestamp of the most recent receipt.
    fn last_receipt_date(
        &self,
        material_id: MaterialId,
    ) -> Result<Option<DateTime<Utc>>, LedgerError>;

    /// Timestamp of the most recent consumption.
    fn last_consumption_date(
        &self,
        material_id: MaterialId,
    ) -> Result<Option<DateTime<Utc>>, LedgerError>;

    /// All receipts (any material) with `occurred_at >= since`.
    fn receipts_since(&self, since: DateTime<Utc>) -> Result<Vec<LedgerMovement>, LedgerError>;

    /// All consumptions (any material) with `occurred_at >= since`.
    fn consumptions_since(&self, since: DateTime<Utc>)
    -> Result<Vec<LedgerMovement>, LedgerError>;

    /// Number of purchase orders still in `pending` status.
    fn count_pending_purchase_orders(&self) -> Result<usize, LedgerError>;
}

macro_rules! forward_ledger_reader {
    () => {
        fn get_material(&self, material_id: MaterialId) -> Result<Option<Material>, LedgerError> {
            (**self).get_material(material_id)
        }

        fn list_active_materials(
            &self,
            item_type: Option<ItemType>,
        ) -> Result<Vec<Material>, LedgerError> {
            (**self).list_active_materials(item_type)
        }

        fn sum_receipts(&self, material_id: MaterialId) -> Result<f64, LedgerError> {
            (**self).sum_receipts(material_id)
        }

        fn sum_consumptions(&self, material_id: MaterialId) -> Result<f64, LedgerError> {
            (**self).sum_consumptions(material_id)
        }

        fn last_receipt_date(
            &self,
            material_id: MaterialId,
        ) -> Result<Option<DateTime<Utc>>, LedgerError> {
            (**self).last_receipt_date(material_id)
        }

        fn last_consumption_date(
            &self,
            material_id: MaterialId,
        ) -> Result<Option<DateTime<Utc>>, LedgerError> {
            (**self).last_consumption_date(material_id)
        }

        fn receipts_since(&self, since: DateTime<Utc>) -> Result<Vec<LedgerMovement>, LedgerError> {
            (**self).receipts_since(since)
        }

        fn consumptions_since(
            &self,
            since: DateTime<Utc>,
        ) -> Result<Vec<LedgerMovement>, LedgerError> {
            (**self).consumptions_since(since)
        }

        fn count_pending_purchase_orders(&self) -> Result<usize, LedgerError> {
            (**self).count_pending_purchase_orders()
        }
    };
}

impl<R> LedgerReader for &R
where
    R: LedgerReader + ?Sized,
{
    forward_ledger_reader!();
}

impl<R> LedgerReader for Arc<R>
where
    R: LedgerReader + ?Sized,
{
    forward_ledger_reader!();
}

/// Ledger totals and last-activity dates for one material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerTotals {
    pub total_receipts: f64,
    pub total_consumptions: f64,
    pub last_receipt_date: Option<DateTime<Utc>>,
    pub last_consumption_date: Option<DateTime<Utc>>,
}

impl LedgerTotals {
    /// Issue the four per-material reads.
    pub fn read<R>(reader: &R, material_id: MaterialId) -> Result<Self, LedgerError>
    where
        R: LedgerReader + ?Sized,
    {
        Ok(Self {
            total_receipts: reader.sum_receipts(material_id)?,
            total_consumptions: reader.sum_consumptions(material_id)?,
            last_receipt_date: reader.last_receipt_date(material_id)?,
            last_consumption_date: reader.last_consumption_date(material_id)?,
        })
    }
}
