//! In-memory ledger for tests and local development.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use zencore_core::{Entity, MaterialId};
use zencore_materials::{Consumption, ItemType, Material, PurchaseOrder, Receipt};
use zencore_stock::{LedgerError, LedgerMovement, LedgerReader};

use super::query;
use super::snapshot::LedgerSnapshot;

#[derive(Debug, Default)]
struct LedgerState {
    materials: Vec<Material>,
    receipts: Vec<Receipt>,
    consumptions: Vec<Consumption>,
    purchase_orders: Vec<PurchaseOrder>,
}

/// Thread-safe in-memory ledger.
///
/// Records are kept in insertion order, which is the order
/// `list_active_materials` reports. Writes do not check that the referenced
/// material exists. A poisoned lock surfaces as `LedgerError::Unavailable`.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a material, or replace the record with the same id in place.
    pub fn upsert_material(&self, material: Material) -> Result<(), LedgerError> {
        upsert(&mut self.write()?.materials, material);
        Ok(())
    }

    pub fn record_receipt(&self, receipt: Receipt) -> Result<(), LedgerError> {
        upsert(&mut self.write()?.receipts, receipt);
        Ok(())
    }

    pub fn record_consumption(&self, consumption: Consumption) -> Result<(), LedgerError> {
        upsert(&mut self.write()?.consumptions, consumption);
        Ok(())
    }

    /// Insert a purchase order, or replace it (e.g. after a status change).
    pub fn upsert_purchase_order(&self, order: PurchaseOrder) -> Result<(), LedgerError> {
        upsert(&mut self.write()?.purchase_orders, order);
        Ok(())
    }

    /// Copy the current state into an immutable snapshot.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        let state = self.read()?;
        Ok(LedgerSnapshot::new(
            state.materials.clone(),
            state.receipts.iter().map(query::to_ledger_movement).collect(),
            state
                .consumptions
                .iter()
                .map(query::to_ledger_movement)
                .collect(),
            pending_orders(&state.purchase_orders),
        ))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner
            .read()
            .map_err(|_| LedgerError::Unavailable("in-memory ledger lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner
            .write()
            .map_err(|_| LedgerError::Unavailable("in-memory ledger lock poisoned".to_string()))
    }
}

fn upsert<E: Entity>(records: &mut Vec<E>, record: E) {
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

fn pending_orders(orders: &[PurchaseOrder]) -> usize {
    orders.iter().filter(|o| o.status.is_pending()).count()
}

impl LedgerReader for InMemoryLedger {
    fn get_material(&self, material_id: MaterialId) -> Result<Option<Material>, LedgerError> {
        let state = self.read()?;
        Ok(state
            .materials
            .iter()
            .find(|m| m.id == material_id)
            .cloned())
    }

    fn list_active_materials(
        &self,
        item_type: Option<ItemType>,
    ) -> Result<Vec<Material>, LedgerError> {
        let state = self.read()?;
        Ok(state
            .materials
            .iter()
            .filter(|m| m.is_active)
            .filter(|m| item_type.is_none_or(|t| m.item_type == t))
            .cloned()
            .collect())
    }

    fn sum_receipts(&self, material_id: MaterialId) -> Result<f64, LedgerError> {
        Ok(query::total_for(&self.read()?.receipts, material_id))
    }

    fn sum_consumptions(&self, material_id: MaterialId) -> Result<f64, LedgerError> {
        Ok(query::total_for(&self.read()?.consumptions, material_id))
    }

    fn last_receipt_date(
        &self,
        material_id: MaterialId,
    ) -> Result<Option<DateTime<Utc>>, LedgerError> {
        Ok(query::latest_for(&self.read()?.receipts, material_id))
    }

    fn last_consumption_date(
        &self,
        material_id: MaterialId,
    ) -> Result<Option<DateTime<Utc>>, LedgerError> {
        Ok(query::latest_for(&self.read()?.consumptions, material_id))
    }

    fn receipts_since(&self, since: DateTime<Utc>) -> Result<Vec<LedgerMovement>, LedgerError> {
        Ok(query::since(&self.read()?.receipts, since))
    }

    fn consumptions_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<LedgerMovement>, LedgerError> {
        Ok(query::since(&self.read()?.consumptions, since))
    }

    fn count_pending_purchase_orders(&self) -> Result<usize, LedgerError> {
        Ok(pending_orders(&self.read()?.purchase_orders))
    }
}
