//! Point-in-time copy of the ledger.
//!
//! A snapshot never changes after it is built, so every enrichment computed
//! from it sees the same materials and the same transactions.

use chrono::{DateTime, Utc};

use zencore_core::MaterialId;
use zencore_materials::{ItemType, Material};
use zencore_stock::{LedgerError, LedgerMovement, LedgerReader};

use super::query;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    materials: Vec<Material>,
    receipts: Vec<LedgerMovement>,
    consumptions: Vec<LedgerMovement>,
    pending_purchase_orders: usize,
}

impl LedgerSnapshot {
    /// Materials are kept in the given (persistence) order.
    pub fn new(
        materials: Vec<Material>,
        receipts: Vec<LedgerMovement>,
        consumptions: Vec<LedgerMovement>,
        pending_purchase_orders: usize,
    ) -> Self {
        Self {
            materials,
            receipts,
            consumptions,
            pending_purchase_orders,
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn receipt_count(&self) -> usize {
        self.receipts.len()
    }

    pub fn consumption_count(&self) -> usize {
        self.consumptions.len()
    }
}

impl LedgerReader for LedgerSnapshot {
    fn get_material(&self, material_id: MaterialId) -> Result<Option<Material>, LedgerError> {
        Ok(self
            .materials
            .iter()
            .find(|m| m.id == material_id)
            .cloned())
    }

    fn list_active_materials(
        &self,
        item_type: Option<ItemType>,
    ) -> Result<Vec<Material>, LedgerError> {
        Ok(self
            .materials
            .iter()
            .filter(|m| m.is_active)
            .filter(|m| item_type.is_none_or(|t| m.item_type == t))
            .cloned()
            .collect())
    }

    fn sum_receipts(&self, material_id: MaterialId) -> Result<f64, LedgerError> {
        Ok(query::total_for(&self.receipts, material_id))
    }

    fn sum_consumptions(&self, material_id: MaterialId) -> Result<f64, LedgerError> {
        Ok(query::total_for(&self.consumptions, material_id))
    }

    fn last_receipt_date(
        &self,
        material_id: MaterialId,
    ) -> Result<Option<DateTime<Utc>>, LedgerError> {
        Ok(query::latest_for(&self.receipts, material_id))
    }

    fn last_consumption_date(
        &self,
        material_id: MaterialId,
    ) -> Result<Option<DateTime<Utc>>, LedgerError> {
        Ok(query::latest_for(&self.consumptions, material_id))
    }

    fn receipts_since(&self, since: DateTime<Utc>) -> Result<Vec<LedgerMovement>, LedgerError> {
        Ok(query::since(&self.receipts, since))
    }

    fn consumptions_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<LedgerMovement>, LedgerError> {
        Ok(query::since(&self.consumptions, since))
    }

    fn count_pending_purchase_orders(&self) -> Result<usize, LedgerError> {
        Ok(self.pending_purchase_orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use zencore_materials::NewMaterial;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    fn movement(material_id: MaterialId, quantity: f64, day: u32) -> LedgerMovement {
        LedgerMovement {
            material_id,
            quantity,
            occurred_at: at(day),
        }
    }

    #[test]
    fn filters_active_materials_by_type_in_order() {
        let a = NewMaterial::new("A", "Alpha", ItemType::Material, "kg").build().unwrap();
        let s = NewMaterial::new("S", "Courier", ItemType::Service, "lot").build().unwrap();
        let old = NewMaterial::new("O", "Retired", ItemType::Material, "kg")
            .inactive()
            .build()
            .unwrap();
        let b = NewMaterial::new("B", "Beta", ItemType::Material, "kg").build().unwrap();
        let snapshot = LedgerSnapshot::new(vec![a.clone(), s.clone(), old.clone(), b.clone()], vec![], vec![], 0);

        let all = snapshot.list_active_materials(None).unwrap();
        let codes: Vec<_> = all.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, ["A", "S", "B"]);

        let services = snapshot.list_active_materials(Some(ItemType::Service)).unwrap();
        assert_eq!(services, vec![s]);

        // Inactive records stay reachable by id.
        assert_eq!(snapshot.get_material(old.id).unwrap(), Some(old));
    }

    #[test]
    fn sums_and_dates_are_per_material() {
        let a = MaterialId::new();
        let b = MaterialId::new();
        let snapshot = LedgerSnapshot::new(
            vec![],
            vec![movement(a, 5.0, 1), movement(b, 7.0, 2), movement(a, 2.5, 3)],
            vec![movement(a, 1.0, 2)],
            4,
        );

        assert_eq!(snapshot.sum_receipts(a).unwrap(), 7.5);
        assert_eq!(snapshot.sum_receipts(b).unwrap(), 7.0);
        assert_eq!(snapshot.sum_consumptions(b).unwrap(), 0.0);
        assert_eq!(snapshot.last_receipt_date(a).unwrap(), Some(at(3)));
        assert_eq!(snapshot.last_consumption_date(b).unwrap(), None);
        assert_eq!(snapshot.count_pending_purchase_orders().unwrap(), 4);
        assert_eq!(snapshot.receipt_count(), 3);
        assert_eq!(snapshot.consumption_count(), 1);
    }

    #[test]
    fn window_start_is_inclusive() {
        let a = MaterialId::new();
        let snapshot = LedgerSnapshot::new(
            vec![],
            vec![movement(a, 1.0, 1), movement(a, 2.0, 2), movement(a, 3.0, 3)],
            vec![],
            0,
        );

        let recent = snapshot.receipts_since(at(2)).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].quantity, 2.0);
    }
}
