//! Ledger queries shared by the in-memory ledger and the snapshot.

use chrono::{DateTime, Utc};

use zencore_core::MaterialId;
use zencore_materials::{Consumption, Receipt};
use zencore_stock::LedgerMovement;

/// A dated quantity booked against one material.
pub(crate) trait Movement {
    fn material_id(&self) -> MaterialId;
    fn quantity(&self) -> f64;
    fn occurred_at(&self) -> DateTime<Utc>;
}

impl Movement for LedgerMovement {
    fn material_id(&self) -> MaterialId {
        self.material_id
    }

    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl Movement for Receipt {
    fn material_id(&self) -> MaterialId {
        self.material_id
    }

    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

impl Movement for Consumption {
    fn material_id(&self) -> MaterialId {
        self.material_id
    }

    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.consumed_at
    }
}

pub(crate) fn total_for<M: Movement>(movements: &[M], material_id: MaterialId) -> f64 {
    movements
        .iter()
        .filter(|m| m.material_id() == material_id)
        .fold(0.0, |acc, m| acc + m.quantity())
}

pub(crate) fn latest_for<M: Movement>(
    movements: &[M],
    material_id: MaterialId,
) -> Option<DateTime<Utc>> {
    movements
        .iter()
        .filter(|m| m.material_id() == material_id)
        .map(Movement::occurred_at)
        .max()
}

/// Movements dated at or after `since`, in booking order.
pub(crate) fn since<M: Movement>(movements: &[M], since: DateTime<Utc>) -> Vec<LedgerMovement> {
    movements
        .iter()
        .filter(|m| m.occurred_at() >= since)
        .map(to_ledger_movement)
        .collect()
}

pub(crate) fn to_ledger_movement<M: Movement>(movement: &M) -> LedgerMovement {
    LedgerMovement {
        material_id: movement.material_id(),
        quantity: movement.quantity(),
        occurred_at: movement.occurred_at(),
    }
}
