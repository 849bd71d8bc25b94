//! Materials data model.
//!
//! Records owned by the persistence layer: materials and services, goods
//! receipts, consumptions and purchase orders. Construction validates the
//! attributes the stock engine relies on; nothing here performs IO.

pub mod material;
pub mod movement;
pub mod purchase_order;

pub use material::{Category, Form, ItemType, Material, NewMaterial, RegulatoryStatus};
pub use movement::{Consumption, NewConsumption, NewReceipt, Receipt};
pub use purchase_order::{NewPurchaseOrder, PurchaseOrder, PurchaseOrderStatus};
