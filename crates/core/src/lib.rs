//! Domain foundation: errors, typed identifiers, entities.
//!
//! Nothing here knows about stock, ledgers or storage.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, ensure_non_negative, ensure_not_blank};
pub use id::{ConsumptionId, MaterialId, PurchaseOrderId, ReceiptId, VendorId};
