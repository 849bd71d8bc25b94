//! Stock engine error model.

use thiserror::Error;

use zencore_core::MaterialId;

/// Result type used by the stock engine.
pub type StockResult<T> = Result<T, StockError>;

/// Failure reported by a ledger collaborator (database, snapshot loader, ...).
///
/// The engine never interprets or swallows these; they travel to the caller
/// inside [`StockError::DataAccess`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The backing store could not be reached (pool closed, lock poisoned, ...).
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// A query against the backing store failed.
    #[error("ledger query failed: {0}")]
    Query(String),

    /// A stored row could not be decoded into a ledger record.
    #[error("failed to decode ledger record: {0}")]
    Decode(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StockError {
    /// The referenced material does not exist.
    #[error("material not found: {0}")]
    NotFound(MaterialId),

    /// A caller-supplied argument was rejected (e.g. a negative day window).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The ledger collaborator failed; propagated unchanged.
    #[error(transparent)]
    DataAccess(#[from] LedgerError),
}

impl StockError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StockError::NotFound(_))
    }
}
