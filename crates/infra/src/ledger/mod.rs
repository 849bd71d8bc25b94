//! Ledger collaborators: where materials and transactions are read from.

mod in_memory;
mod postgres;
mod query;
mod snapshot;
mod source;

pub use in_memory::InMemoryLedger;
pub use postgres::PostgresLedgerLoader;
pub use snapshot::LedgerSnapshot;
pub use source::SnapshotSource;
