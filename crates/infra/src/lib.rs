//! Infrastructure layer: ledger collaborators and configuration.

pub mod backend;
pub mod config;
pub mod ledger;

pub use backend::LedgerBackend;
pub use config::{ConfigError, Settings};
pub use ledger::{InMemoryLedger, LedgerSnapshot, PostgresLedgerLoader, SnapshotSource};
