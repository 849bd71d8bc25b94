//! Ledger backend selection from [`Settings`].

use std::sync::Arc;

use async_trait::async_trait;

use zencore_stock::LedgerError;

use crate::config::Settings;
use crate::ledger::{InMemoryLedger, LedgerSnapshot, PostgresLedgerLoader, SnapshotSource};

#[derive(Debug, Clone)]
pub enum LedgerBackend {
    InMemory(Arc<InMemoryLedger>),
    Postgres(PostgresLedgerLoader),
}

impl LedgerBackend {
    /// Postgres when a database URL is configured, otherwise a fresh
    /// in-memory ledger.
    ///
    /// The Postgres pool connects lazily but needs a current Tokio runtime;
    /// outside one this fails with [`LedgerError::Unavailable`].
    pub fn from_settings(settings: &Settings) -> Result<Self, LedgerError> {
        match settings.database_url.as_deref() {
            Some(url) => {
                tracing::info!("using postgres ledger");
                Ok(Self::Postgres(PostgresLedgerLoader::connect_lazy(url)?))
            }
            None => {
                tracing::info!("using in-memory ledger");
                Ok(Self::InMemory(Arc::new(InMemoryLedger::new())))
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LedgerBackend::InMemory(_) => "in_memory",
            LedgerBackend::Postgres(_) => "postgres",
        }
    }
}

#[async_trait]
impl SnapshotSource for LedgerBackend {
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError> {
        match self {
            LedgerBackend::InMemory(ledger) => ledger.load().await,
            LedgerBackend::Postgres(loader) => loader.load().await,
        }
    }
}
