use std::sync::Arc;

use async_trait::async_trait;

use zencore_stock::LedgerError;

use super::in_memory::InMemoryLedger;
use super::snapshot::LedgerSnapshot;

/// Anything that can produce a consistent ledger snapshot.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError>;
}

#[async_trait]
impl<S> SnapshotSource for Arc<S>
where
    S: SnapshotSource + ?Sized,
{
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError> {
        (**self).load().await
    }
}

#[async_trait]
impl SnapshotSource for InMemoryLedger {
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError> {
        self.snapshot()
    }
}
