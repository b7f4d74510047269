use super::ledger::Ledger;
use crate::error::Result;
use async_trait::async_trait;

/// Where the ledger lives between settlement runs.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Returns the stored ledger, or an empty one if nothing was saved yet.
    async fn load(&self) -> Result<Ledger>;
    async fn save(&self, ledger: &Ledger) -> Result<()>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;
