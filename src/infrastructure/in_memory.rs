use crate::domain::ledger::Ledger;
use crate::domain::ports::LedgerStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger store.
///
/// Clones share the same underlying ledger, so a handle kept by the caller
/// observes what the application service saved.
#[derive(Default, Clone)]
pub struct InMemoryLedgerStore {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryLedgerStore {
    /// Creates a new store holding an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `ledger`.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn load(&self) -> Result<Ledger> {
        let ledger = self.ledger.read().await;
        Ok(ledger.clone())
    }

    async fn save(&self, ledger: &Ledger) -> Result<()> {
        let mut stored = self.ledger.write().await;
        *stored = ledger.clone();
        Ok(())
    }
}
