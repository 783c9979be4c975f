//! In-memory document store
//!
//! Every connector call hands out the same shared [`MemoryStore`], so all
//! resource kinds see one account just as they would with Cosmos DB.

pub mod store;

pub use store::MemoryStore;

use crate::adapters::store::{DocumentStore, StoreConnector};
use crate::domain::{ResourceDescriptor, Result};
use std::sync::Arc;

/// Connector handing out one shared in-process account
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    store: Arc<MemoryStore>,
}

impl MemoryConnector {
    /// Connector over a fresh, empty account
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new("memory://local")))
    }

    /// Connector over an existing account
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// The shared account
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreConnector for MemoryConnector {
    fn connect(&self, descriptor: &ResourceDescriptor) -> Result<Arc<dyn DocumentStore>> {
        tracing::debug!(kind = %descriptor.kind, "Using in-memory store");
        Ok(self.store.clone() as Arc<dyn DocumentStore>)
    }
}
