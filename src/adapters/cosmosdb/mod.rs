//! Azure Cosmos DB integration
//!
//! This module provides the Cosmos DB backed document store and its
//! connector.

pub mod client;

pub use client::CosmosDbClient;

use crate::adapters::store::{DocumentStore, StoreConnector};
use crate::domain::{ResourceDescriptor, Result};
use std::sync::Arc;

/// Builds one key-authenticated [`CosmosDbClient`] per descriptor
#[derive(Debug, Default, Clone, Copy)]
pub struct CosmosDbConnector;

impl StoreConnector for CosmosDbConnector {
    fn connect(&self, descriptor: &ResourceDescriptor) -> Result<Arc<dyn DocumentStore>> {
        tracing::debug!(
            kind = %descriptor.kind,
            account = %descriptor.account,
            "Creating Cosmos DB client"
        );
        let client = CosmosDbClient::new(&descriptor.account, &descriptor.key)?;
        Ok(Arc::new(client))
    }
}
