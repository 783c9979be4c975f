//! Store connector factory
//!
//! This module picks the connector for the configured store target.

use crate::adapters::cosmosdb::CosmosDbConnector;
use crate::adapters::memory::MemoryConnector;
use crate::adapters::store::traits::StoreConnector;
use crate::config::StoreTarget;
use std::sync::Arc;

/// Create a store connector based on the configured target
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements StoreConnector
pub fn create_store_connector(target: StoreTarget) -> Arc<dyn StoreConnector> {
    match target {
        StoreTarget::CosmosDB => {
            tracing::info!("Using Cosmos DB store");
            Arc::new(CosmosDbConnector)
        }
        StoreTarget::Memory => {
            tracing::info!("Using in-memory store");
            Arc::new(MemoryConnector::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::{ResourceDescriptor, ResourceKind};

    fn descriptor(account: &str) -> ResourceDescriptor {
        ResourceDescriptor {
            kind: ResourceKind::Bookings,
            database_name: "BizzSummit".to_string(),
            container_name: "Bookings".to_string(),
            account: account.to_string(),
            key: secret_string("a2V5".to_string()),
        }
    }

    #[test]
    fn test_memory_connector_shares_one_account() {
        let connector = create_store_connector(StoreTarget::Memory);
        let first = connector.connect(&descriptor("memory://local")).unwrap();
        let second = connector.connect(&descriptor("memory://local")).unwrap();
        assert_eq!(first.account(), "memory://local");
        assert_eq!(second.account(), first.account());
    }

    #[test]
    fn test_cosmos_connector_builds_client_without_io() {
        let connector = create_store_connector(StoreTarget::CosmosDB);
        let store = connector
            .connect(&descriptor("https://summit.documents.azure.com:443/"))
            .unwrap();
        assert_eq!(store.account(), "https://summit.documents.azure.com:443/");
    }
}
