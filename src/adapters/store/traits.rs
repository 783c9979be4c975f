//! Document store abstraction traits
//!
//! This module defines the traits that store adapters must implement
//! to back the BizzSummit resource services.

use crate::domain::{ResourceDescriptor, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Handle to a database that is known to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseRef {
    /// Database name
    pub name: String,

    /// Whether this call created the database
    pub created: bool,
}

/// Container that is known to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Container name
    pub name: String,

    /// Partition key path requested for the container
    pub partition_key: String,

    /// Whether this call created the container
    pub created: bool,
}

/// Document store client
///
/// The ensure operations are idempotent: calling them for a database or
/// container that already exists is a no-op, and an existing container's
/// properties are never modified. A create that loses a race with another
/// creator is reported as already present.
///
/// Item operations address documents by `id`, which is also the partition
/// key value.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Account endpoint this client talks to
    fn account(&self) -> &str;

    /// Ensure the database exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be read or created.
    async fn ensure_database(&self, name: &str) -> Result<DatabaseRef>;

    /// Ensure a container exists in `database`, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be read or created.
    async fn ensure_container(
        &self,
        database: &DatabaseRef,
        name: &str,
        partition_key: &str,
    ) -> Result<ContainerInfo>;

    /// Read a document, `None` when it does not exist
    async fn read_item(&self, database: &str, container: &str, id: &str) -> Result<Option<Value>>;

    /// Insert or replace a document keyed by its `id` field
    async fn upsert_item(
        &self,
        database: &str,
        container: &str,
        id: &str,
        document: &Value,
    ) -> Result<()>;

    /// Delete a document, `false` when it did not exist
    async fn delete_item(&self, database: &str, container: &str, id: &str) -> Result<bool>;
}

/// Builds store clients from resolved descriptors
///
/// Construction performs no I/O; the first request happens during
/// provisioning.
pub trait StoreConnector: Send + Sync {
    /// Construct a client for `descriptor`'s account
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be constructed (for example a
    /// malformed endpoint).
    fn connect(&self, descriptor: &ResourceDescriptor) -> Result<Arc<dyn DocumentStore>>;
}
