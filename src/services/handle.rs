//! Per-kind service handle
//!
//! A [`ServiceHandle`] binds a store client to the database and container
//! that hold one resource kind.

use crate::adapters::store::DocumentStore;
use crate::domain::{Document, ResourceKind, Result, SummitError};
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the HTTP handlers run against one resource kind
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// Resource kind served
    fn kind(&self) -> ResourceKind;

    /// Fetch a document by id, `None` when it does not exist
    async fn get(&self, id: &str) -> Result<Option<Document>>;

    /// Insert or replace a document
    async fn upsert(&self, document: Document) -> Result<Document>;

    /// Delete a document by id, `false` when it did not exist
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Store client plus the container one resource kind lives in
///
/// Created exactly once per kind during startup and shared read-only.
pub struct ServiceHandle {
    kind: ResourceKind,
    store: Arc<dyn DocumentStore>,
    database_name: String,
    container_name: String,
}

impl ServiceHandle {
    pub fn new(
        kind: ResourceKind,
        store: Arc<dyn DocumentStore>,
        database_name: impl Into<String>,
        container_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            store,
            database_name: database_name.into(),
            container_name: container_name.into(),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }
}

impl std::fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("kind", &self.kind)
            .field("account", &self.store.account())
            .field("database_name", &self.database_name)
            .field("container_name", &self.container_name)
            .finish()
    }
}

#[async_trait]
impl ResourceService for ServiceHandle {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn get(&self, id: &str) -> Result<Option<Document>> {
        let value = self
            .store
            .read_item(&self.database_name, &self.container_name, id)
            .await?;

        match value {
            Some(value) => Document::from_value(value).map(Some).map_err(|e| {
                SummitError::Serialization(format!(
                    "{} document {id} is malformed: {e}",
                    self.kind
                ))
            }),
            None => Ok(None),
        }
    }

    async fn upsert(&self, document: Document) -> Result<Document> {
        let id = document.id.clone();
        let value = document.into_value();

        self.store
            .upsert_item(&self.database_name, &self.container_name, &id, &value)
            .await?;

        tracing::debug!(kind = %self.kind, id = %id, "Document upserted");
        Document::from_value(value)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let deleted = self
            .store
            .delete_item(&self.database_name, &self.container_name, id)
            .await?;

        tracing::debug!(kind = %self.kind, id = %id, deleted, "Document delete");
        Ok(deleted)
    }
}
