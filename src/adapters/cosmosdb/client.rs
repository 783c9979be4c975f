//! Cosmos DB client implementation
//!
//! This module provides the [`DocumentStore`] backed by Azure Cosmos DB.

use crate::adapters::store::{ContainerInfo, DatabaseRef, DocumentStore};
use crate::config::SecretString;
use crate::domain::{CosmosDbError, Result, SummitError};
use async_trait::async_trait;
use azure_core::credentials::Secret;
use azure_core::error::ErrorKind;
use azure_core::http::{ClientOptions, RetryOptions, StatusCode};
use azure_data_cosmos::models::{
    ContainerProperties, IndexingPolicy, PartitionKeyDefinition, PartitionKeyKind,
};
use azure_data_cosmos::{CosmosClient, CosmosClientOptions, PartitionKey};
use serde_json::Value;
use std::borrow::Cow;

/// Cosmos DB client for BizzSummit
///
/// One client is built per resource kind from that kind's descriptor.
pub struct CosmosDbClient {
    /// Cosmos DB client
    client: CosmosClient,

    /// Account endpoint
    account: String,
}

impl std::fmt::Debug for CosmosDbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosDbClient")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl CosmosDbClient {
    /// Create a new Cosmos DB client with key authentication
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created (malformed endpoint).
    pub fn new(account: &str, key: &SecretString) -> Result<Self> {
        use secrecy::ExposeSecret;

        // Convert our SecretString to Azure's Secret type
        let key_str: String = key.expose_secret().clone().into();
        // Retries belong to the provisioner, which bounds each attempt
        let options = Some(CosmosClientOptions {
            client_options: ClientOptions {
                retry: RetryOptions::none(),
                ..Default::default()
            },
        });

        let client = CosmosClient::with_key(account, Secret::new(key_str), options).map_err(|e| {
            SummitError::CosmosDb(CosmosDbError::ConnectionFailed(format!(
                "Failed to create Cosmos client for {account}: {e}"
            )))
        })?;

        Ok(Self {
            client,
            account: account.to_string(),
        })
    }

    fn partition_key_definition(path: &str) -> PartitionKeyDefinition {
        PartitionKeyDefinition {
            paths: vec![path.to_string()],
            kind: PartitionKeyKind::Hash,
            version: None,
        }
    }
}

#[async_trait]
impl DocumentStore for CosmosDbClient {
    fn account(&self) -> &str {
        &self.account
    }

    async fn ensure_database(&self, name: &str) -> Result<DatabaseRef> {
        let database = self.client.database_client(name);

        match database.read(None).await {
            Ok(_) => {
                tracing::debug!(database = %name, "Database already exists");
                return Ok(DatabaseRef {
                    name: name.to_string(),
                    created: false,
                });
            }
            Err(e) if !is_not_found(&e) => {
                return Err(classify(
                    &e,
                    &format!("Failed to read database {name}"),
                    CosmosDbError::DatabaseCreationFailed,
                ));
            }
            Err(_) => {}
        }

        tracing::info!(database = %name, "Creating database");
        match self.client.create_database(name, None).await {
            Ok(_) => {
                tracing::info!(database = %name, "Database created successfully");
                Ok(DatabaseRef {
                    name: name.to_string(),
                    created: true,
                })
            }
            Err(e) if is_conflict(&e) => {
                tracing::debug!(database = %name, "Database created concurrently");
                Ok(DatabaseRef {
                    name: name.to_string(),
                    created: false,
                })
            }
            Err(e) => Err(classify(
                &e,
                &format!("Failed to create database {name}"),
                CosmosDbError::DatabaseCreationFailed,
            )),
        }
    }

    async fn ensure_container(
        &self,
        database: &DatabaseRef,
        name: &str,
        partition_key: &str,
    ) -> Result<ContainerInfo> {
        let database_client = self.client.database_client(&database.name);
        let container = database_client.container_client(name);
        let info = |created| ContainerInfo {
            name: name.to_string(),
            partition_key: partition_key.to_string(),
            created,
        };

        match container.read(None).await {
            Ok(_) => {
                tracing::debug!(container = %name, "Container already exists");
                return Ok(info(false));
            }
            Err(e) if !is_not_found(&e) => {
                return Err(classify(
                    &e,
                    &format!("Failed to read container {name}"),
                    CosmosDbError::ContainerCreationFailed,
                ));
            }
            Err(_) => {}
        }

        tracing::info!(container = %name, partition_key = %partition_key, "Creating container");

        let properties = ContainerProperties {
            id: Cow::Owned(name.to_string()),
            partition_key: Self::partition_key_definition(partition_key),
            indexing_policy: Some(IndexingPolicy::default()),
            ..Default::default()
        };

        match database_client.create_container(properties, None).await {
            Ok(_) => {
                tracing::info!(container = %name, "Container created successfully");
                Ok(info(true))
            }
            Err(e) if is_conflict(&e) => {
                tracing::debug!(container = %name, "Container created concurrently");
                Ok(info(false))
            }
            Err(e) => Err(classify(
                &e,
                &format!("Failed to create container {name}"),
                CosmosDbError::ContainerCreationFailed,
            )),
        }
    }

    async fn read_item(&self, database: &str, container: &str, id: &str) -> Result<Option<Value>> {
        let container = self
            .client
            .database_client(database)
            .container_client(container);

        match container
            .read_item::<Value>(PartitionKey::from(id.to_string()), id, None)
            .await
        {
            Ok(response) => {
                let document = response.into_body().map_err(|e| {
                    SummitError::CosmosDb(CosmosDbError::DeserializationFailed(format!(
                        "Failed to deserialize document {id}: {e}"
                    )))
                })?;
                Ok(Some(document))
            }
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(classify(
                &e,
                &format!("Failed to read document {id}"),
                CosmosDbError::ReadFailed,
            )),
        }
    }

    async fn upsert_item(
        &self,
        database: &str,
        container: &str,
        id: &str,
        document: &Value,
    ) -> Result<()> {
        let container = self
            .client
            .database_client(database)
            .container_client(container);

        container
            .upsert_item(PartitionKey::from(id.to_string()), document, None)
            .await
            .map_err(|e| {
                classify(
                    &e,
                    &format!("Failed to write document {id}"),
                    CosmosDbError::WriteFailed,
                )
            })?;

        Ok(())
    }

    async fn delete_item(&self, database: &str, container: &str, id: &str) -> Result<bool> {
        let container = self
            .client
            .database_client(database)
            .container_client(container);

        match container
            .delete_item(PartitionKey::from(id.to_string()), id, None)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(classify(
                &e,
                &format!("Failed to delete document {id}"),
                CosmosDbError::DeleteFailed,
            )),
        }
    }
}

/// How a failed Cosmos DB call is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    NotFound,
    Conflict,
    Auth,
    Connection,
    Other,
}

/// Classify an SDK error by its kind, then by the kinds of its sources
///
/// The SDK wraps transport errors ("retry policy expired ...") without
/// changing their kind, so the message text is never inspected.
fn failure_of(error: &azure_core::Error) -> Failure {
    let mut failure = failure_of_kind(error.kind());
    let mut source = std::error::Error::source(error);

    while failure == Failure::Other {
        let Some(cause) = source else { break };
        if let Some(inner) = cause.downcast_ref::<azure_core::Error>() {
            failure = failure_of_kind(inner.kind());
        } else if cause.downcast_ref::<std::io::Error>().is_some() {
            failure = Failure::Connection;
        }
        source = cause.source();
    }

    failure
}

fn failure_of_kind(kind: &ErrorKind) -> Failure {
    match kind {
        ErrorKind::HttpResponse { status, .. } => match *status {
            StatusCode::NotFound => Failure::NotFound,
            StatusCode::Conflict => Failure::Conflict,
            StatusCode::Unauthorized | StatusCode::Forbidden => Failure::Auth,
            _ => Failure::Other,
        },
        ErrorKind::Credential => Failure::Auth,
        ErrorKind::Io => Failure::Connection,
        _ => Failure::Other,
    }
}

fn is_not_found(error: &azure_core::Error) -> bool {
    failure_of(error) == Failure::NotFound
}

fn is_conflict(error: &azure_core::Error) -> bool {
    failure_of(error) == Failure::Conflict
}

/// Map an SDK error onto a [`CosmosDbError`]
///
/// Credential and transport failures get their own variants; everything
/// else is wrapped by `other`.
fn classify(
    error: &azure_core::Error,
    context: &str,
    other: fn(String) -> CosmosDbError,
) -> SummitError {
    let message = format!("{context}: {error}");
    let error = match failure_of(error) {
        Failure::Auth => CosmosDbError::AuthenticationFailed(message),
        Failure::Connection => CosmosDbError::ConnectionFailed(message),
        _ => other(message),
    };
    SummitError::CosmosDb(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::{ResourceKind, StartupError};

    #[test]
    fn test_new_does_not_contact_account() {
        let key = secret_string("dGVzdC1rZXk=".to_string());
        let client = CosmosDbClient::new("https://test.documents.azure.com:443/", &key).unwrap();
        assert_eq!(client.account(), "https://test.documents.azure.com:443/");
        assert!(!format!("{client:?}").contains("dGVzdC1rZXk"));
    }

    fn http_error(status: StatusCode) -> azure_core::Error {
        azure_core::Error::with_message(
            ErrorKind::HttpResponse {
                status,
                error_code: None,
                raw_response: None,
            },
            "request failed",
        )
    }

    #[test]
    fn test_status_matchers() {
        assert!(is_not_found(&http_error(StatusCode::NotFound)));
        assert!(is_conflict(&http_error(StatusCode::Conflict)));
        assert!(!is_conflict(&http_error(StatusCode::NotFound)));
        assert!(!is_not_found(&http_error(StatusCode::InternalServerError)));
    }

    #[test]
    fn test_classify_auth_failure() {
        for status in [StatusCode::Unauthorized, StatusCode::Forbidden] {
            let err = classify(
                &http_error(status),
                "Failed to read container Bookings",
                CosmosDbError::ContainerCreationFailed,
            );
            assert!(matches!(
                err,
                SummitError::CosmosDb(CosmosDbError::AuthenticationFailed(_))
            ));
        }
    }

    #[test]
    fn test_classify_expired_transport_retry_as_connection_failure() {
        let transport = azure_core::Error::with_message(
            ErrorKind::Io,
            "failed to execute `reqwest` request",
        )
        .with_context("retry policy expired and the request will no longer be retried");

        let err = classify(
            &transport,
            "Failed to read database BizzSummit",
            CosmosDbError::DatabaseCreationFailed,
        );
        assert!(matches!(
            err,
            SummitError::CosmosDb(CosmosDbError::ConnectionFailed(_))
        ));
    }

    #[test]
    fn test_classify_walks_error_sources() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let wrapped = azure_core::Error::new(ErrorKind::Other, refused);
        assert_eq!(failure_of(&wrapped), Failure::Connection);

        let inner = http_error(StatusCode::Unauthorized);
        let wrapped = azure_core::Error::with_error(ErrorKind::Other, inner, "pipeline failed");
        assert_eq!(failure_of(&wrapped), Failure::Auth);
    }

    #[test]
    fn test_classify_falls_back_to_operation_error() {
        let err = classify(
            &http_error(StatusCode::BadRequest),
            "Failed to write document b-1",
            CosmosDbError::WriteFailed,
        );
        assert!(matches!(err, SummitError::CosmosDb(CosmosDbError::WriteFailed(_))));

        let err = classify(
            &azure_core::Error::with_message(ErrorKind::DataConversion, "bad json"),
            "Failed to read document b-1",
            CosmosDbError::ReadFailed,
        );
        assert!(matches!(err, SummitError::CosmosDb(CosmosDbError::ReadFailed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_connection_failure() {
        let key = secret_string("dGVzdC1rZXk=".to_string());
        let client = CosmosDbClient::new("https://127.0.0.1:1/", &key).unwrap();

        let err = client.ensure_database("BizzSummit").await.unwrap_err();

        assert!(matches!(
            err,
            SummitError::CosmosDb(CosmosDbError::ConnectionFailed(_))
        ));
        let startup = StartupError::from_store_error(ResourceKind::Bookings, &err);
        assert!(matches!(startup, StartupError::NetworkUnreachable { .. }));
        assert!(startup.is_transient());
    }
}
