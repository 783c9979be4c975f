//! External system integrations for BizzSummit.
//!
//! - [`store`] - Document store abstraction (trait-based)
//! - [`cosmosdb`] - Azure Cosmos DB implementation
//! - [`memory`] - In-process implementation
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the startup
//! flow and the HTTP handlers can be tested against the in-memory store.
//!
//! ```rust,no_run
//! use bizzsummit::adapters::store::create_store_connector;
//! use bizzsummit::config::StoreTarget;
//!
//! let connector = create_store_connector(StoreTarget::CosmosDB);
//! // connector.connect(&descriptor) builds one client per resource kind
//! ```

pub mod cosmosdb;
pub mod memory;
pub mod store;
