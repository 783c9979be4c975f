//! Document store abstraction layer
//!
//! Resource services talk to the store only through [`DocumentStore`];
//! startup obtains clients through a [`StoreConnector`].

pub mod factory;
pub mod traits;

pub use factory::create_store_connector;
pub use traits::{ContainerInfo, DatabaseRef, DocumentStore, StoreConnector};
