//! Resource services
//!
//! HTTP handlers depend only on [`ResourceService`]; startup registers one
//! [`ServiceHandle`] per kind in a [`ServiceRegistry`].

pub mod handle;
pub mod registry;

pub use handle::{ResourceService, ServiceHandle};
pub use registry::ServiceRegistry;
