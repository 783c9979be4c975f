//! Resource kinds and their store descriptors
//!
//! Every resource kind the API manages is backed by its own container in
//! the document store. A [`ResourceDescriptor`] pins down where that
//! container lives and which credentials reach it.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Partition key path used for every container
pub const PARTITION_KEY_PATH: &str = "/id";

/// Resource kinds exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Bookings,
    Projects,
    Resources,
}

impl ResourceKind {
    /// All kinds, in provisioning order
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Bookings,
        ResourceKind::Projects,
        ResourceKind::Resources,
    ];

    /// Name of the `CosmosDb` configuration key holding this kind's container
    pub fn container_key(self) -> &'static str {
        match self {
            Self::Bookings => "BookingsContainer",
            Self::Projects => "ProjectsContainer",
            Self::Resources => "ResourcesContainer",
        }
    }

    /// URL path segment under `/api`
    pub fn route_segment(self) -> &'static str {
        match self {
            Self::Bookings => "bookings",
            Self::Projects => "projects",
            Self::Resources => "resources",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bookings => "Bookings",
            Self::Projects => "Projects",
            Self::Resources => "Resources",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bookings" => Ok(Self::Bookings),
            "projects" => Ok(Self::Projects),
            "resources" => Ok(Self::Resources),
            other => Err(format!(
                "Unknown resource kind '{other}'. Must be one of: bookings, projects, resources"
            )),
        }
    }
}

/// Where one resource kind's documents live
///
/// Resolved once from configuration and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub database_name: String,
    pub container_name: String,
    /// Store account endpoint
    pub account: String,
    /// Store account key
    pub key: SecretString,
}

impl ResourceDescriptor {
    /// Partition key path for this descriptor's container
    pub fn partition_key(&self) -> &'static str {
        PARTITION_KEY_PATH
    }
}
