//! Store provisioning
//!
//! - [`Provisioner`] - Ensures one kind's database and container exist
//! - [`ProvisionOutcome`] / [`StartupReport`] - What provisioning did

pub mod provisioner;
pub mod report;

pub use provisioner::Provisioner;
pub use report::{ProvisionOutcome, StartupReport};
