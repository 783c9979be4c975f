//! Provisioning outcomes and the startup report

use crate::domain::{ResourceKind, StartupError};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// What provisioning one resource kind did
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    /// Resource kind
    pub kind: ResourceKind,

    /// Database name
    pub database_name: String,

    /// Container name
    pub container_name: String,

    /// Whether the database was created (false when already present)
    pub database_created: bool,

    /// Whether the container was created (false when already present)
    pub container_created: bool,

    /// Attempts used, including the first
    pub attempts: u32,

    /// Time spent across all attempts
    pub duration: Duration,

    /// Final error, if provisioning failed
    pub error: Option<StartupError>,
}

impl ProvisionOutcome {
    /// Check if provisioning succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-kind outcomes of one startup
#[derive(Debug, Clone)]
pub struct StartupReport {
    /// When startup began
    pub started_at: DateTime<Utc>,

    /// One outcome per provisioned kind
    pub outcomes: Vec<ProvisionOutcome>,

    /// Total startup duration
    pub duration: Duration,
}

impl StartupReport {
    /// Create an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            outcomes: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an outcome
    pub fn add_outcome(&mut self, outcome: ProvisionOutcome) {
        self.outcomes.push(outcome);
    }

    /// Check if every kind was provisioned
    pub fn is_successful(&self) -> bool {
        self.outcomes.iter().all(ProvisionOutcome::is_success)
    }

    /// Errors of the kinds that failed
    pub fn failures(&self) -> Vec<StartupError> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error.clone())
            .collect()
    }

    /// Outcome for `kind`
    pub fn outcome(&self, kind: ResourceKind) -> Option<&ProvisionOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }

    /// Log every outcome, then the summary
    pub fn log_summary(&self) {
        for outcome in &self.outcomes {
            match &outcome.error {
                None => crate::log_provision_outcome!(
                    outcome.kind,
                    outcome.database_name,
                    outcome.container_name,
                    outcome.container_created,
                    outcome.attempts
                ),
                Some(error) => tracing::error!(
                    kind = %outcome.kind,
                    database = %outcome.database_name,
                    container = %outcome.container_name,
                    attempts = outcome.attempts,
                    error = %error,
                    "Resource kind provisioning failed"
                ),
            }
        }

        tracing::info!(
            started_at = %self.started_at.to_rfc3339(),
            kinds = self.outcomes.len(),
            failed = self.outcomes.iter().filter(|o| !o.is_success()).count(),
            duration_ms = self.duration.as_millis() as u64,
            "Provisioning finished"
        );
    }
}

impl Default for StartupReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(kind: ResourceKind, error: Option<StartupError>) -> ProvisionOutcome {
        ProvisionOutcome {
            kind,
            database_name: "db".to_string(),
            container_name: kind.as_str().to_string(),
            database_created: false,
            container_created: true,
            attempts: 1,
            duration: Duration::from_millis(5),
            error,
        }
    }

    #[test]
    fn test_report_success() {
        let mut report = StartupReport::new();
        for kind in ResourceKind::ALL {
            report.add_outcome(outcome(kind, None));
        }
        assert!(report.is_successful());
        assert!(report.failures().is_empty());
        assert!(report.outcome(ResourceKind::Projects).is_some());
    }

    #[test]
    fn test_report_collects_failures() {
        let mut report = StartupReport::new();
        report.add_outcome(outcome(ResourceKind::Bookings, None));
        report.add_outcome(outcome(
            ResourceKind::Resources,
            Some(StartupError::TimedOut {
                kind: ResourceKind::Resources,
                seconds: 30,
            }),
        ));

        let report = report.with_duration(Duration::from_secs(1));
        assert!(!report.is_successful());
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.failures()[0].kind(), ResourceKind::Resources);
        report.log_summary();
    }
}
