//! Migration run options, per-step status, and the final report.

use std::fmt;

use serde::{Deserialize, Serialize};

use dns_migrator_provider::types::ImportReport;

/// Options for one migration run, built once at process start and passed in.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Domain to migrate.
    pub domain: String,
    /// Customer name, matched against the target host's account names.
    pub customer_name: String,
    /// Skip the optional transfer-prep step (unlock, privacy, auth code).
    pub skip_transfer_prep: bool,
    /// Contact email override for the PSA ticket.
    pub ticket_email: Option<String>,
}

/// How one pipeline step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Skipped,
    Failed,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One entry of the report's step log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step name as shown to the operator.
    pub name: String,
    pub status: StepStatus,
    /// Extra context (why skipped, what was created, error text).
    pub detail: Option<String>,
}

impl StepOutcome {
    pub fn completed(name: &str, detail: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Completed,
            detail,
        }
    }

    pub fn skipped(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Skipped,
            detail: Some(reason.to_string()),
        }
    }

    pub fn failed(name: &str, error: &str) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Failed,
            detail: Some(error.to_string()),
        }
    }
}

/// Summary of a migration run.
///
/// `next_steps()` is conditional on what actually happened: reminders only
/// appear for work the run did not already perform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationReport {
    pub domain: String,
    pub customer_name: String,
    pub steps: Vec<StepOutcome>,
    /// Nameservers assigned at zone creation (empty if no zone was created).
    pub zone_name_servers: Vec<String>,
    /// Whether the registrar-side nameserver cut-over was performed.
    pub nameservers_updated: bool,
    /// Record import tally, when the import step ran.
    pub import: Option<ImportReport>,
    /// Transfer auth code, when transfer prep ran and the registrar returned one.
    pub auth_code: Option<String>,
    /// Whether the transfer-prep step completed (unlock + privacy removal).
    pub transfer_prepared: bool,
}

impl MigrationReport {
    pub fn record_step(&mut self, outcome: StepOutcome) {
        self.steps.push(outcome);
    }

    /// Ordered list of manual follow-ups, adjusted to what the run performed.
    #[must_use]
    pub fn next_steps(&self) -> Vec<String> {
        let mut steps = Vec::new();
        if !self.zone_name_servers.is_empty() && !self.nameservers_updated {
            steps.push(format!(
                "Update the nameservers at the registrar to: {}",
                self.zone_name_servers.join(", ")
            ));
        }
        if self.nameservers_updated {
            steps.push(
                "Verify delegation: the zone leaves 'pending' once the new nameservers propagate"
                    .to_string(),
            );
        }
        if let Some(import) = &self.import {
            if import.failed_count() > 0 {
                steps.push(format!(
                    "Re-create the {} failed record(s) manually at the DNS host",
                    import.failed_count()
                ));
            }
        }
        if self.transfer_prepared {
            steps.push(match &self.auth_code {
                Some(_) => {
                    "Initiate the domain transfer using the retrieved auth code".to_string()
                }
                None => "Request the transfer auth code from the registrar support".to_string(),
            });
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nameserver_reminder_omitted_after_cutover() {
        let report = MigrationReport {
            zone_name_servers: vec!["ns1.example.net".into()],
            nameservers_updated: true,
            ..MigrationReport::default()
        };
        let steps = report.next_steps();
        assert!(!steps.iter().any(|s| s.contains("Update the nameservers")));
        assert!(steps.iter().any(|s| s.contains("Verify delegation")));
    }

    #[test]
    fn nameserver_reminder_present_when_cutover_declined() {
        let report = MigrationReport {
            zone_name_servers: vec!["ns1.example.net".into(), "ns2.example.net".into()],
            nameservers_updated: false,
            ..MigrationReport::default()
        };
        let steps = report.next_steps();
        assert!(
            steps
                .iter()
                .any(|s| s.contains("ns1.example.net, ns2.example.net"))
        );
    }

    #[test]
    fn transfer_step_depends_on_auth_code() {
        let mut report = MigrationReport {
            transfer_prepared: true,
            auth_code: Some("EPP-123".into()),
            ..MigrationReport::default()
        };
        assert!(
            report
                .next_steps()
                .iter()
                .any(|s| s.contains("using the retrieved auth code"))
        );
        report.auth_code = None;
        assert!(
            report
                .next_steps()
                .iter()
                .any(|s| s.contains("Request the transfer auth code"))
        );
    }
}
