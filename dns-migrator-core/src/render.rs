//! Human-readable rendering of plans and reports.
//!
//! The tool has no machine-readable output mode; these strings are the whole
//! user-facing surface, shared by the preview command and the import approval
//! prompt so the operator approves exactly what will be submitted.

use dns_migrator_provider::types::ImportPlan;

use crate::types::MigrationReport;

/// Render an import plan: every record to submit plus every exclusion with
/// its reason.
#[must_use]
pub fn format_plan(plan: &ImportPlan) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Import plan: {} record(s) to create, {} excluded\n",
        plan.records.len(),
        plan.skipped.len()
    ));
    for record in &plan.records {
        let extras = match (&record.priority, &record.srv) {
            (Some(p), _) => format!(" priority={p}"),
            (None, Some(srv)) => format!(
                " srv={}:{} -> {}:{}",
                srv.service, srv.proto, srv.target, srv.port
            ),
            _ => String::new(),
        };
        out.push_str(&format!(
            "  + {:5} {:30} {} (ttl={}){extras}\n",
            record.record_type.as_str(),
            record.name,
            record.content,
            record.ttl
        ));
    }
    for skipped in &plan.skipped {
        out.push_str(&format!(
            "  - {:5} {:30} excluded: {}\n",
            skipped.record_type.as_str(),
            skipped.name,
            skipped.reason
        ));
    }
    out
}

/// Render the final migration summary with the conditional next-steps list.
#[must_use]
pub fn format_report(report: &MigrationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\nMigration summary for {} ({})\n",
        report.domain, report.customer_name
    ));
    for step in &report.steps {
        match &step.detail {
            Some(detail) => out.push_str(&format!("  [{}] {}: {detail}\n", step.status, step.name)),
            None => out.push_str(&format!("  [{}] {}\n", step.status, step.name)),
        }
    }
    if let Some(import) = &report.import {
        out.push_str(&format!(
            "  Records: {} created, {} failed, {} skipped\n",
            import.success_count(),
            import.failed_count(),
            import.skipped.len()
        ));
    }
    if let Some(code) = &report.auth_code {
        out.push_str(&format!("  Transfer auth code: {code}\n"));
    }
    let next = report.next_steps();
    if !next.is_empty() {
        out.push_str("\nNext steps:\n");
        for (i, step) in next.iter().enumerate() {
            out.push_str(&format!("  {}. {step}\n", i + 1));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dns_migrator_provider::types::{DnsRecordType, SkippedRecord, TargetRecord};

    #[test]
    fn plan_lists_exclusions_with_reasons() {
        let plan = ImportPlan {
            records: vec![TargetRecord {
                record_type: DnsRecordType::A,
                name: "www".into(),
                content: "203.0.113.7".into(),
                ttl: 1,
                priority: None,
                proxied: Some(false),
                srv: None,
            }],
            skipped: vec![SkippedRecord {
                record_type: DnsRecordType::Ns,
                name: "@".into(),
                reason: "nameserver records are not transferred".into(),
            }],
        };
        let text = format_plan(&plan);
        assert!(text.contains("1 record(s) to create, 1 excluded"));
        assert!(text.contains("+ A"));
        assert!(text.contains("excluded: nameserver records are not transferred"));
    }
}
