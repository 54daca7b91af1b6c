//! The migration pipeline.
//!
//! A strictly ordered sequence of steps; state accumulates in local variables
//! and is never persisted. Cancellation at a load-bearing gate (account, zone,
//! import) exits the whole run as [`CoreError::Cancelled`]; optional steps
//! (cut-over, documentation, transfer prep, ticket) degrade to a recorded
//! skip. No step re-enters an earlier one, and completed steps are left in
//! place on exit because each is individually idempotent or additive.

use std::sync::Arc;

use chrono::Utc;

use dns_migrator_provider::transform;
use dns_migrator_provider::types::{Account, DnsRecord, DnsRecordType, ImportPlan};

use crate::error::{CoreError, CoreResult};
use crate::matching::names_match;
use crate::psa::{DocumentationApi, MigrationAsset, TicketRequest, TicketingApi};
use crate::render;
use crate::traits::{Approver, SourceRegistrar, TargetDnsHost};
use crate::types::{MigrationOptions, MigrationReport, StepOutcome};

/// Suffix of the source registrar's default nameservers. Deviation means DNS
/// is probably managed elsewhere and the fetched records may be stale.
const SOURCE_NS_SUFFIX: &str = "domaincontrol.com";

/// CNAME targets indicating the website itself is hosted at the source
/// registrar and will break when DNS moves.
const HOSTED_SITE_CNAME_SUFFIXES: &[&str] = &["secureserver.net", "godaddysites.com"];

/// Registrar parking / website-builder addresses with the same implication.
const HOSTED_SITE_IPS: &[&str] = &[
    "184.168.131.241",
    "34.102.136.180",
    "76.223.105.230",
    "13.248.243.5",
];

pub struct MigrationService {
    registrar: Arc<dyn SourceRegistrar>,
    dns_host: Arc<dyn TargetDnsHost>,
    approver: Arc<dyn Approver>,
    documentation: Option<Arc<dyn DocumentationApi>>,
    ticketing: Option<Arc<dyn TicketingApi>>,
}

impl MigrationService {
    #[must_use]
    pub fn new(
        registrar: Arc<dyn SourceRegistrar>,
        dns_host: Arc<dyn TargetDnsHost>,
        approver: Arc<dyn Approver>,
        documentation: Option<Arc<dyn DocumentationApi>>,
        ticketing: Option<Arc<dyn TicketingApi>>,
    ) -> Self {
        Self {
            registrar,
            dns_host,
            approver,
            documentation,
            ticketing,
        }
    }

    /// Read-only preview: fetch the source records, log the pre-flight
    /// findings, and return the transformed plan without touching anything.
    pub async fn preview(&self, domain: &str) -> CoreResult<ImportPlan> {
        let records = self.registrar.get_dns_records(domain, None).await?;
        if let Ok(details) = self.registrar.get_domain_details(domain).await {
            if !uses_default_nameservers(&details.name_servers) {
                log::warn!(
                    "{domain} does not use the registrar's default nameservers; \
                     the fetched records may be stale"
                );
            }
        }
        for finding in scan_hosted_site(&records) {
            log::warn!("{domain}: {finding}");
        }
        Ok(transform::plan_import(&records))
    }

    /// Run the full pipeline for one domain.
    pub async fn migrate(&self, options: &MigrationOptions) -> CoreResult<MigrationReport> {
        let domain = &options.domain;
        let mut report = MigrationReport {
            domain: domain.clone(),
            customer_name: options.customer_name.clone(),
            ..MigrationReport::default()
        };

        // Step 1: source of truth. Fatal on error.
        let records = self.registrar.get_dns_records(domain, None).await?;
        report.record_step(StepOutcome::completed(
            "Fetch source records",
            Some(format!("{} record(s)", records.len())),
        ));

        // Step 2: nameserver pre-flight.
        self.preflight_nameservers(domain, &mut report).await?;

        // Step 3: registrar-hosted website pre-flight.
        self.preflight_hosted_site(domain, &records, &mut report)?;

        // Step 4: resolve the target account.
        let account = self.resolve_account(&options.customer_name, &mut report).await?;

        // Step 5: zone creation.
        if !self.approver.confirm(
            &format!(
                "Create zone {domain} under account '{}' ({})?",
                account.name, account.id
            ),
            true,
        )? {
            return Err(CoreError::Cancelled("zone creation declined".into()));
        }
        let zone = self.dns_host.create_zone(&account.id, domain).await?;
        report.zone_name_servers = zone.name_servers.clone();
        report.record_step(StepOutcome::completed(
            "Create zone",
            Some(format!("zone {}", zone.id)),
        ));

        // Step 6: record import. The preview is shown unconditionally before
        // the approval prompt so the operator approves the exact set.
        let plan = transform::plan_import(&records);
        let prompt = format!(
            "{}\nImport {} record(s) into zone {domain}?",
            render::format_plan(&plan),
            plan.records.len()
        );
        if !self.approver.confirm(&prompt, true)? {
            return Err(CoreError::Cancelled("record import declined".into()));
        }
        let import = self.dns_host.import_records(&zone.id, &plan).await;
        report.record_step(StepOutcome::completed(
            "Import records",
            Some(format!(
                "{} created, {} failed",
                import.success_count(),
                import.failed_count()
            )),
        ));
        report.import = Some(import);

        // Step 7: nameserver cut-over. Declining leaves a reminder in the
        // next-steps list instead of aborting the remaining steps.
        self.cutover_nameservers(domain, &zone.name_servers, &mut report)
            .await;

        // Step 8: documentation, best-effort, no approval.
        self.document_migration(options, &account, &zone.id, &zone.name_servers, &mut report)
            .await;

        // Step 9: transfer prep plus an independently approved ticket.
        self.transfer_prep(options, &account, &mut report).await?;

        Ok(report)
    }

    async fn preflight_nameservers(
        &self,
        domain: &str,
        report: &mut MigrationReport,
    ) -> CoreResult<()> {
        let details = self.registrar.get_domain_details(domain).await?;
        if uses_default_nameservers(&details.name_servers) {
            report.record_step(StepOutcome::completed("Nameserver pre-flight", None));
            return Ok(());
        }
        log::warn!(
            "{domain} nameservers deviate from *.{SOURCE_NS_SUFFIX}: {}",
            details.name_servers.join(", ")
        );
        let message = format!(
            "{domain} is not using the registrar's default nameservers ({}). \
             DNS may be managed elsewhere and the fetched records may be stale. Continue?",
            details.name_servers.join(", ")
        );
        if !self.approver.confirm(&message, false)? {
            return Err(CoreError::Cancelled("nameserver pre-flight declined".into()));
        }
        report.record_step(StepOutcome::completed(
            "Nameserver pre-flight",
            Some("deviation acknowledged".into()),
        ));
        Ok(())
    }

    fn preflight_hosted_site(
        &self,
        domain: &str,
        records: &[DnsRecord],
        report: &mut MigrationReport,
    ) -> CoreResult<()> {
        let findings = scan_hosted_site(records);
        if findings.is_empty() {
            report.record_step(StepOutcome::completed("Hosted-site pre-flight", None));
            return Ok(());
        }
        for finding in &findings {
            log::warn!("{domain}: {finding}");
        }
        let message = format!(
            "The website for {domain} appears to be hosted at the source registrar:\n  {}\n\
             Moving DNS may break it. Continue?",
            findings.join("\n  ")
        );
        if !self.approver.confirm(&message, false)? {
            return Err(CoreError::Cancelled("hosted-site pre-flight declined".into()));
        }
        report.record_step(StepOutcome::completed(
            "Hosted-site pre-flight",
            Some(format!("{} finding(s) acknowledged", findings.len())),
        ));
        Ok(())
    }

    async fn resolve_account(
        &self,
        customer_name: &str,
        report: &mut MigrationReport,
    ) -> CoreResult<Account> {
        let accounts = self.dns_host.list_accounts().await?;
        let matched = accounts.iter().find(|a| names_match(&a.name, customer_name));

        let account = if let Some(existing) = matched {
            if self.approver.confirm(
                &format!(
                    "Found existing account '{}' ({}) for customer '{customer_name}'. Use it?",
                    existing.name, existing.id
                ),
                true,
            )? {
                existing.clone()
            } else if self.approver.confirm(
                &format!("Create a new account named '{customer_name}' instead?"),
                false,
            )? {
                self.dns_host.create_account(customer_name).await?
            } else {
                return Err(CoreError::Cancelled("account selection declined".into()));
            }
        } else if self.approver.confirm(
            &format!("No account matches '{customer_name}'. Create one?"),
            true,
        )? {
            self.dns_host.create_account(customer_name).await?
        } else {
            return Err(CoreError::Cancelled("account creation declined".into()));
        };

        report.record_step(StepOutcome::completed(
            "Resolve account",
            Some(format!("'{}' ({})", account.name, account.id)),
        ));
        Ok(account)
    }

    async fn cutover_nameservers(
        &self,
        domain: &str,
        name_servers: &[String],
        report: &mut MigrationReport,
    ) {
        if name_servers.is_empty() {
            report.record_step(StepOutcome::failed(
                "Nameserver cut-over",
                "the zone has no assigned nameservers",
            ));
            return;
        }
        let message = format!(
            "Update the nameservers for {domain} to {} at the registrar? \
             This makes the new zone live.",
            name_servers.join(", ")
        );
        match self.approver.confirm(&message, true) {
            Ok(true) => match self.registrar.set_nameservers(domain, name_servers).await {
                Ok(()) => {
                    report.nameservers_updated = true;
                    report.record_step(StepOutcome::completed("Nameserver cut-over", None));
                }
                Err(e) => {
                    log::error!("Nameserver cut-over for {domain} failed: {e}");
                    report.record_step(StepOutcome::failed("Nameserver cut-over", &e.to_string()));
                }
            },
            Ok(false) => {
                report.record_step(StepOutcome::skipped("Nameserver cut-over", "declined"));
            }
            Err(e) => {
                report.record_step(StepOutcome::failed("Nameserver cut-over", &e.to_string()));
            }
        }
    }

    async fn document_migration(
        &self,
        options: &MigrationOptions,
        account: &Account,
        zone_id: &str,
        name_servers: &[String],
        report: &mut MigrationReport,
    ) {
        let Some(documentation) = &self.documentation else {
            report.record_step(StepOutcome::skipped(
                "Documentation",
                "documentation system not configured",
            ));
            return;
        };

        let result = async {
            let organization = documentation
                .find_organization(&options.customer_name)
                .await?
                .ok_or_else(|| CoreError::PsaError {
                    system: "itglue".into(),
                    message: format!("no organization matches '{}'", options.customer_name),
                })?;
            let asset = MigrationAsset {
                domain: options.domain.clone(),
                provider: "Cloudflare".into(),
                zone_id: zone_id.to_string(),
                account_id: account.id.clone(),
                name_servers: name_servers.to_vec(),
                migration_date: Utc::now().format("%Y-%m-%d").to_string(),
            };
            documentation
                .create_migration_asset(&organization.id, &asset)
                .await?;
            Ok::<String, CoreError>(organization.name)
        }
        .await;

        match result {
            Ok(organization_name) => {
                report.record_step(StepOutcome::completed(
                    "Documentation",
                    Some(format!("recorded under '{organization_name}'")),
                ));
            }
            Err(e) => {
                log::warn!("Documentation step skipped: {e}");
                report.record_step(StepOutcome::skipped("Documentation", &e.to_string()));
            }
        }
    }

    async fn transfer_prep(
        &self,
        options: &MigrationOptions,
        account: &Account,
        report: &mut MigrationReport,
    ) -> CoreResult<()> {
        let domain = &options.domain;
        if options.skip_transfer_prep {
            report.record_step(StepOutcome::skipped("Transfer prep", "disabled by flag"));
            return Ok(());
        }
        if !self.approver.confirm(
            &format!(
                "Prepare {domain} for transfer (unlock, remove privacy, retrieve auth code)?"
            ),
            true,
        )? {
            report.record_step(StepOutcome::skipped("Transfer prep", "declined"));
            return Ok(());
        }

        if let Err(e) = self.registrar.unlock(domain).await {
            log::error!("Unlock of {domain} failed: {e}");
            report.record_step(StepOutcome::failed("Transfer prep", &e.to_string()));
            return Ok(());
        }
        if let Err(e) = self.registrar.remove_privacy(domain).await {
            log::error!("Privacy removal for {domain} failed: {e}");
            report.record_step(StepOutcome::failed("Transfer prep", &e.to_string()));
            return Ok(());
        }
        match self.registrar.get_auth_code(domain).await {
            Ok(code) => report.auth_code = code,
            Err(e) => {
                log::error!("Auth code retrieval for {domain} failed: {e}");
                report.record_step(StepOutcome::failed("Transfer prep", &e.to_string()));
                return Ok(());
            }
        }
        report.transfer_prepared = true;

        // Cache-busting probe so the transfer UI sees the new lock state.
        match self.dns_host.get_registrar_domain(&account.id, domain).await {
            Ok(result) => log::debug!("Registrar cache refreshed for {domain}: {result}"),
            Err(e) => log::warn!("Registrar cache refresh for {domain} failed (non-fatal): {e}"),
        }
        report.record_step(StepOutcome::completed(
            "Transfer prep",
            Some(match &report.auth_code {
                Some(_) => "unlocked, privacy removed, auth code retrieved".into(),
                None => "unlocked, privacy removed; auth code not returned".into(),
            }),
        ));

        self.create_transfer_ticket(options, report).await;
        Ok(())
    }

    /// Ticket creation carries its own approval, independent of the
    /// transfer-prep approval that preceded it.
    async fn create_transfer_ticket(&self, options: &MigrationOptions, report: &mut MigrationReport) {
        let Some(ticketing) = &self.ticketing else {
            report.record_step(StepOutcome::skipped(
                "Transfer ticket",
                "ticketing system not configured",
            ));
            return;
        };

        match self.approver.confirm(
            &format!(
                "Create a PSA ticket to track the transfer of {}?",
                options.domain
            ),
            true,
        ) {
            Ok(true) => {}
            Ok(false) => {
                report.record_step(StepOutcome::skipped("Transfer ticket", "declined"));
                return;
            }
            Err(e) => {
                report.record_step(StepOutcome::failed("Transfer ticket", &e.to_string()));
                return;
            }
        }

        let result = async {
            let company = ticketing
                .find_company(&options.customer_name)
                .await?
                .ok_or_else(|| CoreError::PsaError {
                    system: "connectwise".into(),
                    message: format!("no company matches '{}'", options.customer_name),
                })?;
            let request = TicketRequest {
                company_id: company.id,
                summary: format!("Domain transfer: {}", options.domain),
                description: format!(
                    "DNS for {} has been migrated to Cloudflare. \
                     The domain is unlocked and ready to transfer.",
                    options.domain
                ),
                contact_email: options.ticket_email.clone(),
            };
            ticketing.create_ticket(&request).await
        }
        .await;

        match result {
            Ok(ticket) => {
                report.record_step(StepOutcome::completed(
                    "Transfer ticket",
                    Some(format!("ticket #{}", ticket.id)),
                ));
            }
            Err(e) => {
                log::warn!("Ticket creation skipped: {e}");
                report.record_step(StepOutcome::skipped("Transfer ticket", &e.to_string()));
            }
        }
    }
}

/// Whether every listed nameserver sits under the registrar's default suffix.
/// The match respects label boundaries, so `ns1.notdomaincontrol.com` is a
/// deviation.
fn uses_default_nameservers(name_servers: &[String]) -> bool {
    !name_servers.is_empty()
        && name_servers.iter().all(|ns| {
            let host = ns.trim_end_matches('.').to_lowercase();
            host == SOURCE_NS_SUFFIX
                || host
                    .strip_suffix(SOURCE_NS_SUFFIX)
                    .is_some_and(|rest| rest.ends_with('.'))
        })
}

/// Findings indicating the domain's website is hosted at the source registrar.
fn scan_hosted_site(records: &[DnsRecord]) -> Vec<String> {
    let mut findings = Vec::new();
    for record in records {
        match record.record_type {
            DnsRecordType::Cname => {
                let target = record.data.trim_end_matches('.').to_lowercase();
                if HOSTED_SITE_CNAME_SUFFIXES
                    .iter()
                    .any(|suffix| target.ends_with(suffix))
                {
                    findings.push(format!(
                        "CNAME '{}' points at registrar hosting ({})",
                        record.name, record.data
                    ));
                }
            }
            DnsRecordType::A => {
                if HOSTED_SITE_IPS.contains(&record.data.as_str()) {
                    findings.push(format!(
                        "A record '{}' points at a registrar parking/builder address ({})",
                        record.name, record.data
                    ));
                }
            }
            _ => {}
        }
    }
    findings
}
