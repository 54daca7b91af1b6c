//! GoDaddy domain and DNS operations.

use std::time::Duration;

use crate::error::{ProviderError, Result};
use crate::http_client::ErrorContext;
use crate::providers::common::parse_record_type;
use crate::types::{DnsRecord, DnsRecordType, DomainDetails, DomainSummary};

use super::types::{GodaddyDnsRecord, GodaddyDomainSummary, SetNameserversBody, UnlockBody};
use super::{GodaddyClient, PROVIDER_NAME};

/// Attempts for the unlock PATCH. HTTP 422 here is, empirically, a transient
/// "nameserver change still settling" condition — this is observed behavior,
/// not a documented vendor contract, and is deliberately not generalized to
/// any other endpoint.
const UNLOCK_MAX_ATTEMPTS: u32 = 3;
/// Fixed delay between unlock attempts.
const UNLOCK_RETRY_DELAY: Duration = Duration::from_secs(30);

impl GodaddyClient {
    /// List all domains in the account.
    ///
    /// Terminal statuses (`CANCELLED`, `TRANSFERRED_OUT`, ...) are included;
    /// callers filter them with [`DomainSummary::is_terminal`].
    pub async fn list_domains(&self) -> Result<Vec<DomainSummary>> {
        let rows: Vec<GodaddyDomainSummary> = self
            .get("/domains?limit=1000", &ErrorContext::default())
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| DomainSummary {
                domain: r.domain,
                status: r.status,
                expires: r.expires,
            })
            .collect())
    }

    /// Fetch the DNS records for a domain, optionally filtered by type.
    ///
    /// A 404 means the domain's DNS is not hosted here and surfaces as
    /// [`ProviderError::DomainNotFound`] so the caller can explain that rather
    /// than fail generically. Record types this tool does not handle are
    /// skipped with a warning.
    pub async fn get_dns_records(
        &self,
        domain: &str,
        record_type: Option<DnsRecordType>,
    ) -> Result<Vec<DnsRecord>> {
        let path = match record_type {
            Some(t) => format!("/domains/{domain}/records/{t}"),
            None => format!("/domains/{domain}/records"),
        };
        let rows: Vec<GodaddyDnsRecord> =
            self.get(&path, &ErrorContext::for_domain(domain)).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match parse_record_type(&row.record_type, PROVIDER_NAME) {
                Ok(record_type) => records.push(DnsRecord {
                    record_type,
                    name: row.name,
                    data: row.data,
                    ttl: row.ttl,
                    priority: row.priority,
                }),
                Err(_) => {
                    log::warn!(
                        "[{PROVIDER_NAME}] Ignoring unsupported {} record '{}' on {domain}",
                        row.record_type,
                        row.name
                    );
                }
            }
        }
        Ok(records)
    }

    /// Fetch registrar-side details for a domain.
    pub async fn get_domain_details(&self, domain: &str) -> Result<DomainDetails> {
        self.get(
            &format!("/domains/{domain}"),
            &ErrorContext::for_domain(domain),
        )
        .await
    }

    /// Replace the domain's delegated nameservers.
    ///
    /// The PATCH is a full replace: the complete new set is sent, never an
    /// append.
    pub async fn set_nameservers(&self, domain: &str, name_servers: &[String]) -> Result<()> {
        log::info!("[{PROVIDER_NAME}] Updating nameservers for {domain} to {name_servers:?}");
        self.patch(
            &format!("/domains/{domain}"),
            &SetNameserversBody { name_servers },
            &ErrorContext::for_domain(domain),
        )
        .await
    }

    /// Remove the registrar transfer lock.
    ///
    /// Read-modify-write: the current nameservers, auto-renew flag and
    /// subaccount are fetched first because the PATCH payload requires them.
    /// If the domain is already unlocked this performs zero write calls.
    /// Retries [`UNLOCK_MAX_ATTEMPTS`] times with a fixed delay, but only on
    /// HTTP 422 (`TransientConflict`); any other failure is immediate.
    pub async fn unlock(&self, domain: &str) -> Result<()> {
        let details = self.get_domain_details(domain).await?;
        let Some(body) = unlock_body(&details) else {
            log::info!("[{PROVIDER_NAME}] {domain} is already unlocked");
            return Ok(());
        };
        let context = ErrorContext::for_domain(domain);
        let path = format!("/domains/{domain}");

        let mut attempt = 1;
        loop {
            match self.patch(&path, &body, &context).await {
                Ok(()) => {
                    log::info!("[{PROVIDER_NAME}] {domain} unlocked");
                    return Ok(());
                }
                Err(e) => match unlock_retry_delay(&e, attempt) {
                    Some(delay) => {
                        log::warn!(
                            "[{PROVIDER_NAME}] Unlock of {domain} hit a conflict \
                             (attempt {attempt}/{UNLOCK_MAX_ATTEMPTS}), retrying in {}s: {e}",
                            delay.as_secs()
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => {
                        if matches!(e, ProviderError::TransientConflict { .. }) {
                            log::error!(
                                "[{PROVIDER_NAME}] Could not unlock {domain}: the domain may be \
                                 inside its 60-day registration/transfer protection window, or \
                                 the TLD may not allow unlocking via the API"
                            );
                        }
                        return Err(e);
                    }
                },
            }
        }
    }

    /// Remove WHOIS privacy. Idempotent: no privacy to remove is success.
    pub async fn remove_privacy(&self, domain: &str) -> Result<()> {
        let details = self.get_domain_details(domain).await?;
        if !details.privacy {
            log::info!("[{PROVIDER_NAME}] {domain} has no privacy to remove");
            return Ok(());
        }
        log::info!("[{PROVIDER_NAME}] Removing domain privacy for {domain}");
        self.delete(
            &format!("/domains/{domain}/privacy"),
            &ErrorContext::for_domain(domain),
            true,
        )
        .await
    }

    /// Fetch the transfer auth (EPP) code.
    ///
    /// An absent code is a valid outcome, not an error — some TLDs only issue
    /// it out-of-band. Warns and returns `None` so callers fall back to the
    /// manual path.
    pub async fn get_auth_code(&self, domain: &str) -> Result<Option<String>> {
        let details = self.get_domain_details(domain).await?;
        if details.auth_code.is_none() {
            log::warn!(
                "[{PROVIDER_NAME}] No auth code available for {domain}; \
                 it must be requested through the registrar control panel"
            );
        }
        Ok(details.auth_code)
    }
}

/// The unlock PATCH body, or `None` when the domain is already unlocked and
/// no write should happen. The payload re-sends the current nameservers,
/// auto-renew flag and subaccount because the endpoint requires them.
fn unlock_body(details: &DomainDetails) -> Option<UnlockBody<'_>> {
    if !details.locked {
        return None;
    }
    Some(UnlockBody {
        locked: false,
        name_servers: &details.name_servers,
        renew_auto: details.renew_auto,
        subaccount_id: details.subaccount_id.as_deref(),
    })
}

/// Delay before the next unlock attempt, or `None` to stop retrying. Only a
/// 422 conflict is retried, and only while attempts remain.
fn unlock_retry_delay(error: &ProviderError, attempt: u32) -> Option<Duration> {
    if attempt < UNLOCK_MAX_ATTEMPTS && matches!(error, ProviderError::TransientConflict { .. }) {
        Some(UNLOCK_RETRY_DELAY)
    } else {
        None
    }
}
