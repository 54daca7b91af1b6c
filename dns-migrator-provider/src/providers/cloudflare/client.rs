//! Cloudflare account, zone, and record operations.

use crate::error::Result;
use crate::http_client::ErrorContext;
use crate::providers::common::parse_record_type;
use crate::types::{Account, DnsRecord, ImportFailure, ImportPlan, ImportReport, TargetRecord, Zone};

use super::types::{
    AccountRef, CloudflareAccount, CloudflareDnsRecord, CloudflareZone, CreateAccountBody,
    CreateRecordBody, CreateZoneBody,
};
use super::{CloudflareClient, MAX_PAGE_SIZE, MAX_PAGE_SIZE_RECORDS, PROVIDER_NAME};

impl From<CloudflareAccount> for Account {
    fn from(a: CloudflareAccount) -> Self {
        Self {
            id: a.id,
            name: a.name,
            account_type: a.account_type,
        }
    }
}

impl From<CloudflareZone> for Zone {
    fn from(z: CloudflareZone) -> Self {
        Self {
            id: z.id,
            name: z.name,
            account_id: z.account.map(|a| a.id).unwrap_or_default(),
            name_servers: z.name_servers,
            status: z.status,
        }
    }
}

impl CloudflareClient {
    /// List every account the credentials can see.
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut accounts: Vec<Account> = Vec::new();
        let mut page = 1u32;
        loop {
            let path = format!("/accounts?page={page}&per_page={MAX_PAGE_SIZE}");
            let (items, total): (Vec<CloudflareAccount>, u32) =
                self.get_page(&path, &ErrorContext::default()).await?;
            let page_len = items.len();
            accounts.extend(items.into_iter().map(Account::from));
            if page_len < MAX_PAGE_SIZE as usize || accounts.len() as u32 >= total {
                break;
            }
            page += 1;
        }
        log::debug!("[{PROVIDER_NAME}] Listed {} accounts", accounts.len());
        Ok(accounts)
    }

    /// Create a new `standard` account (one per customer).
    pub async fn create_account(&self, name: &str) -> Result<Account> {
        let body = CreateAccountBody {
            name,
            account_type: "standard",
        };
        let created: CloudflareAccount = self
            .post("/accounts", &body, &ErrorContext::default())
            .await?;
        log::info!("[{PROVIDER_NAME}] Created account '{name}' ({})", created.id);
        Ok(created.into())
    }

    /// List zones, optionally scoped to one account.
    pub async fn list_zones(&self, account_id: Option<&str>) -> Result<Vec<Zone>> {
        let scope = account_id.map_or(String::new(), |id| {
            format!("&account.id={}", urlencoding::encode(id))
        });
        let mut zones: Vec<Zone> = Vec::new();
        let mut page = 1u32;
        loop {
            let path = format!("/zones?page={page}&per_page={MAX_PAGE_SIZE}{scope}");
            let (items, total): (Vec<CloudflareZone>, u32) =
                self.get_page(&path, &ErrorContext::default()).await?;
            let page_len = items.len();
            zones.extend(items.into_iter().map(Zone::from));
            if page_len < MAX_PAGE_SIZE as usize || zones.len() as u32 >= total {
                break;
            }
            page += 1;
        }
        Ok(zones)
    }

    /// Create a full (authoritative) zone under the given account.
    ///
    /// The returned zone carries the assigned nameservers, which the
    /// registrar-side cut-over must use verbatim.
    pub async fn create_zone(&self, account_id: &str, domain: &str) -> Result<Zone> {
        let body = CreateZoneBody {
            name: domain,
            account: AccountRef { id: account_id },
            zone_type: "full",
            jump_start: false,
        };
        let created: CloudflareZone = self
            .post("/zones", &body, &ErrorContext::for_domain(domain))
            .await?;
        if created.name_servers.is_empty() {
            log::warn!("[{PROVIDER_NAME}] Zone {domain} was created without assigned nameservers");
        } else {
            log::info!(
                "[{PROVIDER_NAME}] Created zone {domain} ({}), nameservers: {}",
                created.id,
                created.name_servers.join(", ")
            );
        }
        Ok(created.into())
    }

    /// List the DNS records of a zone, mapped into the shared record model.
    ///
    /// Record types outside the model are logged and skipped rather than
    /// failing the listing.
    pub async fn list_dns_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let mut raw: Vec<CloudflareDnsRecord> = Vec::new();
        let mut page = 1u32;
        loop {
            let path = format!(
                "/zones/{}/dns_records?page={page}&per_page={MAX_PAGE_SIZE_RECORDS}",
                urlencoding::encode(zone_id)
            );
            let (items, total): (Vec<CloudflareDnsRecord>, u32) =
                self.get_page(&path, &ErrorContext::default()).await?;
            let page_len = items.len();
            raw.extend(items);
            if page_len < MAX_PAGE_SIZE_RECORDS as usize || raw.len() as u32 >= total {
                break;
            }
            page += 1;
        }

        let mut records = Vec::with_capacity(raw.len());
        for r in raw {
            match parse_record_type(&r.record_type, PROVIDER_NAME) {
                Ok(record_type) => records.push(DnsRecord {
                    record_type,
                    name: r.name,
                    data: r.content,
                    ttl: r.ttl,
                    priority: r.priority,
                }),
                Err(_) => {
                    log::warn!(
                        "[{PROVIDER_NAME}] Skipping record '{}' with unsupported type {}",
                        r.name,
                        r.record_type
                    );
                }
            }
        }
        Ok(records)
    }

    /// Create one DNS record from the transformed import set.
    pub async fn create_dns_record(
        &self,
        zone_id: &str,
        record: &TargetRecord,
    ) -> Result<()> {
        let context = ErrorContext {
            domain: None,
            record_name: Some(record.name.clone()),
        };
        let body = CreateRecordBody::from_target(record);
        let path = format!("/zones/{}/dns_records", urlencoding::encode(zone_id));
        let _created: serde_json::Value = self.post(&path, &body, &context).await?;
        Ok(())
    }

    /// Submit a transformed import plan record-by-record.
    ///
    /// Each failure is isolated into the report tally; one bad record never
    /// aborts the batch. The plan's skipped rows are copied through so the
    /// final summary accounts for every source record.
    pub async fn import_records(&self, zone_id: &str, plan: &ImportPlan) -> ImportReport {
        let mut report = ImportReport {
            skipped: plan.skipped.clone(),
            ..ImportReport::default()
        };
        for record in &plan.records {
            match self.create_dns_record(zone_id, record).await {
                Ok(()) => {
                    log::info!(
                        "[{PROVIDER_NAME}] Created {} record '{}'",
                        record.record_type,
                        record.name
                    );
                    report.created.push(record.clone());
                }
                Err(e) => {
                    log::warn!(
                        "[{PROVIDER_NAME}] Failed to create {} record '{}': {e}",
                        record.record_type,
                        record.name
                    );
                    report.failures.push(ImportFailure {
                        record_type: record.record_type,
                        name: record.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        log::info!(
            "[{PROVIDER_NAME}] Import finished: {} created, {} failed, {} skipped",
            report.success_count(),
            report.failed_count(),
            report.skipped.len()
        );
        report
    }

    /// Fetch the registrar view of a domain.
    ///
    /// The read itself is the point: it refreshes Cloudflare's cached WHOIS
    /// state so the transfer UI reflects a just-performed unlock. Callers log
    /// the result and treat failure as non-fatal.
    pub async fn get_registrar_domain(
        &self,
        account_id: &str,
        domain: &str,
    ) -> Result<serde_json::Value> {
        let path = format!(
            "/accounts/{}/registrar/domains/{}",
            urlencoding::encode(account_id),
            urlencoding::encode(domain)
        );
        self.get(&path, &ErrorContext::for_domain(domain)).await
    }
}
