//! Target DNS host abstraction.

use async_trait::async_trait;

use dns_migrator_provider::CloudflareClient;
use dns_migrator_provider::types::{Account, DnsRecord, ImportPlan, ImportReport, Zone};

use crate::error::CoreResult;

/// Operations the orchestrator needs from the gaining DNS host.
#[async_trait]
pub trait TargetDnsHost: Send + Sync {
    async fn list_accounts(&self) -> CoreResult<Vec<Account>>;

    async fn create_account(&self, name: &str) -> CoreResult<Account>;

    async fn list_zones(&self, account_id: Option<&str>) -> CoreResult<Vec<Zone>>;

    /// Create a zone; the result carries the assigned nameservers, the
    /// hand-off value for the registrar-side cut-over.
    async fn create_zone(&self, account_id: &str, domain: &str) -> CoreResult<Zone>;

    async fn list_dns_records(&self, zone_id: &str) -> CoreResult<Vec<DnsRecord>>;

    /// Best-effort record-by-record import; per-record failures live in the
    /// report, never in an `Err`.
    async fn import_records(&self, zone_id: &str, plan: &ImportPlan) -> ImportReport;

    /// Registrar-cache refresh probe; callers log the result and continue on
    /// failure.
    async fn get_registrar_domain(
        &self,
        account_id: &str,
        domain: &str,
    ) -> CoreResult<serde_json::Value>;
}

#[async_trait]
impl TargetDnsHost for CloudflareClient {
    async fn list_accounts(&self) -> CoreResult<Vec<Account>> {
        Ok(Self::list_accounts(self).await?)
    }

    async fn create_account(&self, name: &str) -> CoreResult<Account> {
        Ok(Self::create_account(self, name).await?)
    }

    async fn list_zones(&self, account_id: Option<&str>) -> CoreResult<Vec<Zone>> {
        Ok(Self::list_zones(self, account_id).await?)
    }

    async fn create_zone(&self, account_id: &str, domain: &str) -> CoreResult<Zone> {
        Ok(Self::create_zone(self, account_id, domain).await?)
    }

    async fn list_dns_records(&self, zone_id: &str) -> CoreResult<Vec<DnsRecord>> {
        Ok(Self::list_dns_records(self, zone_id).await?)
    }

    async fn import_records(&self, zone_id: &str, plan: &ImportPlan) -> ImportReport {
        Self::import_records(self, zone_id, plan).await
    }

    async fn get_registrar_domain(
        &self,
        account_id: &str,
        domain: &str,
    ) -> CoreResult<serde_json::Value> {
        Ok(Self::get_registrar_domain(self, account_id, domain).await?)
    }
}
