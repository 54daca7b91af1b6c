//! Source registrar abstraction.

use async_trait::async_trait;

use dns_migrator_provider::GodaddyClient;
use dns_migrator_provider::types::{DnsRecord, DnsRecordType, DomainDetails, DomainSummary};

use crate::error::CoreResult;

/// Operations the orchestrator needs from the losing registrar.
///
/// The production implementation is the GoDaddy client; tests substitute a
/// scripted mock so the pipeline runs without a network.
#[async_trait]
pub trait SourceRegistrar: Send + Sync {
    async fn list_domains(&self) -> CoreResult<Vec<DomainSummary>>;

    async fn get_dns_records(
        &self,
        domain: &str,
        record_type: Option<DnsRecordType>,
    ) -> CoreResult<Vec<DnsRecord>>;

    async fn get_domain_details(&self, domain: &str) -> CoreResult<DomainDetails>;

    /// Full-replace nameserver update; the cut-over call.
    async fn set_nameservers(&self, domain: &str, name_servers: &[String]) -> CoreResult<()>;

    /// Idempotent unlock (zero writes when already unlocked).
    async fn unlock(&self, domain: &str) -> CoreResult<()>;

    /// Idempotent privacy removal.
    async fn remove_privacy(&self, domain: &str) -> CoreResult<()>;

    /// Transfer auth code; `None` when the registrar withholds it.
    async fn get_auth_code(&self, domain: &str) -> CoreResult<Option<String>>;
}

#[async_trait]
impl SourceRegistrar for GodaddyClient {
    async fn list_domains(&self) -> CoreResult<Vec<DomainSummary>> {
        Ok(Self::list_domains(self).await?)
    }

    async fn get_dns_records(
        &self,
        domain: &str,
        record_type: Option<DnsRecordType>,
    ) -> CoreResult<Vec<DnsRecord>> {
        Ok(Self::get_dns_records(self, domain, record_type).await?)
    }

    async fn get_domain_details(&self, domain: &str) -> CoreResult<DomainDetails> {
        Ok(Self::get_domain_details(self, domain).await?)
    }

    async fn set_nameservers(&self, domain: &str, name_servers: &[String]) -> CoreResult<()> {
        Ok(Self::set_nameservers(self, domain, name_servers).await?)
    }

    async fn unlock(&self, domain: &str) -> CoreResult<()> {
        Ok(Self::unlock(self, domain).await?)
    }

    async fn remove_privacy(&self, domain: &str) -> CoreResult<()> {
        Ok(Self::remove_privacy(self, domain).await?)
    }

    async fn get_auth_code(&self, domain: &str) -> CoreResult<Option<String>> {
        Ok(Self::get_auth_code(self, domain).await?)
    }
}
