//! Test doubles for the orchestration layer.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use dns_migrator_provider::ProviderError;
use dns_migrator_provider::types::{
    Account, DnsRecord, DnsRecordType, DomainDetails, DomainSummary, ImportPlan, ImportReport,
    Zone,
};

use crate::error::{CoreError, CoreResult};
use crate::psa::{
    DocumentationApi, MigrationAsset, PsaCompany, PsaOrganization, PsaTicket, TicketRequest,
    TicketingApi,
};
use crate::traits::{
    Approver, CredentialPrompter, CredentialStore, CredentialsMap, SourceRegistrar, TargetDnsHost,
};
use crate::types::ProviderKind;

// ===== ScriptedApprover =====

/// Answers approval prompts from a script, or with an unconditional yes.
pub struct ScriptedApprover {
    answers: Mutex<VecDeque<bool>>,
    always_yes: bool,
    messages: Mutex<Vec<String>>,
}

impl ScriptedApprover {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            always_yes: false,
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn always_yes() -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
            always_yes: true,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt message shown so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Approver for ScriptedApprover {
    fn confirm(&self, message: &str, _default: bool) -> CoreResult<bool> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.always_yes {
            return Ok(true);
        }
        Ok(self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected approval prompt"))
    }
}

// ===== ScriptedPrompter =====

/// Returns credential fields from a `(key, value)` script, asserting the
/// prompts arrive in the expected order.
pub struct ScriptedPrompter {
    fields: Mutex<VecDeque<(String, String)>>,
}

impl ScriptedPrompter {
    pub fn new(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: Mutex::new(
                fields
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            ),
        }
    }
}

impl CredentialPrompter for ScriptedPrompter {
    fn prompt_field(&self, _provider: ProviderKind, key: &str, _label: &str) -> CoreResult<String> {
        let (expected_key, value) = self
            .fields
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected credential prompt");
        assert_eq!(expected_key, key, "prompted for an unexpected field");
        Ok(value)
    }
}

// ===== MemoryCredentialStore =====

pub struct MemoryCredentialStore {
    credentials: Mutex<CredentialsMap>,
    fail_reads: bool,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            credentials: Mutex::new(CredentialsMap::new()),
            fail_reads: false,
        }
    }

    /// A store whose reads always fail, for the degrade-to-empty path.
    pub fn failing_reads() -> Self {
        Self {
            credentials: Mutex::new(CredentialsMap::new()),
            fail_reads: true,
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load_all(&self) -> CoreResult<CredentialsMap> {
        if self.fail_reads {
            return Err(CoreError::StorageError("keychain unavailable".into()));
        }
        Ok(self.credentials.lock().unwrap().clone())
    }

    async fn save_all(&self, credentials: &CredentialsMap) -> CoreResult<()> {
        *self.credentials.lock().unwrap() = credentials.clone();
        Ok(())
    }
}

// ===== MockRegistrar =====

pub struct MockRegistrar {
    records: Vec<DnsRecord>,
    details: DomainDetails,
    fail_auth_code: bool,
    unlock_calls: Mutex<usize>,
    set_nameservers_calls: Mutex<Vec<Vec<String>>>,
}

impl MockRegistrar {
    pub fn new(records: Vec<DnsRecord>, details: DomainDetails) -> Self {
        Self {
            records,
            details,
            fail_auth_code: false,
            unlock_calls: Mutex::new(0),
            set_nameservers_calls: Mutex::new(Vec::new()),
        }
    }

    /// A registrar whose auth-code endpoint fails at the network level.
    pub fn with_failing_auth_code(mut self) -> Self {
        self.fail_auth_code = true;
        self
    }

    pub fn unlock_calls(&self) -> usize {
        *self.unlock_calls.lock().unwrap()
    }

    pub fn set_nameservers_calls(&self) -> Vec<Vec<String>> {
        self.set_nameservers_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceRegistrar for MockRegistrar {
    async fn list_domains(&self) -> CoreResult<Vec<DomainSummary>> {
        Ok(vec![])
    }

    async fn get_dns_records(
        &self,
        _domain: &str,
        record_type: Option<DnsRecordType>,
    ) -> CoreResult<Vec<DnsRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| record_type.is_none_or(|t| r.record_type == t))
            .cloned()
            .collect())
    }

    async fn get_domain_details(&self, _domain: &str) -> CoreResult<DomainDetails> {
        Ok(self.details.clone())
    }

    async fn set_nameservers(&self, _domain: &str, name_servers: &[String]) -> CoreResult<()> {
        self.set_nameservers_calls
            .lock()
            .unwrap()
            .push(name_servers.to_vec());
        Ok(())
    }

    async fn unlock(&self, _domain: &str) -> CoreResult<()> {
        *self.unlock_calls.lock().unwrap() += 1;
        Ok(())
    }

    async fn remove_privacy(&self, _domain: &str) -> CoreResult<()> {
        Ok(())
    }

    async fn get_auth_code(&self, _domain: &str) -> CoreResult<Option<String>> {
        if self.fail_auth_code {
            return Err(CoreError::Provider(ProviderError::NetworkError {
                provider: "godaddy".into(),
                detail: "connection reset".into(),
            }));
        }
        Ok(self.details.auth_code.clone())
    }
}

// ===== MockDnsHost =====

pub struct MockDnsHost {
    accounts: Vec<Account>,
    created_accounts: Mutex<Vec<String>>,
    created_zones: Mutex<Vec<(String, String)>>,
}

impl MockDnsHost {
    pub fn with_account(name: &str) -> Self {
        Self {
            accounts: vec![Account {
                id: "acct-1".into(),
                name: name.into(),
                account_type: Some("standard".into()),
            }],
            created_accounts: Mutex::new(Vec::new()),
            created_zones: Mutex::new(Vec::new()),
        }
    }

    pub fn created_accounts(&self) -> Vec<String> {
        self.created_accounts.lock().unwrap().clone()
    }

    /// `(account_id, domain)` pairs passed to `create_zone`.
    pub fn created_zones(&self) -> Vec<(String, String)> {
        self.created_zones.lock().unwrap().clone()
    }
}

#[async_trait]
impl TargetDnsHost for MockDnsHost {
    async fn list_accounts(&self) -> CoreResult<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    async fn create_account(&self, name: &str) -> CoreResult<Account> {
        self.created_accounts.lock().unwrap().push(name.to_string());
        Ok(Account {
            id: "acct-new".into(),
            name: name.into(),
            account_type: Some("standard".into()),
        })
    }

    async fn list_zones(&self, _account_id: Option<&str>) -> CoreResult<Vec<Zone>> {
        Ok(vec![])
    }

    async fn create_zone(&self, account_id: &str, domain: &str) -> CoreResult<Zone> {
        self.created_zones
            .lock()
            .unwrap()
            .push((account_id.to_string(), domain.to_string()));
        Ok(Zone {
            id: "zone-1".into(),
            name: domain.into(),
            account_id: account_id.into(),
            name_servers: vec![
                "ana.ns.cloudflare.com".into(),
                "bob.ns.cloudflare.com".into(),
            ],
            status: "pending".into(),
        })
    }

    async fn list_dns_records(&self, _zone_id: &str) -> CoreResult<Vec<DnsRecord>> {
        Ok(vec![])
    }

    async fn import_records(&self, _zone_id: &str, plan: &ImportPlan) -> ImportReport {
        ImportReport {
            created: plan.records.clone(),
            failures: vec![],
            skipped: plan.skipped.clone(),
        }
    }

    async fn get_registrar_domain(
        &self,
        _account_id: &str,
        _domain: &str,
    ) -> CoreResult<serde_json::Value> {
        Ok(json!({ "locked": false }))
    }
}

// ===== MockDocumentation =====

pub struct MockDocumentation {
    organization: Option<PsaOrganization>,
    unreachable: bool,
    assets: Mutex<Vec<MigrationAsset>>,
}

impl MockDocumentation {
    pub fn with_organization(name: &str) -> Self {
        Self {
            organization: Some(PsaOrganization {
                id: "org-1".into(),
                name: name.into(),
            }),
            unreachable: false,
            assets: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            organization: None,
            unreachable: true,
            assets: Mutex::new(Vec::new()),
        }
    }

    pub fn assets(&self) -> Vec<MigrationAsset> {
        self.assets.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentationApi for MockDocumentation {
    async fn find_organization(&self, _customer_name: &str) -> CoreResult<Option<PsaOrganization>> {
        if self.unreachable {
            return Err(CoreError::PsaError {
                system: "itglue".into(),
                message: "connection refused".into(),
            });
        }
        Ok(self.organization.clone())
    }

    async fn create_migration_asset(
        &self,
        _organization_id: &str,
        asset: &MigrationAsset,
    ) -> CoreResult<()> {
        self.assets.lock().unwrap().push(asset.clone());
        Ok(())
    }
}

// ===== MockTicketing =====

pub struct MockTicketing {
    company: Option<PsaCompany>,
    tickets: Mutex<Vec<TicketRequest>>,
}

impl MockTicketing {
    pub fn with_company(name: &str, id: i64) -> Self {
        Self {
            company: Some(PsaCompany {
                id,
                name: name.into(),
            }),
            tickets: Mutex::new(Vec::new()),
        }
    }

    pub fn created_tickets(&self) -> Vec<TicketRequest> {
        self.tickets.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketingApi for MockTicketing {
    async fn find_company(&self, _customer_name: &str) -> CoreResult<Option<PsaCompany>> {
        Ok(self.company.clone())
    }

    async fn create_ticket(&self, request: &TicketRequest) -> CoreResult<PsaTicket> {
        self.tickets.lock().unwrap().push(request.clone());
        Ok(PsaTicket { id: 4711 })
    }
}
