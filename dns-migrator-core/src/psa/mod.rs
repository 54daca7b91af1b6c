//! PSA and documentation integrations.
//!
//! Best-effort collaborators: they run only when their credential sections
//! exist, and every failure (unreachable, no matching organization/company) is
//! reported as a `PsaError` that the orchestrator records as a skip. Nothing
//! here can abort a migration.

mod connectwise;
mod itglue;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

pub use connectwise::ConnectwiseClient;
pub use itglue::ItGlueClient;

/// What the documentation step records about a completed migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationAsset {
    pub domain: String,
    /// Target DNS provider name.
    pub provider: String,
    pub zone_id: String,
    pub account_id: String,
    pub name_servers: Vec<String>,
    /// Migration date, `YYYY-MM-DD`.
    pub migration_date: String,
}

/// Documentation system (IT Glue in production).
#[async_trait]
pub trait DocumentationApi: Send + Sync {
    /// Find the organization matching a customer name; `Ok(None)` when the
    /// lookup succeeds but nothing matches.
    async fn find_organization(&self, customer_name: &str) -> CoreResult<Option<PsaOrganization>>;

    /// Record the migration against an organization.
    async fn create_migration_asset(
        &self,
        organization_id: &str,
        asset: &MigrationAsset,
    ) -> CoreResult<()>;
}

/// Ticketing system (ConnectWise Manage in production).
#[async_trait]
pub trait TicketingApi: Send + Sync {
    /// Find the company matching a customer name.
    async fn find_company(&self, customer_name: &str) -> CoreResult<Option<PsaCompany>>;

    /// Open a ticket and return its identifier.
    async fn create_ticket(&self, request: &TicketRequest) -> CoreResult<PsaTicket>;
}

/// An organization in the documentation system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsaOrganization {
    pub id: String,
    pub name: String,
}

/// A company in the ticketing system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsaCompany {
    pub id: i64,
    pub name: String,
}

/// A created ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsaTicket {
    pub id: i64,
}

/// Input for ticket creation.
#[derive(Debug, Clone)]
pub struct TicketRequest {
    pub company_id: i64,
    pub summary: String,
    pub description: String,
    /// Manual contact-email override; when `None` the ticket uses the
    /// company's default contact.
    pub contact_email: Option<String>,
}
