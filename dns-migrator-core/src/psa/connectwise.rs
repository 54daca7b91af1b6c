//! ConnectWise Manage ticketing client.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

use super::{PsaCompany, PsaTicket, TicketRequest, TicketingApi};

const SYSTEM: &str = "connectwise";

pub struct ConnectwiseClient {
    client: Client,
    /// Site URL, e.g. `https://na.myconnectwise.net`.
    site: String,
    company_id: String,
    public_key: String,
    private_key: String,
    client_id: String,
}

#[derive(Debug, Deserialize)]
struct CwCompany {
    id: i64,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct CwTicket {
    id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CwTicketBody<'a> {
    summary: &'a str,
    company: CwCompanyRef,
    initial_description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_email_address: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CwCompanyRef {
    id: i64,
}

impl ConnectwiseClient {
    #[must_use]
    pub fn new(
        site: String,
        company_id: String,
        public_key: String,
        private_key: String,
        client_id: String,
    ) -> Self {
        Self {
            client: Client::new(),
            site: site.trim_end_matches('/').to_string(),
            company_id,
            public_key,
            private_key,
            client_id,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v4_6_release/apis/3.0{path}", self.site)
    }

    /// `Basic base64("{company}+{public_key}:{private_key}")`.
    fn auth_header(&self) -> String {
        let token = format!(
            "{}+{}:{}",
            self.company_id, self.public_key, self.private_key
        );
        format!("Basic {}", STANDARD.encode(token))
    }

    fn psa_error(detail: impl std::fmt::Display) -> CoreError {
        CoreError::PsaError {
            system: SYSTEM.to_string(),
            message: detail.to_string(),
        }
    }
}

#[async_trait]
impl TicketingApi for ConnectwiseClient {
    async fn find_company(&self, customer_name: &str) -> CoreResult<Option<PsaCompany>> {
        // Manage rejects unescaped quotes inside the conditions string.
        let conditions = format!("name=\"{}\"", customer_name.replace('"', "\\\""));
        let url = format!(
            "{}?conditions={}",
            self.api_url("/company/companies"),
            urlencoding::encode(&conditions)
        );
        log::debug!("[{SYSTEM}] GET {url}");
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("clientId", &self.client_id)
            .send()
            .await
            .map_err(Self::psa_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::psa_error(format!("HTTP {status}: {body}")));
        }

        let companies: Vec<CwCompany> = response.json().await.map_err(Self::psa_error)?;
        Ok(companies.into_iter().next().map(|c| PsaCompany {
            id: c.id,
            name: c.name,
        }))
    }

    async fn create_ticket(&self, request: &TicketRequest) -> CoreResult<PsaTicket> {
        let body = CwTicketBody {
            summary: &request.summary,
            company: CwCompanyRef {
                id: request.company_id,
            },
            initial_description: &request.description,
            contact_email_address: request.contact_email.as_deref(),
        };

        let url = self.api_url("/service/tickets");
        log::debug!("[{SYSTEM}] POST {url}");
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("clientId", &self.client_id)
            .json(&body)
            .send()
            .await
            .map_err(Self::psa_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::psa_error(format!("HTTP {status}: {body}")));
        }

        let ticket: CwTicket = response.json().await.map_err(Self::psa_error)?;
        log::info!("[{SYSTEM}] Created ticket #{}", ticket.id);
        Ok(PsaTicket { id: ticket.id })
    }
}
