//! IT Glue documentation client.
//!
//! JSON:API shape: collections come back as `{"data": [{id, attributes}]}`,
//! creation posts a `{"data": {type, attributes}}` wrapper.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{CoreError, CoreResult};

use super::{DocumentationApi, MigrationAsset, PsaOrganization};

const ITGLUE_API_BASE: &str = "https://api.itglue.com";
const SYSTEM: &str = "itglue";

pub struct ItGlueClient {
    client: Client,
    api_key: String,
    /// Flexible-asset type the migration record is filed under; asset creation
    /// is skipped when unset.
    flexible_asset_type_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct JsonApiCollection {
    #[serde(default)]
    data: Vec<JsonApiResource>,
}

#[derive(Debug, Deserialize)]
struct JsonApiResource {
    id: String,
    attributes: OrganizationAttributes,
}

#[derive(Debug, Deserialize)]
struct OrganizationAttributes {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Serialize)]
struct JsonApiBody<T: Serialize> {
    data: T,
}

impl ItGlueClient {
    #[must_use]
    pub fn new(api_key: String, flexible_asset_type_id: Option<i64>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            flexible_asset_type_id,
        }
    }

    fn psa_error(detail: impl std::fmt::Display) -> CoreError {
        CoreError::PsaError {
            system: SYSTEM.to_string(),
            message: detail.to_string(),
        }
    }
}

#[async_trait]
impl DocumentationApi for ItGlueClient {
    async fn find_organization(&self, customer_name: &str) -> CoreResult<Option<PsaOrganization>> {
        let url = format!(
            "{ITGLUE_API_BASE}/organizations?filter[name]={}",
            urlencoding::encode(customer_name)
        );
        log::debug!("[{SYSTEM}] GET {url}");
        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(Self::psa_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::psa_error(format!("HTTP {status}: {body}")));
        }

        let collection: JsonApiCollection = response.json().await.map_err(Self::psa_error)?;
        Ok(collection.data.into_iter().next().map(|r| PsaOrganization {
            id: r.id,
            name: r.attributes.name,
        }))
    }

    async fn create_migration_asset(
        &self,
        organization_id: &str,
        asset: &MigrationAsset,
    ) -> CoreResult<()> {
        let Some(asset_type_id) = self.flexible_asset_type_id else {
            return Err(Self::psa_error(
                "no flexible-asset type configured; set ITGLUE_FLEXIBLE_ASSET_TYPE_ID",
            ));
        };

        let body = JsonApiBody {
            data: json!({
                "type": "flexible-assets",
                "attributes": {
                    "organization-id": organization_id,
                    "flexible-asset-type-id": asset_type_id,
                    "traits": {
                        "domain": asset.domain,
                        "dns-provider": asset.provider,
                        "zone-id": asset.zone_id,
                        "account-id": asset.account_id,
                        "nameservers": asset.name_servers.join(", "),
                        "migration-date": asset.migration_date,
                    },
                },
            }),
        };

        let url = format!("{ITGLUE_API_BASE}/flexible_assets");
        log::debug!("[{SYSTEM}] POST {url}");
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::psa_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::psa_error(format!("HTTP {status}: {body}")));
        }
        log::info!(
            "[{SYSTEM}] Documented migration of {} under organization {organization_id}",
            asset.domain
        );
        Ok(())
    }
}
