//! Cloudflare DNS host client.
//!
//! Every API response is wrapped in the `{success, result, errors[]}` envelope;
//! `success == false` is converted into an error carrying the serialized
//! `errors` array, never silently swallowed. Auth is the legacy global-key
//! header pair (`X-Auth-Email` + `X-Auth-Key`), which is what grants the
//! account-creation scope this tool needs.

mod client;
mod error;
mod http;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
pub(crate) const PROVIDER_NAME: &str = "cloudflare";
/// Maximum `per_page` accepted by the accounts/zones endpoints.
pub(crate) const MAX_PAGE_SIZE: u32 = 50;
/// Maximum `per_page` accepted by the DNS records endpoint.
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// Cloudflare DNS host client.
pub struct CloudflareClient {
    pub(crate) client: Client,
    pub(crate) email: String,
    pub(crate) api_key: String,
}

impl CloudflareClient {
    #[must_use]
    pub fn new(email: String, api_key: String) -> Self {
        Self {
            client: create_http_client(),
            email,
            api_key,
        }
    }
}
