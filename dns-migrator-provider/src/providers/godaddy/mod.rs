//! GoDaddy registrar client.
//!
//! Stateless wrapper over the v1 domains API. Auth is a static
//! `Authorization: sso-key {key}:{secret}` header built per call; there is no
//! session or token lifecycle.

mod client;
mod http;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;

pub(crate) const GODADDY_API_BASE: &str = "https://api.godaddy.com/v1";
pub(crate) const PROVIDER_NAME: &str = "godaddy";

/// GoDaddy registrar client.
pub struct GodaddyClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) api_secret: String,
}

impl GodaddyClient {
    #[must_use]
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            client: create_http_client(),
            api_key,
            api_secret,
        }
    }

    /// The `sso-key` authorization header value.
    pub(crate) fn auth_header(&self) -> String {
        format!("sso-key {}:{}", self.api_key, self.api_secret)
    }
}
