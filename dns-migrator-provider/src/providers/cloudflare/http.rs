//! Cloudflare HTTP request methods.
//!
//! All verbs funnel through [`unwrap_envelope`]: the body is parsed as the
//! response envelope first (Cloudflare wraps errors even under non-2xx
//! statuses), and only bodies that are not an envelope at all fall back to
//! the shared status mapping.

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ProviderError, Result};
use crate::http_client::{ErrorContext, HttpUtils};

use super::error::map_api_errors;
use super::types::CloudflareResponse;
use super::{CF_API_BASE, CloudflareClient, PROVIDER_NAME};

/// Parse a response body as the envelope and turn `success == false` into an
/// error carrying the serialized `errors` array.
fn unwrap_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
    context: &ErrorContext,
) -> Result<CloudflareResponse<T>> {
    match serde_json::from_str::<CloudflareResponse<T>>(body) {
        Ok(envelope) if envelope.success => Ok(envelope),
        Ok(envelope) => Err(map_api_errors(&envelope.errors, context)),
        Err(_) if !(200..300).contains(&status) => {
            Err(HttpUtils::status_error(PROVIDER_NAME, status, body, context))
        }
        // 2xx but not an envelope; parse again through the logging path.
        Err(_) => HttpUtils::parse_json(body, PROVIDER_NAME),
    }
}

fn missing_result() -> ProviderError {
    ProviderError::ParseError {
        provider: PROVIDER_NAME.to_string(),
        detail: "response envelope is missing the result field".to_string(),
    }
}

impl CloudflareClient {
    fn auth_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
    }

    /// Execute a GET request and unwrap the envelope's `result`.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        let request = self.auth_headers(self.client.get(&url));

        let (status, body) = HttpUtils::execute_request(request, PROVIDER_NAME, "GET", &url).await?;
        unwrap_envelope::<T>(status, &body, context)?
            .result
            .ok_or_else(missing_result)
    }

    /// Execute a GET request for one page of a list endpoint.
    ///
    /// `path` must already carry the `page`/`per_page` query. Returns the page
    /// items plus `result_info.total_count` so the caller can page through.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &ErrorContext,
    ) -> Result<(Vec<T>, u32)> {
        let url = format!("{CF_API_BASE}{path}");
        let request = self.auth_headers(self.client.get(&url));

        let (status, body) = HttpUtils::execute_request(request, PROVIDER_NAME, "GET", &url).await?;
        let envelope = unwrap_envelope::<Vec<T>>(status, &body, context)?;
        let total_count = envelope.result_info.map_or(0, |info| info.total_count);
        Ok((envelope.result.unwrap_or_default(), total_count))
    }

    /// Execute a POST request and unwrap the envelope's `result`.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        request_body: &B,
        context: &ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        let request = self.auth_headers(self.client.post(&url)).json(request_body);

        let (status, body) =
            HttpUtils::execute_request(request, PROVIDER_NAME, "POST", &url).await?;
        unwrap_envelope::<T>(status, &body, context)?
            .result
            .ok_or_else(missing_result)
    }
}
