//! GoDaddy HTTP request methods.
//!
//! Unlike Cloudflare there is no response envelope: 2xx bodies are the payload
//! and non-2xx statuses carry a `{code, message}` JSON body, which is surfaced
//! verbatim through the central status mapping.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::{ErrorContext, HttpUtils};

use super::{GODADDY_API_BASE, GodaddyClient, PROVIDER_NAME};

impl GodaddyClient {
    /// Execute a GET request and deserialize the body.
    pub(crate) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        context: &ErrorContext,
    ) -> Result<T> {
        let url = format!("{GODADDY_API_BASE}{path}");
        let request = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json");

        let (status, body) =
            HttpUtils::execute_request(request, PROVIDER_NAME, "GET", &url).await?;
        if !(200..300).contains(&status) {
            return Err(HttpUtils::status_error(PROVIDER_NAME, status, &body, context));
        }
        HttpUtils::parse_json(&body, PROVIDER_NAME)
    }

    /// Execute a PATCH request; the API answers mutations with 204 No Content.
    pub(crate) async fn patch<B: Serialize>(
        &self,
        path: &str,
        request_body: &B,
        context: &ErrorContext,
    ) -> Result<()> {
        let url = format!("{GODADDY_API_BASE}{path}");
        let request = self
            .client
            .patch(&url)
            .header("Authorization", self.auth_header())
            .json(request_body);

        let (status, body) =
            HttpUtils::execute_request(request, PROVIDER_NAME, "PATCH", &url).await?;
        if !(200..300).contains(&status) {
            return Err(HttpUtils::status_error(PROVIDER_NAME, status, &body, context));
        }
        Ok(())
    }

    /// Execute a DELETE request.
    ///
    /// With `not_found_ok`, a 404 counts as success — used for privacy removal,
    /// where "nothing to delete" means the desired state already holds.
    pub(crate) async fn delete(
        &self,
        path: &str,
        context: &ErrorContext,
        not_found_ok: bool,
    ) -> Result<()> {
        let url = format!("{GODADDY_API_BASE}{path}");
        let request = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header());

        let (status, body) =
            HttpUtils::execute_request(request, PROVIDER_NAME, "DELETE", &url).await?;
        if status == 404 && not_found_ok {
            log::debug!("[{PROVIDER_NAME}] DELETE {path} returned 404; treating as already done");
            return Ok(());
        }
        if !(200..300).contains(&status) {
            return Err(HttpUtils::status_error(PROVIDER_NAME, status, &body, context));
        }
        Ok(())
    }
}
