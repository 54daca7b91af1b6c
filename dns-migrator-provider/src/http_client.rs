//! Shared HTTP request machinery for the vendor clients.
//!
//! Executes requests, logs request/response traffic at debug level, and maps
//! HTTP status codes to [`ProviderError`] kinds in exactly one place. Call
//! sites never inspect status codes or exception text themselves.
//!
//! There is deliberately no generic retry here: every call in the migration
//! workflow is issued once. The single bounded retry in the tool (GoDaddy
//! unlock on 422) lives next to that call.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// Maximum number of bytes of a response body to include in debug logs.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a response body for logging, respecting char boundaries.
///
/// Keeps TXT/DKIM blobs and token-bearing error payloads from being dumped
/// wholesale into logs.
pub(crate) fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let mut end = TRUNCATE_LIMIT;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}

/// Context handed to [`HttpUtils::status_error`] so the mapped error can carry
/// the entity the request was about.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Domain the request concerned (for `DomainNotFound` / `TransientConflict`).
    pub domain: Option<String>,
    /// Record name the request concerned (for `RecordExists`).
    pub record_name: Option<String>,
}

impl ErrorContext {
    pub fn for_domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            record_name: None,
        }
    }
}

/// HTTP tool function set shared by the GoDaddy and Cloudflare clients.
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Execute a prepared request and return `(status_code, response_text)`.
    ///
    /// Network-level failures become [`ProviderError::NetworkError`] or
    /// [`ProviderError::Timeout`]. Status-code interpretation is left to the
    /// caller (vendors differ on which statuses are errors at all; GoDaddy
    /// returns 404 for "not hosted here", Cloudflare wraps errors in a 200
    /// envelope).
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Server error (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status_code}: {body}"),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Map a non-success HTTP status to a [`ProviderError`] kind.
    ///
    /// The vendor's response body is carried verbatim in the error.
    pub fn status_error(
        provider_name: &str,
        status: u16,
        body: &str,
        context: &ErrorContext,
    ) -> ProviderError {
        let raw_message = if body.trim().is_empty() {
            None
        } else {
            Some(body.to_string())
        };
        match status {
            401 | 403 => ProviderError::InvalidCredentials {
                provider: provider_name.to_string(),
                raw_message,
            },
            404 => ProviderError::DomainNotFound {
                provider: provider_name.to_string(),
                domain: context
                    .domain
                    .clone()
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message,
            },
            422 => ProviderError::TransientConflict {
                provider: provider_name.to_string(),
                domain: context
                    .domain
                    .clone()
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message,
            },
            400 => ProviderError::InvalidParameter {
                provider: provider_name.to_string(),
                param: "body".to_string(),
                detail: body.to_string(),
            },
            _ => ProviderError::Unknown {
                provider: provider_name.to_string(),
                raw_code: Some(format!("HTTP {status}")),
                raw_message: body.to_string(),
            },
        }
    }

    /// Parse a JSON response body into `T`.
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- status_error mapping ----

    #[test]
    fn status_401_maps_to_invalid_credentials() {
        let e = HttpUtils::status_error("godaddy", 401, "denied", &ErrorContext::default());
        assert!(matches!(e, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn status_403_maps_to_invalid_credentials() {
        let e = HttpUtils::status_error("godaddy", 403, "forbidden", &ErrorContext::default());
        assert!(matches!(e, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn status_404_maps_to_domain_not_found_with_context() {
        let e = HttpUtils::status_error(
            "godaddy",
            404,
            r#"{"code":"UNKNOWN_DOMAIN"}"#,
            &ErrorContext::for_domain("example.com"),
        );
        assert!(matches!(
            e,
            ProviderError::DomainNotFound { domain, .. } if domain == "example.com"
        ));
    }

    #[test]
    fn status_404_without_context_uses_placeholder() {
        let e = HttpUtils::status_error("godaddy", 404, "", &ErrorContext::default());
        assert!(matches!(
            e,
            ProviderError::DomainNotFound { domain, raw_message, .. }
                if domain == "<unknown>" && raw_message.is_none()
        ));
    }

    #[test]
    fn status_422_maps_to_transient_conflict() {
        let e = HttpUtils::status_error(
            "godaddy",
            422,
            "pending nameserver change",
            &ErrorContext::for_domain("example.com"),
        );
        assert!(matches!(
            e,
            ProviderError::TransientConflict { domain, .. } if domain == "example.com"
        ));
    }

    #[test]
    fn status_400_maps_to_invalid_parameter() {
        let e = HttpUtils::status_error("godaddy", 400, "bad body", &ErrorContext::default());
        assert!(matches!(e, ProviderError::InvalidParameter { .. }));
    }

    #[test]
    fn unmapped_status_surfaces_verbatim() {
        let e = HttpUtils::status_error("godaddy", 418, "teapot says no", &ErrorContext::default());
        assert!(matches!(
            e,
            ProviderError::Unknown { raw_code, raw_message, .. }
                if raw_code.as_deref() == Some("HTTP 418") && raw_message == "teapot says no"
        ));
    }

    // ---- parse_json ----

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ProviderError> = HttpUtils::parse_json(r#"{"x":42}"#, "test");
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ProviderError> = HttpUtils::parse_json("not json", "test");
        assert!(
            matches!(&result, Err(ProviderError::ParseError { .. })),
            "unexpected parse result: {result:?}"
        );
    }

    // ---- truncate_for_log ----

    #[test]
    fn short_body_unchanged() {
        assert_eq!(truncate_for_log("hello"), "hello");
    }

    #[test]
    fn long_body_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let out = truncate_for_log(&s);
        assert!(out.contains("... [truncated, total"));
        assert!(out.len() < s.len());
    }

    #[test]
    fn multibyte_truncation_is_char_safe() {
        let s = "ü".repeat(300);
        let out = truncate_for_log(&s);
        assert!(out.contains("... [truncated, total"));
    }
}
