//! Cloudflare envelope error mapping.
//!
//! The envelope reports errors even under HTTP 200, so status-based mapping is
//! not enough here: the error kind is decided from the first entry's numeric
//! code, while `raw_message` carries the whole serialized `errors` array.
//!
//! Code reference: <https://api.cloudflare.com/#getting-started-responses>

use crate::error::ProviderError;
use crate::http_client::ErrorContext;

use super::PROVIDER_NAME;
use super::types::CloudflareApiError;

/// Map the envelope's `errors` array to a [`ProviderError`].
pub(crate) fn map_api_errors(
    errors: &[CloudflareApiError],
    context: &ErrorContext,
) -> ProviderError {
    let raw_message = serde_json::to_string(errors)
        .unwrap_or_else(|_| "<unserializable errors array>".to_string());
    let Some(first) = errors.first() else {
        return ProviderError::Unknown {
            provider: PROVIDER_NAME.to_string(),
            raw_code: None,
            raw_message: "success=false with empty errors array".to_string(),
        };
    };

    match first.code {
        // 6003: invalid request headers
        // 6103: invalid format for X-Auth-Key header
        // 9109: unauthorized to access requested resource
        // 10000: authentication error
        6003 | 6103 | 9109 | 10000 => ProviderError::InvalidCredentials {
            provider: PROVIDER_NAME.to_string(),
            raw_message: Some(raw_message),
        },

        // 1004: DNS validation error
        // 9000: invalid or missing name
        // 9005/9006/9009: invalid content for A/AAAA/MX
        // 9021: invalid TTL
        // 9041: this record cannot be proxied
        code @ (1004 | 9000 | 9005 | 9006 | 9009 | 9021 | 9041) => {
            let param = match code {
                9000 => "name",
                9005 | 9006 | 9009 => "content",
                9021 => "ttl",
                9041 => "proxied",
                _ => "general",
            };
            ProviderError::InvalidParameter {
                provider: PROVIDER_NAME.to_string(),
                param: param.to_string(),
                detail: first.message.clone(),
            }
        }

        // 81053..81058: a record with that host/those settings already exists
        81053..=81058 => ProviderError::RecordExists {
            provider: PROVIDER_NAME.to_string(),
            record_name: context
                .record_name
                .clone()
                .unwrap_or_else(|| "<unknown>".to_string()),
            raw_message: Some(raw_message),
        },

        // 7000/7003: no route for that URI (bad zone/account identifier)
        7000 | 7003 => ProviderError::DomainNotFound {
            provider: PROVIDER_NAME.to_string(),
            domain: context
                .domain
                .clone()
                .unwrap_or_else(|| "<unknown>".to_string()),
            raw_message: Some(raw_message),
        },

        code => ProviderError::Unknown {
            provider: PROVIDER_NAME.to_string(),
            raw_code: Some(code.to_string()),
            raw_message,
        },
    }
}
