use serde::{Deserialize, Serialize};

/// Unified error type for all vendor API operations.
///
/// Each variant carries a `provider` field identifying which vendor produced the
/// error, plus variant-specific context. The vendor's own error payload is kept
/// verbatim in `raw_message` wherever one was returned — this tool has no
/// authority to re-interpret vendor-side semantics beyond the kinds below.
///
/// The kind is decided centrally from the HTTP status code (see
/// [`HttpUtils::status_error`](crate::http_client::HttpUtils::status_error)),
/// never re-parsed from message text at call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, 5xx).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provided credentials are invalid or lack access (HTTP 401/403).
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error payload from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The domain is not hosted/registered at this provider (HTTP 404).
    ///
    /// Distinguishable so callers can give actionable guidance ("DNS for this
    /// domain is not served by the source registrar") instead of a generic failure.
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Domain name that was not found.
        domain: String,
        /// Original error payload from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The request conflicted with in-flight state at the vendor (HTTP 422).
    ///
    /// Observed on GoDaddy domain unlock while a nameserver change is still
    /// settling. The unlock call retries this kind a bounded number of times;
    /// nothing else does.
    TransientConflict {
        /// Provider that produced the error.
        provider: String,
        /// Domain the conflicting request was about.
        domain: String,
        /// Original error payload from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected by the vendor (HTTP 400 or a vendor
    /// validation code).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// A DNS record with the same name/type already exists in the target zone.
    RecordExists {
        /// Provider that produced the error.
        provider: String,
        /// Name of the conflicting record.
        record_name: String,
        /// Original error payload from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error payload from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the vendor's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the vendor API, surfaced verbatim.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether this is expected behavior (user input, resource not present, etc.),
    /// used for log levelling: `warn` when `true`, `error` when `false`.
    ///
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::DomainNotFound { .. }
                | Self::TransientConflict { .. }
                | Self::InvalidParameter { .. }
                | Self::RecordExists { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' not found")
                }
            }
            Self::TransientConflict {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Conflict on '{domain}': {msg}")
                } else {
                    write!(f, "[{provider}] Conflict on '{domain}'")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::RecordExists {
                provider,
                record_name,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_name}' already exists")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
