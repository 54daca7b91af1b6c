//! Unified error type for the orchestration layer.

use serde::Serialize;
use thiserror::Error;

pub use dns_migrator_provider::ProviderError;

use crate::types::CredentialValidationError;

/// Orchestration layer error type.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The operator declined an approval gate. A clean early exit, not a
    /// failure; completed steps stay in place.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Credential storage error.
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// Credential validation error (field level).
    #[error("{0}")]
    CredentialValidation(CredentialValidationError),

    /// Storage layer error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// PSA/documentation integration error. Callers treat these as skips.
    #[error("PSA error ({system}): {message}")]
    PsaError { system: String, message: String },

    /// Provider error (converted from the vendor client library).
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether this is expected behavior (cancellation, user input, missing
    /// resources) rather than a malfunction; drives warn-vs-error log level.
    ///
    /// Update this method when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Cancelled(_) | Self::CredentialValidation(_) | Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }

    /// Whether this is an operator cancellation rather than any kind of error.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Orchestration layer Result alias.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
