//! Credential storage abstraction.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{ProviderCredentials, ProviderKind};

/// Credential map: one section per vendor.
pub type CredentialsMap = HashMap<ProviderKind, ProviderCredentials>;

/// Credential storage trait.
///
/// The CLI binds this to the platform keychain; tests use an in-memory map.
/// Encryption at rest is the platform's concern, not this trait's.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load every stored credential section.
    async fn load_all(&self) -> CoreResult<CredentialsMap>;

    /// Persist the full credential map, replacing what was stored.
    async fn save_all(&self, credentials: &CredentialsMap) -> CoreResult<()>;
}

/// Interactive source for credential fields missing from the store.
///
/// Injected alongside the store so the service owns the prompt-merge-persist
/// sequence while the CLI owns the console interaction.
pub trait CredentialPrompter: Send + Sync {
    /// Ask the operator for one credential field of one vendor.
    fn prompt_field(&self, provider: ProviderKind, key: &str, label: &str) -> CoreResult<String>;
}
