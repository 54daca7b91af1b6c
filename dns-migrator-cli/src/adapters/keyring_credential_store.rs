//! Keyring-based credential store.
//!
//! All credential sections live as a single JSON blob in the system keychain
//! (macOS Keychain, Windows Credential Manager, Linux Secret Service) via the
//! `keyring` crate; field-level encryption is the platform's job.

use async_trait::async_trait;
use keyring::Entry;

use dns_migrator_core::error::{CoreError, CoreResult};
use dns_migrator_core::traits::{CredentialStore, CredentialsMap};

const SERVICE_NAME: &str = "dns-migrator";
const CREDENTIALS_KEY: &str = "all-credentials";

pub struct KeyringCredentialStore;

impl KeyringCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn get_entry() -> CoreResult<Entry> {
        Entry::new(SERVICE_NAME, CREDENTIALS_KEY)
            .map_err(|e| CoreError::CredentialError(e.to_string()))
    }

    fn read_raw() -> CoreResult<String> {
        let entry = Self::get_entry()?;
        match entry.get_password() {
            Ok(json) => Ok(json),
            Err(keyring::Error::NoEntry) => Ok("{}".to_string()),
            Err(e) => Err(CoreError::CredentialError(e.to_string())),
        }
    }
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for KeyringCredentialStore {
    async fn load_all(&self) -> CoreResult<CredentialsMap> {
        let json = Self::read_raw()?;
        if json.trim().is_empty() || json.trim() == "{}" {
            return Ok(CredentialsMap::new());
        }
        serde_json::from_str(&json).map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    async fn save_all(&self, credentials: &CredentialsMap) -> CoreResult<()> {
        let json = serde_json::to_string(credentials)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        let entry = Self::get_entry()?;
        entry
            .set_password(&json)
            .map_err(|e| CoreError::CredentialError(e.to_string()))
    }
}
