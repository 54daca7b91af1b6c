//! Credential loading, prompting, and persistence.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CredentialPrompter, CredentialStore, CredentialsMap};
use crate::types::{ProviderCredentials, ProviderKind};

/// Owns the load-prompt-merge-persist sequence for credential sections.
///
/// An existing section is never overwritten except through [`reset`](Self::reset).
pub struct CredentialService {
    store: Arc<dyn CredentialStore>,
}

impl CredentialService {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Load the requested vendors' credentials, prompting for any missing
    /// section and persisting the merged map when something was added.
    ///
    /// A store read failure is a warning, not a fatal error: the run continues
    /// with an empty map and prompts for everything it needs.
    pub async fn load(
        &self,
        kinds: &[ProviderKind],
        prompter: &dyn CredentialPrompter,
    ) -> CoreResult<CredentialsMap> {
        let mut credentials = match self.store.load_all().await {
            Ok(map) => map,
            Err(e) => {
                log::warn!("Credential store read failed, starting from empty: {e}");
                CredentialsMap::new()
            }
        };

        let mut added = false;
        for &kind in kinds {
            if credentials.contains_key(&kind) {
                continue;
            }
            let section = Self::prompt_section(kind, prompter)?;
            credentials.insert(kind, section);
            added = true;
        }

        if added {
            self.store.save_all(&credentials).await?;
        }
        Ok(credentials)
    }

    /// Load a vendor's credentials only if a section already exists.
    ///
    /// Used for the optional PSA integrations, which run opportunistically and
    /// never prompt.
    pub async fn load_optional(&self, kind: ProviderKind) -> Option<ProviderCredentials> {
        match self.store.load_all().await {
            Ok(mut map) => map.remove(&kind),
            Err(e) => {
                log::warn!("Credential store read failed: {e}");
                None
            }
        }
    }

    /// Discard a vendor's stored section and prompt for a fresh one.
    pub async fn reset(
        &self,
        kind: ProviderKind,
        prompter: &dyn CredentialPrompter,
    ) -> CoreResult<ProviderCredentials> {
        let mut credentials = match self.store.load_all().await {
            Ok(map) => map,
            Err(e) => {
                log::warn!("Credential store read failed, starting from empty: {e}");
                CredentialsMap::new()
            }
        };

        let section = Self::prompt_section(kind, prompter)?;
        credentials.insert(kind, section.clone());
        self.store.save_all(&credentials).await?;
        log::info!("Stored new {} credentials", kind.label());
        Ok(section)
    }

    fn prompt_section(
        kind: ProviderKind,
        prompter: &dyn CredentialPrompter,
    ) -> CoreResult<ProviderCredentials> {
        log::info!("No stored {} credentials, prompting", kind.label());
        let mut fields = HashMap::new();
        for (key, label) in kind.required_fields() {
            let value = prompter.prompt_field(kind, key, label)?;
            fields.insert((*key).to_string(), value);
        }
        ProviderCredentials::from_map(kind, &fields).map_err(CoreError::CredentialValidation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MemoryCredentialStore, ScriptedPrompter};

    #[tokio::test]
    async fn missing_sections_are_prompted_and_persisted() {
        let store = Arc::new(MemoryCredentialStore::new());
        let service = CredentialService::new(store.clone());
        let prompter = ScriptedPrompter::new(&[
            ("api_key", "gd-key"),
            ("api_secret", "gd-secret"),
            ("email", "ops@msp.example"),
            ("api_key", "cf-key"),
        ]);

        let map = service
            .load(&[ProviderKind::Godaddy, ProviderKind::Cloudflare], &prompter)
            .await
            .unwrap();
        assert_eq!(map.len(), 2);

        let persisted = store.load_all().await.unwrap();
        assert!(persisted.contains_key(&ProviderKind::Godaddy));
        assert!(persisted.contains_key(&ProviderKind::Cloudflare));
    }

    #[tokio::test]
    async fn existing_section_is_not_overwritten() {
        let store = Arc::new(MemoryCredentialStore::new());
        let existing = ProviderCredentials::Godaddy {
            api_key: "original".into(),
            api_secret: "secret".into(),
        };
        store
            .save_all(&CredentialsMap::from([(ProviderKind::Godaddy, existing.clone())]))
            .await
            .unwrap();

        let service = CredentialService::new(store.clone());
        // Would panic on an unexpected prompt; nothing should be asked.
        let prompter = ScriptedPrompter::new(&[]);
        let map = service.load(&[ProviderKind::Godaddy], &prompter).await.unwrap();
        assert_eq!(map.get(&ProviderKind::Godaddy), Some(&existing));
    }

    #[tokio::test]
    async fn reset_replaces_the_stored_section() {
        let store = Arc::new(MemoryCredentialStore::new());
        store
            .save_all(&CredentialsMap::from([(
                ProviderKind::Itglue,
                ProviderCredentials::Itglue {
                    api_key: "old".into(),
                },
            )]))
            .await
            .unwrap();

        let service = CredentialService::new(store.clone());
        let prompter = ScriptedPrompter::new(&[("api_key", "new")]);
        let fresh = service.reset(ProviderKind::Itglue, &prompter).await.unwrap();
        assert_eq!(
            fresh,
            ProviderCredentials::Itglue {
                api_key: "new".into()
            }
        );
        let persisted = store.load_all().await.unwrap();
        assert_eq!(persisted.get(&ProviderKind::Itglue), Some(&fresh));
    }

    #[tokio::test]
    async fn read_failure_degrades_to_empty_store() {
        let store = Arc::new(MemoryCredentialStore::failing_reads());
        let service = CredentialService::new(store);
        let prompter = ScriptedPrompter::new(&[("api_key", "itg")]);
        let map = service.load(&[ProviderKind::Itglue], &prompter).await.unwrap();
        assert!(map.contains_key(&ProviderKind::Itglue));
    }

    #[tokio::test]
    async fn only_requested_kinds_are_prompted() {
        let store = Arc::new(MemoryCredentialStore::new());
        let service = CredentialService::new(store.clone());
        // Only the registrar fields; a prompt for any other provider panics.
        let prompter = ScriptedPrompter::new(&[("api_key", "gd-key"), ("api_secret", "gd-secret")]);

        let map = service
            .load(&[ProviderKind::Godaddy], &prompter)
            .await
            .unwrap();
        assert_eq!(map.len(), 1);

        let persisted = store.load_all().await.unwrap();
        assert!(persisted.contains_key(&ProviderKind::Godaddy));
        assert!(!persisted.contains_key(&ProviderKind::Cloudflare));
    }

    #[tokio::test]
    async fn optional_load_never_prompts() {
        let store = Arc::new(MemoryCredentialStore::new());
        let service = CredentialService::new(store);
        assert!(service.load_optional(ProviderKind::Connectwise).await.is_none());
    }
}
