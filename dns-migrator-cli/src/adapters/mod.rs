//! Platform adapters for the core traits.

mod keyring_credential_store;

pub use keyring_credential_store::KeyringCredentialStore;
