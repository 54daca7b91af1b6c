//! # dns-migrator-core
//!
//! Orchestration logic for migrating a domain's DNS from GoDaddy to
//! Cloudflare: credential handling, the human approval gate, the migration
//! pipeline, and the optional PSA/documentation integrations.
//!
//! The crate is platform-independent: storage, prompting, and approval are
//! abstracted behind traits so the CLI binds them to the keychain and console
//! while tests substitute scripted doubles.

pub mod error;
pub mod matching;
pub mod psa;
pub mod render;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use error::{CoreError, CoreResult};
pub use services::{CredentialService, MigrationService};
pub use traits::{
    Approver, CredentialPrompter, CredentialStore, CredentialsMap, SourceRegistrar, TargetDnsHost,
};
