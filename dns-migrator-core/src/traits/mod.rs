//! Capability and storage abstraction traits.

mod approver;
mod credential_store;
mod dns_host;
mod registrar;

pub use approver::Approver;
pub use credential_store::{CredentialPrompter, CredentialStore, CredentialsMap};
pub use dns_host::TargetDnsHost;
pub use registrar::SourceRegistrar;
