//! Orchestration services.

mod credential_service;
mod migration_service;

pub use credential_service::CredentialService;
pub use migration_service::MigrationService;
