//! Orchestration layer types.

mod credentials;
mod migration;

pub use credentials::{CredentialValidationError, ProviderCredentials, ProviderKind};
pub use migration::{MigrationOptions, MigrationReport, StepOutcome, StepStatus};
