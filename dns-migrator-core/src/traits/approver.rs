//! Human approval gate abstraction.

use crate::error::CoreResult;

/// The single approval primitive every mutating step passes through.
///
/// Implementations: a console `[Y/n]` prompt in the CLI, a scripted stub in
/// tests. The orchestrator calls `confirm` immediately before a mutating
/// network call and skips the call entirely on a negative answer.
pub trait Approver: Send + Sync {
    /// Present a binary choice with the stated default and return the answer.
    fn confirm(&self, message: &str, default: bool) -> CoreResult<bool>;
}
