//! Console bindings for the approval and prompting capabilities.

use std::io::{self, BufRead, Write};

use dns_migrator_core::error::{CoreError, CoreResult};
use dns_migrator_core::traits::{Approver, CredentialPrompter};
use dns_migrator_core::types::ProviderKind;

fn read_line() -> CoreResult<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CoreError::ValidationError(format!("failed to read input: {e}")))?;
    Ok(line.trim().to_string())
}

fn flush_prompt(prompt: &str) -> CoreResult<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(prompt.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| CoreError::ValidationError(format!("failed to write prompt: {e}")))
}

/// `[Y/n]`-style console approver. Empty input takes the default; anything
/// unrecognized re-asks.
pub struct ConsoleApprover;

impl Approver for ConsoleApprover {
    fn confirm(&self, message: &str, default: bool) -> CoreResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            flush_prompt(&format!("\n{message} {hint} "))?;
            let answer = read_line()?;
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => flush_prompt("Please answer 'y' or 'n'.\n")?,
            }
        }
    }
}

/// Console credential prompter. Re-asks on empty input rather than storing a
/// blank field.
pub struct ConsolePrompter;

impl CredentialPrompter for ConsolePrompter {
    fn prompt_field(&self, provider: ProviderKind, _key: &str, label: &str) -> CoreResult<String> {
        loop {
            flush_prompt(&format!("{} {label}: ", provider.label()))?;
            let value = read_line()?;
            if !value.is_empty() {
                return Ok(value);
            }
            flush_prompt("A value is required.\n")?;
        }
    }
}
