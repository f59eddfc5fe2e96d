//! Terminal confirmation prompts.

use dialoguer::Confirm;
use tracing::warn;

use schooladmin_core::traits::ConfirmGate;

/// Asks on the terminal, or answers yes when `--yes` was given.
///
/// A prompt that cannot be shown (no TTY) counts as a decline.
#[derive(Debug, Clone, Copy)]
pub struct PromptConfirm {
    assume_yes: bool,
}

impl PromptConfirm {
    /// Create a gate. With `assume_yes` no prompt is shown.
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl ConfirmGate for PromptConfirm {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match Confirm::new().with_prompt(message).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Confirmation prompt unavailable, declining");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(PromptConfirm::new(true).confirm("Delete everything?"));
    }
}
