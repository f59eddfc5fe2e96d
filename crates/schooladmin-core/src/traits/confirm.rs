//! Synchronous yes/no gate consulted before destructive operations.

/// Asks the user to confirm an operation.
///
/// Implementations block until the user answers. Returning `false` must
/// leave the operation un-issued.
pub trait ConfirmGate: Send + Sync + 'static {
    /// Present `message` and return the user's answer.
    fn confirm(&self, message: &str) -> bool;
}

/// A gate that always gives the same answer (`--yes`, scripted runs, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmGate for FixedAnswer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
