use intake_core::{BlockReason, CoreError, FlowView, InputEvent};

/// One decision taken by the user while a screen is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowCommand {
    Input(InputEvent),
    Continue,
    Back,
    Quit,
}

/// Abstraction over the interaction mechanism so the runner can be driven by
/// dialoguer prompts, a script on stdin, or a mock in tests.
pub trait FlowInteraction {
    fn next_command(&mut self, view: &FlowView<'_>) -> FlowCommand;

    /// Called when a continue request was refused by the screen's gate.
    fn blocked(&mut self, reason: &BlockReason);

    /// Called when saving the profile failed. Returning true retries the
    /// same advance.
    fn persistence_failed(&mut self, error: &CoreError) -> bool;
}
