//! Shell lifecycle state machine.

/// Lifecycle state of the interactive shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellState {
    /// Shell has been constructed but the read loop has not started.
    #[default]
    Idle,
    /// Waiting for the next line of input.
    AwaitingLine,
    /// A command handler is running.
    Dispatching,
    /// The operator quit; no further lines are processed.
    Terminated,
}

impl ShellState {
    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - Idle -> AwaitingLine
    /// - AwaitingLine -> Dispatching
    /// - Dispatching -> AwaitingLine
    /// - AwaitingLine -> Terminated (EOF on input)
    /// - Dispatching -> Terminated (quit command)
    pub fn can_transition_to(&self, target: ShellState) -> bool {
        use ShellState::*;
        matches!(
            (*self, target),
            (Idle, AwaitingLine)
                | (AwaitingLine, Dispatching)
                | (Dispatching, AwaitingLine)
                | (AwaitingLine, Terminated)
                | (Dispatching, Terminated)
        )
    }

    /// Check if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShellState::Terminated)
    }
}
