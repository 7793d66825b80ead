//! Outcome of one submitted chat turn

use super::guardrail::GuardrailVerdict;

/// Shown when the guardrail blocks a turn.
pub const BLOCKED_MESSAGE: &str = "This request was blocked: it doesn't seem to be about travel.";

/// Shown when a turn fails for any other reason.
pub const FAILED_MESSAGE: &str = "Error. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The agent graph produced a final answer.
    Answered { output: String, agent: String },
    Blocked { verdict: GuardrailVerdict },
    /// Detail is for logs only; users see [`FAILED_MESSAGE`].
    Failed { error: String },
}

impl TurnOutcome {
    /// Text shown to the user for this outcome.
    pub fn message(&self) -> &str {
        match self {
            TurnOutcome::Answered { output, .. } => output,
            TurnOutcome::Blocked { .. } => BLOCKED_MESSAGE,
            TurnOutcome::Failed { .. } => FAILED_MESSAGE,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, TurnOutcome::Answered { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TurnOutcome::Answered { .. } => "answered",
            TurnOutcome::Blocked { .. } => "blocked",
            TurnOutcome::Failed { .. } => "failed",
        }
    }
}
