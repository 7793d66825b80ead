//! Conversation state for the chat front ends
//!
//! - [`history::ConversationHistory`]: the rolling window of past turns
//! - [`prompt::build_message_with_history`]: turns history + input into one prompt
//! - [`guardrail::GuardrailVerdict`]: the per-turn in-domain classification
//! - [`turn::TurnOutcome`]: what one submitted turn produced

pub mod guardrail;
pub mod history;
pub mod prompt;
pub mod turn;

pub use guardrail::{ClassifierOutput, GUARDRAIL_AGENT_NAME, GUARDRAIL_INSTRUCTIONS, GuardrailVerdict};
pub use history::{ConversationHistory, Exchange, HISTORY_CAPACITY};
pub use prompt::{build_message_with_history, build_message_with_history_now};
pub use turn::{BLOCKED_MESSAGE, FAILED_MESSAGE, TurnOutcome};
