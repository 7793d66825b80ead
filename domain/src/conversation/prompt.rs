//! Prompt construction
//!
//! The agent graph sees one flat message per turn: the current UTC time,
//! the rolling history, then the new input.
//!
//! ```text
//! Current time: 2025-05-01 09:30:00
//!
//! Previous conversation:
//!
//! You: Flights to Paris?
//! Assistant: Here are three options...
//!
//! You: And hotels?
//! ```

use super::history::ConversationHistory;
use chrono::{DateTime, Utc};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the message sent to the agent graph for `input`.
pub fn build_message_with_history(
    history: &ConversationHistory,
    input: &str,
    now: DateTime<Utc>,
) -> String {
    let mut message = format!("Current time: {}", now.format(TIME_FORMAT));

    if !history.is_empty() {
        message.push_str("\n\nPrevious conversation:");
        for exchange in history.iter() {
            message.push_str("\n\nYou: ");
            message.push_str(&exchange.user);
            message.push_str("\nAssistant: ");
            message.push_str(&exchange.assistant);
        }
    }

    message.push_str("\n\nYou: ");
    message.push_str(input);
    message
}

/// [`build_message_with_history`] stamped with the current time.
pub fn build_message_with_history_now(history: &ConversationHistory, input: &str) -> String {
    build_message_with_history(history, input, Utc::now())
}
