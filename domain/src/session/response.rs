//! Structured chat-model replies.
//!
//! A reply is a list of content blocks mixing text and tool-use requests.
//! The agent runner inspects the tool-use blocks to decide whether to call
//! tools, run a sub-agent, hand off, or finish.
//!
//! ```text
//! send_with_tools() → LlmResponse ─┬─ tool_calls() non-empty → execute, send_tool_results()
//!                                  └─ no tool calls           → text_content() is the answer
//! ```

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within a model reply.
///
/// # Examples
///
/// ```
/// use travel_domain::session::response::ContentBlock;
///
/// let text = ContentBlock::Text("Looking up flights.".to_string());
/// assert_eq!(text.as_text(), Some("Looking up flights."));
///
/// let tool = ContentBlock::ToolUse {
///     id: "call_abc123".to_string(),
///     name: "find_flights".to_string(),
///     input: [("departure".to_string(), serde_json::json!("Lisbon"))]
///         .into_iter().collect(),
/// };
/// assert!(tool.as_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text(String),

    /// A tool-use request from the model.
    ToolUse {
        /// Provider-assigned id, echoed back with the tool result.
        id: String,
        name: String,
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    /// Tools were requested; results must be sent back before the model continues.
    ToolUse,
    MaxTokens,
    Other(String),
}

impl StopReason {
    /// Map an OpenAI-style `finish_reason`.
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "stop" => StopReason::EndTurn,
            "tool_calls" | "function_call" => StopReason::ToolUse,
            "length" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// A structured reply from a chat model.
///
/// # Examples
///
/// ```
/// use travel_domain::session::response::{LlmResponse, ContentBlock, StopReason};
///
/// let response = LlmResponse::from_text("Lisbon is lovely in May.");
/// assert_eq!(response.text_content(), "Lisbon is lovely in May.");
/// assert!(!response.has_tool_calls());
///
/// let response = LlmResponse {
///     content: vec![ContentBlock::ToolUse {
///         id: "call_1".to_string(),
///         name: "find_hotels".to_string(),
///         input: [("city".to_string(), serde_json::json!("Lisbon"))]
///             .into_iter().collect(),
///     }],
///     stop_reason: Some(StopReason::ToolUse),
///     model: Some("gpt-4o-mini".to_string()),
/// };
/// assert_eq!(response.tool_calls().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<StopReason>,
    /// Model identifier, if the provider returned one.
    pub model: Option<String>,
}

impl LlmResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Concatenate all `Text` blocks.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Tool-use blocks as [`ToolCall`]s carrying their provider ids.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::from_native(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }

    /// True when there is neither text nor a tool request.
    pub fn is_empty(&self) -> bool {
        !self.has_tool_calls() && self.text_content().trim().is_empty()
    }
}
