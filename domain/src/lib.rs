//! Domain layer for travel-agent
//!
//! Pure types and logic, no I/O. The central pieces are:
//!
//! - **Agent graph**: [`AgentSpecs`] as read from config, resolved by
//!   [`build_agent`] into an [`Agent`] tree of tools, sub-agents and handoffs
//! - **Tool catalog**: the closed set of [`TravelTool`]s an agent may use
//! - **Conversation**: rolling [`ConversationHistory`], prompt construction,
//!   guardrail verdicts and per-turn [`TurnOutcome`]s

pub mod agent;
pub mod conversation;
pub mod core;
pub mod session;
pub mod tool;
pub mod util;

pub use agent::{
    Agent, AgentGraphError, AgentSpec, AgentSpecs, AgentTool, Capability, DEFAULT_ROOT_AGENT,
    build_agent, sanitize_tool_name,
};
pub use conversation::{
    ClassifierOutput, ConversationHistory, Exchange, GuardrailVerdict, TurnOutcome,
    build_message_with_history,
};
pub use core::model::Model;
pub use session::{ContentBlock, LlmResponse, StopReason};
pub use tool::{
    ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, TravelTool,
};
