//! Agent runner port
//!
//! "Run this agent graph against this input until it produces a final
//! answer." The conversation driver only sees this seam.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use thiserror::Error;
use travel_domain::Agent;

/// Why an agent run did not produce a final answer.
#[derive(Error, Debug)]
pub enum RunAgentError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Agent '{agent}' returned an empty response")]
    EmptyResponse { agent: String },

    #[error("Agent '{agent}' exceeded {max} tool turns")]
    MaxTurnsExceeded { agent: String, max: usize },

    #[error("Sub-agent nesting exceeded depth {max}")]
    MaxDepthExceeded { max: usize },
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub final_output: String,
    /// Agent that produced the final output, after any handoffs.
    pub last_agent: String,
    /// Tool calls made across the whole run, sub-agents included.
    pub tool_calls: usize,
}

#[async_trait]
pub trait AgentRunner: Send + Sync {
    async fn run(&self, agent: &Agent, input: &str) -> Result<RunOutput, RunAgentError>;
}
