//! Execution parameters for agent runs.
//!
//! [`ExecutionParams`] bounds the native tool loop in
//! [`RunAgentUseCase`](crate::use_cases::run_agent::RunAgentUseCase).

use serde::{Deserialize, Serialize};

/// Loop control for one agent run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum tool-use round trips per agent before the run is aborted.
    pub max_tool_turns: usize,
    /// Maximum sub-agent nesting depth.
    pub max_agent_depth: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_tool_turns: 10,
            max_agent_depth: 8,
        }
    }
}

impl ExecutionParams {
    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    pub fn with_max_agent_depth(mut self, max: usize) -> Self {
        self.max_agent_depth = max;
        self
    }
}
