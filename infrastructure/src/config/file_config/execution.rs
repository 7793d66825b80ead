//! Agent run limits from TOML (`[execution]` section)

use serde::{Deserialize, Serialize};
use travel_application::ExecutionParams;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    pub max_tool_turns: usize,
    pub max_agent_depth: usize,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_tool_turns: params.max_tool_turns,
            max_agent_depth: params.max_agent_depth,
        }
    }
}

impl FileExecutionConfig {
    pub fn to_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_tool_turns(self.max_tool_turns)
            .with_max_agent_depth(self.max_agent_depth)
    }
}
