//! Agent graph location from TOML (`[agents]` section)

use serde::{Deserialize, Serialize};
use travel_domain::DEFAULT_ROOT_AGENT;

pub const DEFAULT_AGENT_CONFIG_PATH: &str = "agent_config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    /// Path to the JSON agent graph
    pub path: String,
    /// Id of the root agent in the graph
    pub root: String,
}

impl Default for FileAgentsConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_AGENT_CONFIG_PATH.to_string(),
            root: DEFAULT_ROOT_AGENT.to_string(),
        }
    }
}
