//! Configuration loading for travel-agent
//!
//! Two files feed the application:
//!
//! - settings (TOML), merged by [`ConfigLoader`] from, highest priority first:
//!   1. `TRAVEL_AGENT_<SECTION>__<KEY>` environment variables
//!   2. `--config <path>`
//!   3. `./travel-agent.toml`
//!   4. `~/.config/travel-agent/config.toml`
//!   5. default values
//! - the agent graph (JSON), read by [`AgentGraphLoader`]

mod agent_graph;
mod file_config;
mod loader;

pub use agent_graph::{AgentConfigError, AgentGraphLoader};
pub use file_config::{
    ConfigIssue, DEFAULT_AGENT_CONFIG_PATH, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_BIND,
    FileAgentsConfig, FileConfig, FileExecutionConfig, FileGuardrailConfig, FileLoggingConfig,
    FileModelConfig, FileReplConfig, FileToolsConfig, FileWebConfig, Severity,
};
pub use loader::ConfigLoader;
