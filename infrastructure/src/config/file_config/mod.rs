//! Raw TOML configuration data types
//!
//! These structs mirror the settings file section by section. Every field
//! has a default, so an empty file (or no file) is a valid configuration.

mod agents;
mod execution;
mod guardrail;
mod logging;
mod model;
mod repl;
mod tools;
mod web;

pub use agents::{DEFAULT_AGENT_CONFIG_PATH, FileAgentsConfig};
pub use execution::FileExecutionConfig;
pub use guardrail::FileGuardrailConfig;
pub use logging::FileLoggingConfig;
pub use model::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileModelConfig};
pub use repl::FileReplConfig;
pub use tools::FileToolsConfig;
pub use web::{DEFAULT_BIND, FileWebConfig};

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub model: FileModelConfig,
    pub agents: FileAgentsConfig,
    pub guardrail: FileGuardrailConfig,
    pub execution: FileExecutionConfig,
    pub tools: FileToolsConfig,
    pub repl: FileReplConfig,
    pub web: FileWebConfig,
    pub logging: FileLoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One problem found by [`FileConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: &'static str,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }

    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the whole configuration, returning every detected issue.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.name.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                "model.name",
                "empty model name, falling back to the default model",
            ));
        }
        if self.model.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error("model.base_url", "cannot be empty"));
        }
        if self.model.timeout_secs == 0 {
            issues.push(ConfigIssue::error("model.timeout_secs", "cannot be 0"));
        }
        if self.agents.path.trim().is_empty() {
            issues.push(ConfigIssue::error("agents.path", "cannot be empty"));
        }
        if self.agents.root.trim().is_empty() {
            issues.push(ConfigIssue::error("agents.root", "cannot be empty"));
        }
        if self.execution.max_tool_turns == 0 {
            issues.push(ConfigIssue::error(
                "execution.max_tool_turns",
                "must be at least 1",
            ));
        }
        if self.tools.timeout_secs == 0 {
            issues.push(ConfigIssue::error("tools.timeout_secs", "cannot be 0"));
        }
        if self.web.bind.parse::<SocketAddr>().is_err() {
            issues.push(ConfigIssue::error(
                "web.bind",
                format!("'{}' is not a socket address", self.web.bind),
            ));
        }

        issues
    }

    /// Whether [`validate`](Self::validate) found anything fatal.
    pub fn has_errors(&self) -> bool {
        self.validate()
            .iter()
            .any(|i| i.severity == Severity::Error)
    }
}
