//! Agent-graph build errors

use thiserror::Error;

/// Why an agent graph could not be built.
///
/// Every variant aborts the whole build; there is no partially built agent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentGraphError {
    #[error("missing key '{key}'{}", referenced_suffix(.referenced_by))]
    MissingKey {
        key: String,
        referenced_by: Option<String>,
    },

    #[error("agent '{id}' is missing required field '{field}'")]
    ConfigFormat { id: String, field: &'static str },

    #[error("agent '{agent}' references unknown tool '{tool}'")]
    UnknownTool { agent: String, tool: String },

    #[error("agent graph contains a cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },
}

fn referenced_suffix(referenced_by: &Option<String>) -> String {
    referenced_by
        .as_deref()
        .map(|r| format!(" (referenced by '{r}')"))
        .unwrap_or_default()
}

impl AgentGraphError {
    /// The config key at fault, for diagnostics.
    pub fn key(&self) -> &str {
        match self {
            AgentGraphError::MissingKey { key, .. } => key,
            AgentGraphError::ConfigFormat { id, .. } => id,
            AgentGraphError::UnknownTool { tool, .. } => tool,
            AgentGraphError::Cycle { path } => path.last().map(String::as_str).unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let missing = AgentGraphError::MissingKey {
            key: "hotel_agent".to_string(),
            referenced_by: Some("manager_agent".to_string()),
        };
        assert_eq!(
            missing.to_string(),
            "missing key 'hotel_agent' (referenced by 'manager_agent')"
        );

        let root = AgentGraphError::MissingKey {
            key: "manager_agent".to_string(),
            referenced_by: None,
        };
        assert_eq!(root.to_string(), "missing key 'manager_agent'");

        let cycle = AgentGraphError::Cycle {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(cycle.to_string(), "agent graph contains a cycle: a -> b -> a");
        assert_eq!(cycle.key(), "a");
    }
}
