//! Agent-graph file loading (`agent_config.json`)
//!
//! The file is a JSON object mapping agent ids to [`AgentSpec`]s. Loading
//! only checks that the file exists and parses; references between agents
//! are resolved later by [`build_agent`](travel_domain::build_agent).
//!
//! [`AgentSpec`]: travel_domain::AgentSpec

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use travel_domain::AgentSpecs;

/// Errors reading the agent-graph file.
#[derive(Error, Debug)]
pub enum AgentConfigError {
    #[error("agent config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read agent config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in agent config {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads [`AgentSpecs`] from disk.
pub struct AgentGraphLoader;

impl AgentGraphLoader {
    pub fn load(path: &Path) -> Result<AgentSpecs, AgentConfigError> {
        if !path.exists() {
            return Err(AgentConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| AgentConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes from {}", content.len(), path.display());

        let specs = Self::parse(&content).map_err(|source| AgentConfigError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Loaded {} agent specs from {}",
            specs.len(),
            path.display()
        );
        Ok(specs)
    }

    pub fn parse(content: &str) -> Result<AgentSpecs, serde_json::Error> {
        serde_json::from_str(content)
    }
}
