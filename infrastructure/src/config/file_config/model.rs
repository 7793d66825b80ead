//! Model provider configuration from TOML (`[model]` section)
//!
//! ```toml
//! [model]
//! name = "gpt-4o-mini"
//! base_url = "https://api.openai.com/v1"
//! api_key_env = "OPENAI_API_KEY"
//! timeout_secs = 120
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use travel_domain::Model;
use travel_domain::core::model::DEFAULT_MODEL;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Chat model used by every agent
    pub name: String,
    /// OpenAI-compatible API root
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout for chat completions
    pub timeout_secs: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 120,
        }
    }
}

impl FileModelConfig {
    pub fn model(&self) -> Model {
        Model::new(&self.name)
    }

    /// API key from the configured variable, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
