//! Web chat UI configuration from TOML (`[web]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "127.0.0.1:7860";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWebConfig {
    /// Listen address for `--web`
    pub bind: String,
}

impl Default for FileWebConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}
