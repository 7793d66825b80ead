//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript path; disabled when unset
    pub conversation_log: Option<String>,
    /// Directory for daily-rolling diagnostic logs; disabled when unset
    pub log_dir: Option<String>,
}
