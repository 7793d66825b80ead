//! Guardrail configuration from TOML (`[guardrail]` section)

use serde::{Deserialize, Serialize};
use travel_domain::Model;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGuardrailConfig {
    /// Classify each input before running the agent graph
    pub enabled: bool,
    /// Classifier model; falls back to `[model].name`
    pub model: Option<String>,
}

impl Default for FileGuardrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: None,
        }
    }
}

impl FileGuardrailConfig {
    pub fn model_or(&self, fallback: &Model) -> Model {
        self.model
            .as_deref()
            .map(Model::new)
            .unwrap_or_else(|| fallback.clone())
    }
}
