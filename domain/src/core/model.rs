//! Model value object identifying the chat model an agent runs on

use serde::{Deserialize, Serialize};

/// Default chat model used when neither settings nor CLI name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat model identifier (Value Object)
///
/// The provider decides which identifiers are valid; the domain only
/// guarantees the identifier is non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    /// Create a model identifier, falling back to [`DEFAULT_MODEL`] when blank.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Model {
    fn default() -> Self {
        Self(DEFAULT_MODEL.to_string())
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}
