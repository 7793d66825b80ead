//! Tool domain value objects — result and error types
//!
//! Travel tools fail closed: a missing credential or a broken upstream API
//! still produces a *successful* [`ToolResult`] whose output describes the
//! problem, so the model always receives something it can relay. A failed
//! result is reserved for calls the executor cannot dispatch at all (unknown
//! tool, missing required argument).

use serde::{Deserialize, Serialize};

/// Error that prevented a tool call from being dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "INVALID_ARGUMENT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(tool: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("Tool not found: {}", tool.into()))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, carrying output or error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
            duration_ms: None,
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            duration_ms: None,
        }
    }

    /// Add duration metadata
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Text handed back to the model: the output, or the error rendered as text.
    pub fn to_model_text(&self) -> String {
        match (&self.output, &self.error) {
            (Some(output), _) => output.clone(),
            (None, Some(error)) => format!("Error: {}", error.message),
            (None, None) => String::new(),
        }
    }
}
