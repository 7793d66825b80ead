//! LLM Gateway port
//!
//! Defines the interface for communicating with chat-model providers.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use travel_domain::{LlmResponse, Model};

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session with the specified model
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError>;

    /// Create a new session whose first message is `system_prompt`
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// Result of one tool call, sent back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResultMessage {
    /// Provider id of the tool-use block this answers.
    pub tool_use_id: String,
    pub tool_name: String,
    pub output: String,
    pub is_error: bool,
}

/// An active LLM session
///
/// Sessions keep their own message history; every `send*` call appends to it.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get a text response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;

    /// Send a message with tool definitions (provider JSON schema).
    ///
    /// Default implementation ignores the tools and wraps [`send`](Self::send).
    async fn send_with_tools(
        &self,
        content: &str,
        _tools: &[Value],
    ) -> Result<LlmResponse, GatewayError> {
        let text = self.send(content).await?;
        Ok(LlmResponse::from_text(text))
    }

    /// Answer the tool calls of the previous response.
    async fn send_tool_results(
        &self,
        _results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError> {
        Err(GatewayError::SessionError(
            "this session does not support tool results".to_string(),
        ))
    }

    /// Send a message asking for JSON output matching `schema`.
    ///
    /// Default implementation falls back to a plain [`send`](Self::send).
    async fn send_structured(
        &self,
        content: &str,
        _schema_name: &str,
        _schema: &Value,
    ) -> Result<String, GatewayError> {
        self.send(content).await
    }
}
