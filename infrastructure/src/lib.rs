//! Infrastructure layer for travel-agent
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the OpenAI-compatible model gateway, the HTTP travel
//! tools, settings and agent-graph loading, and logging.

pub mod config;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    AgentConfigError, AgentGraphLoader, ConfigIssue, ConfigLoader, FileConfig, Severity,
};
pub use logging::{JsonlConversationLogger, TelemetryGuard, TelemetryOptions, init_tracing};
pub use providers::{OpenAiConfig, OpenAiGateway};
pub use tools::{OpenAiToolConverter, ToolCredentials, ToolEndpoints, TravelToolExecutor};
