//! Tool Executor port
//!
//! Defines the interface for executing catalog tools (flights, hotels, cost of living).

use async_trait::async_trait;
use travel_domain::tool::{entities::ToolCall, value_objects::ToolResult};

/// Port for tool execution
///
/// Implementations (adapters) live in the infrastructure layer. `execute`
/// never fails: errors are carried inside the [`ToolResult`].
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Execute a tool call
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
