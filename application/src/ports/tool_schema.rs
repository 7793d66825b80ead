//! Tool schema conversion port.
//!
//! Separates "which tools an agent has" (domain) from "how to serialize them
//! for the provider API" (infrastructure).

use travel_domain::tool::entities::ToolDefinition;

/// Port for converting tool definitions to the provider's JSON format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert a list of definitions, keeping their order.
    fn tools_schema(&self, tools: &[ToolDefinition]) -> Vec<serde_json::Value> {
        tools.iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
