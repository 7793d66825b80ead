//! OpenAI function-tool converter.
//!
//! Implementation of [`ToolSchemaPort`] producing the Chat Completions
//! `tools` entry format:
//!
//! ```json
//! { "type": "function",
//!   "function": { "name": "...", "description": "...", "parameters": { ... } } }
//! ```

use serde_json::{Map, Value, json};
use travel_application::ports::tool_schema::ToolSchemaPort;
use travel_domain::tool::entities::ToolDefinition;

/// Handles param_type → JSON Schema type mapping:
/// - `"number"`, `"integer"`, `"boolean"` pass through
/// - anything else → `"string"`
pub struct OpenAiToolConverter;

impl OpenAiToolConverter {
    fn parameters_schema(tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };
            properties.insert(
                param.name.clone(),
                json!({ "type": schema_type, "description": param.description }),
            );
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl ToolSchemaPort for OpenAiToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": Self::parameters_schema(tool),
            }
        })
    }
}
