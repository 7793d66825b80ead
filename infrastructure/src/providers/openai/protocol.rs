//! Chat Completions wire types and conversions to domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;
use travel_application::ports::llm_gateway::{GatewayError, ToolResultMessage};
use travel_domain::{ContentBlock, LlmResponse, StopReason};

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.to_string()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: &str) -> Self {
        Self::text("system", content)
    }

    pub fn user(content: &str) -> Self {
        Self::text("user", content)
    }

    pub fn tool_result(result: &ToolResultMessage) -> Self {
        let content = if result.is_error {
            format!("Error: {}", result.output)
        } else {
            result.output.clone()
        };
        Self {
            role: "tool".to_string(),
            content: Some(content),
            tool_calls: Vec::new(),
            tool_call_id: Some(result.tool_use_id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: WireFunction,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    /// JSON-encoded arguments object.
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// `response_format` asking for JSON matching `schema`.
pub fn json_schema_format(name: &str, schema: &Value) -> Value {
    serde_json::json!({
        "type": "json_schema",
        "json_schema": {
            "name": name,
            "schema": schema,
            "strict": true,
        }
    })
}

/// Extract `error.message` from an error body, if it has one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}

/// Convert the first choice into a domain response.
///
/// Also returns the assistant message so the session can append it to its
/// history verbatim.
pub fn into_llm_response(
    response: ChatResponse,
) -> Result<(LlmResponse, ChatMessage), GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

    let mut content = Vec::new();
    if let Some(text) = choice.message.content.as_deref()
        && !text.is_empty()
    {
        content.push(ContentBlock::Text(text.to_string()));
    }
    for call in &choice.message.tool_calls {
        content.push(ContentBlock::ToolUse {
            id: call.id.clone(),
            name: call.function.name.clone(),
            input: parse_arguments(&call.function.name, &call.function.arguments),
        });
    }

    let llm_response = LlmResponse {
        content,
        stop_reason: choice
            .finish_reason
            .as_deref()
            .map(StopReason::from_finish_reason),
        model: response.model,
    };
    Ok((llm_response, choice.message))
}

fn parse_arguments(tool: &str, arguments: &str) -> HashMap<String, Value> {
    if arguments.trim().is_empty() {
        return HashMap::new();
    }
    match serde_json::from_str::<Value>(arguments) {
        Ok(Value::Object(map)) => map.into_iter().collect(),
        Ok(other) => {
            warn!("Arguments for {} are not an object: {}", tool, other);
            HashMap::new()
        }
        Err(e) => {
            warn!("Unparseable arguments for {}: {}", tool, e);
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> ChatResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_reply() {
        let (llm, message) = into_llm_response(response(json!({
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "message": { "role": "assistant", "content": "Lisbon is sunny." },
                "finish_reason": "stop"
            }]
        })))
        .unwrap();

        assert_eq!(llm.text_content(), "Lisbon is sunny.");
        assert_eq!(llm.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(llm.model.as_deref(), Some("gpt-4o-mini-2024-07-18"));
        assert_eq!(message.role, "assistant");
    }

    #[test]
    fn test_tool_call_reply() {
        let (llm, message) = into_llm_response(response(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "find_hotels",
                            "arguments": "{\"city\":\"Lisbon\",\"occupancy\":2}"
                        }
                    }, {
                        "id": "call_2",
                        "type": "function",
                        "function": { "name": "find_flights", "arguments": "not json" }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .unwrap();

        let calls = llm.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].native_id.as_deref(), Some("call_1"));
        assert_eq!(calls[0].get_string("city"), Some("Lisbon"));
        assert_eq!(calls[0].get_i64("occupancy"), Some(2));
        assert!(calls[1].arguments.is_empty());
        assert_eq!(llm.stop_reason, Some(StopReason::ToolUse));
        assert_eq!(message.tool_calls.len(), 2);
    }

    #[test]
    fn test_no_choices_is_invalid() {
        let err = into_llm_response(response(json!({ "choices": [] }))).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn test_tool_result_message() {
        let message = ChatMessage::tool_result(&ToolResultMessage {
            tool_use_id: "call_1".to_string(),
            tool_name: "find_hotels".to_string(),
            output: "Tool not found".to_string(),
            is_error: true,
        });
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_call_id"], "call_1");
        assert_eq!(value["content"], "Error: Tool not found");
        assert!(value.get("tool_calls").is_none());
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("Incorrect API key provided")
        );
        assert_eq!(error_message("upstream timeout"), None);
    }
}
