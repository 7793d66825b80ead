//! OpenAI-compatible LLM session implementation

use super::gateway::OpenAiConfig;
use super::protocol::{self, ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use travel_application::ports::llm_gateway::{GatewayError, LlmSession, ToolResultMessage};
use travel_domain::{LlmResponse, Model};

pub struct OpenAiSession {
    client: reqwest::Client,
    config: Arc<OpenAiConfig>,
    model: Model,
    /// Conversation history, replayed on every request
    messages: Mutex<Vec<ChatMessage>>,
    /// Tool schemas (set by the last send_with_tools call)
    tools: Mutex<Vec<Value>>,
}

impl OpenAiSession {
    pub fn new(
        client: reqwest::Client,
        config: Arc<OpenAiConfig>,
        model: Model,
        system_prompt: Option<&str>,
    ) -> Self {
        let messages = system_prompt
            .filter(|p| !p.is_empty())
            .map(ChatMessage::system)
            .into_iter()
            .collect();
        Self {
            client,
            config,
            model,
            messages: Mutex::new(messages),
            tools: Mutex::new(Vec::new()),
        }
    }

    /// Send `new_messages` after the history. The history only grows when
    /// the request succeeds.
    async fn exchange(
        &self,
        new_messages: Vec<ChatMessage>,
        response_format: Option<Value>,
    ) -> Result<LlmResponse, GatewayError> {
        let mut messages = self.messages.lock().await;
        let tools = self.tools.lock().await.clone();

        let mut outgoing = messages.clone();
        outgoing.extend(new_messages.iter().cloned());
        let request = ChatRequest {
            model: self.model.as_str(),
            messages: &outgoing,
            tools,
            response_format,
        };

        debug!(
            model = %self.model,
            messages = outgoing.len(),
            tools = request.tools.len(),
            "Calling chat completions"
        );
        let reply = self.post(&request).await?;
        let (response, assistant) = protocol::into_llm_response(reply)?;

        messages.extend(new_messages);
        messages.push(assistant);
        Ok(response)
    }

    async fn post(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, GatewayError> {
        let mut builder = self
            .client
            .post(self.config.completions_url())
            .json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else if e.is_connect() {
                GatewayError::ConnectionError(e.to_string())
            } else {
                GatewayError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = protocol::error_message(&body).unwrap_or(body);
            return Err(match status.as_u16() {
                401 | 403 => GatewayError::Unauthorized(message),
                404 => GatewayError::ModelNotAvailable(format!("{}: {}", self.model, message)),
                code => GatewayError::RequestFailed(format!("HTTP {}: {}", code, message)),
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let response = self.exchange(vec![ChatMessage::user(content)], None).await?;
        Ok(response.text_content())
    }

    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[Value],
    ) -> Result<LlmResponse, GatewayError> {
        *self.tools.lock().await = tools.to_vec();
        self.exchange(vec![ChatMessage::user(content)], None).await
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError> {
        let messages = results.iter().map(ChatMessage::tool_result).collect();
        self.exchange(messages, None).await
    }

    async fn send_structured(
        &self,
        content: &str,
        schema_name: &str,
        schema: &Value,
    ) -> Result<String, GatewayError> {
        let format = protocol::json_schema_format(schema_name, schema);
        let response = self
            .exchange(vec![ChatMessage::user(content)], Some(format))
            .await?;
        Ok(response.text_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::openai::gateway::OpenAiGateway;
    use serde_json::json;
    use travel_application::ports::llm_gateway::LlmGateway;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn text_reply(text: &str) -> Value {
        json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "message": { "role": "assistant", "content": text },
                "finish_reason": "stop"
            }]
        })
    }

    fn gateway(server: &MockServer, key: Option<&str>) -> OpenAiGateway {
        OpenAiGateway::new(OpenAiConfig::new(
            format!("{}/v1", server.uri()),
            key.map(str::to_string),
        ))
        .unwrap()
    }

    fn request_body(request: &Request) -> Value {
        serde_json::from_slice(&request.body).unwrap()
    }

    #[tokio::test]
    async fn test_send_keeps_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Hello!")))
            .expect(2)
            .mount(&server)
            .await;

        let session = gateway(&server, Some("sk-test"))
            .create_session_with_system_prompt(&Model::default(), "Plan trips.")
            .await
            .unwrap();
        assert_eq!(session.send("Hi").await.unwrap(), "Hello!");
        session.send("Again").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let second = request_body(&requests[1]);
        let roles: Vec<&str> = second["messages"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|m| m["role"].as_str())
            .collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(second["model"], "gpt-4o-mini");
        assert!(second.get("tools").is_none());
    }

    #[tokio::test]
    async fn test_tool_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": { "name": "find_hotels", "arguments": "{\"city\":\"Lisbon\"}" }
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Found 3 hotels.")))
            .mount(&server)
            .await;

        let session = gateway(&server, None)
            .create_session(&Model::default())
            .await
            .unwrap();
        let tools = vec![json!({ "type": "function", "function": { "name": "find_hotels" } })];

        let first = session.send_with_tools("Hotels in Lisbon", &tools).await.unwrap();
        let calls = first.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get_string("city"), Some("Lisbon"));

        let second = session
            .send_tool_results(&[ToolResultMessage {
                tool_use_id: "call_1".to_string(),
                tool_name: "find_hotels".to_string(),
                output: "{\"hotels\":[]}".to_string(),
                is_error: false,
            }])
            .await
            .unwrap();
        assert_eq!(second.text_content(), "Found 3 hotels.");

        let requests = server.received_requests().await.unwrap();
        let body = request_body(&requests[1]);
        assert_eq!(body["tools"][0]["function"]["name"], "find_hotels");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages[1]["tool_calls"][0]["id"], "call_1");
        assert_eq!(messages[2]["role"], "tool");
        assert_eq!(messages[2]["tool_call_id"], "call_1");
    }

    #[tokio::test]
    async fn test_send_structured_sets_response_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "response_format": {
                    "type": "json_schema",
                    "json_schema": { "name": "travel_guardrail" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(
                r#"{"is_travel_question":true,"reasoning":"flights"}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let session = gateway(&server, None)
            .create_session(&Model::default())
            .await
            .unwrap();
        let raw = session
            .send_structured("Flights?", "travel_guardrail", &json!({ "type": "object" }))
            .await
            .unwrap();
        assert!(raw.contains("is_travel_question"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided" }
            })))
            .mount(&server)
            .await;

        let session = gateway(&server, Some("bad"))
            .create_session(&Model::default())
            .await
            .unwrap();
        let err = session.send("Hi").await.unwrap_err();
        assert!(
            matches!(err, GatewayError::Unauthorized(ref m) if m == "Incorrect API key provided")
        );
    }

    #[tokio::test]
    async fn test_failed_request_does_not_grow_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("ok")))
            .mount(&server)
            .await;

        let session = gateway(&server, None)
            .create_session(&Model::default())
            .await
            .unwrap();
        assert!(matches!(
            session.send("first").await,
            Err(GatewayError::RequestFailed(_))
        ));
        session.send("second").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = request_body(&requests[1]);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["content"], "second");
    }
}
