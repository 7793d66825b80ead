//! OpenAI-compatible LLM Gateway implementation

use super::session::OpenAiSession;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use travel_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use travel_domain::Model;

/// Chat requests can take a while when tools produce long outputs.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings shared by every session of a gateway.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API root, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// Bearer token; `None` for local servers that need none
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// LLM Gateway for any OpenAI-compatible Chat Completions endpoint
pub struct OpenAiGateway {
    client: reqwest::Client,
    config: Arc<OpenAiConfig>,
}

impl OpenAiGateway {
    pub fn new(config: OpenAiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if config.api_key.is_none() {
            warn!(
                "No API key configured for {}; requests are sent unauthenticated",
                config.base_url
            );
        }
        info!("OpenAiGateway initialized for {}", config.base_url);

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.config),
            model.clone(),
            None,
        )))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.config),
            model.clone(),
            Some(system_prompt),
        )))
    }
}
