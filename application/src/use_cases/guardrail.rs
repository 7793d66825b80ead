//! Travel guardrail use case.
//!
//! Asks a classifier model whether the raw user input is about travel,
//! using structured output `{is_travel_question, reasoning}`.

use crate::ports::input_guardrail::{GuardrailError, InputGuardrail};
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use travel_domain::conversation::{ClassifierOutput, GUARDRAIL_INSTRUCTIONS, GuardrailVerdict};
use travel_domain::util::preview;
use travel_domain::Model;

const SCHEMA_NAME: &str = "travel_guardrail";

/// [`InputGuardrail`] backed by a chat model.
pub struct TravelGuardrail {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
}

impl TravelGuardrail {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self { gateway, model }
    }
}

#[async_trait]
impl InputGuardrail for TravelGuardrail {
    async fn check(&self, input: &str) -> Result<GuardrailVerdict, GuardrailError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, GUARDRAIL_INSTRUCTIONS)
            .await?;
        let raw = session
            .send_structured(input, SCHEMA_NAME, &ClassifierOutput::json_schema())
            .await?;

        let verdict = GuardrailVerdict::from(parse_classifier_output(&raw)?);
        debug!(
            "Guardrail verdict: in_domain={} ({})",
            verdict.is_in_domain,
            preview(&verdict.reasoning, 120)
        );
        Ok(verdict)
    }
}

/// Parse the first JSON object in `raw`, tolerating surrounding prose or
/// code fences.
pub fn parse_classifier_output(raw: &str) -> Result<ClassifierOutput, GuardrailError> {
    let start = raw
        .find('{')
        .ok_or_else(|| GuardrailError::InvalidOutput(preview(raw, 200)))?;
    serde_json::Deserializer::from_str(&raw[start..])
        .into_iter::<ClassifierOutput>()
        .next()
        .ok_or_else(|| GuardrailError::InvalidOutput(preview(raw, 200)))?
        .map_err(|e| GuardrailError::InvalidOutput(format!("{e}: {}", preview(raw, 200))))
}
