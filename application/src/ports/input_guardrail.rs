//! Input guardrail port
//!
//! Classifies a raw user input before the agent graph sees it.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use thiserror::Error;
use travel_domain::GuardrailVerdict;

#[derive(Error, Debug)]
pub enum GuardrailError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Classifier output could not be parsed: {0}")]
    InvalidOutput(String),
}

#[async_trait]
pub trait InputGuardrail: Send + Sync {
    async fn check(&self, input: &str) -> Result<GuardrailVerdict, GuardrailError>;
}
