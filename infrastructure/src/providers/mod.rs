//! Model provider adapters implementing [`LlmGateway`].
//!
//! [`LlmGateway`]: travel_application::ports::llm_gateway::LlmGateway

pub mod openai;

pub use openai::{OpenAiConfig, OpenAiGateway, OpenAiSession};
