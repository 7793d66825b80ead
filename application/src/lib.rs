//! Application layer for travel-agent
//!
//! Use cases, port definitions, and application configuration.
//! Depends only on the domain layer.

pub mod bridge;
pub mod config;
pub mod ports;
pub mod use_cases;

pub use bridge::{BlockingConversation, SyncBridge};
pub use config::ExecutionParams;
pub use ports::{
    agent_progress::{AgentProgressNotifier, NoAgentProgress},
    agent_runner::{AgentRunner, RunAgentError, RunOutput},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    input_guardrail::{GuardrailError, InputGuardrail},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, ToolResultMessage},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::conversation::ConversationDriver;
pub use use_cases::guardrail::TravelGuardrail;
pub use use_cases::run_agent::RunAgentUseCase;
