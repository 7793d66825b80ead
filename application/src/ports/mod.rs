//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod agent_progress;
pub mod agent_runner;
pub mod conversation_logger;
pub mod input_guardrail;
pub mod llm_gateway;
pub mod tool_executor;
pub mod tool_schema;
