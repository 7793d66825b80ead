//! Agent domain module
//!
//! Declarative agent specs, the built agent graph, and the builder that
//! turns one into the other.

pub mod builder;
pub mod entities;
pub mod error;
pub mod sanitize;
pub mod spec;

pub use builder::build_agent;
pub use entities::{Agent, AgentTool, Capability, HANDOFF_TOOL_PREFIX, SUB_AGENT_INPUT_ARG};
pub use error::AgentGraphError;
pub use sanitize::{FALLBACK_TOOL_NAME, is_valid_tool_name, sanitize_tool_name};
pub use spec::{AgentSpec, AgentSpecs, DEFAULT_ROOT_AGENT};
