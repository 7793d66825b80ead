//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod conversation;
pub mod guardrail;
pub mod run_agent;
