//! Tool domain module
//!
//! Defines what agents can call and what comes back.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ TravelTool   │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (catalog)    │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`TravelTool`] — closed set of HTTP-backed tools, resolved by name
//! - [`ToolDefinition`] — schema the model sees
//! - [`ToolCall`] — an invocation request with arguments
//! - [`ToolResult`] — execution outcome
//!
//! The domain holds no I/O. The application layer defines the
//! `ToolExecutorPort`; the infrastructure layer performs the HTTP calls.

pub mod catalog;
pub mod entities;
pub mod value_objects;

pub use catalog::TravelTool;
pub use entities::{ToolCall, ToolDefinition, ToolParameter};
pub use value_objects::{ToolError, ToolResult};
