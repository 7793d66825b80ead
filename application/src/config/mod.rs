//! Application-level configuration.
//!
//! - [`ExecutionParams`]: agent-run loop control (tool turns, nesting depth)

pub mod execution_params;

pub use execution_params::ExecutionParams;
