//! Logging infrastructure
//!
//! - [`telemetry`]: one-time `tracing` subscriber setup (stderr + optional rolling file)
//! - [`JsonlConversationLogger`]: JSONL transcript writer implementing the
//!   [`ConversationLogger`](travel_application::ConversationLogger) port

mod jsonl_logger;
pub mod telemetry;

pub use jsonl_logger::JsonlConversationLogger;
pub use telemetry::{TelemetryGuard, TelemetryOptions, init_tracing};
