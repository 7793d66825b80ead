//! OpenAI-compatible Chat Completions adapter.
//!
//! The Chat Completions API is stateless: each [`OpenAiSession`] keeps the
//! message list locally and replays it on every request.
//!
//! ```text
//! send / send_with_tools / send_structured  → user message
//! send_tool_results                         → one "tool" message per result
//!      │
//!      ▼
//! POST {base_url}/chat/completions ──▶ assistant message appended to history
//! ```

mod gateway;
mod protocol;
mod session;

pub use gateway::{OpenAiConfig, OpenAiGateway};
pub use session::OpenAiSession;
