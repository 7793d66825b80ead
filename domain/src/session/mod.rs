//! Chat-model session value types.
//!
//! - [`response::LlmResponse`]: one structured reply from a chat model
//! - [`response::ContentBlock`]: text or tool-use block within a reply

pub mod response;

pub use response::{ContentBlock, LlmResponse, StopReason};
