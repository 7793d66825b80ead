//! Interactive chat module
//!
//! Provides a readline-based chat interface over a [`BlockingConversation`].
//!
//! [`BlockingConversation`]: travel_application::BlockingConversation

mod repl;

pub use repl::{ChatRepl, ReplInput, default_history_path, parse_line};
