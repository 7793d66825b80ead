//! Presentation layer for travel-agent
//!
//! This crate contains the CLI definition, the terminal chat REPL with its
//! progress spinner and output formatting, and the web chat UI.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;
pub mod web;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
