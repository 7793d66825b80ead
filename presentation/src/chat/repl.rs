//! REPL (Read-Eval-Print Loop) for interactive travel chat

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use travel_application::BlockingConversation;

/// What one line of input asks the REPL to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput<'a> {
    /// Blank line: prompt again.
    Skip,
    Quit,
    Help,
    History,
    UnknownCommand(&'a str),
    /// A chat message for the agents.
    Message(&'a str),
}

/// Classify a raw input line.
///
/// `quit` and `exit` end the session in any letter case, with or without a
/// leading slash.
pub fn parse_line(line: &str) -> ReplInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Skip;
    }

    let word = line.strip_prefix('/').unwrap_or(line);
    if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("exit") {
        return ReplInput::Quit;
    }

    match line {
        "/q" => ReplInput::Quit,
        "/help" | "/h" | "/?" => ReplInput::Help,
        "/history" => ReplInput::History,
        cmd if cmd.starts_with('/') => ReplInput::UnknownCommand(cmd),
        message => ReplInput::Message(message),
    }
}

/// Default location of the line-editor history file.
pub fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("travel-agent").join("history.txt"))
}

/// Interactive chat REPL
pub struct ChatRepl {
    conversation: BlockingConversation,
    agent_name: String,
    progress: Option<Arc<ProgressReporter>>,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(conversation: BlockingConversation, agent_name: impl Into<String>) -> Self {
        Self {
            conversation,
            agent_name: agent_name.into(),
            progress: None,
            history_path: default_history_path(),
        }
    }

    /// Show a spinner while a turn runs
    pub fn with_progress(mut self, progress: Arc<ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Override (or disable, with `None`) the line-editor history file
    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL until `quit`, `exit` or end of input.
    pub fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline("You: ");

            match readline {
                Ok(line) => match parse_line(&line) {
                    ReplInput::Skip => continue,
                    ReplInput::Quit => {
                        println!("Goodbye!");
                        break;
                    }
                    ReplInput::Help => Self::print_help(),
                    ReplInput::History => {
                        println!();
                        println!(
                            "{}",
                            ConsoleFormatter::format_history(&self.conversation.history())
                        );
                    }
                    ReplInput::UnknownCommand(cmd) => {
                        println!("Unknown command: {}", cmd);
                        println!("Type /help for available commands");
                    }
                    ReplInput::Message(message) => {
                        let _ = rl.add_history_entry(message);
                        self.process_message(message);
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", ConsoleFormatter::header("Travel Agent - Chat Mode"));
        println!();
        println!("Talking to: {}", self.agent_name.bold());
        println!("Ask about flights, hotels or the cost of living anywhere.");
        println!("Type 'quit' or 'exit' to leave, /help for commands.");
        println!();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?          - Show this help");
        println!("  /history               - Show the remembered conversation");
        println!("  quit, exit, /quit, /q  - Exit chat");
        println!();
    }

    fn process_message(&self, message: &str) {
        if let Some(progress) = &self.progress {
            progress.start_turn();
        }
        let outcome = self.conversation.submit(message);
        if let Some(progress) = &self.progress {
            progress.finish_turn();
        }

        debug!("Turn finished: {}", outcome.kind());
        println!();
        println!("{}", ConsoleFormatter::format_outcome(&outcome));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(parse_line(""), ReplInput::Skip);
        assert_eq!(parse_line("   \t"), ReplInput::Skip);
    }

    #[test]
    fn test_quit_words_any_case() {
        for line in ["quit", "QUIT", "Exit", " exit ", "/quit", "/EXIT", "/q"] {
            assert_eq!(parse_line(line), ReplInput::Quit, "line: {:?}", line);
        }
        assert_eq!(
            parse_line("quit smoking trips"),
            ReplInput::Message("quit smoking trips")
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_line("/help"), ReplInput::Help);
        assert_eq!(parse_line("/?"), ReplInput::Help);
        assert_eq!(parse_line("/history"), ReplInput::History);
        assert_eq!(parse_line("/book"), ReplInput::UnknownCommand("/book"));
    }

    #[test]
    fn test_messages_are_trimmed() {
        assert_eq!(
            parse_line("  Flights from Lisbon to Rome in May?  "),
            ReplInput::Message("Flights from Lisbon to Rome in May?")
        );
    }
}
