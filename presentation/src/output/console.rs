//! Console output formatter for chat turns

use colored::Colorize;
use travel_domain::conversation::{Exchange, TurnOutcome};

/// Formats turn outcomes for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the reply to one turn.
    ///
    /// Blocked and failed turns show their fixed message only; failure
    /// details go to the log.
    pub fn format_outcome(outcome: &TurnOutcome) -> String {
        match outcome {
            TurnOutcome::Answered { output, agent } => {
                format!("{}\n{}", format!("{}:", agent).cyan().bold(), output)
            }
            TurnOutcome::Blocked { .. } => outcome.message().yellow().to_string(),
            TurnOutcome::Failed { .. } => outcome.message().red().to_string(),
        }
    }

    /// Format the remembered exchanges, oldest first.
    pub fn format_history(history: &[Exchange]) -> String {
        if history.is_empty() {
            return "No conversation yet.".dimmed().to_string();
        }

        let mut output = String::new();
        for (i, exchange) in history.iter().enumerate() {
            output.push_str(&format!(
                "{} {}\n{} {}\n",
                format!("[{}] You:", i + 1).green().bold(),
                exchange.user,
                "    Assistant:".cyan().bold(),
                exchange.assistant
            ));
        }
        output
    }

    pub fn header(title: &str) -> String {
        let line = "═".repeat(50);
        format!("{}\n{}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}
