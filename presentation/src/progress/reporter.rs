//! Progress reporting for agent runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use travel_application::AgentProgressNotifier;

/// Shows a "Thinking..." spinner for the turn in flight and updates it as
/// agents call tools and hand off.
///
/// The REPL calls [`start_turn`](Self::start_turn) and
/// [`finish_turn`](Self::finish_turn) around each submission; the agent
/// runner drives the [`AgentProgressNotifier`] callbacks in between.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn start_turn(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("Thinking...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    pub fn finish_turn(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }

    fn set_message(&self, message: String) {
        if let Ok(slot) = self.spinner.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(message);
        }
    }

    fn println(&self, line: String) {
        match self.spinner.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(pb) => pb.println(line),
                None => println!("{}", line),
            },
            Err(_) => println!("{}", line),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentProgressNotifier for ProgressReporter {
    fn on_agent_start(&self, agent: &str) {
        self.set_message(format!("{} is thinking...", agent));
    }

    fn on_tool_call(&self, agent: &str, tool_name: &str) {
        self.set_message(format!("{} -> {}", agent, tool_name.bold()));
    }

    fn on_tool_result(&self, agent: &str, tool_name: &str, success: bool) {
        let mark = if success { "v".green() } else { "x".red() };
        self.println(format!("  {} {} ({})", mark, tool_name, agent.dimmed()));
    }

    fn on_handoff(&self, from: &str, to: &str) {
        self.println(format!("  {} {} -> {}", "handoff".magenta(), from, to.bold()));
    }
}
