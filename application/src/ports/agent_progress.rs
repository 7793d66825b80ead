//! Agent run progress port.
//!
//! [`AgentProgressNotifier`] is an output port the presentation layer
//! implements to show what the agent graph is doing during a turn.
//!
//! All methods have default no-op implementations, so implementers only
//! override the callbacks they care about.

/// Progress notifier for agent runs.
pub trait AgentProgressNotifier: Send + Sync {
    /// An agent (root, sub-agent or handoff target) starts working.
    fn on_agent_start(&self, _agent: &str) {}

    /// A catalog tool or sub-agent tool is invoked.
    fn on_tool_call(&self, _agent: &str, _tool_name: &str) {}

    /// A tool returned.
    fn on_tool_result(&self, _agent: &str, _tool_name: &str, _success: bool) {}

    /// Control moves from one agent to another.
    fn on_handoff(&self, _from: &str, _to: &str) {}
}

/// Notifier that ignores every event.
pub struct NoAgentProgress;

impl AgentProgressNotifier for NoAgentProgress {}
