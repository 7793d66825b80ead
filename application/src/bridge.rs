//! Sync bridge
//!
//! The REPL loop and the web handler both run on plain threads. They reach
//! the async conversation driver through [`BlockingConversation`], which
//! blocks the calling thread on the shared runtime until the turn is done.
//!
//! Must not be called from inside an async task: use
//! `tokio::task::spawn_blocking` first.

use crate::use_cases::conversation::ConversationDriver;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use travel_domain::conversation::{Exchange, TurnOutcome};

/// Runs futures to completion from synchronous code.
#[derive(Debug, Clone)]
pub struct SyncBridge {
    handle: Handle,
}

impl SyncBridge {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bridge onto the runtime of the calling context.
    ///
    /// Returns `None` outside a tokio runtime.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    pub fn run<F: Future>(&self, fut: F) -> F::Output {
        self.handle.block_on(fut)
    }
}

/// Blocking facade over a shared [`ConversationDriver`].
///
/// Turns are serialized by the driver lock; a second caller waits for the
/// current turn to finish.
#[derive(Clone)]
pub struct BlockingConversation {
    bridge: SyncBridge,
    driver: Arc<Mutex<ConversationDriver>>,
}

impl BlockingConversation {
    pub fn new(bridge: SyncBridge, driver: ConversationDriver) -> Self {
        Self {
            bridge,
            driver: Arc::new(Mutex::new(driver)),
        }
    }

    pub fn submit(&self, input: &str) -> TurnOutcome {
        self.bridge
            .run(async { self.driver.lock().await.submit(input).await })
    }

    /// Copy of the current history, oldest first.
    pub fn history(&self) -> Vec<Exchange> {
        self.bridge.run(async {
            self.driver
                .lock()
                .await
                .history()
                .iter()
                .cloned()
                .collect()
        })
    }

    /// Name of the root agent.
    pub fn agent_name(&self) -> String {
        self.bridge
            .run(async { self.driver.lock().await.agent().name.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::agent_runner::{AgentRunner, RunAgentError, RunOutput};
    use async_trait::async_trait;
    use travel_domain::Agent;

    struct EchoRunner;

    #[async_trait]
    impl AgentRunner for EchoRunner {
        async fn run(&self, agent: &Agent, input: &str) -> Result<RunOutput, RunAgentError> {
            let last_line = input.rsplit("You: ").next().unwrap_or_default();
            Ok(RunOutput {
                final_output: format!("echo: {last_line}"),
                last_agent: agent.name.clone(),
                tool_calls: 0,
            })
        }
    }

    fn conversation(runtime: &tokio::runtime::Runtime) -> BlockingConversation {
        let driver = ConversationDriver::new(
            Arc::new(Agent::new("Travel Manager", "plan")),
            Arc::new(EchoRunner),
        );
        BlockingConversation::new(SyncBridge::new(runtime.handle().clone()), driver)
    }

    #[test]
    fn test_submit_from_sync_code() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let chat = conversation(&runtime);

        let outcome = chat.submit("Lisbon");
        assert_eq!(outcome.message(), "echo: Lisbon");
        assert_eq!(chat.history().len(), 1);
        assert_eq!(chat.agent_name(), "Travel Manager");
    }

    #[test]
    fn test_clones_share_one_conversation() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let chat = conversation(&runtime);
        let other = chat.clone();

        let handle = std::thread::spawn(move || other.submit("Porto"));
        handle.join().unwrap();
        chat.submit("Faro");

        assert_eq!(chat.history().len(), 2);
    }

    #[test]
    fn test_current_outside_runtime_is_none() {
        assert!(SyncBridge::current().is_none());
    }
}
