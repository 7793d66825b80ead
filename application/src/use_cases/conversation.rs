//! Conversation driver use case.
//!
//! One [`submit`](ConversationDriver::submit) call is one chat turn:
//!
//! ```text
//! input ─▶ prompt (time + history + input)
//!       ─▶ guardrail(input) ── tripwire ──▶ Blocked
//!       ─▶ AgentRunner::run(agent, prompt) ── error ──▶ Failed
//!       ─▶ history.push(input, output) ─▶ Answered
//! ```

use crate::ports::agent_runner::AgentRunner;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::input_guardrail::InputGuardrail;
use std::sync::Arc;
use tracing::{error, info, warn};
use travel_domain::conversation::{
    ConversationHistory, TurnOutcome, build_message_with_history_now,
};
use travel_domain::util::preview;
use travel_domain::Agent;

/// Owns the conversation state for one chat front end.
pub struct ConversationDriver {
    agent: Arc<Agent>,
    runner: Arc<dyn AgentRunner>,
    guardrail: Option<Arc<dyn InputGuardrail>>,
    history: ConversationHistory,
    conversation_logger: Arc<dyn ConversationLogger>,
    turns: u64,
}

impl ConversationDriver {
    pub fn new(agent: Arc<Agent>, runner: Arc<dyn AgentRunner>) -> Self {
        Self {
            agent,
            runner,
            guardrail: None,
            history: ConversationHistory::new(),
            conversation_logger: Arc::new(NoConversationLogger),
            turns: 0,
        }
    }

    pub fn with_guardrail(mut self, guardrail: Arc<dyn InputGuardrail>) -> Self {
        self.guardrail = Some(guardrail);
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Process one user turn to completion.
    pub async fn submit(&mut self, input: &str) -> TurnOutcome {
        self.turns += 1;
        let turn = self.turns;
        let prompt = build_message_with_history_now(&self.history, input);

        self.conversation_logger.log(ConversationEvent::new(
            "turn_started",
            serde_json::json!({
                "turn": turn,
                "input": input,
                "history_len": self.history.len(),
            }),
        ));

        if let Some(guardrail) = &self.guardrail {
            match guardrail.check(input).await {
                Ok(verdict) if verdict.tripwire() => {
                    info!("Turn {} blocked by guardrail: {}", turn, verdict.reasoning);
                    self.conversation_logger.log(ConversationEvent::new(
                        "guardrail_blocked",
                        serde_json::json!({ "turn": turn, "reasoning": verdict.reasoning }),
                    ));
                    return TurnOutcome::Blocked { verdict };
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Guardrail check failed on turn {}", turn);
                    return self.fail(turn, input, format!("guardrail: {e}"));
                }
            }
        }

        match self.runner.run(&self.agent, &prompt).await {
            Ok(output) => {
                self.history.push(input, output.final_output.clone());
                self.conversation_logger.log(ConversationEvent::new(
                    "turn_completed",
                    serde_json::json!({
                        "turn": turn,
                        "agent": output.last_agent,
                        "tool_calls": output.tool_calls,
                        "output": output.final_output,
                    }),
                ));
                TurnOutcome::Answered {
                    output: output.final_output,
                    agent: output.last_agent,
                }
            }
            Err(e) => self.fail(turn, input, e.to_string()),
        }
    }

    fn fail(&self, turn: u64, input: &str, error: String) -> TurnOutcome {
        error!(
            "Turn {} failed for input '{}': {}",
            turn,
            preview(input, 80),
            error
        );
        self.conversation_logger.log(ConversationEvent::new(
            "turn_failed",
            serde_json::json!({ "turn": turn, "error": error }),
        ));
        TurnOutcome::Failed { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::agent_runner::{RunAgentError, RunOutput};
    use crate::ports::input_guardrail::GuardrailError;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use travel_domain::GuardrailVerdict;
    use travel_domain::conversation::{BLOCKED_MESSAGE, FAILED_MESSAGE};

    struct ScriptedRunner {
        replies: Mutex<VecDeque<Result<String, String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new(replies: Vec<Result<&str, &str>>) -> Self {
            Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AgentRunner for ScriptedRunner {
        async fn run(&self, agent: &Agent, input: &str) -> Result<RunOutput, RunAgentError> {
            self.prompts.lock().unwrap().push(input.to_string());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err("script exhausted".to_string()));
            match reply {
                Ok(text) => Ok(RunOutput {
                    final_output: text,
                    last_agent: agent.name.clone(),
                    tool_calls: 0,
                }),
                Err(e) => Err(RunAgentError::Gateway(GatewayError::RequestFailed(e))),
            }
        }
    }

    struct KeywordGuardrail;

    #[async_trait]
    impl InputGuardrail for KeywordGuardrail {
        async fn check(&self, input: &str) -> Result<GuardrailVerdict, GuardrailError> {
            if input.contains("broken") {
                return Err(GuardrailError::InvalidOutput("garbage".to_string()));
            }
            if input.contains("trip") {
                Ok(GuardrailVerdict::in_domain("mentions a trip"))
            } else {
                Ok(GuardrailVerdict::out_of_domain("not about travel"))
            }
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn driver(runner: Arc<ScriptedRunner>) -> ConversationDriver {
        ConversationDriver::new(Arc::new(Agent::new("Travel Manager", "plan")), runner)
    }

    #[tokio::test]
    async fn test_answered_turns_build_history() {
        let runner = Arc::new(ScriptedRunner::new(vec![Ok("a1"), Ok("a2")]));
        let mut driver = driver(runner.clone());

        let first = driver.submit("q1").await;
        assert_eq!(
            first,
            TurnOutcome::Answered {
                output: "a1".to_string(),
                agent: "Travel Manager".to_string(),
            }
        );
        driver.submit("q2").await;

        assert_eq!(driver.history().len(), 2);
        let prompts = runner.prompts.lock().unwrap().clone();
        assert!(prompts[0].starts_with("Current time: "));
        assert!(!prompts[0].contains("Previous conversation:"));
        assert!(prompts[1].contains("Previous conversation:\n\nYou: q1\nAssistant: a1"));
        assert!(prompts[1].ends_with("\n\nYou: q2"));
    }

    #[tokio::test]
    async fn test_failed_turn_is_not_recorded() {
        let runner = Arc::new(ScriptedRunner::new(vec![Ok("a1"), Err("boom"), Ok("a3")]));
        let mut driver = driver(runner.clone());

        driver.submit("q1").await;
        let failed = driver.submit("q2").await;
        assert!(matches!(&failed, TurnOutcome::Failed { error } if error.contains("boom")));
        assert_eq!(failed.message(), FAILED_MESSAGE);
        assert_eq!(driver.history().len(), 1);

        driver.submit("q3").await;
        let prompts = runner.prompts.lock().unwrap().clone();
        assert!(!prompts[2].contains("q2"));
        let users: Vec<&str> = driver.history().iter().map(|e| e.user.as_str()).collect();
        assert_eq!(users, vec!["q1", "q3"]);
    }

    #[tokio::test]
    async fn test_blocked_turn_skips_runner() {
        let runner = Arc::new(ScriptedRunner::new(vec![Ok("a1")]));
        let logger = Arc::new(RecordingLogger::default());
        let mut driver = driver(runner.clone())
            .with_guardrail(Arc::new(KeywordGuardrail))
            .with_conversation_logger(logger.clone());

        let outcome = driver.submit("what is 2+2").await;
        assert!(matches!(outcome, TurnOutcome::Blocked { .. }));
        assert_eq!(outcome.message(), BLOCKED_MESSAGE);
        assert!(runner.prompts.lock().unwrap().is_empty());
        assert!(driver.history().is_empty());

        let answered = driver.submit("plan a trip to Rome").await;
        assert!(answered.is_answered());
        assert_eq!(driver.history().len(), 1);

        let events = logger.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec!["turn_started", "guardrail_blocked", "turn_started", "turn_completed"]
        );
    }

    #[tokio::test]
    async fn test_guardrail_error_fails_closed() {
        let runner = Arc::new(ScriptedRunner::new(vec![Ok("never")]));
        let mut driver = driver(runner.clone()).with_guardrail(Arc::new(KeywordGuardrail));

        let outcome = driver.submit("broken trip").await;
        assert!(matches!(outcome, TurnOutcome::Failed { .. }));
        assert!(runner.prompts.lock().unwrap().is_empty());
        assert!(driver.history().is_empty());
    }

    #[tokio::test]
    async fn test_history_keeps_last_five() {
        let replies: Vec<Result<&str, &str>> = vec![Ok("a"); 7];
        let runner = Arc::new(ScriptedRunner::new(replies));
        let mut driver = driver(runner.clone());
        for i in 1..=7 {
            driver.submit(&format!("q{i}")).await;
        }
        assert_eq!(driver.history().len(), 5);
        let last_prompt = runner.prompts.lock().unwrap().last().cloned().unwrap();
        assert!(!last_prompt.contains("You: q1\n"));
        assert!(last_prompt.contains("You: q2\n"));
    }
}
