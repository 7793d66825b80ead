//! Run Agent use case.
//!
//! Drives one built [`Agent`] tree to a final answer over the native tool
//! use API.
//!
//! ```text
//! input ─▶ active agent ──send_with_tools──▶ LlmResponse
//!               ▲                               │
//!               │            ┌──────────────────┼───────────────────┐
//!               │            ▼                  ▼                   ▼
//!               │     transfer_to_X       function / sub-agent    no tool calls
//!               │     (handoff)           tools (parallel)        → final output
//!               │            │                  │
//!               └────────────┘                  └─▶ send_tool_results ─▶ loop
//! ```
//!
//! Sub-agent tools run the sub-agent to completion (its own handoffs
//! included) and feed its final text back as the tool result. A handoff
//! replaces the active agent: a fresh session for the target receives the
//! original input.

use crate::config::ExecutionParams;
use crate::ports::agent_progress::{AgentProgressNotifier, NoAgentProgress};
use crate::ports::agent_runner::{AgentRunner, RunAgentError, RunOutput};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{LlmGateway, ToolResultMessage};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, join_all};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use travel_domain::agent::{Agent, AgentTool, SUB_AGENT_INPUT_ARG};
use travel_domain::tool::{ToolCall, ToolError, ToolResult};
use travel_domain::util::preview;
use travel_domain::Model;

/// How one agent's tool loop ended.
enum Step<'a> {
    Final(String),
    Handoff(&'a Agent),
}

/// Reference [`AgentRunner`] on top of an [`LlmGateway`] and a
/// [`ToolExecutorPort`].
pub struct RunAgentUseCase {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    model: Model,
    execution: ExecutionParams,
    progress: Arc<dyn AgentProgressNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunAgentUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
        model: Model,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            tool_schema,
            model,
            execution: ExecutionParams::default(),
            progress: Arc::new(NoAgentProgress),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn AgentProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run `agent` and follow its handoffs until some agent answers.
    fn run_to_completion<'a>(
        &'a self,
        agent: &'a Agent,
        input: &'a str,
        depth: usize,
    ) -> BoxFuture<'a, Result<RunOutput, RunAgentError>> {
        async move {
            if depth > self.execution.max_agent_depth {
                return Err(RunAgentError::MaxDepthExceeded {
                    max: self.execution.max_agent_depth,
                });
            }

            let mut active = agent;
            let mut tool_calls = 0usize;
            loop {
                match self.agent_loop(active, input, depth, &mut tool_calls).await? {
                    Step::Final(final_output) => {
                        return Ok(RunOutput {
                            final_output,
                            last_agent: active.name.clone(),
                            tool_calls,
                        });
                    }
                    Step::Handoff(target) => {
                        info!("Handoff: {} -> {}", active.name, target.name);
                        self.progress.on_handoff(&active.name, &target.name);
                        self.conversation_logger.log(ConversationEvent::new(
                            "handoff",
                            serde_json::json!({ "from": active.name, "to": target.name }),
                        ));
                        active = target;
                    }
                }
            }
        }
        .boxed()
    }

    /// Tool loop for a single agent.
    async fn agent_loop<'a>(
        &'a self,
        agent: &'a Agent,
        input: &'a str,
        depth: usize,
        tool_calls: &mut usize,
    ) -> Result<Step<'a>, RunAgentError> {
        debug!(
            "Running agent '{}' (depth {}, {} tools, {} handoffs)",
            agent.name,
            depth,
            agent.tools.len(),
            agent.handoffs.len()
        );
        self.progress.on_agent_start(&agent.name);

        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, &agent.instructions)
            .await?;
        let tools = self.tool_schema.tools_schema(&agent.tool_definitions());

        let mut response = session.send_with_tools(input, &tools).await?;
        let max_turns = self.execution.max_tool_turns;
        let mut turn_count = 0;

        loop {
            let calls = response.tool_calls();
            if calls.is_empty() {
                let text = response.text_content();
                if text.trim().is_empty() {
                    return Err(RunAgentError::EmptyResponse {
                        agent: agent.name.clone(),
                    });
                }
                debug!("Agent '{}' answered after {} tool turns", agent.name, turn_count);
                return Ok(Step::Final(text));
            }

            if let Some(target) = calls.iter().find_map(|c| agent.find_handoff(&c.tool_name)) {
                if calls.len() > 1 {
                    debug!(
                        "Handoff from '{}' drops {} other tool calls",
                        agent.name,
                        calls.len() - 1
                    );
                }
                return Ok(Step::Handoff(target));
            }

            turn_count += 1;
            if turn_count > max_turns {
                warn!("Agent '{}' exceeded max_tool_turns ({})", agent.name, max_turns);
                return Err(RunAgentError::MaxTurnsExceeded {
                    agent: agent.name.clone(),
                    max: max_turns,
                });
            }

            let results = join_all(calls.iter().map(|call| self.invoke(agent, call, depth))).await;

            let mut messages = Vec::with_capacity(results.len());
            for (call, result) in calls.iter().zip(results) {
                let (result, nested) = result?;
                *tool_calls += nested;

                let Some(tool_use_id) = call.native_id.clone() else {
                    warn!(
                        "Missing native_id for tool call '{}'; skipping result.",
                        call.tool_name
                    );
                    continue;
                };
                messages.push(ToolResultMessage {
                    tool_use_id,
                    tool_name: call.tool_name.clone(),
                    output: result.to_model_text(),
                    is_error: !result.is_success(),
                });
            }

            debug!(
                "Agent '{}' tool turn {}/{}: sending {} tool results",
                agent.name,
                turn_count,
                max_turns,
                messages.len()
            );
            response = session.send_tool_results(&messages).await?;
        }
    }

    /// Execute one tool call for `agent`.
    ///
    /// Returns the result and the number of tool calls it accounts for.
    async fn invoke(
        &self,
        agent: &Agent,
        call: &ToolCall,
        depth: usize,
    ) -> Result<(ToolResult, usize), RunAgentError> {
        self.progress.on_tool_call(&agent.name, &call.tool_name);
        let started = Instant::now();

        let (result, nested) = match agent.find_tool(&call.tool_name) {
            Some(AgentTool::Function(_)) => (self.tool_executor.execute(call).await, 0),
            Some(AgentTool::SubAgent { agent: sub, .. }) => {
                match call.get_non_blank(SUB_AGENT_INPUT_ARG) {
                    Some(request) => {
                        let output = self.run_to_completion(sub, request, depth + 1).await?;
                        (
                            ToolResult::success(&call.tool_name, output.final_output),
                            output.tool_calls,
                        )
                    }
                    None => (
                        ToolResult::failure(
                            &call.tool_name,
                            ToolError::invalid_argument(format!(
                                "Missing required argument: {}",
                                SUB_AGENT_INPUT_ARG
                            )),
                        ),
                        0,
                    ),
                }
            }
            None => {
                warn!(
                    "Agent '{}' called unknown tool '{}'",
                    agent.name, call.tool_name
                );
                (
                    ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name)),
                    0,
                )
            }
        };
        let result = result.with_duration(started.elapsed().as_millis() as u64);

        self.progress
            .on_tool_result(&agent.name, &call.tool_name, result.is_success());
        self.conversation_logger.log(ConversationEvent::new(
            "tool_call",
            serde_json::json!({
                "agent": agent.name,
                "tool": call.tool_name,
                "arguments": call.arguments,
                "success": result.is_success(),
                "duration_ms": result.duration_ms,
                "output_preview": preview(&result.to_model_text(), 200),
            }),
        ));

        Ok((result, nested + 1))
    }
}

#[async_trait]
impl AgentRunner for RunAgentUseCase {
    async fn run(&self, agent: &Agent, input: &str) -> Result<RunOutput, RunAgentError> {
        info!("Running agent graph rooted at '{}'", agent.name);
        let output = self.run_to_completion(agent, input, 0).await?;
        info!(
            "Agent run finished by '{}' after {} tool calls",
            output.last_agent, output.tool_calls
        );
        Ok(output)
    }
}
