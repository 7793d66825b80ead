//! Built agent graph
//!
//! An [`Agent`] is the resolved form of an [`AgentSpec`](super::spec::AgentSpec):
//! every referenced id has been replaced by the agent it names and every
//! tool name by its catalog entry.
//!
//! Agents carry two distinct capability classes:
//!
//! | Class | Control flow |
//! |-------|--------------|
//! | [`AgentTool`] | Called by the agent; the result returns to the caller |
//! | handoff [`Agent`] | Takes over the conversation from the caller |

use crate::agent::sanitize::sanitize_tool_name;
use crate::tool::catalog::TravelTool;
use crate::tool::entities::{ToolDefinition, ToolParameter};
use std::collections::HashSet;

/// Prefix of the synthetic tool a model calls to hand off to another agent.
pub const HANDOFF_TOOL_PREFIX: &str = "transfer_to_";

/// Argument name carrying the request for a sub-agent exposed as a tool.
pub const SUB_AGENT_INPUT_ARG: &str = "input";

/// A fully built agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub name: String,
    pub instructions: String,
    /// Sub-agent tools first, then catalog tools, in config order.
    pub tools: Vec<AgentTool>,
    /// Agents this one may transfer the conversation to, in config order.
    pub handoffs: Vec<Agent>,
}

/// Something an agent can call and get an answer back from.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentTool {
    /// HTTP-backed catalog tool.
    Function(TravelTool),
    /// Another agent, run to completion, whose final output is the tool result.
    SubAgent {
        agent: Box<Agent>,
        /// Sanitized tool name exposed to the model.
        name: String,
        description: String,
    },
}

/// Read-only tagged view over everything an agent can do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Capability<'a> {
    Tool(TravelTool),
    SubAgent {
        agent: &'a Agent,
        name: &'a str,
        description: &'a str,
    },
    Handoff(&'a Agent),
}

impl Agent {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools: Vec::new(),
            handoffs: Vec::new(),
        }
    }

    /// Tools followed by handoffs.
    pub fn capabilities(&self) -> impl Iterator<Item = Capability<'_>> {
        self.tools
            .iter()
            .map(|tool| match tool {
                AgentTool::Function(t) => Capability::Tool(*t),
                AgentTool::SubAgent {
                    agent,
                    name,
                    description,
                } => Capability::SubAgent {
                    agent,
                    name,
                    description,
                },
            })
            .chain(self.handoffs.iter().map(Capability::Handoff))
    }

    /// Find the tool the model refers to by its exposed name.
    pub fn find_tool(&self, exposed_name: &str) -> Option<&AgentTool> {
        self.tools.iter().find(|t| t.exposed_name() == exposed_name)
    }

    /// Find the handoff target behind a `transfer_to_*` tool name.
    pub fn find_handoff(&self, exposed_name: &str) -> Option<&Agent> {
        self.handoffs
            .iter()
            .find(|h| h.handoff_tool_name() == exposed_name)
    }

    /// Name of the synthetic tool that transfers control to this agent.
    pub fn handoff_tool_name(&self) -> String {
        format!("{}{}", HANDOFF_TOOL_PREFIX, sanitize_tool_name(&self.name))
    }

    /// Tool definition offered to a parent that can hand off to this agent.
    pub fn handoff_definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            self.handoff_tool_name(),
            format!(
                "Hand the conversation over to {}. Use when that agent is better suited to continue.",
                self.name
            ),
        )
    }

    /// Definitions for every tool and handoff the model may call.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(AgentTool::definition)
            .chain(self.handoffs.iter().map(Agent::handoff_definition))
            .collect()
    }

    /// Names offered to the model more than once, in first-repeat order.
    ///
    /// Covers sub-agent tools, catalog tools and `transfer_to_*` handoffs
    /// together. A repeated name shadows the later entries in
    /// [`find_tool`](Self::find_tool) and [`find_handoff`](Self::find_handoff).
    pub fn duplicate_tool_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        let names = self
            .tools
            .iter()
            .map(|t| t.exposed_name().to_string())
            .chain(self.handoffs.iter().map(Agent::handoff_tool_name));
        for name in names {
            if !seen.insert(name.clone()) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Number of agents in this tree, this one included.
    pub fn agent_count(&self) -> usize {
        let sub_agents: usize = self
            .tools
            .iter()
            .filter_map(|t| match t {
                AgentTool::SubAgent { agent, .. } => Some(agent.agent_count()),
                AgentTool::Function(_) => None,
            })
            .sum();
        let handoffs: usize = self.handoffs.iter().map(Agent::agent_count).sum();
        1 + sub_agents + handoffs
    }
}

impl AgentTool {
    /// Name the model uses to call this tool.
    pub fn exposed_name(&self) -> &str {
        match self {
            AgentTool::Function(tool) => tool.name(),
            AgentTool::SubAgent { name, .. } => name,
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        match self {
            AgentTool::Function(tool) => tool.definition(),
            AgentTool::SubAgent {
                name, description, ..
            } => ToolDefinition::new(name.clone(), description.clone()).with_parameter(
                ToolParameter::new(
                    SUB_AGENT_INPUT_ARG,
                    "The request for this agent, with all details it needs",
                    true,
                ),
            ),
        }
    }
}
