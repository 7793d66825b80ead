//! Agent-graph builder
//!
//! Resolves one id of an [`AgentSpecs`] mapping into a fully built [`Agent`]
//! by depth-first recursion over `agents_as_tools` and `handoffs`, looking up
//! `tools` in the [`TravelTool`] catalog along the way.
//!
//! ```text
//! manager_agent ──agents_as_tools──▶ flight_agent ──tools──▶ find_flights
//!       │
//!       └──────────handoffs────────▶ hotel_agent  ──tools──▶ find_hotels
//! ```
//!
//! Shared ids are rebuilt for every parent that references them. An id that
//! reappears on its own resolution path is a cycle and fails the build.

use super::entities::{Agent, AgentTool};
use super::error::AgentGraphError;
use super::sanitize::sanitize_tool_name;
use super::spec::{AgentSpec, AgentSpecs};
use crate::tool::catalog::TravelTool;
use tracing::{info, warn};

/// Build the agent stored under `root_id`.
pub fn build_agent(specs: &AgentSpecs, root_id: &str) -> Result<Agent, AgentGraphError> {
    let mut path = Vec::new();
    resolve(specs, root_id, None, &mut path)
}

fn resolve(
    specs: &AgentSpecs,
    id: &str,
    referenced_by: Option<&str>,
    path: &mut Vec<String>,
) -> Result<Agent, AgentGraphError> {
    if let Some(start) = path.iter().position(|p| p == id) {
        let mut cycle = path[start..].to_vec();
        cycle.push(id.to_string());
        return Err(AgentGraphError::Cycle { path: cycle });
    }

    let spec = specs.get(id).ok_or_else(|| AgentGraphError::MissingKey {
        key: id.to_string(),
        referenced_by: referenced_by.map(str::to_string),
    })?;
    let (name, instructions) = required_fields(id, spec)?;
    info!("Creating agent: {}", name);

    path.push(id.to_string());

    let mut tools = Vec::with_capacity(spec.agents_as_tools.len() + spec.tools.len());
    for sub_id in &spec.agents_as_tools {
        let agent = resolve(specs, sub_id, Some(id), path)?;
        let tool_name = sanitize_tool_name(&agent.name);
        // resolve() succeeded, so the id is present
        let description = specs
            .get(sub_id)
            .map(|s| s.description.clone())
            .unwrap_or_default();
        tools.push(AgentTool::SubAgent {
            agent: Box::new(agent),
            name: tool_name,
            description,
        });
    }

    let mut handoffs = Vec::with_capacity(spec.handoffs.len());
    for handoff_id in &spec.handoffs {
        handoffs.push(resolve(specs, handoff_id, Some(id), path)?);
    }

    for tool_name in &spec.tools {
        let tool = TravelTool::from_name(tool_name).ok_or_else(|| AgentGraphError::UnknownTool {
            agent: id.to_string(),
            tool: tool_name.clone(),
        })?;
        tools.push(AgentTool::Function(tool));
    }

    path.pop();

    let agent = Agent {
        name: name.to_string(),
        instructions: instructions.to_string(),
        tools,
        handoffs,
    };
    for tool_name in agent.duplicate_tool_names() {
        warn!(
            agent = %agent.name,
            tool = %tool_name,
            "Tool name offered more than once; only the first one can be called"
        );
    }
    Ok(agent)
}

fn required_fields<'a>(
    id: &str,
    spec: &'a AgentSpec,
) -> Result<(&'a str, &'a str), AgentGraphError> {
    let name = spec.name.as_deref().ok_or(AgentGraphError::ConfigFormat {
        id: id.to_string(),
        field: "name",
    })?;
    let instructions = spec
        .instructions
        .as_deref()
        .ok_or(AgentGraphError::ConfigFormat {
            id: id.to_string(),
            field: "instructions",
        })?;
    Ok((name, instructions))
}
