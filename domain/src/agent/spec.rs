//! Declarative agent specs as read from the agent-graph file

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// Root id used when none is configured.
pub const DEFAULT_ROOT_AGENT: &str = "manager_agent";

/// One node of the agent graph, exactly as written in the config file.
///
/// `name` and `instructions` are optional at the serde level so that a
/// missing field is reported by the builder with the offending id, instead
/// of as an opaque deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Shown to the parent agent when this agent is exposed as a tool.
    #[serde(default)]
    pub description: String,
    /// Catalog tool names.
    #[serde(default)]
    pub tools: Vec<String>,
    /// Ids of agents exposed to this agent as callable tools.
    #[serde(default)]
    pub agents_as_tools: Vec<String>,
    /// Ids of agents this agent may hand the conversation to.
    #[serde(default)]
    pub handoffs: Vec<String>,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            instructions: Some(instructions.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tools.push(tool.into());
        self
    }

    pub fn with_agent_as_tool(mut self, id: impl Into<String>) -> Self {
        self.agents_as_tools.push(id.into());
        self
    }

    pub fn with_handoff(mut self, id: impl Into<String>) -> Self {
        self.handoffs.push(id.into());
        self
    }

    /// Ids this spec references, sub-agent tools first.
    pub fn referenced_ids(&self) -> impl Iterator<Item = &str> {
        self.agents_as_tools
            .iter()
            .chain(self.handoffs.iter())
            .map(String::as_str)
    }
}

/// The whole agent graph: id → spec, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentSpecs(IndexMap<String, AgentSpec>);

impl AgentSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, spec: AgentSpec) -> Self {
        self.0.insert(id.into(), spec);
        self
    }

    pub fn get(&self, id: &str) -> Option<&AgentSpec> {
        self.0.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_and_full_specs() {
        let json = r#"{
            "flight_agent": {
                "name": "Flight Agent",
                "instructions": "Find flights.",
                "description": "Searches flights",
                "tools": ["find_flights"]
            },
            "manager_agent": {
                "name": "Travel Manager",
                "instructions": "Plan trips.",
                "agents_as_tools": ["flight_agent"],
                "handoffs": ["flight_agent"]
            }
        }"#;

        let specs: AgentSpecs = serde_json::from_str(json).unwrap();
        assert_eq!(specs.len(), 2);

        let manager = specs.get(DEFAULT_ROOT_AGENT).unwrap();
        assert_eq!(manager.name.as_deref(), Some("Travel Manager"));
        assert!(manager.description.is_empty());
        assert!(manager.tools.is_empty());
        assert_eq!(
            manager.referenced_ids().collect::<Vec<_>>(),
            vec!["flight_agent", "flight_agent"]
        );

        let flights = specs.get("flight_agent").unwrap();
        assert_eq!(flights.tools, vec!["find_flights"]);
    }

    #[test]
    fn test_ids_keep_file_order() {
        let json = r#"{
            "manager_agent": {"name": "M", "instructions": "i"},
            "hotel_agent": {"name": "H", "instructions": "i"},
            "flight_agent": {"name": "F", "instructions": "i"}
        }"#;
        let specs: AgentSpecs = serde_json::from_str(json).unwrap();
        assert_eq!(
            specs.ids().collect::<Vec<_>>(),
            vec!["manager_agent", "hotel_agent", "flight_agent"]
        );

        let built = AgentSpecs::new()
            .with("z", AgentSpec::new("Z", "i"))
            .with("a", AgentSpec::new("A", "i"));
        assert_eq!(built.ids().collect::<Vec<_>>(), vec!["z", "a"]);

        let round_trip = serde_json::to_string(&specs).unwrap();
        assert!(round_trip.find("manager_agent") < round_trip.find("flight_agent"));
    }

    #[test]
    fn test_missing_name_still_deserializes() {
        let specs: AgentSpecs =
            serde_json::from_str(r#"{"a": {"instructions": "i"}}"#).unwrap();
        assert!(specs.get("a").unwrap().name.is_none());
    }

    #[test]
    fn test_builder_helpers() {
        let spec = AgentSpec::new("Hotel Agent", "Find hotels")
            .with_description("Hotel search")
            .with_tool("find_hotels")
            .with_handoff("manager_agent");
        assert_eq!(spec.tools, vec!["find_hotels"]);
        assert_eq!(spec.handoffs, vec!["manager_agent"]);
        assert_eq!(spec.description, "Hotel search");
    }
}
