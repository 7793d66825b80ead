//! Guardrail verdicts

use serde::{Deserialize, Serialize};

/// Name of the classifier agent.
pub const GUARDRAIL_AGENT_NAME: &str = "Guardrail check";

/// Instructions given to the classifier.
pub const GUARDRAIL_INSTRUCTIONS: &str = "Check if the user is asking about travel.";

/// Classification of one user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailVerdict {
    pub is_in_domain: bool,
    pub reasoning: String,
}

impl GuardrailVerdict {
    pub fn in_domain(reasoning: impl Into<String>) -> Self {
        Self {
            is_in_domain: true,
            reasoning: reasoning.into(),
        }
    }

    pub fn out_of_domain(reasoning: impl Into<String>) -> Self {
        Self {
            is_in_domain: false,
            reasoning: reasoning.into(),
        }
    }

    /// Whether the turn must be blocked.
    pub fn tripwire(&self) -> bool {
        !self.is_in_domain
    }
}

/// Structured output the classifier model is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub is_travel_question: bool,
    #[serde(default)]
    pub reasoning: String,
}

impl ClassifierOutput {
    /// JSON schema handed to the provider for structured output.
    pub fn json_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "is_travel_question": { "type": "boolean" },
                "reasoning": { "type": "string" }
            },
            "required": ["is_travel_question", "reasoning"],
            "additionalProperties": false
        })
    }
}

impl From<ClassifierOutput> for GuardrailVerdict {
    fn from(output: ClassifierOutput) -> Self {
        Self {
            is_in_domain: output.is_travel_question,
            reasoning: output.reasoning,
        }
    }
}
