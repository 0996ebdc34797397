use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw arguments for the sequentialthinking tool.
///
/// Fields are kept as untyped JSON so that `InputValidator` can report the
/// first offending parameter in a fixed order instead of failing on whichever
/// field serde reaches first. The advertised schema still carries the declared
/// types and required set.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct ThoughtArguments {
    #[schemars(with = "String", description = "Your current thinking step")]
    pub thought: Option<Value>,

    #[schemars(with = "bool", description = "Whether another thought step is needed")]
    pub next_thought_needed: Option<Value>,

    #[schemars(with = "u64", description = "Current thought number. Minimum value is 1.")]
    pub thought_number: Option<Value>,

    #[schemars(with = "u64", description = "Estimated total thoughts needed. Minimum value is 1.")]
    pub total_thoughts: Option<Value>,

    #[schemars(with = "Option<bool>", description = "Whether this revises previous thinking")]
    pub is_revision: Option<Value>,

    #[schemars(with = "Option<u64>", description = "Which thought is being reconsidered. Minimum value is 1.")]
    pub revises_thought: Option<Value>,

    #[schemars(with = "Option<u64>", description = "Branching point thought number. Minimum value is 1.")]
    pub branch_from_thought: Option<Value>,

    #[schemars(with = "Option<String>", description = "Branch identifier")]
    pub branch_id: Option<Value>,

    #[schemars(with = "Option<bool>", description = "If more thoughts are needed")]
    pub needs_more_thoughts: Option<Value>,
}

impl ThoughtArguments {
    /// Build arguments from a JSON object, as received from a tool call
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

/// A validated thought step as recorded in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtData {
    pub thought: String,
    pub thought_number: u64,
    pub total_thoughts: u64,
    pub next_thought_needed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_revision: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revises_thought: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_from_thought: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_more_thoughts: Option<bool>,
}

impl ThoughtData {
    /// Create a plain step with no revision or branch metadata
    pub fn new(
        thought: impl Into<String>,
        thought_number: u64,
        total_thoughts: u64,
        next_thought_needed: bool,
    ) -> Self {
        Self {
            thought: thought.into(),
            thought_number,
            total_thoughts,
            next_thought_needed,
            is_revision: None,
            revises_thought: None,
            branch_from_thought: None,
            branch_id: None,
            needs_more_thoughts: None,
        }
    }

    /// Branch this step should be filed under, if it carries both a fork point and a non-empty name
    pub fn branch_key(&self) -> Option<&str> {
        match (self.branch_from_thought, self.branch_id.as_deref()) {
            (Some(_), Some(id)) if !id.is_empty() => Some(id),
            _ => None,
        }
    }
}

/// Status returned after each accepted step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingStatus {
    pub thought_number: u64,
    pub total_thoughts: u64,
    pub next_thought_needed: bool,
    pub branches: Vec<String>,
    pub thought_history_length: usize,
}
