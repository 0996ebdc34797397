use indexmap::IndexMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ThinkingStatus, ThoughtArguments, ThoughtData};
use crate::validation::InputValidator;

/// Ordered record of the thought steps submitted during one agent session.
///
/// `history` is append-only. `branches` indexes into `history` by position,
/// keyed by branch name in order of first appearance.
#[derive(Debug)]
pub struct ThoughtLedger {
    session_id: Uuid,
    validator: InputValidator,
    history: Vec<ThoughtData>,
    branches: IndexMap<String, Vec<usize>>,
}

impl ThoughtLedger {
    pub fn new() -> Self {
        Self::with_validator(InputValidator::new())
    }

    pub fn with_validator(validator: InputValidator) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            validator,
            history: Vec::new(),
            branches: IndexMap::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Validate and record one step.
    ///
    /// On error nothing is recorded.
    pub fn submit(&mut self, args: &ThoughtArguments) -> Result<ThinkingStatus> {
        let step = self.validator.validate(args).map_err(|e| {
            tracing::warn!(session = %self.session_id, "Rejected thought: {}", e);
            e
        })?;
        Ok(self.record(step))
    }

    /// Record an already validated step and report the resulting status
    pub fn record(&mut self, mut step: ThoughtData) -> ThinkingStatus {
        if step.thought_number > step.total_thoughts {
            step.total_thoughts = step.thought_number;
        }

        let index = self.history.len();
        if let Some(branch_id) = step.branch_key() {
            if !self.branches.contains_key(branch_id) {
                tracing::debug!(
                    session = %self.session_id,
                    "New branch '{}' from thought {:?}",
                    branch_id,
                    step.branch_from_thought
                );
            }
            self.branches
                .entry(branch_id.to_string())
                .or_default()
                .push(index);
        }

        tracing::info!(
            session = %self.session_id,
            "Recorded thought {} of {}",
            step.thought_number,
            step.total_thoughts
        );

        let status = ThinkingStatus {
            thought_number: step.thought_number,
            total_thoughts: step.total_thoughts,
            next_thought_needed: step.next_thought_needed,
            branches: self.branch_names().map(str::to_string).collect(),
            thought_history_length: index + 1,
        };
        self.history.push(step);
        status
    }

    pub fn history(&self) -> &[ThoughtData] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Most recently recorded step
    pub fn last(&self) -> Option<&ThoughtData> {
        self.history.last()
    }

    /// Branch names in order of first appearance
    pub fn branch_names(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    /// Steps filed under `branch_id`, in submission order
    pub fn branch(&self, branch_id: &str) -> Option<Vec<&ThoughtData>> {
        self.branches
            .get(branch_id)
            .map(|indices| indices.iter().map(|&i| &self.history[i]).collect())
    }
}

impl Default for ThoughtLedger {
    fn default() -> Self {
        Self::new()
    }
}
