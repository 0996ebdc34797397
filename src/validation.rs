use serde_json::Value;
use thiserror::Error;

use crate::models::{ThoughtArguments, ThoughtData};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid {field}: must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field} must be at least 1")]
    BelowMinimum { field: &'static str },

    #[error("{field} must be a positive integer")]
    NotPositiveInteger { field: &'static str },

    #[error("Thought content too long: {actual} chars (max: {max})")]
    ThoughtTooLong { actual: usize, max: usize },
}

impl ValidationError {
    /// Parameter the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::WrongType { field, .. }
            | ValidationError::BelowMinimum { field }
            | ValidationError::NotPositiveInteger { field } => *field,
            ValidationError::ThoughtTooLong { .. } => "thought",
        }
    }
}

/// Validates raw tool arguments into a `ThoughtData`.
///
/// Checks run in a fixed order and the first failure is returned:
/// types of the four required fields, their minimums, then the optional
/// step references. `revises_thought` and `branch_from_thought` treat a
/// numeric zero the same as an omitted value.
#[derive(Debug, Clone, Default)]
pub struct InputValidator {
    max_thought_length: Option<usize>,
}

impl InputValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject thoughts longer than `max` characters
    pub fn with_max_thought_length(mut self, max: usize) -> Self {
        self.max_thought_length = Some(max);
        self
    }

    pub fn max_thought_length(&self) -> Option<usize> {
        self.max_thought_length
    }

    pub fn validate(&self, args: &ThoughtArguments) -> Result<ThoughtData, ValidationError> {
        let thought = match &args.thought {
            Some(Value::String(s)) => s.clone(),
            _ => {
                return Err(ValidationError::WrongType {
                    field: "thought",
                    expected: "a string",
                })
            }
        };
        let thought_number = required_integer(&args.thought_number, "thought_number")?;
        let total_thoughts = required_integer(&args.total_thoughts, "total_thoughts")?;
        let next_thought_needed = match &args.next_thought_needed {
            Some(Value::Bool(b)) => *b,
            _ => {
                return Err(ValidationError::WrongType {
                    field: "next_thought_needed",
                    expected: "a boolean",
                })
            }
        };

        let thought_number = at_least_one(thought_number, "thought_number")?;
        let total_thoughts = at_least_one(total_thoughts, "total_thoughts")?;

        let revises_thought = optional_step_reference(&args.revises_thought, "revises_thought")?;
        let branch_from_thought =
            optional_step_reference(&args.branch_from_thought, "branch_from_thought")?;

        if let Some(max) = self.max_thought_length {
            let actual = thought.chars().count();
            if actual > max {
                return Err(ValidationError::ThoughtTooLong { actual, max });
            }
        }

        Ok(ThoughtData {
            thought,
            thought_number,
            total_thoughts,
            next_thought_needed,
            is_revision: args.is_revision.as_ref().and_then(coerce_bool),
            revises_thought,
            branch_from_thought,
            branch_id: args.branch_id.as_ref().and_then(coerce_text),
            needs_more_thoughts: args.needs_more_thoughts.as_ref().and_then(coerce_bool),
        })
    }
}

// JSON booleans are not integers here, so `true` is rejected rather than read as 1.
fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        _ => None,
    }
}

fn required_integer(value: &Option<Value>, field: &'static str) -> Result<i128, ValidationError> {
    value
        .as_ref()
        .and_then(as_integer)
        .ok_or(ValidationError::WrongType {
            field,
            expected: "a number",
        })
}

fn at_least_one(value: i128, field: &'static str) -> Result<u64, ValidationError> {
    if value < 1 {
        return Err(ValidationError::BelowMinimum { field });
    }
    u64::try_from(value).map_err(|_| ValidationError::WrongType {
        field,
        expected: "a number",
    })
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

// Absent, null and zero all mean "not supplied".
fn optional_step_reference(
    value: &Option<Value>,
    field: &'static str,
) -> Result<Option<u64>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) if is_zero(v) => Ok(None),
        Some(v) => as_integer(v)
            .filter(|n| *n >= 1)
            .and_then(|n| u64::try_from(n).ok())
            .map(Some)
            .ok_or(ValidationError::NotPositiveInteger { field }),
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(a) => Some(!a.is_empty()),
        Value::Object(o) => Some(!o.is_empty()),
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ThoughtArguments {
        ThoughtArguments::from_value(value).unwrap()
    }

    fn base() -> Value {
        json!({
            "thought": "start",
            "thought_number": 1,
            "total_thoughts": 3,
            "next_thought_needed": true,
        })
    }

    fn with(field: &str, value: Value) -> ThoughtArguments {
        let mut v = base();
        v[field] = value;
        args(v)
    }

    #[test]
    fn test_valid_minimal_step() {
        let step = InputValidator::new().validate(&args(base())).unwrap();
        assert_eq!(step, ThoughtData::new("start", 1, 3, true));
    }

    #[test]
    fn test_missing_required_fields_in_order() {
        let validator = InputValidator::new();
        let err = validator.validate(&args(json!({}))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid thought: must be a string");

        let err = validator
            .validate(&args(json!({ "thought": "x" })))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid thought_number: must be a number");

        let err = validator
            .validate(&args(json!({ "thought": "x", "thought_number": 1 })))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid total_thoughts: must be a number");

        let err = validator
            .validate(&args(json!({ "thought": "x", "thought_number": 1, "total_thoughts": 1 })))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid next_thought_needed: must be a boolean");
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let validator = InputValidator::new();
        assert_eq!(
            validator.validate(&with("thought", json!(42))).unwrap_err().field(),
            "thought"
        );
        assert_eq!(
            validator.validate(&with("thought_number", json!("2"))).unwrap_err().field(),
            "thought_number"
        );
        assert_eq!(
            validator.validate(&with("total_thoughts", json!(2.5))).unwrap_err().field(),
            "total_thoughts"
        );
        assert_eq!(
            validator.validate(&with("next_thought_needed", json!("yes"))).unwrap_err().field(),
            "next_thought_needed"
        );
    }

    #[test]
    fn test_type_checks_come_before_minimums() {
        // thought_number below minimum but next_thought_needed is the wrong type
        let err = InputValidator::new()
            .validate(&args(json!({
                "thought": "x",
                "thought_number": 0,
                "total_thoughts": 3,
                "next_thought_needed": null,
            })))
            .unwrap_err();
        assert_eq!(err.field(), "next_thought_needed");
    }

    #[test]
    fn test_booleans_are_not_integers() {
        let validator = InputValidator::new();
        assert_eq!(
            validator.validate(&with("thought_number", json!(true))).unwrap_err(),
            ValidationError::WrongType { field: "thought_number", expected: "a number" }
        );
        assert_eq!(
            validator.validate(&with("revises_thought", json!(true))).unwrap_err(),
            ValidationError::NotPositiveInteger { field: "revises_thought" }
        );
    }

    #[test]
    fn test_minimum_values() {
        let validator = InputValidator::new();
        assert_eq!(
            validator.validate(&with("thought_number", json!(0))).unwrap_err(),
            ValidationError::BelowMinimum { field: "thought_number" }
        );
        assert_eq!(
            validator.validate(&with("total_thoughts", json!(-4))).unwrap_err(),
            ValidationError::BelowMinimum { field: "total_thoughts" }
        );
    }

    #[test]
    fn test_empty_thought_with_zero_number_reports_number() {
        let err = InputValidator::new()
            .validate(&args(json!({
                "thought": "",
                "thought_number": 0,
                "total_thoughts": 3,
                "next_thought_needed": true,
            })))
            .unwrap_err();
        assert_eq!(err.to_string(), "thought_number must be at least 1");
    }

    #[test]
    fn test_zero_step_references_are_absent() {
        let validator = InputValidator::new();
        let step = validator.validate(&with("revises_thought", json!(0))).unwrap();
        assert_eq!(step.revises_thought, None);

        let step = validator.validate(&with("branch_from_thought", json!(0))).unwrap();
        assert_eq!(step.branch_from_thought, None);

        let step = validator.validate(&with("branch_from_thought", Value::Null)).unwrap();
        assert_eq!(step.branch_from_thought, None);
    }

    #[test]
    fn test_invalid_step_references() {
        let validator = InputValidator::new();
        assert_eq!(
            validator.validate(&with("revises_thought", json!(-1))).unwrap_err(),
            ValidationError::NotPositiveInteger { field: "revises_thought" }
        );
        assert_eq!(
            validator.validate(&with("branch_from_thought", json!("1"))).unwrap_err(),
            ValidationError::NotPositiveInteger { field: "branch_from_thought" }
        );
        assert_eq!(
            validator
                .validate(&with("branch_from_thought", json!(1.5)))
                .unwrap_err()
                .to_string(),
            "branch_from_thought must be a positive integer"
        );
    }

    #[test]
    fn test_revision_checked_before_branch() {
        let mut v = base();
        v["revises_thought"] = json!(-1);
        v["branch_from_thought"] = json!(-1);
        let err = InputValidator::new().validate(&args(v)).unwrap_err();
        assert_eq!(err.field(), "revises_thought");
    }

    #[test]
    fn test_optional_fields_are_coerced() {
        let mut v = base();
        v["is_revision"] = json!(1);
        v["needs_more_thoughts"] = json!("");
        v["branch_id"] = json!(7);
        v["branch_from_thought"] = json!(1);
        v["revises_thought"] = json!(2);

        let step = InputValidator::new().validate(&args(v)).unwrap();
        assert_eq!(step.is_revision, Some(true));
        assert_eq!(step.needs_more_thoughts, Some(false));
        assert_eq!(step.branch_id.as_deref(), Some("7"));
        assert_eq!(step.branch_from_thought, Some(1));
        assert_eq!(step.revises_thought, Some(2));
    }

    #[test]
    fn test_null_optional_fields_stay_unset() {
        let mut v = base();
        v["is_revision"] = Value::Null;
        v["branch_id"] = Value::Null;
        v["needs_more_thoughts"] = Value::Null;

        let step = InputValidator::new().validate(&args(v)).unwrap();
        assert_eq!(step.is_revision, None);
        assert_eq!(step.branch_id, None);
        assert_eq!(step.needs_more_thoughts, None);
    }

    #[test]
    fn test_thought_length_limit() {
        let validator = InputValidator::new().with_max_thought_length(5);
        assert!(validator.validate(&with("thought", json!("12345"))).is_ok());
        assert!(matches!(
            validator.validate(&with("thought", json!("123456"))),
            Err(ValidationError::ThoughtTooLong { actual: 6, max: 5 })
        ));

        // unlimited by default
        let long = "x".repeat(100_000);
        assert!(InputValidator::new().validate(&with("thought", json!(long))).is_ok());
    }
}
