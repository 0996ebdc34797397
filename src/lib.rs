//! Sequential thinking MCP server.
//!
//! A [`ThoughtLedger`] records the numbered reasoning steps an agent submits
//! during one session, including revisions of earlier steps and named
//! branches forked from them. [`SequentialThinkingService`] exposes the
//! ledger as the `sequentialthinking` MCP tool.

pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod service;
pub mod validation;
pub mod visual;

pub use self::config::{DisplayConfig, LimitsConfig, SequentialThinkingConfig, ServerConfig};
pub use self::error::{Result, ThinkingError};
pub use self::ledger::ThoughtLedger;
pub use self::models::{ThinkingStatus, ThoughtArguments, ThoughtData};
pub use self::service::{completion_text, SequentialThinkingService};
pub use self::validation::{InputValidator, ValidationError};
pub use self::visual::{format_thought, thought_header, ThoughtKind, VisualOutput};
