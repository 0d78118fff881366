//! Stable DTOs and IDs used across the pfrcheck workspace.
//!
//! This crate is intentionally boring:
//! - rule records as they appear in rule files
//! - validated rule ids and field paths
//! - data types for the emitted report
//! - stable string IDs and codes

#![forbid(unsafe_code)]

pub mod field_path;
pub mod ids;
pub mod receipt;
pub mod rule;

pub use field_path::{FieldPath, FieldPathError};
pub use receipt::{
    OutcomeStatus, ReportEnvelope, RuleOutcome, RunSummary, SCHEMA_REPORT_V1, Severity,
    SeverityCounts,
    SkipReason, ToolMeta, Verdict, Violation,
};
pub use rule::{Rule, RuleId, RuleIdError};
