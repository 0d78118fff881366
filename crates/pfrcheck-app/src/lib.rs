//! Use case orchestration for pfrcheck.
//!
//! This crate provides the application layer: use cases that coordinate the settings, rule store
//! and domain layers. It is intentionally thin and delegates heavy lifting to the appropriate
//! layers. File reading lives here; every other crate works on strings.

#![forbid(unsafe_code)]

mod check;
mod context;
mod report;
mod sources;

pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use context::parse_context_yaml;
pub use report::{parse_report_json, serialize_report, write_report};
pub use sources::{LoadedSource, load_rule_files, read_context_file, read_rule_files};
