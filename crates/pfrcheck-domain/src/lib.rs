//! Pure rule evaluation (no IO).
//!
//! Input: compiled rules plus an evaluation context constructed elsewhere.
//! Output: violations + per-rule outcomes + verdict + summary data.

#![forbid(unsafe_code)]

pub mod context;
pub mod policy;
pub mod report;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use context::MapContext;
pub use engine::{evaluate, run};
pub use fingerprint::fingerprint_for_violation;
