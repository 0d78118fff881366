use pfrcheck_types::{RuleOutcome, RunSummary, Verdict, Violation};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    /// Triggered rules in declaration order (possibly truncated).
    pub violations: Vec<Violation>,
    /// Per-rule outcomes selected for output by the policy.
    pub outcomes: Vec<RuleOutcome>,
    pub summary: RunSummary,
}
