use pfrcheck_types::Severity;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

/// What to do with rules the rule file marks as not yet enforced (`0 != 0`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisabledRules {
    /// Count them as skipped; list them only in verbose output.
    #[default]
    Skip,
    /// Always list them as skipped outcomes.
    Report,
}

#[derive(Clone, Debug)]
pub struct RulePolicy {
    pub enabled: bool,
    pub severity: Severity,
}

impl RulePolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Info,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    /// Severity for rules without a per-rule override.
    pub default_severity: Severity,
    pub disabled_rules: DisabledRules,
    /// List clean and skipped outcomes, not only violated and errored ones.
    pub verbose: bool,
    pub parallel: bool,
    pub max_violations: usize,
    /// Glob patterns over rule ids; matching rules are skipped.
    pub exclude: Vec<String>,
    /// Per-rule overrides keyed by `req_id`.
    pub rules: BTreeMap<String, RulePolicy>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            fail_on: FailOn::Error,
            default_severity: Severity::Error,
            disabled_rules: DisabledRules::Skip,
            verbose: false,
            parallel: false,
            max_violations: 200,
            exclude: Vec::new(),
            rules: BTreeMap::new(),
        }
    }
}

impl EffectiveConfig {
    /// Policy for `rule_id`, falling back to the default severity.
    pub fn rule_policy(&self, rule_id: &str) -> RulePolicy {
        self.rules
            .get(rule_id)
            .cloned()
            .unwrap_or_else(|| RulePolicy::enabled(self.default_severity))
    }
}
