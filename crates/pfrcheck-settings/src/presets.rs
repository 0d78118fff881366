use pfrcheck_domain::policy::{DisabledRules, EffectiveConfig, FailOn};
use pfrcheck_types::Severity;
use std::collections::BTreeMap;

/// Profile names accepted by `profile = "..."`.
pub const PROFILES: [&str; 3] = ["strict", "warn", "audit"];

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything rule-specific belongs in `[rules."<id>"]`.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "strict" => Some(strict_profile()),
        "warn" => Some(warn_profile()),
        "audit" => Some(audit_profile()),
        _ => None,
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
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

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Warning,
        default_severity: Severity::Warning,
        ..strict_profile()
    }
}

fn audit_profile() -> EffectiveConfig {
    // Audit runs report everything and never fail on informational findings.
    EffectiveConfig {
        profile: "audit".to_string(),
        fail_on: FailOn::Error,
        default_severity: Severity::Info,
        disabled_rules: DisabledRules::Report,
        verbose: true,
        ..strict_profile()
    }
}
