use crate::{model::PfrcheckConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use pfrcheck_domain::policy::{DisabledRules, EffectiveConfig, FailOn, RulePolicy};
use pfrcheck_types::{RuleId, Severity};

/// Caller-supplied values that win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub verbose: Option<bool>,
    pub max_violations: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: PfrcheckConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected {})",
            presets::PROFILES.join("|")
        )
    })?;

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    if let Some(disabled_s) = cfg.disabled_rules.as_deref() {
        effective.disabled_rules = parse_disabled_rules(disabled_s)?;
    }

    if let Some(verbose) = overrides.verbose.or(cfg.verbose) {
        effective.verbose = verbose;
    }

    if let Some(parallel) = cfg.parallel {
        effective.parallel = parallel;
    }

    // max violations
    if let Some(mv) = overrides.max_violations.or(cfg.max_violations) {
        effective.max_violations = mv as usize;
    }

    validate_exclude(&cfg.exclude)?;
    effective.exclude = cfg.exclude.clone();

    // per-rule overrides
    for (rule_id, rc) in cfg.rules.iter() {
        let id = RuleId::parse(rule_id)
            .with_context(|| format!("invalid rule id in [rules.\"{rule_id}\"]"))?;
        let default_severity = effective.default_severity;
        let entry = effective
            .rules
            .entry(id.as_str().to_string())
            .or_insert_with(|| RulePolicy::enabled(default_severity));

        if let Some(enabled) = rc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = rc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {rule_id}"))?;
        }
    }

    tracing::debug!(
        profile = %effective.profile,
        overrides = effective.rules.len(),
        exclude = effective.exclude.len(),
        "resolved configuration"
    );

    Ok(ResolvedConfig { effective })
}

fn validate_exclude(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid exclude glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}

fn parse_disabled_rules(v: &str) -> anyhow::Result<DisabledRules> {
    match v {
        "skip" => Ok(DisabledRules::Skip),
        "report" => Ok(DisabledRules::Report),
        other => anyhow::bail!("unknown disabled_rules: {other} (expected skip|report)"),
    }
}
