use crate::fingerprint::fingerprint_for_violation;
use crate::policy::{DisabledRules, EffectiveConfig, FailOn};
use crate::report::DomainReport;
use globset::{Glob, GlobSet, GlobSetBuilder};
use pfrcheck_expr::{EvalError, FieldResolver};
use pfrcheck_rules::{CompiledRule, RuleState};
use pfrcheck_types::{
    OutcomeStatus, Rule, RuleOutcome, RunSummary, Severity, SeverityCounts, SkipReason, Verdict,
    Violation, ids,
};
use rayon::prelude::*;

/// Evaluate every rule against `ctx` and classify the result.
///
/// One rule's failure (unknown field, syntax or type error) never stops the others. Output
/// order is declaration order, with or without `cfg.parallel`.
pub fn evaluate<R>(rules: &[CompiledRule], ctx: &R, cfg: &EffectiveConfig) -> DomainReport
where
    R: FieldResolver + Sync + ?Sized,
{
    let exclude = build_exclude_set(&cfg.exclude);
    let classify_one = |rule: &CompiledRule| classify(rule, ctx, cfg, exclude.as_ref());

    let classified: Vec<Classified> = if cfg.parallel {
        rules.par_iter().map(classify_one).collect()
    } else {
        rules.iter().map(classify_one).collect()
    };

    let mut summary = RunSummary {
        total: u32::try_from(classified.len()).unwrap_or(u32::MAX),
        ..RunSummary::default()
    };
    let mut violations = Vec::new();
    let mut outcomes = Vec::new();

    for c in classified {
        match c.outcome.status {
            OutcomeStatus::Violated => summary.violations += 1,
            OutcomeStatus::Clean => summary.clean += 1,
            OutcomeStatus::Skipped => {
                summary.skipped += 1;
                if c.outcome.reason == Some(SkipReason::Disabled) {
                    summary.disabled += 1;
                }
            }
            OutcomeStatus::Errored => summary.errored += 1,
        }
        if should_list(&c.outcome, cfg) {
            outcomes.push(c.outcome);
        }
        if let Some(v) = c.violation {
            violations.push(v);
        }
    }

    let verdict = compute_verdict(&violations, summary.errored, cfg.fail_on);
    summary.by_severity = SeverityCounts::from_violations(&violations);

    if violations.len() > cfg.max_violations {
        violations.truncate(cfg.max_violations);
        summary.truncated_reason = Some(format!(
            "violations truncated to max_violations={}",
            cfg.max_violations
        ));
    }
    summary.violations_emitted = u32::try_from(violations.len()).unwrap_or(u32::MAX);

    tracing::info!(
        profile = %cfg.profile,
        total = summary.total,
        violations = summary.violations,
        clean = summary.clean,
        skipped = summary.skipped,
        errored = summary.errored,
        "rule evaluation finished"
    );

    DomainReport {
        verdict,
        violations,
        outcomes,
        summary,
    }
}

/// Triggered rules, in declaration order, under the default policy.
pub fn run<R>(rules: &[CompiledRule], ctx: &R) -> Vec<Violation>
where
    R: FieldResolver + Sync + ?Sized,
{
    let cfg = EffectiveConfig {
        max_violations: usize::MAX,
        ..EffectiveConfig::default()
    };
    evaluate(rules, ctx, &cfg).violations
}

struct Classified {
    outcome: RuleOutcome,
    violation: Option<Violation>,
}

fn classify<R>(
    compiled: &CompiledRule,
    ctx: &R,
    cfg: &EffectiveConfig,
    exclude: Option<&GlobSet>,
) -> Classified
where
    R: FieldResolver + ?Sized,
{
    let rule = &compiled.rule;
    let id = rule.id.as_str();

    if exclude.is_some_and(|set| set.is_match(id)) {
        return skipped(rule, SkipReason::Excluded, None);
    }

    let policy = cfg.rule_policy(id);
    if !policy.enabled {
        return skipped(rule, SkipReason::DisabledByConfig, None);
    }

    let classified = match &compiled.state {
        RuleState::Disabled => skipped(rule, SkipReason::Disabled, None),
        RuleState::Invalid(err) => {
            errored(rule, ids::CODE_CONDITION_SYNTAX, err.to_string())
        }
        RuleState::Enabled(cond) => match cond.evaluate(ctx) {
            Ok(true) => violated(rule, policy.severity),
            Ok(false) => outcome_only(rule, OutcomeStatus::Clean),
            Err(EvalError::UnknownField(path)) => {
                tracing::warn!(req_id = id, field = %path, "skipping rule: field not present in context");
                skipped(rule, SkipReason::UnknownField, Some(path.to_string()))
            }
            Err(err @ EvalError::Type(_)) => {
                tracing::warn!(req_id = id, error = %err, "rule condition failed to evaluate");
                errored(rule, ids::CODE_CONDITION_TYPE, err.to_string())
            }
        },
    };

    tracing::debug!(req_id = id, status = ?classified.outcome.status, "rule evaluated");
    classified
}

fn outcome_only(rule: &Rule, status: OutcomeStatus) -> Classified {
    Classified {
        outcome: RuleOutcome {
            req_id: rule.id.clone(),
            status,
            reason: None,
            code: None,
            detail: None,
        },
        violation: None,
    }
}

fn violated(rule: &Rule, severity: Severity) -> Classified {
    let mut c = outcome_only(rule, OutcomeStatus::Violated);
    c.outcome.code = Some(ids::CODE_RULE_VIOLATED.to_string());
    c.violation = Some(Violation {
        req_id: rule.id.clone(),
        msg: rule.message.clone(),
        severity,
        fingerprint: Some(fingerprint_for_violation(rule.id.as_str(), &rule.message)),
    });
    c
}

fn skipped(rule: &Rule, reason: SkipReason, detail: Option<String>) -> Classified {
    let mut c = outcome_only(rule, OutcomeStatus::Skipped);
    c.outcome.reason = Some(reason);
    c.outcome.detail = detail;
    c
}

fn errored(rule: &Rule, code: &str, detail: String) -> Classified {
    let mut c = outcome_only(rule, OutcomeStatus::Errored);
    c.outcome.code = Some(code.to_string());
    c.outcome.detail = Some(detail);
    c
}

fn should_list(outcome: &RuleOutcome, cfg: &EffectiveConfig) -> bool {
    match (outcome.status, outcome.reason) {
        (OutcomeStatus::Violated | OutcomeStatus::Errored, _) => true,
        // Operators must be able to tell "passed" from "did not apply".
        (OutcomeStatus::Skipped, Some(SkipReason::UnknownField)) => true,
        (OutcomeStatus::Skipped, Some(SkipReason::Disabled)) => {
            cfg.verbose || cfg.disabled_rules == DisabledRules::Report
        }
        _ => cfg.verbose,
    }
}

fn build_exclude_set(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(err) => {
                tracing::warn!(pattern = %pattern, error = %err, "ignoring invalid exclude pattern");
            }
        }
    }
    builder.build().ok()
}

fn compute_verdict(violations: &[Violation], errored: u32, fail_on: FailOn) -> Verdict {
    let has_error = violations.iter().any(|v| v.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = violations.iter().any(|v| v.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    // A rule that could not be evaluated is an authoring defect, not a pass.
    if errored > 0 {
        return Verdict::Warn;
    }

    Verdict::Pass
}
