//! The `check` use case: evaluate the rule set against one context and produce a report.

use anyhow::Context;
use pfrcheck_domain::report::DomainReport;
use pfrcheck_expr::FieldResolver;
use pfrcheck_rules::RuleSource;
use pfrcheck_settings::{Overrides, ResolvedConfig};
use pfrcheck_types::{ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta, Verdict, ids};
use time::OffsetDateTime;

/// Input for the check use case.
pub struct CheckInput<'a> {
    /// Rule files, merged in order.
    pub rule_sources: &'a [RuleSource<'a>],
    /// Field values of the configuration image under check.
    pub context: &'a (dyn FieldResolver + Sync),
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Caller overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: ReportEnvelope,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, load and compile rules, evaluate, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        pfrcheck_settings::PfrcheckConfigV1::default()
    } else {
        pfrcheck_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = pfrcheck_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let rule_set = pfrcheck_rules::load_many(input.rule_sources).context("load rules")?;
    let compiled = rule_set.compile();

    let DomainReport {
        verdict,
        violations,
        outcomes,
        summary,
    } = pfrcheck_domain::evaluate(&compiled, input.context, &resolved.effective);

    let finished_at = OffsetDateTime::now_utc();

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: ids::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        profile: resolved.effective.profile.clone(),
        started_at,
        finished_at,
        verdict,
        summary,
        violations,
        outcomes,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
