use camino::{Utf8Path, Utf8PathBuf};
use pfrcheck_app::{
    CheckInput, load_rule_files, parse_report_json, read_context_file, read_rule_files,
    run_check, serialize_report, verdict_exit_code, write_report,
};
use pfrcheck_rules::RuleSource;
use pfrcheck_settings::Overrides;
use pfrcheck_types::{OutcomeStatus, SkipReason, Verdict};

fn fixture(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn check(config_text: &str, overrides: Overrides) -> pfrcheck_app::CheckOutput {
    let loaded = read_rule_files(&[fixture("cmpa_cfpa_rules.yaml")]).expect("read rules");
    let sources: Vec<RuleSource<'_>> = loaded.iter().map(|l| l.as_rule_source()).collect();
    let context = read_context_file(&fixture("lpc55_context.yaml")).expect("read context");

    run_check(CheckInput {
        rule_sources: &sources,
        context: &context,
        config_text,
        overrides,
    })
    .expect("run_check")
}

#[test]
fn fixture_context_violates_rule_1_5() {
    let report = check("", Overrides::default()).report;

    assert_eq!(report.verdict, Verdict::Fail);
    assert_eq!(verdict_exit_code(report.verdict), 2);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].req_id.as_str(), "1.5");
    assert_eq!(report.summary.total, 6);
    assert_eq!(report.summary.clean, 4);
    assert_eq!(report.summary.disabled, 1);
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.summary.by_severity.error, 1);
    assert_eq!(report.summary.by_severity.warning, 0);
}

#[test]
fn config_downgrades_rule_to_warning() {
    let config = "[rules.\"1.5\"]\nseverity = \"warning\"\n";
    let report = check(config, Overrides::default()).report;

    assert_eq!(report.verdict, Verdict::Warn);
    assert_eq!(verdict_exit_code(report.verdict), 0);
}

#[test]
fn audit_profile_lists_every_rule() {
    let overrides = Overrides {
        profile: Some("audit".to_string()),
        ..Overrides::default()
    };
    let output = check("", overrides);
    let report = output.report;

    assert_eq!(report.profile, "audit");
    assert_eq!(report.outcomes.len(), 6);
    let disabled = report
        .outcomes
        .iter()
        .find(|o| o.req_id.as_str() == "1.2")
        .expect("1.2 listed");
    assert_eq!(disabled.status, OutcomeStatus::Skipped);
    assert_eq!(disabled.reason, Some(SkipReason::Disabled));
    // Info-severity violations do not fail an audit.
    assert_eq!(report.verdict, Verdict::Pass);
}

#[test]
fn report_round_trips_through_a_file() {
    let report = check("", Overrides::default()).report;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
    let path = root.join("out").join("report.json");

    write_report(&path, &report).expect("write report");
    let text = std::fs::read_to_string(&path).expect("read report");
    let parsed = parse_report_json(&text).expect("parse report");
    assert_eq!(parsed, report);

    let json: serde_json::Value =
        serde_json::from_slice(&serialize_report(&report).expect("serialize")).expect("json");
    assert_eq!(json["schema"], "pfrcheck.report.v1");
    assert_eq!(json["violations"][0]["req_id"], "1.5");
    assert_eq!(json["summary"]["by_severity"]["error"], 1);
}

#[test]
fn rule_files_merge_and_reject_duplicates() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

    let extra = root.join("extra.yaml");
    std::fs::write(
        &extra,
        "- req_id: \"3.1\"\n  desc: d\n  msg: m\n  cond: CFPA.VERSION > 10\n",
    )
    .expect("write extra rules");
    let set = load_rule_files(&[fixture("cmpa_cfpa_rules.yaml"), extra.clone()]).expect("load");
    assert_eq!(set.len(), 7);

    let dup = root.join("dup.yaml");
    std::fs::write(
        &dup,
        "- req_id: \"2.1\"\n  desc: d\n  msg: m\n  cond: CMPA.RESERVED_0 != 0\n",
    )
    .expect("write duplicate rules");
    let err = load_rule_files(&[fixture("cmpa_cfpa_rules.yaml"), dup]).unwrap_err();
    assert!(format!("{err:#}").contains("2.1"));
}

#[test]
fn missing_files_name_the_path() {
    let err = read_context_file(Utf8Path::new("does/not/exist.yaml")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.yaml"));
}
