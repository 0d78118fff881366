use anyhow::Context;
use camino::Utf8Path;
use pfrcheck_types::{ReportEnvelope, SCHEMA_REPORT_V1};

pub fn serialize_report(report: &ReportEnvelope) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Parse a report previously written by [`write_report`].
pub fn parse_report_json(text: &str) -> anyhow::Result<ReportEnvelope> {
    let report: ReportEnvelope = serde_json::from_str(text).context("parse report json")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {}", report.schema);
    }
    Ok(report)
}

/// Write the report as pretty JSON, creating parent directories.
pub fn write_report(path: &Utf8Path, report: &ReportEnvelope) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    let mut bytes = serialize_report(report)?;
    bytes.push(b'\n');
    std::fs::write(path, bytes).with_context(|| format!("write report {path}"))
}
