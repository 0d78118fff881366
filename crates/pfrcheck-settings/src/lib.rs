//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{PfrcheckConfigV1, RuleConfig};
pub use presets::PROFILES;
pub use resolve::{Overrides, ResolvedConfig};

/// Schema id accepted in the optional `schema` key of `pfrcheck.toml`.
pub const SCHEMA_CONFIG_V1: &str = "pfrcheck.config.v1";

/// Parse `pfrcheck.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PfrcheckConfigV1> {
    let cfg: PfrcheckConfigV1 = toml::from_str(input)?;
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + overrides + per-rule config).
pub fn resolve_config(
    cfg: PfrcheckConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON Schema describing `pfrcheck.toml`, for editor tooling.
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(PfrcheckConfigV1)
}
