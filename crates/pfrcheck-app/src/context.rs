//! Evaluation contexts from YAML documents.
//!
//! Accepted shapes, freely mixed:
//!
//! ```yaml
//! CFPA:
//!   VERSION: 2
//!   DCFG_CC_SOCU_PIN: "0x0000_02FF"
//! "CMPA.SECURE_BOOT_CFG.SEC_BOOT_EN": 1
//! is_rotkh_valid: true
//! ```

use anyhow::Context;
use pfrcheck_domain::MapContext;
use pfrcheck_expr::Value;
use pfrcheck_types::FieldPath;
use serde_yaml::Value as Yaml;

/// Flatten a nested or flat YAML mapping into a [`MapContext`].
///
/// Leaves must be unsigned integers, integer strings (`"0x1F"`, `"0b101"`, `"42"`) or booleans.
/// A path given twice is an error.
pub fn parse_context_yaml(text: &str) -> anyhow::Result<MapContext> {
    let doc: Yaml = serde_yaml::from_str(text).context("parse context yaml")?;
    let mut ctx = MapContext::new();

    match doc {
        Yaml::Null => {}
        Yaml::Mapping(map) => flatten_into(&mut ctx, None, &map)?,
        other => anyhow::bail!(
            "context must be a mapping of field paths to values, found {}",
            kind_of(&other)
        ),
    }

    tracing::debug!(fields = ctx.len(), regions = ?ctx.regions(), "loaded evaluation context");
    Ok(ctx)
}

fn flatten_into(
    ctx: &mut MapContext,
    prefix: Option<&FieldPath>,
    map: &serde_yaml::Mapping,
) -> anyhow::Result<()> {
    for (key, value) in map {
        let key = key
            .as_str()
            .with_context(|| format!("context keys must be strings, found {}", kind_of(key)))?;
        let path = match prefix {
            Some(p) => p.join(key),
            None => FieldPath::parse(key),
        }
        .with_context(|| format!("invalid field path segment: {key:?}"))?;

        match value {
            Yaml::Mapping(inner) => flatten_into(ctx, Some(&path), inner)?,
            leaf => {
                let value = leaf_value(leaf).with_context(|| format!("invalid value for {path}"))?;
                if ctx.insert(path.clone(), value).is_some() {
                    anyhow::bail!("field {path} is given more than once");
                }
            }
        }
    }
    Ok(())
}

fn leaf_value(leaf: &Yaml) -> anyhow::Result<Value> {
    match leaf {
        Yaml::Bool(b) => Ok(Value::Bool(*b)),
        Yaml::Number(n) => n
            .as_u64()
            .map(Value::Int)
            .with_context(|| format!("{n} is not an unsigned 64-bit integer")),
        Yaml::String(s) => parse_int_text(s).map(Value::Int),
        other => anyhow::bail!("expected an integer or boolean, found {}", kind_of(other)),
    }
}

fn parse_int_text(text: &str) -> anyhow::Result<u64> {
    let trimmed = text.trim();
    let (digits, radix) = if let Some(rest) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        (rest, 16)
    } else if let Some(rest) = trimmed
        .strip_prefix("0b")
        .or_else(|| trimmed.strip_prefix("0B"))
    {
        (rest, 2)
    } else {
        (trimmed, 10)
    };

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() {
        anyhow::bail!("{text:?} has no digits");
    }
    u64::from_str_radix(&digits, radix).with_context(|| format!("{text:?} is not a valid integer"))
}

fn kind_of(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a sequence",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfrcheck_expr::FieldResolver;

    fn get(ctx: &MapContext, path: &str) -> Option<Value> {
        ctx.resolve(&FieldPath::parse(path).unwrap())
    }

    #[test]
    fn nested_and_flat_shapes_mix() {
        let ctx = parse_context_yaml(
            r#"
CFPA:
  VERSION: 2
  DCFG_CC_SOCU_PIN: "0x0000_02FF"
"CMPA.SECURE_BOOT_CFG.SEC_BOOT_EN": 1
CMPA:
  SECURE_BOOT_CFG:
    DICE_SKIP: "0b10"
is_rotkh_valid: true
"#,
        )
        .expect("parse");

        assert_eq!(get(&ctx, "CFPA.VERSION"), Some(Value::Int(2)));
        assert_eq!(get(&ctx, "CFPA.DCFG_CC_SOCU_PIN"), Some(Value::Int(0x2FF)));
        assert_eq!(get(&ctx, "CMPA.SECURE_BOOT_CFG.SEC_BOOT_EN"), Some(Value::Int(1)));
        assert_eq!(get(&ctx, "CMPA.SECURE_BOOT_CFG.DICE_SKIP"), Some(Value::Int(2)));
        assert_eq!(get(&ctx, "is_rotkh_valid"), Some(Value::Bool(true)));
        assert_eq!(ctx.len(), 5);
    }

    #[test]
    fn empty_document_is_an_empty_context() {
        assert!(parse_context_yaml("").unwrap().is_empty());
        assert!(parse_context_yaml("# nothing yet\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_leaves() {
        assert!(parse_context_yaml("CFPA: {A: -1}").is_err());
        assert!(parse_context_yaml("CFPA: {A: 1.5}").is_err());
        assert!(parse_context_yaml("CFPA: {A: [1, 2]}").is_err());
        assert!(parse_context_yaml("CFPA: {A: \"0xZZ\"}").is_err());
        assert!(parse_context_yaml("CFPA: {A: \"0x\"}").is_err());
        assert!(parse_context_yaml("CFPA: {A: ~}").is_err());
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(parse_context_yaml("- CFPA.A").is_err());
        assert!(parse_context_yaml("\"CFPA..A\": 1").is_err());
        assert!(parse_context_yaml("1: 2").is_err());
    }

    #[test]
    fn rejects_a_field_given_twice() {
        let err = parse_context_yaml("\"CFPA.A\": 1\nCFPA: {A: 2}\n").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
