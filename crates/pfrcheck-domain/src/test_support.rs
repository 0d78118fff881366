use crate::context::MapContext;
use crate::policy::EffectiveConfig;
use pfrcheck_rules::CompiledRule;
use pfrcheck_types::{FieldPath, Rule, RuleId};

pub fn rule(id: &str, condition: &str) -> Rule {
    Rule {
        id: RuleId::parse(id).expect("valid rule id"),
        description: format!("description for {id}"),
        message: format!("message for {id}"),
        condition: condition.to_string(),
    }
}

pub fn compiled(rules: &[(&str, &str)]) -> Vec<CompiledRule> {
    rules
        .iter()
        .map(|(id, cond)| CompiledRule::compile(rule(id, cond)))
        .collect()
}

pub fn ctx(values: &[(&str, u64)]) -> MapContext {
    values
        .iter()
        .map(|(path, value)| {
            (
                FieldPath::parse(path).expect("valid field path"),
                (*value).into(),
            )
        })
        .collect()
}

pub fn config() -> EffectiveConfig {
    EffectiveConfig {
        profile: "test".to_string(),
        ..EffectiveConfig::default()
    }
}
