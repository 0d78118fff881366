//! Loading rule files into an ordered, validated rule set.

use crate::compile::CompiledRule;
use crate::error::MalformedRuleError;
use pfrcheck_types::{Rule, RuleId, ids};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

/// One rule file's text and the name it is reported under.
#[derive(Clone, Copy, Debug)]
pub struct RuleSource<'a> {
    pub origin: &'a str,
    pub text: &'a str,
}

impl<'a> RuleSource<'a> {
    pub fn new(origin: &'a str, text: &'a str) -> Self {
        Self { origin, text }
    }
}

/// Rules in declaration order, with the origin of each record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    origins: Vec<String>,
}

/// Load a single rule file.
pub fn load(source: RuleSource<'_>) -> Result<RuleSet, MalformedRuleError> {
    load_many(&[source])
}

/// Load several rule files in order, as one rule set.
///
/// Ids must be unique across all sources. The first malformed record aborts the load.
pub fn load_many(sources: &[RuleSource<'_>]) -> Result<RuleSet, MalformedRuleError> {
    let mut set = RuleSet::default();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for source in sources {
        let records = parse_records(source)?;
        for (index, rule) in records.into_iter().enumerate() {
            if let Some(&first) = seen.get(rule.id.as_str()) {
                return Err(MalformedRuleError::DuplicateId {
                    origin: source.origin.to_string(),
                    index,
                    id: rule.id.to_string(),
                    first_origin: set.origins[first].clone(),
                });
            }
            seen.insert(rule.id.to_string(), set.rules.len());
            set.rules.push(rule);
            set.origins.push(source.origin.to_string());
        }
        tracing::debug!(origin = source.origin, total = set.rules.len(), "loaded rule file");
    }

    Ok(set)
}

fn parse_records(source: &RuleSource<'_>) -> Result<Vec<Rule>, MalformedRuleError> {
    let origin = source.origin;
    let doc: Value = serde_yaml::from_str(source.text).map_err(|e| MalformedRuleError::Yaml {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;

    let records = match doc {
        // An empty file (or one with only comments) is an empty rule set.
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(seq) => seq,
        _ => {
            return Err(MalformedRuleError::NotASequence {
                origin: origin.to_string(),
            });
        }
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| match record {
            Value::Mapping(map) => parse_record(origin, index, map),
            _ => Err(MalformedRuleError::NotAMapping {
                origin: origin.to_string(),
                index,
            }),
        })
        .collect()
}

fn parse_record(origin: &str, index: usize, map: &Mapping) -> Result<Rule, MalformedRuleError> {
    for key in map.keys() {
        let known = key.as_str().is_some_and(|k| ids::RULE_KEYS.contains(&k));
        if !known {
            return Err(MalformedRuleError::UnknownKey {
                origin: origin.to_string(),
                index,
                key: describe_key(key),
            });
        }
    }

    let field = |key: &'static str| -> Result<String, MalformedRuleError> {
        match map.get(key) {
            None => Err(MalformedRuleError::MissingKey {
                origin: origin.to_string(),
                index,
                key,
            }),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(MalformedRuleError::NotAString {
                origin: origin.to_string(),
                index,
                key: key.to_string(),
            }),
        }
    };

    let id_text = field(ids::KEY_REQ_ID)?;
    let description = field(ids::KEY_DESC)?;
    let message = field(ids::KEY_MSG)?;
    let condition = field(ids::KEY_COND)?;

    let id = RuleId::parse(&id_text).map_err(|reason| MalformedRuleError::InvalidId {
        origin: origin.to_string(),
        index,
        reason,
    })?;

    Ok(Rule {
        id,
        description,
        message,
        condition,
    })
}

fn describe_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| "<non-string key>".to_string()),
    }
}

impl RuleSet {
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id.as_str() == id)
    }

    /// Origin of the rule at `index` (declaration order).
    pub fn origin_of(&self, index: usize) -> Option<&str> {
        self.origins.get(index).map(String::as_str)
    }

    /// Rules ordered by numeric id instead of declaration order.
    pub fn sorted_by_id(&self) -> Vec<&Rule> {
        let mut sorted: Vec<&Rule> = self.rules.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));
        sorted
    }

    /// Compile every condition once. Syntax errors stay attached to their rule.
    pub fn compile(&self) -> Vec<CompiledRule> {
        self.rules.iter().cloned().map(CompiledRule::compile).collect()
    }

    /// Serialize back to the rule file format.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        crate::to_yaml(&self.rules)
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }
}
