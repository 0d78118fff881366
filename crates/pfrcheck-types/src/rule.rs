use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Dotted numeric rule identifier (`1.5`, `2.10`).
///
/// Ordering is numeric per segment, so `1.10` sorts after `1.9`. Equality is textual; ids with
/// equal segment values but different text (`1.05`, `1.5`) are ordered by their text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct RuleId(String);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleIdError {
    #[error("rule id is empty")]
    Empty,
    #[error("rule id `{0}` must be dot-separated decimal segments (e.g. `1.5`)")]
    NotDotted(String),
    #[error("rule id `{0}` has a segment that does not fit in 32 bits")]
    Overflow(String),
}

impl RuleId {
    /// Parse an id exactly as written; surrounding whitespace is rejected, not trimmed.
    pub fn parse(s: &str) -> Result<Self, RuleIdError> {
        if s.is_empty() {
            return Err(RuleIdError::Empty);
        }
        for segment in s.split('.') {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RuleIdError::NotDotted(s.to_string()));
            }
            if segment.parse::<u32>().is_err() {
                return Err(RuleIdError::Overflow(s.to_string()));
            }
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric segments; `parse` guarantees every segment fits in `u32`.
    pub fn sort_key(&self) -> Vec<u32> {
        self.0
            .split('.')
            .map(|s| s.parse::<u32>().unwrap_or(u32::MAX))
            .collect()
    }
}

impl Ord for RuleId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for RuleId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RuleId {
    type Error = RuleIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleId::parse(&value)
    }
}

impl From<RuleId> for String {
    fn from(value: RuleId) -> Self {
        value.0
    }
}

/// One record of a rule file.
///
/// Field names follow the on-disk keys (`req_id`, `desc`, `msg`, `cond`) so a loaded rule set
/// serializes back to the same shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    #[serde(rename = "req_id")]
    pub id: RuleId,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "cond")]
    pub condition: String,
}
