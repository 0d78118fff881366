use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dotted reference to a register field or a named predicate.
///
/// Shape: one or more identifier segments joined by `.`, e.g. `CFPA.DCFG_CC_SOCU_NS_PIN` or
/// `CMPA.SECURE_BOOT_CFG.SEC_BOOT_EN`. A single-segment path names a predicate.
///
/// Segments are `[A-Za-z_][A-Za-z0-9_]*`. Paths are case-sensitive and never normalized.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(String);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldPathError {
    #[error("field path is empty")]
    Empty,
    #[error("field path `{path}` has an empty segment")]
    EmptySegment { path: String },
    #[error("field path `{path}` has an invalid segment `{segment}`")]
    InvalidSegment { path: String, segment: String },
}

impl FieldPath {
    pub fn parse(s: &str) -> Result<Self, FieldPathError> {
        if s.is_empty() {
            return Err(FieldPathError::Empty);
        }
        for segment in s.split('.') {
            if segment.is_empty() {
                return Err(FieldPathError::EmptySegment {
                    path: s.to_string(),
                });
            }
            if !is_identifier(segment) {
                return Err(FieldPathError::InvalidSegment {
                    path: s.to_string(),
                    segment: segment.to_string(),
                });
            }
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// First segment: the register region (`CMPA`, `CFPA`) or the predicate name.
    pub fn region(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    pub fn join(&self, segment: &str) -> Result<FieldPath, FieldPathError> {
        FieldPath::parse(&format!("{}.{}", self.0, segment))
    }
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = FieldPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FieldPath::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(value: FieldPath) -> Self {
        value.0
    }
}
