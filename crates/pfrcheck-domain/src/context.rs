//! Map-backed evaluation context.

use pfrcheck_expr::{FieldResolver, Value};
use pfrcheck_types::{FieldPath, FieldPathError};
use std::collections::BTreeMap;

/// Read-only snapshot of field values for one target, keyed by field path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapContext {
    values: BTreeMap<FieldPath, Value>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: FieldPath, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(path, value.into())
    }

    /// Builder-style insert from a path string.
    pub fn with(mut self, path: &str, value: impl Into<Value>) -> Result<Self, FieldPathError> {
        self.insert(FieldPath::parse(path)?, value);
        Ok(self)
    }

    pub fn get(&self, path: &FieldPath) -> Option<Value> {
        self.values.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct regions (first path segments) present in the context.
    pub fn regions(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.values.keys().map(FieldPath::region).collect();
        out.dedup();
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &Value)> {
        self.values.iter()
    }
}

impl FieldResolver for MapContext {
    fn resolve(&self, path: &FieldPath) -> Option<Value> {
        self.get(path)
    }
}

impl FromIterator<(FieldPath, Value)> for MapContext {
    fn from_iter<I: IntoIterator<Item = (FieldPath, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
