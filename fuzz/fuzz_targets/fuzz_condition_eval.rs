//! Fuzz target for condition evaluation.
//!
//! Goal: evaluating any compiled condition against any context should **never panic**.
//! Unknown fields and type errors are reported as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_condition_eval
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pfrcheck_expr::{Condition, FieldResolver, Value};
use pfrcheck_types::FieldPath;
use std::collections::BTreeMap;

#[derive(Arbitrary, Debug)]
struct EvalInput {
    condition: String,
    /// Field values keyed by path text; invalid paths are dropped.
    ints: Vec<(String, u64)>,
    bools: Vec<(String, bool)>,
}

struct Fields(BTreeMap<String, Value>);

impl FieldResolver for Fields {
    fn resolve(&self, path: &FieldPath) -> Option<Value> {
        self.0.get(path.as_str()).copied()
    }
}

fuzz_target!(|input: EvalInput| {
    if input.condition.len() > 4096 || input.ints.len() + input.bools.len() > 64 {
        return;
    }
    let Ok(cond) = Condition::compile(&input.condition) else {
        return;
    };

    let mut fields = BTreeMap::new();
    for (path, v) in input.ints {
        fields.insert(path, Value::Int(v));
    }
    for (path, v) in input.bools {
        fields.insert(path, Value::Bool(v));
    }
    let fields = Fields(fields);

    let first = cond.evaluate(&fields);
    let second = cond.evaluate(&fields);
    assert_eq!(first, second, "evaluation must be deterministic");
});
