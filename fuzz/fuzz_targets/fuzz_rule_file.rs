//! Fuzz target for rule file loading.
//!
//! Goal: loading and compiling a rule file should **never panic** on any input.
//! Malformed files must surface as `MalformedRuleError`.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_file
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use pfrcheck_rules::{RuleSource, load};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 64 * 1024 {
        return;
    }

    if let Ok(set) = load(RuleSource::new("fuzz.yaml", text)) {
        let compiled = set.compile();
        assert_eq!(compiled.len(), set.len());
    }
});
