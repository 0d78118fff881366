//! Fuzz target for the condition parser.
//!
//! Goal: compiling a condition should **never panic** on any input.
//! Syntax errors are expected, including for conditions nested past the depth limit.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_condition_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use pfrcheck_expr::Condition;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    match Condition::compile(text) {
        Ok(cond) => {
            // Rendering adds a parenthesis per node, so it may exceed the nesting limit.
            // Whatever reparses must be the same tree.
            let rendered = cond.expr().to_string();
            if let Ok(again) = Condition::compile(&rendered) {
                assert_eq!(again.expr(), cond.expr(), "{rendered}");
            }
        }
        Err(err) => {
            assert!(err.line >= 1 && err.col >= 1);
        }
    }
});
