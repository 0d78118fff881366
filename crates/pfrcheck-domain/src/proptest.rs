//! Property-based tests for the evaluation engine.
//!
//! These tests use proptest to verify invariants around:
//! - identical results with and without parallel evaluation
//! - disabled rules never producing violations
//! - summary counts covering every rule exactly once

use crate::engine::{evaluate, run};
use crate::policy::EffectiveConfig;
use crate::test_support::{compiled, ctx};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

const FIELDS: [&str; 4] = ["CFPA.A", "CFPA.B", "CMPA.C", "CMPA.MISSING"];

fn arb_condition() -> impl Strategy<Value = String> {
    let field = prop::sample::select(FIELDS.to_vec());
    prop_oneof![
        (field.clone(), 0u64..8).prop_map(|(f, v)| format!("{f} == {v}")),
        (field.clone(), 0u64..0x100).prop_map(|(f, m)| format!("({f} & {m:#x}) != 0")),
        (field.clone(), field.clone()).prop_map(|(a, b)| format!("{a} > {b} or {b} == 0")),
        (field.clone(), 0u64..70).prop_map(|(f, s)| format!("({f} << {s}) >= 1")),
        Just("0 != 0".to_string()),
        Just("0 !=".to_string()),
        field.prop_map(|f| format!("{f} and true")),
    ]
}

fn arb_rules() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(arb_condition(), 0..24).prop_map(|conds| {
        conds
            .into_iter()
            .enumerate()
            .map(|(i, c)| (format!("{}.{}", i / 5 + 1, i % 5 + 1), c))
            .collect()
    })
}

fn arb_values() -> impl Strategy<Value = (u64, u64, u64)> {
    (any::<u64>(), 0u64..16, prop_oneof![Just(0u64), Just(1u64), any::<u64>()])
}

fn borrowed(rules: &[(String, String)]) -> Vec<(&str, &str)> {
    rules.iter().map(|(id, c)| (id.as_str(), c.as_str())).collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn parallel_matches_sequential(rules in arb_rules(), (a, b, c) in arb_values()) {
        let rules = compiled(&borrowed(&rules));
        let context = ctx(&[("CFPA.A", a), ("CFPA.B", b), ("CMPA.C", c)]);

        let mut cfg = EffectiveConfig { verbose: true, ..EffectiveConfig::default() };
        let sequential = evaluate(&rules, &context, &cfg);
        cfg.parallel = true;
        let parallel = evaluate(&rules, &context, &cfg);

        prop_assert_eq!(sequential.violations, parallel.violations);
        prop_assert_eq!(sequential.outcomes, parallel.outcomes);
        prop_assert_eq!(sequential.summary, parallel.summary);
        prop_assert_eq!(sequential.verdict, parallel.verdict);
    }

    #[test]
    fn disabled_rules_never_violate(rules in arb_rules(), (a, b, c) in arb_values()) {
        let rules = compiled(&borrowed(&rules));
        let context = ctx(&[("CFPA.A", a), ("CFPA.B", b), ("CMPA.C", c)]);

        for v in run(&rules, &context) {
            let rule = rules.iter().find(|r| r.rule.id == v.req_id).unwrap();
            prop_assert!(!rule.is_disabled());
        }
    }

    #[test]
    fn summary_accounts_for_every_rule(rules in arb_rules(), (a, b, c) in arb_values()) {
        let rules = compiled(&borrowed(&rules));
        let context = ctx(&[("CFPA.A", a), ("CFPA.B", b), ("CMPA.C", c)]);

        let report = evaluate(&rules, &context, &EffectiveConfig::default());
        let s = &report.summary;
        prop_assert_eq!(s.total as usize, rules.len());
        prop_assert_eq!(s.violations + s.clean + s.skipped + s.errored, s.total);
        prop_assert_eq!(s.disabled as usize, rules.iter().filter(|r| r.is_disabled()).count());
    }

    #[test]
    fn violations_follow_declaration_order(rules in arb_rules(), (a, b, c) in arb_values()) {
        let rules = compiled(&borrowed(&rules));
        let context = ctx(&[("CFPA.A", a), ("CFPA.B", b), ("CMPA.C", c)]);

        let positions: Vec<usize> = run(&rules, &context)
            .iter()
            .map(|v| rules.iter().position(|r| r.rule.id == v.req_id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
