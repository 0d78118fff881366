//! Property-based tests for the condition language.
//!
//! These tests use proptest to verify invariants around:
//! - parser robustness on arbitrary input
//! - rendering and reparsing generated trees
//! - determinism of evaluation

use crate::ast::{BitOp, CompareOp, Expr};
use crate::{Condition, FieldResolver, Parser, Value, evaluate};
use pfrcheck_types::FieldPath;
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

fn arb_field_path() -> impl Strategy<Value = FieldPath> {
    prop::string::string_regex("(CMPA|CFPA)\\.[A-Z][A-Z0-9_]{0,11}(\\.[A-Z][A-Z0-9_]{0,7})?")
        .unwrap()
        .prop_map(|s| FieldPath::parse(&s).unwrap())
}

fn arb_int_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        any::<u64>().prop_map(Expr::Int),
        arb_field_path().prop_map(Expr::Field),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (
                prop_oneof![
                    Just(BitOp::And),
                    Just(BitOp::Or),
                    Just(BitOp::Xor),
                    Just(BitOp::Shl),
                    Just(BitOp::Shr),
                ],
                inner.clone(),
                inner.clone()
            )
                .prop_map(|(op, l, r)| Expr::Bitwise {
                    op,
                    lhs: Box::new(l),
                    rhs: Box::new(r),
                }),
            inner.prop_map(|e| Expr::Complement(Box::new(e))),
        ]
    })
}

fn arb_bool_expr() -> impl Strategy<Value = Expr> {
    let compare_op = prop_oneof![
        Just(CompareOp::Eq),
        Just(CompareOp::Ne),
        Just(CompareOp::Lt),
        Just(CompareOp::Le),
        Just(CompareOp::Gt),
        Just(CompareOp::Ge),
    ];
    let leaf = prop_oneof![
        any::<bool>().prop_map(Expr::Bool),
        (compare_op, arb_int_expr(), arb_int_expr()).prop_map(|(op, l, r)| Expr::Compare {
            op,
            lhs: Box::new(l),
            rhs: Box::new(r),
        }),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::And(Box::new(l), Box::new(r))),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::Or(Box::new(l), Box::new(r))),
            inner.prop_map(|e| Expr::Not(Box::new(e))),
        ]
    })
}

/// Resolves every CMPA/CFPA path to a value derived from its text.
struct HashedFields;

impl FieldResolver for HashedFields {
    fn resolve(&self, path: &FieldPath) -> Option<Value> {
        let h = path
            .as_str()
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
                (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
            });
        Some(Value::Int(h))
    }
}

proptest! {
    #[test]
    fn parser_never_panics(input in ".{0,64}") {
        let _ = Parser::parse(&input);
    }

    #[test]
    fn parser_never_panics_on_operator_soup(
        input in "[ ()&|^~<>=!0-9xA-Fa-z._]{0,48}"
    ) {
        let _ = Condition::compile(&input);
    }

    #[test]
    fn rendered_tree_reparses_identically(expr in arb_bool_expr()) {
        let rendered = expr.to_string();
        let reparsed = Parser::parse(&rendered).unwrap();
        prop_assert_eq!(reparsed, expr);
    }

    #[test]
    fn evaluation_is_deterministic(expr in arb_bool_expr()) {
        let first = evaluate(&expr, &HashedFields);
        let second = evaluate(&expr, &HashedFields);
        prop_assert!(first.is_ok());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn disabled_marker_never_triggers(
        values in prop::collection::btree_map("CFPA\\.[A-Z]{1,4}", any::<u64>(), 0..8)
    ) {
        let ctx: BTreeMap<FieldPath, Value> = values
            .into_iter()
            .map(|(k, v)| (FieldPath::parse(&k).unwrap(), Value::Int(v)))
            .collect();
        let cond = Condition::compile("0 != 0").unwrap();
        prop_assert_eq!(cond.evaluate(&MapFields(ctx)), Ok(false));
    }

    #[test]
    fn field_not_equal_zero_tracks_value(v in any::<u64>()) {
        let mut ctx = BTreeMap::new();
        ctx.insert(FieldPath::parse("CFPA.DCFG_CC_SOCU_NS_PIN").unwrap(), Value::Int(v));
        let cond = Condition::compile("CFPA.DCFG_CC_SOCU_NS_PIN != 0").unwrap();
        prop_assert_eq!(cond.evaluate(&MapFields(ctx)), Ok(v != 0));
    }
}

struct MapFields(BTreeMap<FieldPath, Value>);

impl FieldResolver for MapFields {
    fn resolve(&self, path: &FieldPath) -> Option<Value> {
        self.0.get(path).copied()
    }
}
