//! Rule condition language (no IO).
//!
//! A condition is the FAILURE predicate of a rule: it evaluates to `true` when the
//! configuration violates the rule. The grammar covers field paths, integer literals,
//! bitwise operators, comparisons, and the `and` / `or` / `not` connectives.

#![forbid(unsafe_code)]

pub mod ast;
mod errors;
mod eval;
mod lexer;
mod parser;

#[cfg(test)]
mod proptest;

pub use errors::{ConditionSyntaxError, EvalError};
pub use eval::{FieldResolver, Value, evaluate};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{MAX_DEPTH, Parser};

use ast::Expr;
use pfrcheck_types::{FieldPath, ids};
use std::collections::BTreeSet;

/// A compiled condition: the source text and its parsed tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    source: String,
    expr: Expr,
}

impl Condition {
    pub fn compile(source: &str) -> Result<Self, ConditionSyntaxError> {
        let expr = Parser::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn fields(&self) -> BTreeSet<&FieldPath> {
        self.expr.fields()
    }

    pub fn evaluate<R: FieldResolver + ?Sized>(&self, resolver: &R) -> Result<bool, EvalError> {
        evaluate(&self.expr, resolver)
    }
}

/// True when `source` is the "not yet enforced" placeholder (`0 != 0`), ignoring whitespace.
///
/// Only this exact spelling qualifies; other always-false conditions are evaluated normally.
pub fn is_disabled_marker(source: &str) -> bool {
    let compact: String = source.chars().filter(|c| !c.is_whitespace()).collect();
    let marker: String = ids::DISABLED_CONDITION
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    compact == marker
}
