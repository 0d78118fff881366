//! Parser: recursive descent parser for rule conditions
//!
//! Precedence, lowest to highest:
//! `or` < `and` < `not` < comparison < `|` < `^` < `&` < shifts < `~` < primary.
//! Comparisons do not chain.

use crate::ast::{BitOp, CompareOp, Expr};
use crate::errors::{ConditionSyntaxError, SyntaxResult};
use crate::lexer::{Lexer, Token, TokenKind};
use pfrcheck_types::FieldPath;

/// Nesting budget for one condition.
///
/// Every `(`, `not`, `~` and every operator in a left-associative chain spends one level, so
/// the tree handed to the evaluator is never deeper than about twice this value.
pub const MAX_DEPTH: usize = 64;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Parse condition text into an expression tree.
    pub fn parse(input: &str) -> SyntaxResult<Expr> {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize()?;
        let mut parser = Self {
            tokens,
            pos: 0,
            depth: 0,
        };

        if parser.check(&TokenKind::Eof) {
            return Err(parser.error("condition is empty"));
        }

        let expr = parser.parse_or()?;
        if !parser.check(&TokenKind::Eof) {
            return Err(parser.error("expected an operator or end of condition"));
        }
        Ok(expr)
    }

    fn parse_or(&mut self) -> SyntaxResult<Expr> {
        let base = self.depth;
        let mut lhs = self.parse_and()?;
        while self.check(&TokenKind::Or) {
            self.descend()?;
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_and(&mut self) -> SyntaxResult<Expr> {
        let base = self.depth;
        let mut lhs = self.parse_not()?;
        while self.check(&TokenKind::And) {
            self.descend()?;
            self.advance();
            let rhs = self.parse_not()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_not(&mut self) -> SyntaxResult<Expr> {
        if self.check(&TokenKind::Not) {
            self.descend()?;
            self.advance();
            let inner = self.parse_not()?;
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> SyntaxResult<Expr> {
        let lhs = self.parse_bit_or()?;
        let Some(op) = self.compare_op() else {
            return Ok(lhs);
        };
        self.advance();
        let rhs = self.parse_bit_or()?;

        if self.compare_op().is_some() {
            return Err(self.error("comparisons cannot be chained; use 'and'"));
        }

        Ok(Expr::Compare {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    fn parse_bit_or(&mut self) -> SyntaxResult<Expr> {
        let base = self.depth;
        let mut lhs = self.parse_bit_xor()?;
        while self.check(&TokenKind::Pipe) {
            self.descend()?;
            self.advance();
            let rhs = self.parse_bit_xor()?;
            lhs = bitwise(BitOp::Or, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_bit_xor(&mut self) -> SyntaxResult<Expr> {
        let base = self.depth;
        let mut lhs = self.parse_bit_and()?;
        while self.check(&TokenKind::Caret) {
            self.descend()?;
            self.advance();
            let rhs = self.parse_bit_and()?;
            lhs = bitwise(BitOp::Xor, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_bit_and(&mut self) -> SyntaxResult<Expr> {
        let base = self.depth;
        let mut lhs = self.parse_shift()?;
        while self.check(&TokenKind::Amp) {
            self.descend()?;
            self.advance();
            let rhs = self.parse_shift()?;
            lhs = bitwise(BitOp::And, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_shift(&mut self) -> SyntaxResult<Expr> {
        let base = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Shl => BitOp::Shl,
                TokenKind::Shr => BitOp::Shr,
                _ => break,
            };
            self.descend()?;
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = bitwise(op, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> SyntaxResult<Expr> {
        if self.check(&TokenKind::Tilde) {
            self.descend()?;
            self.advance();
            let inner = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Complement(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> SyntaxResult<Expr> {
        match self.peek_kind().clone() {
            TokenKind::Number(v) => {
                self.advance();
                Ok(Expr::Int(v))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Bool(false))
            }
            TokenKind::Path => {
                let path = FieldPath::parse(&self.peek().text)
                    .map_err(|e| self.error(e.to_string()))?;
                self.advance();
                Ok(Expr::Field(path))
            }
            TokenKind::OpenParen => {
                self.descend()?;
                self.advance();
                let inner = self.parse_or()?;
                self.expect(&TokenKind::CloseParen)?;
                self.depth -= 1;
                Ok(inner)
            }
            TokenKind::Eof => Err(self.error("unexpected end of condition; expected an operand")),
            other => Err(self.error(format!("expected an operand, found {other}"))),
        }
    }

    /// Spend one nesting level; fails at the current token once the budget is gone.
    fn descend(&mut self) -> SyntaxResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(format!(
                "condition is nested too deeply (limit {MAX_DEPTH} levels)"
            )));
        }
        self.depth += 1;
        Ok(())
    }

    // ---- token helpers ----

    fn compare_op(&self) -> Option<CompareOp> {
        match self.peek_kind() {
            TokenKind::EqEq => Some(CompareOp::Eq),
            TokenKind::NotEq => Some(CompareOp::Ne),
            TokenKind::Lt => Some(CompareOp::Lt),
            TokenKind::Le => Some(CompareOp::Le),
            TokenKind::Gt => Some(CompareOp::Gt),
            TokenKind::Ge => Some(CompareOp::Ge),
            _ => None,
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> SyntaxResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            let found = self.peek_kind().clone();
            Err(self.error(format!("expected {kind}, found {found}")))
        }
    }

    fn error(&self, message: impl Into<String>) -> ConditionSyntaxError {
        let tok = self.peek();
        ConditionSyntaxError::new(tok.line, tok.col, tok.text.clone(), message)
    }
}

fn bitwise(op: BitOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Bitwise {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
