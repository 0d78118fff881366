//! Condition error types

use pfrcheck_types::FieldPath;

/// A condition that does not conform to the grammar.
///
/// This is an authoring defect in the rule file; it is reported once per rule and never
/// recovered from.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("syntax error at line {line}, column {col} near '{token}': {message}")]
pub struct ConditionSyntaxError {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub col: usize,
    /// Raw text of the offending token (empty at end of input)
    pub token: String,
    pub message: String,
}

impl ConditionSyntaxError {
    pub fn new(line: usize, col: usize, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line,
            col,
            token: token.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while evaluating a compiled condition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("unknown field: {0}")]
    UnknownField(FieldPath),

    #[error("type error: {0}")]
    Type(String),
}

/// Result type alias for parsing
pub type SyntaxResult<T> = Result<T, ConditionSyntaxError>;
