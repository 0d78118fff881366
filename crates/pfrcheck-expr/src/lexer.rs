//! Lexer: tokenizes a rule condition
//!
//! Produces a stream of tokens that the parser consumes. Handles the
//! boolean keywords, field paths, integer literals (decimal, `0x` hex,
//! `0b` binary) and the operator set.

use crate::errors::{ConditionSyntaxError, SyntaxResult};

/// A token produced by the lexer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The raw text of the token
    pub text: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    And,
    Or,
    Not,
    True,
    False,

    // Operands
    Number(u64),
    Path,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,

    OpenParen,
    CloseParen,

    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "'and'"),
            Self::Or => write!(f, "'or'"),
            Self::Not => write!(f, "'not'"),
            Self::True => write!(f, "'true'"),
            Self::False => write!(f, "'false'"),
            Self::Number(_) => write!(f, "number"),
            Self::Path => write!(f, "field path"),
            Self::EqEq => write!(f, "'=='"),
            Self::NotEq => write!(f, "'!='"),
            Self::Lt => write!(f, "'<'"),
            Self::Le => write!(f, "'<='"),
            Self::Gt => write!(f, "'>'"),
            Self::Ge => write!(f, "'>='"),
            Self::Amp => write!(f, "'&'"),
            Self::Pipe => write!(f, "'|'"),
            Self::Caret => write!(f, "'^'"),
            Self::Tilde => write!(f, "'~'"),
            Self::Shl => write!(f, "'<<'"),
            Self::Shr => write!(f, "'>>'"),
            Self::OpenParen => write!(f, "'('"),
            Self::CloseParen => write!(f, "')'"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the entire input. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> SyntaxResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.pos >= self.input.len() {
                tokens.push(Token::new(TokenKind::Eof, "", self.line, self.col));
                break;
            }

            let token = self.next_token()?;
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> SyntaxResult<Token> {
        let ch = self.input[self.pos];
        let line = self.line;
        let col = self.col;

        let two = |kind: TokenKind, text: &str, lexer: &mut Lexer| -> SyntaxResult<Token> {
            lexer.advance();
            lexer.advance();
            Ok(Token::new(kind, text, line, col))
        };
        let one = |kind: TokenKind, lexer: &mut Lexer| -> SyntaxResult<Token> {
            lexer.advance();
            Ok(Token::new(kind, ch.to_string(), line, col))
        };

        match ch {
            '(' => one(TokenKind::OpenParen, self),
            ')' => one(TokenKind::CloseParen, self),
            '&' => one(TokenKind::Amp, self),
            '|' => one(TokenKind::Pipe, self),
            '^' => one(TokenKind::Caret, self),
            '~' => one(TokenKind::Tilde, self),
            '=' if self.peek_at(1) == Some('=') => two(TokenKind::EqEq, "==", self),
            '!' if self.peek_at(1) == Some('=') => two(TokenKind::NotEq, "!=", self),
            '<' if self.peek_at(1) == Some('=') => two(TokenKind::Le, "<=", self),
            '<' if self.peek_at(1) == Some('<') => two(TokenKind::Shl, "<<", self),
            '<' => one(TokenKind::Lt, self),
            '>' if self.peek_at(1) == Some('=') => two(TokenKind::Ge, ">=", self),
            '>' if self.peek_at(1) == Some('>') => two(TokenKind::Shr, ">>", self),
            '>' => one(TokenKind::Gt, self),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.read_path_or_keyword(),
            '=' => Err(ConditionSyntaxError::new(
                line,
                col,
                "=",
                "assignment is not supported; use '==' for comparison",
            )),
            _ => Err(ConditionSyntaxError::new(
                line,
                col,
                ch.to_string(),
                format!("unexpected character '{ch}'"),
            )),
        }
    }

    fn read_number(&mut self) -> SyntaxResult<Token> {
        let line = self.line;
        let col = self.col;

        let radix = match (self.input[self.pos], self.peek_at(1)) {
            ('0', Some('x' | 'X')) => 16,
            ('0', Some('b' | 'B')) => 2,
            _ => 10,
        };

        let mut text = String::new();
        if radix != 10 {
            text.push(self.input[self.pos]);
            text.push(self.input[self.pos + 1]);
            self.advance();
            self.advance();
        }

        let mut digits = String::new();
        while self.pos < self.input.len() {
            let c = self.input[self.pos];
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                if c != '_' {
                    digits.push(c);
                }
                self.advance();
            } else {
                break;
            }
        }

        if digits.is_empty() {
            return Err(ConditionSyntaxError::new(
                line,
                col,
                text,
                "integer literal has no digits",
            ));
        }

        match u64::from_str_radix(&digits, radix) {
            Ok(value) => Ok(Token::new(TokenKind::Number(value), text, line, col)),
            Err(e) => {
                let message = match e.kind() {
                    std::num::IntErrorKind::PosOverflow => {
                        "integer literal does not fit in 64 bits".to_string()
                    }
                    _ => format!("invalid base-{radix} integer literal"),
                };
                Err(ConditionSyntaxError::new(line, col, text, message))
            }
        }
    }

    fn read_path_or_keyword(&mut self) -> SyntaxResult<Token> {
        let line = self.line;
        let col = self.col;
        let mut text = self.read_identifier();
        let mut dotted = false;

        while self.peek_at(0) == Some('.') {
            dotted = true;
            text.push('.');
            self.advance();
            match self.peek_at(0) {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    text.push_str(&self.read_identifier());
                }
                _ => {
                    return Err(ConditionSyntaxError::new(
                        line,
                        col,
                        text,
                        "expected a field name after '.'",
                    ));
                }
            }
        }

        let kind = if dotted {
            TokenKind::Path
        } else {
            match text.as_str() {
                "and" => TokenKind::And,
                "or" => TokenKind::Or,
                "not" => TokenKind::Not,
                "true" => TokenKind::True,
                "false" => TokenKind::False,
                _ => TokenKind::Path,
            }
        };

        Ok(Token::new(kind, text, line, col))
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while self.pos < self.input.len()
            && (self.input[self.pos].is_ascii_alphanumeric() || self.input[self.pos] == '_')
        {
            text.push(self.input[self.pos]);
            self.advance();
        }
        text
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos].is_whitespace() {
            self.advance();
        }
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            if self.input[self.pos] == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_rule_condition_tokens() {
        let tokens = Lexer::new("(CFPA.A & 0x2FF) == 0").tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::OpenParen);
        assert_eq!(tokens[1].kind, TokenKind::Path);
        assert_eq!(tokens[1].text, "CFPA.A");
        assert_eq!(tokens[2].kind, TokenKind::Amp);
        assert_eq!(tokens[3].kind, TokenKind::Number(0x2FF));
        assert_eq!(tokens[3].text, "0x2FF");
        assert_eq!(tokens[4].kind, TokenKind::CloseParen);
        assert_eq!(tokens[5].kind, TokenKind::EqEq);
        assert_eq!(tokens[6].kind, TokenKind::Number(0));
        assert_eq!(tokens[7].kind, TokenKind::Eof);
    }

    #[test]
    fn test_keywords_and_dotted_keyword_lookalikes() {
        assert_eq!(
            kinds("not a and b or true false"),
            vec![
                TokenKind::Not,
                TokenKind::Path,
                TokenKind::And,
                TokenKind::Path,
                TokenKind::Or,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Eof,
            ]
        );
        // A dotted path whose last segment spells a keyword is still a path.
        assert_eq!(kinds("CMPA.not"), vec![TokenKind::Path, TokenKind::Eof]);
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("== != <= >= << >> < >"),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_radixes() {
        assert_eq!(
            kinds("10 0x1f 0B101 1_000"),
            vec![
                TokenKind::Number(10),
                TokenKind::Number(0x1f),
                TokenKind::Number(0b101),
                TokenKind::Number(1000),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_errors() {
        let err = Lexer::new("0x").tokenize().unwrap_err();
        assert_eq!(err.token, "0x");

        let err = Lexer::new("12ab").tokenize().unwrap_err();
        assert_eq!(err.token, "12ab");

        let err = Lexer::new("0x1_0000_0000_0000_0000").tokenize().unwrap_err();
        assert!(err.message.contains("64 bits"));
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = Lexer::new("CFPA.A\n  != 0").tokenize().unwrap();
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (2, 3));
        assert_eq!((tokens[2].line, tokens[2].col), (2, 6));
    }

    #[test]
    fn test_unexpected_characters() {
        let err = Lexer::new("CFPA.A = 1").tokenize().unwrap_err();
        assert_eq!((err.col, err.token.as_str()), (8, "="));

        let err = Lexer::new("a ! b").tokenize().unwrap_err();
        assert_eq!((err.col, err.token.as_str()), (3, "!"));

        let err = Lexer::new("CFPA. A").tokenize().unwrap_err();
        assert_eq!(err.token, "CFPA.");
    }

    #[test]
    fn test_empty_input() {
        let tokens = Lexer::new("   ").tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }
}
