use std::fmt;

use crate::ast::AstNode;
use crate::grammar;
use crate::token::{Span, Token};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No automaton state accepts this token.
    UnexpectedToken { lexeme: String },
    /// Tokens ran out before the file rule was complete.
    UnexpectedEndOfInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { lexeme } => {
                write!(f, "unexpected token '{lexeme}'")
            }
            Self::UnexpectedEndOfInput => {
                write!(f, "unexpected end of input")
            }
        }
    }
}

/// Error produced during parsing. Parsing is all-or-nothing: no partial
/// tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Parse a token sequence into a syntax tree rooted at the file rule.
///
/// Tokens are consumed left to right exactly once. An internal no-match
/// signal that reaches this level means no alternative continuation
/// accepted the token and is surfaced as a syntax error.
///
/// # Errors
///
/// Returns `ParseError` when a token cannot be consumed or when input
/// ends before the file rule is complete.
pub fn parse(tokens: &[Token]) -> Result<AstNode, ParseError> {
    let mut file = grammar::file();
    for token in tokens {
        file.consume(token).map_err(|_| ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                lexeme: token.lexeme.clone(),
            },
            span: token.span.clone(),
        })?;
    }
    if file.acceptable() {
        Ok(file.result())
    } else {
        Err(ParseError {
            kind: ParseErrorKind::UnexpectedEndOfInput,
            span: tokens
                .last()
                .map_or(Span { line: 1, column: 1 }, |last| last.span.clone()),
        })
    }
}
