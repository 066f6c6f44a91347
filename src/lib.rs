//! Automata-based lexer and parser front end for the MiniTS scripting
//! language.
//!
//! The lexer drives a bank of competing character-matching automata
//! over the input and resolves token boundaries by declaration order;
//! the parser recognizes each grammar rule with a small state machine
//! built from reusable composition primitives (sequential delegation,
//! prioritized fallback, operator loops) instead of recursive descent.
//!
//! # Quick start
//!
//! ## Tokenize and parse a program
//!
//! ```
//! use minits::{parse, tokenize, Rule};
//!
//! let tokens = tokenize("print(1+2);").unwrap();
//! let tree = parse(&tokens).unwrap();
//! assert_eq!(tree.rule(), Some(Rule::File));
//! ```
//!
//! ## One step, with a unified error
//!
//! ```
//! use minits::parse_source;
//!
//! let tree = parse_source("let a: number = 3;\nprint(a);").unwrap();
//! assert_eq!(tree.children().len(), 2);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod automaton;
pub mod compose;
pub mod grammar;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod token;

pub use ast::{AstNode, Rule};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use parser::{ParseError, ParseErrorKind, parse};
pub use token::{Span, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Tokenize and parse a MiniTS source string in one step.
pub fn parse_source(input: &str) -> Result<AstNode, Error> {
    let tokens = tokenize(input)?;
    Ok(parse(&tokens)?)
}
