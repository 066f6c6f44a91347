use std::fmt;

use crate::matcher::{Matcher, Shape};
use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot begin any token.
    UnrecognizedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedCharacter(ch) => {
                write!(f, "unrecognized character: {ch}")
            }
        }
    }
}

/// Error produced during lexing. Fatal to the whole call: no partial
/// token sequence is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// The matcher bank in declaration order.
///
/// Declaration order is the disambiguation order: when several matchers
/// are still live at a token boundary, the earliest declared wins. Fixed
/// lexemes come before the general classes so `let` resolves to the
/// keyword rather than an identifier.
fn matcher_bank() -> Vec<Matcher> {
    vec![
        Matcher::new(TokenKind::Let, Shape::Exact("let")),
        Matcher::new(TokenKind::Print, Shape::Exact("print")),
        Matcher::new(TokenKind::NumberType, Shape::Exact("number")),
        Matcher::new(TokenKind::StringType, Shape::Exact("string")),
        Matcher::new(TokenKind::LeftParen, Shape::Exact("(")),
        Matcher::new(TokenKind::RightParen, Shape::Exact(")")),
        Matcher::new(TokenKind::Colon, Shape::Exact(":")),
        Matcher::new(TokenKind::Semicolon, Shape::Exact(";")),
        Matcher::new(TokenKind::Equals, Shape::Exact("=")),
        Matcher::new(TokenKind::Plus, Shape::Exact("+")),
        Matcher::new(TokenKind::Minus, Shape::Exact("-")),
        Matcher::new(TokenKind::Star, Shape::Exact("*")),
        Matcher::new(TokenKind::Slash, Shape::Exact("/")),
        Matcher::new(TokenKind::NumberLiteral, Shape::Digits),
        Matcher::new(TokenKind::Identifier, Shape::Word),
        Matcher::new(TokenKind::StringLiteral, Shape::Quoted),
        Matcher::new(TokenKind::Space, Shape::Spaces),
        Matcher::new(TokenKind::Newline, Shape::LineBreak),
    ]
}

/// Tokenize a MiniTS source string into a sequence of significant
/// tokens. Whitespace and newlines are consumed for position tracking
/// and never surfaced.
///
/// # Errors
///
/// Returns `LexError` when a character cannot begin any token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new().run(input)
}

struct Lexer {
    matchers: Vec<Matcher>,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new() -> Self {
        Self {
            matchers: matcher_bank(),
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self, input: &str) -> Result<Vec<Token>, LexError> {
        for c in input.chars() {
            // A boundary character finalizes the pending token and is
            // then retried against the freshly reset bank: it belongs
            // to the next token.
            loop {
                let active = self.matching_indices();
                let fresh = active.is_empty();
                let pool: Vec<usize> = if fresh {
                    (0..self.matchers.len()).collect()
                } else {
                    active.clone()
                };

                let advanced = pool
                    .into_iter()
                    .filter(|&i| self.matchers[i].offer(c))
                    .count();
                if advanced > 0 {
                    break;
                }
                if fresh {
                    return Err(LexError {
                        kind: LexErrorKind::UnrecognizedCharacter(c),
                        span: Span {
                            line: self.line,
                            column: self.column,
                        },
                    });
                }
                self.emit(active[0]);
            }
        }

        // End-of-input flush.
        if let Some(&winner) = self.matching_indices().first() {
            self.emit(winner);
        }
        Ok(self.tokens)
    }

    fn matching_indices(&self) -> Vec<usize> {
        (0..self.matchers.len())
            .filter(|&i| self.matchers[i].is_matching())
            .collect()
    }

    /// Build the winning matcher's token at the saved start position,
    /// reset the whole bank, and fold the token into the position and
    /// output state.
    fn emit(&mut self, winner: usize) {
        let token = self.matchers[winner].build(self.line, self.column);
        for m in &mut self.matchers {
            m.reset();
        }
        let width = token.lexeme.chars().count();
        match token.kind {
            TokenKind::Space => self.column += width,
            TokenKind::Newline => {
                self.line += 1;
                self.column = 1;
            }
            _ => {
                self.column += width;
                self.tokens.push(token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, lexeme: &str, line: usize, column: usize) -> Token {
        Token::new(kind, lexeme, line, column)
    }

    #[test]
    fn lexes_number_print_statement() {
        let actual = tokenize("print(3);").expect("tokenize");
        let expected = vec![
            tok(TokenKind::Print, "print", 1, 1),
            tok(TokenKind::LeftParen, "(", 1, 6),
            tok(TokenKind::NumberLiteral, "3", 1, 7),
            tok(TokenKind::RightParen, ")", 1, 8),
            tok(TokenKind::Semicolon, ";", 1, 9),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn lexes_string_print_statement() {
        let actual = tokenize("print(\"hello, world!\");").expect("tokenize");
        let expected = vec![
            tok(TokenKind::Print, "print", 1, 1),
            tok(TokenKind::LeftParen, "(", 1, 6),
            tok(TokenKind::StringLiteral, "\"hello, world!\"", 1, 7),
            tok(TokenKind::RightParen, ")", 1, 22),
            tok(TokenKind::Semicolon, ";", 1, 23),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn lexes_declaration_assignment_and_print() {
        let input = "let a: number;\na = 3;\nprint(a);";
        let actual = tokenize(input).expect("tokenize");
        let expected = vec![
            tok(TokenKind::Let, "let", 1, 1),
            tok(TokenKind::Identifier, "a", 1, 5),
            tok(TokenKind::Colon, ":", 1, 6),
            tok(TokenKind::NumberType, "number", 1, 8),
            tok(TokenKind::Semicolon, ";", 1, 14),
            tok(TokenKind::Identifier, "a", 2, 1),
            tok(TokenKind::Equals, "=", 2, 3),
            tok(TokenKind::NumberLiteral, "3", 2, 5),
            tok(TokenKind::Semicolon, ";", 2, 6),
            tok(TokenKind::Print, "print", 3, 1),
            tok(TokenKind::LeftParen, "(", 3, 6),
            tok(TokenKind::Identifier, "a", 3, 7),
            tok(TokenKind::RightParen, ")", 3, 8),
            tok(TokenKind::Semicolon, ";", 3, 9),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn lexes_sum_print() {
        let actual = tokenize("print(1+2);").expect("tokenize");
        let expected = vec![
            tok(TokenKind::Print, "print", 1, 1),
            tok(TokenKind::LeftParen, "(", 1, 6),
            tok(TokenKind::NumberLiteral, "1", 1, 7),
            tok(TokenKind::Plus, "+", 1, 8),
            tok(TokenKind::NumberLiteral, "2", 1, 9),
            tok(TokenKind::RightParen, ")", 1, 10),
            tok(TokenKind::Semicolon, ";", 1, 11),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn keyword_wins_by_declaration_order() {
        let tokens = tokenize("let").expect("tokenize");
        assert_eq!(tokens, vec![tok(TokenKind::Let, "let", 1, 1)]);
    }

    #[test]
    fn keyword_matcher_drops_out_when_word_continues() {
        let tokens = tokenize("lets letter").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::Identifier, "lets", 1, 1),
                tok(TokenKind::Identifier, "letter", 1, 6),
            ]
        );
    }

    #[test]
    fn unrecognized_character_fails_at_position() {
        let err = tokenize("@").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter('@'));
        assert_eq!(err.span, Span { line: 1, column: 1 });
    }

    #[test]
    fn unrecognized_character_after_token() {
        let err = tokenize("a@").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter('@'));
        assert_eq!(err.span, Span { line: 1, column: 2 });
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").expect("tokenize").is_empty());
    }
}
