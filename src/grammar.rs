//! Concrete grammar automata, one constructor per production.
//!
//! Each constructor assembles its rule from the composition primitives.
//! Mutually recursive rules (a parenthesized primary containing an
//! additive expression) stay finite because every continuation is built
//! through a state factory and only materialized when its first token
//! arrives.

use std::rc::Rc;

use crate::ast::Rule;
use crate::automaton::{Automaton, StateFactory};
use crate::compose::{Expect, InnerState, OperatorLoop, accepted, choice, optional};
use crate::token::TokenKind;

const MULTIPLICATIVE_OPS: &[(TokenKind, Rule)] = &[
    (TokenKind::Star, Rule::MultiplyExpression),
    (TokenKind::Slash, Rule::DivideExpression),
];

const ADDITIVE_OPS: &[(TokenKind, Rule)] = &[
    (TokenKind::Plus, Rule::SumExpression),
    (TokenKind::Minus, Rule::SubtractExpression),
];

/// number literal | string literal | identifier | `(` additive `)`.
#[must_use]
pub fn primary_expression() -> Automaton {
    Automaton::new(
        Rule::PrimaryExpression,
        Rc::new(|| {
            choice(vec![
                Rc::new(Expect::tagged(
                    TokenKind::NumberLiteral,
                    Rule::NumberLiteral,
                    accepted(),
                )),
                Rc::new(Expect::tagged(
                    TokenKind::StringLiteral,
                    Rule::StringLiteral,
                    accepted(),
                )),
                Rc::new(Expect::tagged(
                    TokenKind::Identifier,
                    Rule::Identifier,
                    accepted(),
                )),
                Rc::new(Expect::new(
                    TokenKind::LeftParen,
                    Rc::new(|| {
                        Rc::new(InnerState::new(
                            additive_expression(),
                            Rc::new(|| Rc::new(Expect::new(TokenKind::RightParen, accepted()))),
                        ))
                    }),
                )),
            ])
        }),
    )
}

/// Primary expressions chained by `*` and `/`, left-associative.
#[must_use]
pub fn multiplicative_expression() -> Automaton {
    Automaton::new(
        Rule::MultiplicativeExpression,
        Rc::new(|| {
            Rc::new(InnerState::new(
                primary_expression(),
                Rc::new(|| {
                    Rc::new(OperatorLoop::new(
                        Rule::MultiplicativeExpression,
                        MULTIPLICATIVE_OPS,
                        primary_expression,
                    ))
                }),
            ))
        }),
    )
}

/// Multiplicative expressions chained by `+` and `-`, left-associative.
#[must_use]
pub fn additive_expression() -> Automaton {
    Automaton::new(
        Rule::AdditiveExpression,
        Rc::new(|| {
            Rc::new(InnerState::new(
                multiplicative_expression(),
                Rc::new(|| {
                    Rc::new(OperatorLoop::new(
                        Rule::AdditiveExpression,
                        ADDITIVE_OPS,
                        multiplicative_expression,
                    ))
                }),
            ))
        }),
    )
}

/// `:` followed by a type name.
#[must_use]
pub fn type_annotation() -> Automaton {
    Automaton::new(
        Rule::TypeAnnotation,
        Rc::new(|| {
            Rc::new(Expect::new(
                TokenKind::Colon,
                Rc::new(|| {
                    choice(vec![
                        Rc::new(Expect::tagged(
                            TokenKind::NumberType,
                            Rule::NumberType,
                            accepted(),
                        )),
                        Rc::new(Expect::tagged(
                            TokenKind::StringType,
                            Rule::StringType,
                            accepted(),
                        )),
                    ])
                }),
            ))
        }),
    )
}

/// `=` followed by an additive expression.
#[must_use]
pub fn initializer() -> Automaton {
    Automaton::new(
        Rule::Initializer,
        Rc::new(|| {
            Rc::new(Expect::new(
                TokenKind::Equals,
                Rc::new(|| Rc::new(InnerState::new(additive_expression(), accepted()))),
            ))
        }),
    )
}

/// `let` identifier type-annotation, with an optional initializer.
#[must_use]
pub fn variable_declaration() -> Automaton {
    Automaton::new(
        Rule::VariableDeclaration,
        Rc::new(|| {
            Rc::new(Expect::new(
                TokenKind::Let,
                Rc::new(|| {
                    Rc::new(Expect::tagged(
                        TokenKind::Identifier,
                        Rule::Identifier,
                        Rc::new(|| {
                            Rc::new(InnerState::new(
                                type_annotation(),
                                Rc::new(|| {
                                    optional(Rc::new(InnerState::new(initializer(), accepted())))
                                }),
                            ))
                        }),
                    ))
                }),
            ))
        }),
    )
}

/// identifier followed by an initializer; covers `a = 3`.
#[must_use]
pub fn cover_initialized_name() -> Automaton {
    Automaton::new(
        Rule::CoverInitializedName,
        Rc::new(|| {
            Rc::new(Expect::tagged(
                TokenKind::Identifier,
                Rule::Identifier,
                Rc::new(|| Rc::new(InnerState::new(initializer(), accepted()))),
            ))
        }),
    )
}

/// `print` `(` additive `)`.
#[must_use]
pub fn print_statement() -> Automaton {
    Automaton::new(
        Rule::PrintStatement,
        Rc::new(|| {
            Rc::new(Expect::new(
                TokenKind::Print,
                Rc::new(|| {
                    Rc::new(Expect::new(
                        TokenKind::LeftParen,
                        Rc::new(|| {
                            Rc::new(InnerState::new(
                                additive_expression(),
                                Rc::new(|| {
                                    Rc::new(Expect::new(TokenKind::RightParen, accepted()))
                                }),
                            ))
                        }),
                    ))
                }),
            ))
        }),
    )
}

/// print statement | variable declaration | cover-initialized name.
#[must_use]
pub fn statement() -> Automaton {
    Automaton::new(
        Rule::Statement,
        Rc::new(|| {
            choice(vec![
                Rc::new(InnerState::new(print_statement(), accepted())),
                Rc::new(InnerState::new(variable_declaration(), accepted())),
                Rc::new(InnerState::new(cover_initialized_name(), accepted())),
            ])
        }),
    )
}

/// One statement terminated by `;`.
#[must_use]
pub fn line() -> Automaton {
    Automaton::new(
        Rule::Line,
        Rc::new(|| {
            Rc::new(InnerState::new(
                statement(),
                Rc::new(|| Rc::new(Expect::new(TokenKind::Semicolon, accepted()))),
            ))
        }),
    )
}

/// The root rule: one line, then zero or more further lines; acceptable
/// after every completed line.
#[must_use]
pub fn file() -> Automaton {
    Automaton::new(
        Rule::File,
        Rc::new(|| Rc::new(InnerState::new(line(), more_lines()))),
    )
}

fn more_lines() -> StateFactory {
    Rc::new(|| optional(Rc::new(InnerState::new(line(), more_lines()))))
}
