use std::fmt;

use crate::token::Token;

/// Grammar productions, one tag per rule the parser automata recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    NumberLiteral,
    StringLiteral,
    Identifier,
    NumberType,
    StringType,
    PrimaryExpression,
    MultiplicativeExpression,
    MultiplyExpression,
    DivideExpression,
    AdditiveExpression,
    SumExpression,
    SubtractExpression,
    TypeAnnotation,
    Initializer,
    VariableDeclaration,
    CoverInitializedName,
    PrintStatement,
    Statement,
    Line,
    File,
}

/// A node of the syntax tree.
///
/// Terminals wrap exactly one token; nonterminals carry a [`Rule`] tag
/// and their children in source order. Every consumed token is retained
/// as a terminal, so the pre-order terminal sequence of a parse result
/// reproduces the significant token sequence of the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Terminal(Token),
    NonTerminal { rule: Rule, children: Vec<AstNode> },
}

impl AstNode {
    #[must_use]
    pub const fn terminal(token: Token) -> Self {
        Self::Terminal(token)
    }

    #[must_use]
    pub const fn branch(rule: Rule, children: Vec<Self>) -> Self {
        Self::NonTerminal { rule, children }
    }

    /// The rule tag, or `None` for a terminal.
    #[must_use]
    pub const fn rule(&self) -> Option<Rule> {
        match self {
            Self::Terminal(_) => None,
            Self::NonTerminal { rule, .. } => Some(*rule),
        }
    }

    /// Child nodes in source order; empty for a terminal.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Terminal(_) => &[],
            Self::NonTerminal { children, .. } => children,
        }
    }

    /// All terminal tokens of the subtree in pre-order, which is source
    /// order.
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Self::Terminal(token) => out.push(token),
            Self::NonTerminal { children, .. } => {
                for child in children {
                    child.collect_tokens(out);
                }
            }
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        match self {
            Self::Terminal(token) => writeln!(f, "{token}"),
            Self::NonTerminal { rule, children } => {
                writeln!(f, "{rule:?}")?;
                for child in children {
                    child.write_tree(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Indented tree rendering, one node per line.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
