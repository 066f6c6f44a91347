#![allow(dead_code)]

use minits::{AstNode, Rule, Token, parse, tokenize};

/// Tokenize and parse, panicking with context on failure.
pub fn parse_program(input: &str) -> AstNode {
    let tokens = tokenize(input).unwrap_or_else(|e| panic!("tokenize failed: {e}\n--- {input}"));
    parse(&tokens).unwrap_or_else(|e| panic!("parse failed: {e}\n--- {input}"))
}

/// Helper: lex, parse, and assert that the tree's pre-order terminal
/// lexemes reproduce the significant token sequence exactly.
pub fn assert_lexeme_roundtrip(input: &str) {
    let tokens = tokenize(input).unwrap_or_else(|e| panic!("tokenize failed: {e}\n--- {input}"));
    let tree = parse(&tokens).unwrap_or_else(|e| panic!("parse failed: {e}\n--- {input}"));
    let from_tree: Vec<&str> = tree.tokens().iter().map(|t| t.lexeme.as_str()).collect();
    let from_lexer: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(
        from_tree, from_lexer,
        "terminal round-trip mismatch for input:\n{input}"
    );
}

/// Render a parsed expression subtree back to its operand lexemes with
/// explicit grouping, for associativity assertions.
pub fn outline(node: &AstNode) -> String {
    match node {
        AstNode::Terminal(token) => token.lexeme.clone(),
        AstNode::NonTerminal { rule, children } => match rule {
            // parenthesized primary: recurse past the paren terminals
            Rule::PrimaryExpression if children.len() == 3 => outline(&children[1]),
            Rule::MultiplyExpression
            | Rule::DivideExpression
            | Rule::SumExpression
            | Rule::SubtractExpression => {
                let wrapper = children[0].children();
                format!(
                    "({}{}{})",
                    outline(&wrapper[0]),
                    outline(&wrapper[1]),
                    outline(&children[1])
                )
            }
            _ => children.iter().map(outline).collect(),
        },
    }
}

/// The expression subtree of a single-statement `print(...)` program.
pub fn print_argument(tree: &AstNode) -> &AstNode {
    let line = &tree.children()[0];
    let statement = &line.children()[0];
    let print = &statement.children()[0];
    assert_eq!(print.rule(), Some(Rule::PrintStatement));
    // children: print ( expr )
    &print.children()[2]
}

/// Significant lexemes straight from the lexer.
pub fn lexemes(input: &str) -> Vec<String> {
    tokenize(input)
        .expect("tokenize failed")
        .iter()
        .map(|t: &Token| t.lexeme.clone())
        .collect()
}
