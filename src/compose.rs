//! Composition primitives for parser automata.
//!
//! Every grammar rule's automaton is assembled from the same few state
//! shapes: single-token guards ([`Expect`]), sequential delegation to a
//! sub-automaton ([`InnerState`]), prioritized alternation ([`Dual`]),
//! and the operator-dispatch loop that realizes left-associative
//! precedence climbing without left recursion ([`OperatorLoop`]).

use std::rc::Rc;

use crate::ast::{AstNode, Rule};
use crate::automaton::{
    Automaton, Change, NoTransition, ParseStack, State, StateFactory, StateRef,
};
use crate::token::{Token, TokenKind};

/// Callback run against the stack after a delegated sub-automaton
/// completes; pops operands and pushes a combined node.
pub type Finisher = Rc<dyn Fn(&mut ParseStack)>;

/// Terminal state: the rule's syntax is complete and nothing more is
/// consumed.
pub struct Accepted;

impl State for Accepted {
    fn accepts(&self, _token: &Token) -> bool {
        false
    }

    fn transition(&self, token: &Token, _stack: &ParseStack) -> Result<Change, NoTransition> {
        Err(NoTransition(token.clone()))
    }

    fn is_acceptable(&self) -> bool {
        true
    }
}

/// Factory for the accepted state.
#[must_use]
pub fn accepted() -> StateFactory {
    Rc::new(|| Rc::new(Accepted))
}

/// Single-token guard: consumes exactly one token of the expected kind,
/// retains it on the stack as a terminal (optionally wrapped in a rule
/// tag), and moves to the supplied next state.
pub struct Expect {
    want: TokenKind,
    wrap: Option<Rule>,
    next: StateFactory,
}

impl Expect {
    #[must_use]
    pub fn new(want: TokenKind, next: StateFactory) -> Self {
        Self {
            want,
            wrap: None,
            next,
        }
    }

    /// Like [`new`](Self::new), but the terminal is wrapped in a
    /// single-child nonterminal tagged `wrap`.
    #[must_use]
    pub fn tagged(want: TokenKind, wrap: Rule, next: StateFactory) -> Self {
        Self {
            want,
            wrap: Some(wrap),
            next,
        }
    }
}

impl State for Expect {
    fn accepts(&self, token: &Token) -> bool {
        token.kind == self.want
    }

    fn transition(&self, token: &Token, stack: &ParseStack) -> Result<Change, NoTransition> {
        if token.kind != self.want {
            return Err(NoTransition(token.clone()));
        }
        let terminal = AstNode::terminal(token.clone());
        let node = match self.wrap {
            Some(rule) => AstNode::branch(rule, vec![terminal]),
            None => terminal,
        };
        let mut stack = stack.clone();
        stack.push(node);
        Ok(Change {
            state: (self.next)(),
            stack,
        })
    }
}

/// Alternative/fallback composition: try `first`, and on no-match try
/// `second` with the same token and stack. The sole backtracking
/// mechanism: no input is re-scanned, a single token is offered to the
/// candidate continuations in priority order.
pub struct Dual {
    first: StateRef,
    second: StateRef,
}

impl Dual {
    #[must_use]
    pub const fn new(first: StateRef, second: StateRef) -> Self {
        Self { first, second }
    }
}

impl State for Dual {
    fn accepts(&self, token: &Token) -> bool {
        self.first.accepts(token) || self.second.accepts(token)
    }

    fn transition(&self, token: &Token, stack: &ParseStack) -> Result<Change, NoTransition> {
        self.first
            .transition(token, stack)
            .or_else(|_| self.second.transition(token, stack))
    }

    fn is_acceptable(&self) -> bool {
        self.first.is_acceptable() || self.second.is_acceptable()
    }
}

/// Fold a priority-ordered list of alternatives into nested [`Dual`]s.
/// An empty list degenerates to the accepted state.
#[must_use]
pub fn choice(mut states: Vec<StateRef>) -> StateRef {
    let Some(mut folded) = states.pop() else {
        return Rc::new(Accepted);
    };
    while let Some(state) = states.pop() {
        folded = Rc::new(Dual::new(state, folded));
    }
    folded
}

/// A state that may be skipped: try it, or fall through as already
/// complete.
#[must_use]
pub fn optional(state: StateRef) -> StateRef {
    Rc::new(Dual::new(state, Rc::new(Accepted)))
}

/// Sequential delegation: run a sub-automaton to completion, then fall
/// through to the supplied next state.
///
/// Each completion pushes the sub-result onto the stack, runs the
/// optional finisher, and yields a [`Dual`] of "retry this composite"
/// and the next state, in that order. The retry arm keeps the stack as
/// it was *before* the completion: a sub-automaton that extends itself
/// on a later token (the multiplicative expression in `1+2*3`
/// continuing past `2`) re-completes against the uncombined operands,
/// and the speculative combined stack from the earlier completion is
/// simply dropped.
pub struct InnerState {
    inner: Automaton,
    next: StateFactory,
    on_finish: Option<Finisher>,
    base: Option<ParseStack>,
}

impl InnerState {
    #[must_use]
    pub fn new(inner: Automaton, next: StateFactory) -> Self {
        Self {
            inner,
            next,
            on_finish: None,
            base: None,
        }
    }

    #[must_use]
    pub fn with_finish(inner: Automaton, next: StateFactory, on_finish: Finisher) -> Self {
        Self {
            inner,
            next,
            on_finish: Some(on_finish),
            base: None,
        }
    }
}

impl State for InnerState {
    fn accepts(&self, token: &Token) -> bool {
        self.inner.accepts(token)
    }

    fn transition(&self, token: &Token, stack: &ParseStack) -> Result<Change, NoTransition> {
        let base = self.base.clone().unwrap_or_else(|| stack.clone());
        let mut inner = self.inner.clone();
        inner.consume(token)?;

        if inner.acceptable() {
            let mut combined = base.clone();
            combined.push(inner.result());
            if let Some(finish) = &self.on_finish {
                finish(&mut combined);
            }
            let retry = Self {
                inner,
                next: Rc::clone(&self.next),
                on_finish: self.on_finish.clone(),
                base: Some(base),
            };
            Ok(Change {
                state: Rc::new(Dual::new(Rc::new(retry), (self.next)())),
                stack: combined,
            })
        } else {
            let advanced = Self {
                inner,
                next: Rc::clone(&self.next),
                on_finish: self.on_finish.clone(),
                base: Some(base.clone()),
            };
            Ok(Change {
                state: Rc::new(advanced),
                stack: base,
            })
        }
    }
}

/// Operator-dispatch state for one binary precedence level.
///
/// Acceptable as-is: the level may end after any complete operand. On
/// an operator token of this level it pops the left operand, pushes the
/// level wrapper holding the operand and the operator terminal,
/// delegates to a fresh next-higher-precedence automaton for the right
/// operand, and on its completion combines both into the binary node
/// and loops back to this state. Looping back is what chains `a*b*c`
/// left to right.
#[derive(Clone)]
pub struct OperatorLoop {
    level: Rule,
    arms: &'static [(TokenKind, Rule)],
    operand: fn() -> Automaton,
}

impl OperatorLoop {
    #[must_use]
    pub const fn new(
        level: Rule,
        arms: &'static [(TokenKind, Rule)],
        operand: fn() -> Automaton,
    ) -> Self {
        Self {
            level,
            arms,
            operand,
        }
    }
}

impl State for OperatorLoop {
    fn accepts(&self, token: &Token) -> bool {
        self.arms.iter().any(|&(kind, _)| token.kind == kind)
    }

    fn transition(&self, token: &Token, stack: &ParseStack) -> Result<Change, NoTransition> {
        let Some(&(_, binary)) = self.arms.iter().find(|&&(kind, _)| token.kind == kind) else {
            return Err(NoTransition(token.clone()));
        };
        let mut stack = stack.clone();
        let Some(left) = stack.pop() else {
            return Err(NoTransition(token.clone()));
        };
        stack.push(AstNode::branch(
            self.level,
            vec![left, AstNode::terminal(token.clone())],
        ));

        let looped = self.clone();
        let next: StateFactory = Rc::new(move || Rc::new(looped.clone()) as StateRef);
        let finish: Finisher = Rc::new(move |stack: &mut ParseStack| {
            if let (Some(right), Some(left)) = (stack.pop(), stack.pop()) {
                stack.push(AstNode::branch(binary, vec![left, right]));
            }
        });
        Ok(Change {
            state: Rc::new(InnerState::with_finish((self.operand)(), next, finish)),
            stack,
        })
    }

    fn is_acceptable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 1, 1)
    }

    fn number_automaton() -> Automaton {
        Automaton::new(
            Rule::PrimaryExpression,
            Rc::new(|| {
                Rc::new(Expect::tagged(
                    TokenKind::NumberLiteral,
                    Rule::NumberLiteral,
                    accepted(),
                ))
            }),
        )
    }

    #[test]
    fn expect_consumes_only_its_kind() {
        let state = Expect::new(TokenKind::Semicolon, accepted());
        assert!(state.accepts(&token(TokenKind::Semicolon, ";")));
        assert!(!state.accepts(&token(TokenKind::Plus, "+")));
        assert!(
            state
                .transition(&token(TokenKind::Plus, "+"), &ParseStack::new())
                .is_err()
        );
    }

    #[test]
    fn dual_falls_back_to_second() {
        let dual = Dual::new(
            Rc::new(Expect::new(TokenKind::Plus, accepted())),
            Rc::new(Expect::new(TokenKind::Minus, accepted())),
        );
        let change = dual
            .transition(&token(TokenKind::Minus, "-"), &ParseStack::new())
            .expect("second alternative should match");
        assert_eq!(change.stack.len(), 1);
    }

    #[test]
    fn dual_propagates_when_both_fail() {
        let dual = Dual::new(
            Rc::new(Expect::new(TokenKind::Plus, accepted())),
            Rc::new(Expect::new(TokenKind::Minus, accepted())),
        );
        assert!(
            dual.transition(&token(TokenKind::Star, "*"), &ParseStack::new())
                .is_err()
        );
    }

    #[test]
    fn inner_state_pushes_sub_result_on_completion() {
        let state = InnerState::new(number_automaton(), accepted());
        let change = state
            .transition(&token(TokenKind::NumberLiteral, "3"), &ParseStack::new())
            .expect("number should be consumed");
        assert_eq!(change.stack.len(), 1);
        assert_eq!(change.stack[0].rule(), Some(Rule::PrimaryExpression));
        assert!(change.state.is_acceptable());
    }

    #[test]
    fn inner_state_rejects_what_the_sub_automaton_rejects() {
        let state = InnerState::new(number_automaton(), accepted());
        assert!(!state.accepts(&token(TokenKind::Semicolon, ";")));
        assert!(
            state
                .transition(&token(TokenKind::Semicolon, ";"), &ParseStack::new())
                .is_err()
        );
    }

    #[test]
    fn optional_state_is_acceptable_up_front() {
        let state = optional(Rc::new(Expect::new(TokenKind::Equals, accepted())));
        assert!(state.is_acceptable());
        assert!(state.accepts(&token(TokenKind::Equals, "=")));
    }
}
