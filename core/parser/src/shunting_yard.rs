//! FILENAME: core/parser/src/shunting_yard.rs
//! PURPOSE: Converts the atom stream of one (sub-)expression to postfix order.
//! CONTEXT: The driver pushes atoms here in source order. Operands go to the
//! output queue, operators and functions wait on the operator stack until
//! something of weaker binding arrives. A ParseContext is one nesting level;
//! the driver saves the enclosing context before parsing a list element and
//! restores it afterwards.
//!
//! RULES:
//! - Operand           --> output queue
//! - Function          --> operator stack
//! - Comma             --> pop to output until a left parenthesis is on top
//! - Operator          --> pop operators/functions that fire first, then push
//! - Left parenthesis  --> operator stack, depth + 1
//! - Right parenthesis --> pop to output until the left parenthesis, drop it, depth - 1

use crate::ast::{Arena, NodeId};
use crate::registry::{Associativity, OperatorDescriptor};
use crate::token::{Atom, AtomKind};
use crate::tree_builder::build_tree;

#[derive(Debug, Default)]
pub struct ParseContext {
    output: Vec<Atom>,
    operators: Vec<Atom>,
    depth: usize,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current parenthesis nesting depth inside this context.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn output(&self) -> &[Atom] {
        &self.output
    }

    pub fn push(&mut self, atom: Atom) {
        match &atom.kind {
            AtomKind::Number(_) | AtomKind::Variable { .. } | AtomKind::List(_) => {
                self.output.push(atom);
            }
            AtomKind::Function(_) => self.operators.push(atom),
            AtomKind::Comma => self.pop_until_left_paren(),
            AtomKind::Operator(incoming) => {
                let incoming = *incoming;
                while let Some(top) = self.operators.last() {
                    if !fires_first(top, incoming) {
                        break;
                    }
                    if let Some(top) = self.operators.pop() {
                        self.output.push(top);
                    }
                }
                self.operators.push(atom);
            }
            AtomKind::LeftParen => {
                self.operators.push(atom);
                self.depth += 1;
            }
            AtomKind::RightParen => {
                self.pop_until_left_paren();
                // Remove the left parenthesis
                self.operators.pop();
                self.depth = self.depth.saturating_sub(1);
            }
        }
    }

    fn pop_until_left_paren(&mut self) {
        while let Some(top) = self.operators.last() {
            if matches!(top.kind, AtomKind::LeftParen) {
                return;
            }
            if let Some(top) = self.operators.pop() {
                self.output.push(top);
            }
        }
    }

    /// Drains the operator stack and returns the postfix queue.
    pub fn into_postfix(mut self) -> Vec<Atom> {
        while let Some(top) = self.operators.pop() {
            self.output.push(top);
        }
        self.output
    }

    /// Ends this (sub-)expression and builds its tree.
    /// Returns None when the atoms do not form exactly one tree.
    pub fn finish(self, arena: &mut Arena) -> Option<NodeId> {
        if self.depth != 0 {
            return None;
        }
        build_tree(self.into_postfix(), arena)
    }
}

/// Whether `top`, waiting on the operator stack, must be output before
/// `incoming` is pushed. Only operators and functions ever fire; a left
/// parenthesis shields everything beneath it.
fn fires_first(top: &Atom, incoming: &OperatorDescriptor) -> bool {
    let Some(top_precedence) = top.precedence() else {
        return false;
    };
    match incoming.associativity {
        Associativity::Left => top_precedence >= incoming.precedence,
        Associativity::Right => top_precedence > incoming.precedence,
    }
}
