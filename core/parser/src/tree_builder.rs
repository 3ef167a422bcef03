//! FILENAME: core/parser/src/tree_builder.rs
//! PURPOSE: Links a postfix atom queue into a single rooted tree.
//! CONTEXT: Operands are pushed onto a working stack as leaves. An operator
//! pops its right then left operand; a function pops `arity` operands and
//! restores their source order. Every linked node is allocated in the arena.

use crate::ast::{Arena, Node, NodeId, NodeKind, Params};
use crate::token::{Atom, AtomKind};

/// Builds the tree for `postfix` and returns its root.
/// Returns None when an operator runs out of operands or when more than one
/// node is left over, both of which mean the queue was not a well-formed
/// expression.
pub fn build_tree(postfix: Vec<Atom>, arena: &mut Arena) -> Option<NodeId> {
    let mut stack: Vec<NodeId> = Vec::with_capacity(postfix.len());

    for Atom { text, kind } in postfix {
        let kind = match kind {
            AtomKind::Number(n) => NodeKind::Number(n),
            AtomKind::Variable { name, target } => NodeKind::Variable { name, target },
            AtomKind::List(list) => NodeKind::List(list),
            AtomKind::Operator(descriptor) => {
                let rhs = stack.pop()?;
                let lhs = stack.pop()?;
                NodeKind::Operator {
                    descriptor,
                    lhs,
                    rhs,
                }
            }
            AtomKind::Function(descriptor) => {
                let split = stack.len().checked_sub(descriptor.arity)?;
                let params: Params = stack.drain(split..).collect();
                NodeKind::Function { descriptor, params }
            }
            // Structural markers never reach the output queue
            AtomKind::Comma | AtomKind::LeftParen | AtomKind::RightParen => continue,
        };
        stack.push(arena.alloc(Node::new(text, kind)));
    }

    let root = stack.pop()?;
    if stack.is_empty() {
        Some(root)
    } else {
        None
    }
}
