//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Computes values of expression trees stored in the arena.
//! CONTEXT: After the driver builds a tree, this module walks it bottom-up:
//! children are evaluated first and their values handed to the descriptor's
//! rule. Variables are followed to the tree they reference on every access.
//! List leaves yield their next element, which makes repeated evaluation of
//! a root walk every list in lockstep (broadcasting).
//!
//! SUPPORTED FEATURES:
//! - Number, variable, list, operator and function nodes
//! - Broadcast evaluation: N passes over one root, one result per pass
//! - List priming: reset the cursors of every list reachable from a tree
//!   and report the longest one

use formula_parser::{Arena, NodeId, NodeKind, Value};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// One step of the evaluation walk.
#[derive(Debug, Clone, Copy)]
enum Task {
    /// Evaluate the node, or schedule its children and an `Apply`.
    Visit(NodeId),
    /// Children are on the value stack; combine them.
    Apply(NodeId),
}

/// The tree evaluator.
/// Holds a shared borrow of the arena; list cursors advance through `Cell`s.
/// Walks trees with an explicit work stack; tree depth is bounded by memory only.
pub struct Evaluator<'a> {
    arena: &'a Arena,
}

impl<'a> Evaluator<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        Evaluator { arena }
    }

    /// Evaluates the node once.
    pub fn evaluate(&self, id: NodeId) -> Value {
        let mut tasks = vec![Task::Visit(id)];
        let mut values: Vec<Value> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(id) => self.visit(id, &mut tasks, &mut values),
                Task::Apply(id) => self.apply(id, &mut values),
            }
        }

        values.pop().unwrap_or(Value::Number(f64::NAN))
    }

    fn visit(&self, id: NodeId, tasks: &mut Vec<Task>, values: &mut Vec<Value>) {
        match &self.arena[id].kind {
            NodeKind::Number(n) => values.push(Value::Number(*n)),

            // Fresh every time, never cached
            NodeKind::Variable { target, .. } => tasks.push(Task::Visit(*target)),

            // Lists are never empty once parsed
            NodeKind::List(list) => {
                values.push(list.next_value().unwrap_or(Value::Number(f64::NAN)))
            }

            // Both sides are always evaluated, left first, so list cursors
            // advance in reading order
            NodeKind::Operator { lhs, rhs, .. } => {
                tasks.push(Task::Apply(id));
                tasks.push(Task::Visit(*rhs));
                tasks.push(Task::Visit(*lhs));
            }

            NodeKind::Function { params, .. } => {
                tasks.push(Task::Apply(id));
                tasks.extend(params.iter().rev().map(|param| Task::Visit(*param)));
            }
        }
    }

    fn apply(&self, id: NodeId, values: &mut Vec<Value>) {
        let result = match &self.arena[id].kind {
            NodeKind::Operator { descriptor, .. } => {
                let rhs = values.pop().unwrap_or(Value::Number(f64::NAN));
                let lhs = values.pop().unwrap_or(Value::Number(f64::NAN));
                descriptor.apply(lhs, rhs)
            }
            NodeKind::Function { descriptor, params } => {
                let start = values.len().saturating_sub(params.len());
                let args: SmallVec<[Value; 2]> = values.drain(start..).collect();
                descriptor.apply(&args)
            }
            NodeKind::Number(_) | NodeKind::Variable { .. } | NodeKind::List(_) => return,
        };
        values.push(result);
    }

    /// Evaluates `root` `width` times (at least once) and collects the results.
    pub fn evaluate_broadcast(&self, root: NodeId, width: usize) -> Vec<Value> {
        (0..width.max(1)).map(|_| self.evaluate(root)).collect()
    }
}

/// Rewinds every list reachable from `root`, following variable references,
/// and returns the length of the longest one (0 when there are none).
pub fn prime_lists(arena: &Arena, root: NodeId) -> usize {
    let mut visited = FxHashSet::default();
    let mut pending = vec![root];
    let mut longest = 0;

    while let Some(id) = pending.pop() {
        if !visited.insert(id) {
            continue;
        }
        let node = &arena[id];
        match &node.kind {
            NodeKind::List(list) => {
                list.reset();
                longest = longest.max(list.len());
            }
            NodeKind::Variable { target, .. } => pending.push(*target),
            NodeKind::Number(_) | NodeKind::Operator { .. } | NodeKind::Function { .. } => {
                pending.extend(node.children());
            }
        }
    }

    longest
}
