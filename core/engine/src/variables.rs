//! FILENAME: core/engine/src/variables.rs
//! PURPOSE: Name to expression-tree bindings that live across parse calls.
//! CONTEXT: An assignment `name = expr` binds the name to the root of the
//! tree built for `expr`. The binding is a reference, not a value: every
//! evaluation of a formula using the name walks that tree again.

use formula_parser::NodeId;
use rustc_hash::FxHashMap;

/// A lazy binding to the root of a previously built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    root: NodeId,
}

impl Variable {
    pub fn new(root: NodeId) -> Self {
        Variable { root }
    }

    /// Root of the tree this variable evaluates.
    pub fn root(&self) -> NodeId {
        self.root
    }
}

#[derive(Debug, Default)]
pub struct VariableStore {
    bindings: FxHashMap<String, Variable>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing any earlier binding.
    pub fn bind(&mut self, name: impl Into<String>, root: NodeId) {
        self.bindings.insert(name.into(), Variable::new(root));
    }

    pub fn lookup(&self, name: &str) -> Option<Variable> {
        self.bindings.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Variable)> {
        self.bindings.iter().map(|(name, var)| (name.as_str(), *var))
    }

    /// Bound names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
