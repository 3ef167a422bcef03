//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Scalar values, list values and the node arena for parsed formulas.
//! CONTEXT: The tree builder turns every operand/operator atom into a Node
//! stored in an Arena. Trees are identified by the NodeId of their root.
//! Operator and function nodes own their children (by id, strictly
//! hierarchical); Variable nodes only point at the root of another tree,
//! which the arena keeps alive for the lifetime of the engine.
//!
//! VALUE SEMANTICS:
//! - Booleans coerce to 1/0 in arithmetic and comparisons.
//! - Truthiness: false, 0 and NaN are falsy, everything else is truthy.
//! - Loose equality compares numerically when the two sides differ in kind.

use std::cell::Cell;
use std::ops::Index;

use smallvec::SmallVec;

use crate::registry::{FunctionDescriptor, OperatorDescriptor};

/// A scalar result produced by evaluating a node.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Value {
    Number(f64),
    Boolean(bool),
}

impl Value {
    /// Numeric view of the value. Booleans map to 1 and 0.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Boolean(b) => *b,
        }
    }

    /// Equality used by `==`, `!=` and `IS`.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (a, b) => a.as_number() == b.as_number(),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Format without unnecessary decimal places
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// A fixed sequence of scalars with a cycling read cursor.
///
/// Each read yields the next element and advances the cursor, wrapping to the
/// start once the end is reached. Evaluating a tree N times therefore walks a
/// list elementwise, which is how broadcasting works. The cursor lives in a
/// `Cell` so evaluation can run over a shared borrow of the arena.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListValue {
    items: Vec<Value>,
    cursor: Cell<usize>,
}

impl ListValue {
    pub fn new(items: Vec<Value>) -> Self {
        ListValue {
            items,
            cursor: Cell::new(0),
        }
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Index of the element the next read will return.
    pub fn cursor(&self) -> usize {
        self.cursor.get()
    }

    /// Rewinds the cursor to the first element.
    pub fn reset(&self) {
        self.cursor.set(0);
    }

    /// Returns the element under the cursor and advances it, wrapping around.
    /// Returns None only for an empty list.
    pub fn next_value(&self) -> Option<Value> {
        if self.items.is_empty() {
            return None;
        }
        let mut index = self.cursor.get();
        if index >= self.items.len() {
            index = 0;
        }
        self.cursor.set(index + 1);
        Some(self.items[index])
    }
}

/// Index of a node inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Function parameters, in source order.
pub type Params = SmallVec<[NodeId; 2]>;

/// The semantic part of a tree node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Number(f64),

    /// A reference to a bound variable. `target` is the root of the tree the
    /// name was bound to when this node was parsed.
    Variable { name: String, target: NodeId },

    List(ListValue),

    Operator {
        descriptor: &'static OperatorDescriptor,
        lhs: NodeId,
        rhs: NodeId,
    },

    Function {
        descriptor: &'static FunctionDescriptor,
        params: Params,
    },
}

/// A tree node: the raw text of the atom it came from plus its semantics.
#[derive(Debug, Clone)]
pub struct Node {
    pub text: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(text: impl Into<String>, kind: NodeKind) -> Self {
        Node {
            text: text.into(),
            kind,
        }
    }

    /// Child ids in evaluation order. Leaves have none.
    pub fn children(&self) -> Params {
        match &self.kind {
            NodeKind::Operator { lhs, rhs, .. } => Params::from_slice(&[*lhs, *rhs]),
            NodeKind::Function { params, .. } => params.clone(),
            NodeKind::Number(_) | NodeKind::Variable { .. } | NodeKind::List(_) => Params::new(),
        }
    }
}

/// Append-only storage for every node built by an engine instance.
///
/// The only removal is `truncate`, used to discard nodes built by a parse
/// that failed or by a list element that has already been evaluated.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node allocated after the arena had `len` nodes.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
