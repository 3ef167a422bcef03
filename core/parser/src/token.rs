//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Atom definitions for the formula scanner.
//! CONTEXT: Atoms are the lexed units produced by the recursive-descent driver
//! and consumed by the shunting-yard converter. Operand and operator atoms
//! become arena nodes during tree building; comma and parenthesis atoms only
//! steer the converter and never reach a tree.

use crate::ast::{ListValue, NodeId};
use crate::registry::{FunctionDescriptor, OperatorDescriptor};

/// What an atom means.
#[derive(Debug, Clone)]
pub enum AtomKind {
    // Operands
    Number(f64),
    Variable { name: String, target: NodeId },
    List(ListValue),

    // Operators
    Operator(&'static OperatorDescriptor),
    Function(&'static FunctionDescriptor),

    // Structure
    Comma,
    LeftParen,
    RightParen,
}

/// A lexed unit: the raw text consumed plus its meaning.
#[derive(Debug, Clone)]
pub struct Atom {
    pub text: String,
    pub kind: AtomKind,
}

impl Atom {
    pub fn new(text: impl Into<String>, kind: AtomKind) -> Self {
        Atom {
            text: text.into(),
            kind,
        }
    }

    /// Operands go straight to the output queue.
    pub fn is_operand(&self) -> bool {
        matches!(
            self.kind,
            AtomKind::Number(_) | AtomKind::Variable { .. } | AtomKind::List(_)
        )
    }

    /// Binding strength while the atom waits on the operator stack.
    /// Parenthesis markers and operands have none.
    pub fn precedence(&self) -> Option<u8> {
        match self.kind {
            AtomKind::Operator(descriptor) => Some(descriptor.precedence),
            AtomKind::Function(descriptor) => Some(descriptor.precedence()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            AtomKind::Number(n) if self.text.is_empty() => write!(f, "{}", n),
            AtomKind::Variable { name, .. } => write!(f, "{}", name),
            AtomKind::List(list) => {
                write!(f, "[")?;
                for (i, item) in list.items().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            AtomKind::Operator(descriptor) => write!(f, "{}", descriptor.symbol),
            AtomKind::Function(descriptor) => write!(f, "{}", descriptor.symbol),
            AtomKind::Comma => write!(f, ","),
            AtomKind::LeftParen => write!(f, "("),
            AtomKind::RightParen => write!(f, ")"),
            AtomKind::Number(_) => write!(f, "{}", self.text),
        }
    }
}
