//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the formula parser.
//! CONTEXT: This crate holds the syntax layer of the formula engine: the
//! character scanner, the operator/function registry with its prefix tries,
//! the shunting-yard converter and the tree builder. The engine crate drives
//! these pieces from its recursive-descent parser and evaluates the trees.
//!
//! PIPELINE: Formula String --> Scanner + Trie --> Atoms --> Shunting-Yard
//!           --> Postfix Queue --> Tree Builder --> Arena Tree --> Evaluator
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, /, %, ^ (power, right-associative)
//! - Comparison: <, >, <=, >=, ==, !=, IS
//! - Logic: AND, OR
//! - Functions: PI, E, sqrt, log, ln, sin, cos
//! - Parentheses for grouping, list literals: [1, 2, 3]
//! - Negative number literals: -5

pub mod ast;
pub mod error;
pub mod lexer;
pub mod registry;
pub mod shunting_yard;
pub mod token;
pub mod tree_builder;
pub mod trie;


// Re-export commonly used types for convenience
pub use ast::{Arena, ListValue, Node, NodeId, NodeKind, Value};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::Scanner;
pub use registry::{Associativity, FunctionDescriptor, OperatorDescriptor};
pub use shunting_yard::ParseContext;
pub use token::{Atom, AtomKind};
pub use tree_builder::build_tree;
pub use trie::{MatchPolicy, SymbolTrie};
