//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the formula engine.
//! CONTEXT: Re-exports public types and modules for use by host applications.
//! The syntax layer (scanner, registry, shunting-yard, tree builder) lives in
//! the `formula-parser` crate; this crate drives it and evaluates the trees.

mod driver;
pub mod engine;
pub mod evaluator;
mod logging;
pub mod options;
pub mod tree_dump;
pub mod variables;

#[cfg(test)]
mod tests;

// Re-export commonly used types at the crate root
pub use engine::Engine;
pub use evaluator::{prime_lists, Evaluator};
pub use formula_parser::{
    Arena, ListValue, MatchPolicy, Node, NodeId, NodeKind, ParseError, ParseErrorKind,
    ParseResult, Value,
};
pub use options::{EngineOptions, DEFAULT_MAX_NESTING_DEPTH};
pub use tree_dump::render_tree;
pub use variables::{Variable, VariableStore};
