//! FILENAME: core/engine/src/engine.rs
//! PURPOSE: The public face of the formula engine.
//! CONTEXT: A host creates one Engine, feeds it formula strings through
//! `parse`, and reads results back through `value`. Variables bound by
//! assignments and every tree ever built stay in the engine until it is
//! dropped, so later formulas can refer to earlier ones by name.
//!
//! USAGE:
//! 1. `parse("a = [1, 2, 3]")` binds `a`.
//! 2. `parse("a + 10")` builds a tree and records the broadcast width (3).
//! 3. `value()` evaluates that tree once per broadcast slot: [11, 12, 13].

use formula_parser::{Arena, Node, NodeId, ParseResult, Value};

use crate::driver::Driver;
use crate::evaluator::Evaluator;
use crate::logging::{log_debug, log_info, log_warn};
use crate::options::EngineOptions;
use crate::tree_dump::render_tree;
use crate::variables::VariableStore;

#[derive(Debug, Default)]
pub struct Engine {
    options: EngineOptions,
    arena: Arena,
    variables: VariableStore,
    /// Root of every tree built by a successful parse, in call order.
    trees: Vec<NodeId>,
    root: Option<NodeId>,
    expression: Option<String>,
    broadcast_width: usize,
}

impl Engine {
    /// Creates an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Engine {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Parses `text` as an assignment or an expression.
    ///
    /// On success the new tree becomes the current one and, for an
    /// assignment, the name is bound to it. On failure the engine is left
    /// exactly as it was: nodes built by the failed call are discarded and
    /// no binding is written.
    pub fn parse(&mut self, text: &str) -> ParseResult<()> {
        log_debug!("PARSE", "parse \"{}\"", text);
        let mark = self.arena.len();

        let result = Driver::new(text, &mut self.arena, &self.variables, &self.options).parse();
        let parsed = match result {
            Ok(parsed) => parsed,
            Err(err) => {
                self.arena.truncate(mark);
                log_warn!("PARSE", "{}", err);
                return Err(err);
            }
        };

        self.root = Some(parsed.root);
        self.trees.push(parsed.root);
        self.broadcast_width = parsed.broadcast_width;
        self.expression = Some(text.to_string());

        if let Some(name) = parsed.assignment {
            log_info!("VARS", "bind {} -> node {}", name, parsed.root.index());
            self.variables.bind(name, parsed.root);
        }

        log_debug!(
            "PARSE",
            "built tree {} nodes={} width={}",
            self.trees.len(),
            self.arena.len() - mark,
            self.broadcast_width
        );
        Ok(())
    }

    /// Evaluates the current tree once per broadcast slot.
    /// Returns None if nothing has been parsed yet.
    ///
    /// List cursors are not rewound between calls, so calling this again
    /// on a list-bearing formula continues the cycle where it stopped.
    pub fn value(&self) -> Option<Vec<Value>> {
        let root = self.root?;
        let width = self.broadcast_width.max(1);
        log_debug!("EVAL", "evaluate node {} x{}", root.index(), width);
        Some(Evaluator::new(&self.arena).evaluate_broadcast(root, width))
    }

    /// Current variable bindings.
    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Roots of every tree built on this engine, oldest first.
    pub fn expression_trees(&self) -> &[NodeId] {
        &self.trees
    }

    /// Root of the most recently built tree.
    pub fn expression_tree_root(&self) -> Option<NodeId> {
        self.root
    }

    /// Text of the most recent successful parse.
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// Number of evaluations `value` performs, before the minimum of one.
    pub fn broadcast_width(&self) -> usize {
        self.broadcast_width
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Indented outline of the current tree, empty if nothing was parsed.
    pub fn print_tree(&self) -> String {
        self.root
            .map(|root| render_tree(&self.arena, root))
            .unwrap_or_default()
    }
}
