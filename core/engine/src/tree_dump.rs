//! FILENAME: core/engine/src/tree_dump.rs
//! PURPOSE: Renders an expression tree as an indented outline for debugging.

use formula_parser::{Arena, Node, NodeId, NodeKind};

/// Prefix repeated once per level of depth.
pub const DEPTH_MARKER: char = '·';

/// One line per node, children below their parent one level deeper.
///
/// `2 + sqrt(9)` renders as:
/// ```text
/// +
/// ·2
/// ·sqrt
/// ··9
/// ```
pub fn render_tree(arena: &Arena, root: NodeId) -> String {
    let mut lines = Vec::new();
    let mut pending = vec![(root, 0usize)];

    while let Some((id, depth)) = pending.pop() {
        let node = &arena[id];
        let indent: String = std::iter::repeat(DEPTH_MARKER).take(depth).collect();
        lines.push(format!("{}{}", indent, label(node)));

        // Reversed so the first child is printed first
        pending.extend(node.children().into_iter().rev().map(|child| (child, depth + 1)));
    }

    lines.join("\n")
}

fn label(node: &Node) -> String {
    match &node.kind {
        NodeKind::List(list) => {
            let items: Vec<String> = list.items().iter().map(|v| v.to_string()).collect();
            format!("[{}]", items.join(", "))
        }
        _ => node.text.clone(),
    }
}
