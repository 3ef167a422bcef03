//! FILENAME: core/parser/src/trie.rs
//! PURPOSE: Prefix tree used to recognize operator and function symbols.
//! CONTEXT: Each registered symbol is inserted character by character; the
//! node reached by its last character is marked accepting and carries the
//! symbol's payload. `find` walks the tree from a position in the input.
//!
//! MATCH POLICIES:
//! - FirstAccepting: stop at the first accepting node on the path. A symbol
//!   that is a strict prefix of another one (">" and ">=") always wins, so
//!   the longer symbol can never be recognized.
//! - Longest: keep walking while children exist and report the deepest
//!   accepting node seen.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchPolicy {
    FirstAccepting,
    #[default]
    Longest,
}

#[derive(Debug)]
struct TrieNode<T> {
    children: FxHashMap<char, usize>,
    accept: Option<T>,
}

impl<T> TrieNode<T> {
    fn new() -> Self {
        TrieNode {
            children: FxHashMap::default(),
            accept: None,
        }
    }
}

/// A prefix tree over `char`s. Nodes live in a flat vector; index 0 is the root.
#[derive(Debug)]
pub struct SymbolTrie<T> {
    nodes: Vec<TrieNode<T>>,
}

impl<T: Copy> SymbolTrie<T> {
    pub fn new() -> Self {
        SymbolTrie {
            nodes: vec![TrieNode::new()],
        }
    }

    /// Registers `symbol`. Re-inserting a symbol replaces its payload.
    pub fn insert(&mut self, symbol: &str, value: T) {
        let mut current = 0;
        for ch in symbol.chars() {
            current = match self.nodes[current].children.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    self.nodes[current].children.insert(ch, next);
                    next
                }
            };
        }
        self.nodes[current].accept = Some(value);
    }

    /// Looks for a registered symbol starting at `position`.
    /// Returns the payload and the number of characters consumed.
    pub fn find(&self, input: &[char], position: usize, policy: MatchPolicy) -> Option<(T, usize)> {
        let rest = input.get(position..).unwrap_or(&[]);
        let mut current = 0;
        let mut found = None;

        for (offset, ch) in rest.iter().enumerate() {
            let Some(&next) = self.nodes[current].children.get(ch) else {
                break;
            };
            current = next;

            if let Some(value) = self.nodes[current].accept {
                found = Some((value, offset + 1));
                if policy == MatchPolicy::FirstAccepting {
                    break;
                }
            }
        }

        found
    }
}

impl<T: Copy> Default for SymbolTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, T: Copy> FromIterator<(&'s str, T)> for SymbolTrie<T> {
    fn from_iter<I: IntoIterator<Item = (&'s str, T)>>(iter: I) -> Self {
        let mut trie = SymbolTrie::new();
        for (symbol, value) in iter {
            trie.insert(symbol, value);
        }
        trie
    }
}
