//! FILENAME: core/engine/src/options.rs
//! PURPOSE: Engine configuration.
//! CONTEXT: Hosts either use the defaults or deserialize options from their
//! own settings, e.g. `{"matchPolicy": "firstAccepting", "maxNestingDepth": 64}`.

use formula_parser::MatchPolicy;
use serde::{Deserialize, Serialize};

/// Default limit on nested groups, argument lists and list literals.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    /// How operator and function symbols are matched when one registered
    /// symbol is a prefix of another.
    pub match_policy: MatchPolicy,
    /// Parsing fails once brackets nest deeper than this.
    pub max_nesting_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            match_policy: MatchPolicy::Longest,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
