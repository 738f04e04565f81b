//! Target languages for the emitted loop.
//!
//! A dialect only decides the syntax of the code the template itself writes:
//! markers, the loop header, the index binding, the branch, and the optional
//! `_cond` guard. Fragments are inserted untouched in every dialect.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fragments::TripCount;

/// Output language of a rendered kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// C++ loop body, compiled inline by the native build step.
    #[default]
    Cpp,
    /// WGSL statements, meant to sit inside a compute entry point.
    Wgsl,
}

impl Dialect {
    /// Line comment prefix.
    pub fn comment_prefix(&self) -> &'static str {
        // Both targets share C-style line comments.
        "//"
    }

    /// Marker comment placed before a labeled block.
    pub fn marker(&self, label: &str) -> String {
        format!("//// {} ///////////", label)
    }

    /// Marker placed before the loop.
    pub fn main_marker(&self) -> &'static str {
        "//// MAIN CODE ////////////"
    }

    /// Loop header lines, ending with the opening brace.
    pub fn loop_open(&self, n: &TripCount) -> Vec<String> {
        match self {
            Dialect::Cpp => vec![
                format!("for(int _idx=0; _idx<{}; _idx++)", n),
                "{".to_string(),
            ],
            Dialect::Wgsl => {
                let bound = match n.as_literal() {
                    Some(n) => format!("{}u", n),
                    None => n.to_string(),
                };
                vec![format!(
                    "for (var _idx: u32 = 0u; _idx < {}; _idx++) {{",
                    bound
                )]
            }
        }
    }

    /// Per-iteration alias of the loop index.
    pub fn index_binding(&self) -> &'static str {
        match self {
            Dialect::Cpp => "const int _vectorisation_idx = _idx;",
            Dialect::Wgsl => "let _vectorisation_idx = _idx;",
        }
    }

    /// Opening line of the conditional branch.
    pub fn branch_open(&self) -> &'static str {
        match self {
            Dialect::Cpp => "if(_cond) {",
            Dialect::Wgsl => "if (_cond) {",
        }
    }

    /// Closing line for the branch and the loop.
    pub fn block_close(&self) -> &'static str {
        "}"
    }

    /// Sentinel declaration and check wrapped around the condition block.
    ///
    /// Returns `None` when the dialect has no way to fail fast at run time.
    pub fn cond_guard(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Dialect::Cpp => Some(("int _cond = -1;", "if(_cond == -1) abort();")),
            // WGSL has no abort, and a bool cannot carry a sentinel.
            Dialect::Wgsl => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Cpp => f.write_str("cpp"),
            Dialect::Wgsl => f.write_str("wgsl"),
        }
    }
}
