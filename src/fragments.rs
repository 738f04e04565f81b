//! Caller-supplied code fragments and the loop trip count.
//!
//! Fragments are opaque to the template: it never parses or rewrites them,
//! it only places them under a labeled marker at a fixed position in the
//! kernel. Each list plays exactly one [`Block`] role.
//!
//! # Example
//!
//! ```
//! use kernelgen::{KernelFragments, TripCount};
//!
//! let fragments = KernelFragments::new()
//!     .with_condition(["const bool _cond = (x[_idx] > 0);"])
//!     .with_statement(["x[_idx] = 0;"]);
//! let n = TripCount::expr("N").unwrap();
//! # let _ = (fragments, n);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// The role a fragment list plays in the kernel.
///
/// Variants are listed in the order they appear in the rendered kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Block {
    /// Reusable declarations, rendered as comments inside the kernel.
    SupportCode,
    /// Floating-point denormal handling.
    HandleDenormals,
    /// Symbolic constant definitions.
    HashDefines,
    /// Array pointer bindings.
    Pointers,
    /// Computes `_cond` for the current index.
    Condition,
    /// The update applied when `_cond` is true.
    Statement,
}

impl Block {
    /// All roles in render order.
    pub const ALL: [Block; 6] = [
        Block::SupportCode,
        Block::HandleDenormals,
        Block::HashDefines,
        Block::Pointers,
        Block::Condition,
        Block::Statement,
    ];

    /// Label used in the block's marker comment.
    pub fn label(&self) -> &'static str {
        match self {
            Block::SupportCode => "SUPPORT CODE",
            Block::HandleDenormals => "HANDLE DENORMALS",
            Block::HashDefines => "HASH DEFINES",
            Block::Pointers => "POINTERS",
            Block::Condition => "CONDITION",
            Block::Statement => "STATEMENT",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-element code produced by the expression compiler.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeLines {
    /// Lines computing `_cond` for the current index.
    ///
    /// These lines must define `_cond` on every iteration. No early exit may
    /// leave it unset; the template reads it straight after this block.
    pub condition: Vec<String>,
    /// Lines applied only when `_cond` is true.
    ///
    /// `_cond` is not read again after these lines run.
    pub statement: Vec<String>,
}

/// The full set of fragment lists for one kernel render.
///
/// Field names on the wire follow the names the expression compiler uses, so
/// a bundle can be handed over as JSON:
///
/// ```json
/// {
///   "condition_support_code_lines": [],
///   "condition_denormals_code_lines": [],
///   "condition_hashdefine_lines": [],
///   "condition_pointers_lines": [],
///   "code_lines": { "condition": ["..."], "statement": ["..."] }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelFragments {
    #[serde(rename = "condition_support_code_lines")]
    pub support_code: Vec<String>,
    #[serde(rename = "condition_denormals_code_lines")]
    pub denormals: Vec<String>,
    #[serde(rename = "condition_hashdefine_lines")]
    pub hashdefines: Vec<String>,
    #[serde(rename = "condition_pointers_lines")]
    pub pointers: Vec<String>,
    pub code_lines: CodeLines,
}

fn collect_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    lines.into_iter().map(Into::into).collect()
}

impl KernelFragments {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bundle from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(RenderError::Fragments)
    }

    pub fn with_support_code<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.support_code = collect_lines(lines);
        self
    }

    pub fn with_denormals<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.denormals = collect_lines(lines);
        self
    }

    pub fn with_hashdefines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hashdefines = collect_lines(lines);
        self
    }

    pub fn with_pointers<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pointers = collect_lines(lines);
        self
    }

    pub fn with_condition<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.code_lines.condition = collect_lines(lines);
        self
    }

    pub fn with_statement<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.code_lines.statement = collect_lines(lines);
        self
    }

    /// The lines supplied for a given role.
    pub fn lines(&self, block: Block) -> &[String] {
        match block {
            Block::SupportCode => &self.support_code,
            Block::HandleDenormals => &self.denormals,
            Block::HashDefines => &self.hashdefines,
            Block::Pointers => &self.pointers,
            Block::Condition => &self.code_lines.condition,
            Block::Statement => &self.code_lines.statement,
        }
    }
}

/// Number of loop iterations, resolved when the kernel executes.
///
/// The template never evaluates an expression trip count; it is pasted into
/// the loop bound as-is.
///
/// Literal counts are capped at [`TripCount::MAX_LITERAL`] so the bound fits
/// the loop index in every dialect (`int` in C++, `u32` in WGSL).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TripCount {
    kind: TripKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum TripKind {
    Expr(String),
    Literal(u32),
}

impl TripCount {
    /// Largest literal trip count.
    pub const MAX_LITERAL: u64 = i32::MAX as u64;

    /// Build an expression trip count, rejecting blank text.
    pub fn expr(expr: impl Into<String>) -> Result<Self> {
        let expr = expr.into();
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(RenderError::EmptyTripCount);
        }
        Ok(Self {
            kind: TripKind::Expr(trimmed.to_string()),
        })
    }

    /// Build a literal trip count, rejecting values above
    /// [`TripCount::MAX_LITERAL`].
    pub fn literal(n: u64) -> Result<Self> {
        if n > Self::MAX_LITERAL {
            return Err(RenderError::TripCountOutOfRange {
                n,
                max: Self::MAX_LITERAL,
            });
        }
        Ok(Self {
            kind: TripKind::Literal(n as u32),
        })
    }

    /// The expression text, for expression trip counts.
    pub fn as_expr(&self) -> Option<&str> {
        match &self.kind {
            TripKind::Expr(expr) => Some(expr),
            TripKind::Literal(_) => None,
        }
    }

    /// The element count, for literal trip counts.
    pub fn as_literal(&self) -> Option<u32> {
        match self.kind {
            TripKind::Literal(n) => Some(n),
            TripKind::Expr(_) => None,
        }
    }
}

impl Default for TripCount {
    fn default() -> Self {
        Self {
            kind: TripKind::Expr("N".to_string()),
        }
    }
}

impl fmt::Display for TripCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TripKind::Expr(expr) => f.write_str(expr),
            TripKind::Literal(n) => write!(f, "{}", n),
        }
    }
}
