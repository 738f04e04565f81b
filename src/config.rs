//! Render configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```
//! use kernelgen::{Dialect, EmptyBlocks, RenderConfig};
//!
//! let config = RenderConfig::from_json_str(r#"{ "dialect": "wgsl", "indent": "  " }"#).unwrap();
//! assert_eq!(config.dialect, Dialect::Wgsl);
//! assert_eq!(config.empty_blocks, EmptyBlocks::Marker);
//! ```

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::{RenderError, Result};

/// What to emit for a block whose fragment list is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyBlocks {
    /// Emit the marker comment with nothing under it.
    #[default]
    Marker,
    /// Emit nothing at all.
    Omit,
}

/// Settings shared by every render of a template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output language.
    pub dialect: Dialect,
    /// Text for one level of nesting.
    pub indent: String,
    /// Handling of empty fragment lists.
    pub empty_blocks: EmptyBlocks,
    /// Initialise `_cond` to a sentinel and abort if the condition block
    /// leaves it untouched. The condition block must then assign `_cond`
    /// rather than declare it.
    pub guard_condition: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Cpp,
            indent: "    ".to_string(),
            empty_blocks: EmptyBlocks::Marker,
            guard_condition: false,
        }
    }
}

impl RenderConfig {
    /// Default configuration for a dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(RenderError::Config)
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_empty_blocks(mut self, empty_blocks: EmptyBlocks) -> Self {
        self.empty_blocks = empty_blocks;
        self
    }

    pub fn with_condition_guard(mut self, enabled: bool) -> Self {
        self.guard_condition = enabled;
        self
    }

    /// Check that the settings can be rendered.
    pub fn validate(&self) -> Result<()> {
        if self.guard_condition && self.dialect.cond_guard().is_none() {
            return Err(RenderError::UnsupportedGuard {
                dialect: self.dialect,
            });
        }
        Ok(())
    }
}
