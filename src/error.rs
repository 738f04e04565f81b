//! Error types for kernel rendering.
//!
//! Rendering a kernel never fails once a template has been built. Errors come
//! from the edges: building a trip count, loading configuration or fragment
//! bundles, and validating emitted WGSL.

use thiserror::Error;

use crate::dialect::Dialect;

/// Crate result type.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while preparing or checking a kernel render.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A trip count expression was empty or only whitespace.
    #[error("trip count expression is empty")]
    EmptyTripCount,

    /// A literal trip count does not fit the loop index.
    #[error("trip count {n} exceeds the largest loop bound {max}")]
    TripCountOutOfRange { n: u64, max: u64 },

    /// The sentinel guard on `_cond` cannot be expressed in this dialect.
    #[error("condition guard is not supported for the {dialect} dialect")]
    UnsupportedGuard { dialect: Dialect },

    /// Render configuration could not be parsed.
    #[error("invalid render config: {0}")]
    Config(#[source] serde_json::Error),

    /// A fragment bundle could not be parsed.
    #[error("invalid fragment bundle: {0}")]
    Fragments(#[source] serde_json::Error),

    /// Emitted WGSL failed to parse or validate.
    #[error("{stage} validation failed: {message}")]
    Validation { stage: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_guard_names_dialect() {
        let err = RenderError::UnsupportedGuard {
            dialect: Dialect::Wgsl,
        };
        assert_eq!(
            err.to_string(),
            "condition guard is not supported for the wgsl dialect"
        );
    }

    #[test]
    fn test_config_error_keeps_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RenderError::Config(json_err);
        assert!(err.to_string().starts_with("invalid render config:"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
