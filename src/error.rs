//! Structural errors.
//!
//! Every condition here is decided from shapes and layout specifications
//! alone, never from leaf values, so all of them surface while a plan or an
//! operation tree is being built and before any data is touched.

use alloc::string::String;

/// Errors raised while resolving layouts, plans and operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A literal index exceeds the arity of the branch it addresses.
    #[error("index {index} out of range for branch of arity {arity}")]
    OutOfRange { index: usize, arity: usize },

    /// A requested axis is deeper than the branch depth at that point.
    #[error("axis {axis} out of range for tree of branch depth {depth}")]
    AxisOutOfRange { axis: usize, depth: usize },

    /// Two structures that must agree do not.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    /// Round-trip materialization needs an injective (and for `make`, total)
    /// mapping back to the source.
    #[error("layout is not invertible: {reason}")]
    NotInvertible { reason: &'static str },
}

impl LayoutError {
    pub(crate) fn mismatch(expected: impl core::fmt::Display, found: impl core::fmt::Display) -> Self {
        use alloc::string::ToString;
        LayoutError::ShapeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = LayoutError> = core::result::Result<T, E>;
