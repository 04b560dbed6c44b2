#![cfg_attr(not(feature = "std"), no_std)]

// Feature flags handled:
// - std: default, enables std library (and `std::error::Error` for LayoutError)

//! # tola-layout
//!
//! Layout algebra and positional operations for statically-shaped trees.
//!
//! **Reorder, repeat, project and transpose nested data without copying it.**
//!
//! ## Architecture
//!
//! A *layout* describes a target tree by naming, for each target position, a
//! path into a source tree. Layouts are built from combinators, resolved
//! against a source [`Shape`] into a [`Plan`], and only then applied to data.
//! Every structural error surfaces during resolution.
//!
//! ### 1. Folding
//! A branch of the layout that enumerates a whole source sub-structure in
//! order collapses into that sub-structure's path. Folded positions come back
//! as references into the source; the rest is synthesized.
//!
//! ```text
//! [.1.0, .1.1]  --fold-->  .1          (reference)
//! [.0.0, .1.0]  --fold-->  [.0.0, .1.0] (synthesized, leaves still borrowed)
//! ```
//!
//! ### 2. Inversion
//! Injective layouts have an inverse, used to write through a relayouted
//! view and to `make` a source-shaped tree back from a target-shaped one.
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Primitives                                              |
//! |  - Shape, Path, Node<T>, Tree                                     |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Layout Builder                                          |
//! |  - Layout, repeat/component/transpose/inverse, Relayout pipeline  |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: Relayout Engine                                         |
//! |  - Plan (apply, apply_mut, make), View, InverseLayout, zip        |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 3: Operate Engine                                          |
//! |  - OperationTree, operate(_with), transform, zip_transform         |
//! +-------------------------------------------------------------------+
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tola_layout::prelude::*;
//!
//! let m = node!([[1, 2], [3, 4]]);
//!
//! let t = relayout(transpose(0, 1)).apply(&m).unwrap();
//! assert_eq!(t.to_node(), node!([[1, 3], [2, 4]]));
//!
//! let row = relayout(component(1, 0)).apply(&m).unwrap();
//! assert!(row.is_ref());
//!
//! let doubled = transform(&node!([1, 2, 3]), |x: &i32| x * 2).unwrap();
//! assert_eq!(doubled, node!([2, 4, 6]));
//! ```

// Allow `::tola_layout` to work inside the crate itself
extern crate self as tola_layout;

extern crate alloc;

// Re-export paste for the geo accessor macros
pub use paste;

pub mod error;

// =============================================================================
// Layer 0: Primitives
// =============================================================================
pub mod primitives;

// =============================================================================
// Layer 1: Layout Builder
// =============================================================================
pub mod layout;

// =============================================================================
// Layer 2: Relayout Engine
// =============================================================================
pub mod relayout;

// =============================================================================
// Layer 3: Operate Engine
// =============================================================================
pub mod operate;

// Fixed-size vectors on top of the tree traits
pub mod geo;

// Syntax macros (node!, path!)
pub mod syntax_macros;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use error::{LayoutError, Result};
pub use primitives::{Node, Path, Shape, Tree};
pub use layout::{Layout, Relayout, relayout};
pub use relayout::{InverseLayout, Plan, View, ViewMut};
pub use operate::{Operated, Operation, OperationTree, operate, operate_with, transform, zip_transform};

// Re-export proc-macros
pub use macros::{Tree, layout};

/// Common items for building and applying layouts.
pub mod prelude {
    pub use crate::error::LayoutError;
    pub use crate::primitives::{Node, Path, Shape, Tree};
    pub use crate::layout::{
        // Core types
        Layout, Relayout, Relayouter,
        // Combinators
        Combine, Zip, component, inverse, relayout, repeat, transpose,
    };
    pub use crate::relayout::{InverseLayout, Plan, View, ViewMut, combine, zip};
    pub use crate::operate::{
        Operated, Operation, OperationTree, operate, operate_with, transform, zip_transform,
    };
    pub use macros::{Tree, layout};
    // Note: node! and path! are #[macro_export] so they're at crate root
    pub use crate::{node, path};
}
