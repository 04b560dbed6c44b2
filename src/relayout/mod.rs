//! # Layer 2: Relayout Engine
//!
//! Applies resolved [`Plan`]s to data.
//!
//! - **View**: [`View`] and [`ViewMut`], the borrowed results. A folded
//!   layout comes back as a single `Ref`; scattered ones synthesize branches
//!   whose leaves still point into the source.
//! - **Plan**: `apply`, `apply_mut` (write-through) and the `make` family,
//!   which routes a target tree back into the source shape.
//! - **Inverse**: [`InverseLayout`], derived once per plan.
//! - **Combine**: [`combine`] and [`zip`] over views of unrelated sources.
//!
//! ```text
//!              apply                      make
//! Node<T> -------------> View<T>   Node<T> ------> Node<T>
//! (source)   Plan        (target)  (target) inverse (source)
//! ```

pub mod combine;
pub mod inverse;
pub mod plan;
pub mod view;

pub use combine::{combine, zip};
pub use inverse::InverseLayout;
pub use plan::Plan;
pub use view::{View, ViewMut};
