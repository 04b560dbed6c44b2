//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[derive(Tree)]` | on struct | Fields as branch children |
//! | `layout!` | function macro | Layout literal |

mod derive_tree;
mod layout;

pub use derive_tree::expand_derive_tree;
pub use layout::{expand_layout, LayoutInput};
