//! Procedural macros for tola-layout
//!
//! # Macro API
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[derive(Tree)]` | struct | Statically-shaped tree over the struct's fields |
//! | `layout![]` | - | Build a `Layout` value from path literals |
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Tree)]
//! struct Segment {
//!     start: [f32; 2],
//!     end: [f32; 2],
//! }
//!
//! // Swap the endpoints, then read both x coordinates.
//! let pipeline = relayout(layout![1, 0]) | component(0, 1);
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

// =============================================================================
// Module Declarations (Two-tier: common / user)
// =============================================================================

mod common;
mod user;

// =============================================================================
// User Macros (user/)
// =============================================================================

/// Derive `Tree` for a struct.
///
/// Each field becomes one child of a branch, in declaration order. Every
/// field must itself implement `Tree`, and all fields must share the first
/// field's leaf type.
///
/// # Usage
/// ```ignore
/// #[derive(Tree)]
/// struct Pixel(u8, u8, u8);
///
/// assert_eq!(Pixel::shape(), Shape::tensor(&[3]));
/// ```
#[proc_macro_derive(Tree)]
pub fn derive_tree(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_tree(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Build a `Layout` from literal syntax.
///
/// - `[a, b]`: a branch
/// - `(0, 1)`: the path `.0.1`
/// - `2`: the one-index path `.2`
/// - `()`: the whole source tree
///
/// Several top-level items form a branch; a single item is returned as is.
///
/// # Usage
/// ```ignore
/// let swap = layout![1, 0];             // [.1, .0]
/// let pick = layout![(0, 1), [(1, 0)]];  // [.0.1, [.1.0]]
/// ```
#[proc_macro]
pub fn layout(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as user::LayoutInput);
    user::expand_layout(input).into()
}
