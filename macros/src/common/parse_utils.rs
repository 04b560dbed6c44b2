//! Common parsing utilities
//!
//! Shared helpers for consistent syntax and generated paths across macros.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    LitInt, Token,
};

/// Absolute path of the runtime crate, as seen from generated code.
pub fn crate_path() -> TokenStream2 {
    quote! { ::tola_layout }
}

// =============================================================================
// Comma-separated List Parsing
// =============================================================================

/// Parse a comma-separated list of items
pub fn parse_comma_separated<T: Parse>(input: ParseStream) -> syn::Result<Vec<T>> {
    let items = Punctuated::<T, Token![,]>::parse_terminated(input)?;
    Ok(items.into_iter().collect())
}

// =============================================================================
// Index Literals
// =============================================================================

/// A child index: an unsuffixed or `usize` integer literal.
pub struct Index(pub usize);

impl Parse for Index {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lit: LitInt = input.parse()?;
        match lit.suffix() {
            "" | "usize" => lit.base10_parse().map(Index),
            other => Err(syn::Error::new(
                lit.span(),
                format!("child indices are usize, found suffix `{other}`"),
            )),
        }
    }
}
