//! `layout![...]` literal syntax

use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    bracketed, parenthesized,
    parse::{Parse, ParseStream},
    token,
};

use crate::common::{crate_path, parse_comma_separated, Index};

/// One layout node: `[..]` branch, `(i, j, ..)` path, or bare `i`.
pub enum LayoutExpr {
    Path(Vec<usize>),
    Branch(Vec<LayoutExpr>),
}

impl Parse for LayoutExpr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(token::Bracket) {
            let content;
            bracketed!(content in input);
            Ok(LayoutExpr::Branch(parse_comma_separated(&content)?))
        } else if input.peek(token::Paren) {
            let content;
            parenthesized!(content in input);
            let indices: Vec<Index> = parse_comma_separated(&content)?;
            Ok(LayoutExpr::Path(indices.into_iter().map(|Index(i)| i).collect()))
        } else {
            let Index(i) = input.parse()?;
            Ok(LayoutExpr::Path(vec![i]))
        }
    }
}

impl ToTokens for LayoutExpr {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let krate = crate_path();
        tokens.extend(match self {
            LayoutExpr::Path(indices) if indices.is_empty() => quote! {
                #krate::Layout::Path(#krate::Path::root())
            },
            LayoutExpr::Path(indices) => quote! {
                #krate::Layout::Path(#krate::Path::new([#(#indices),*]))
            },
            LayoutExpr::Branch(children) => quote! {
                #krate::Layout::branch([#(#children),*])
            },
        });
    }
}

/// Top-level input: a comma-separated list of layout nodes.
pub struct LayoutInput {
    items: Vec<LayoutExpr>,
}

impl Parse for LayoutInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(LayoutInput {
            items: parse_comma_separated(input)?,
        })
    }
}

/// A single item is returned as is; zero or several form a branch.
pub fn expand_layout(input: LayoutInput) -> TokenStream2 {
    let mut items = input.items;
    let layout = if items.len() == 1 {
        items.remove(0)
    } else {
        LayoutExpr::Branch(items)
    };
    layout.into_token_stream()
}
