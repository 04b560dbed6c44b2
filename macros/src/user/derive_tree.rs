//! `#[derive(Tree)]`

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_quote, Data, DeriveInput, Fields, Member};

use crate::common::crate_path;

/// Expand `#[derive(Tree)]` on a struct with named or tuple fields.
///
/// The first field's leaf type becomes `Self::Leaf`; every other field is
/// bounded to the same leaf so mixed-leaf structs fail at the impl.
pub fn expand_derive_tree(input: DeriveInput) -> syn::Result<TokenStream2> {
    let krate = crate_path();
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "#[derive(Tree)] needs a fixed shape; only structs are supported",
            ));
        }
    };
    if matches!(fields, Fields::Unit) || fields.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "#[derive(Tree)] needs at least one field to take the leaf type from",
        ));
    }

    let members: Vec<Member> = fields.members().collect();
    let types: Vec<&syn::Type> = fields.iter().map(|f| &f.ty).collect();
    let first = types[0];

    let mut generics = input.generics.clone();
    {
        let where_clause = generics.make_where_clause();
        where_clause.predicates.push(parse_quote!(#first: #krate::Tree));
        for ty in &types[1..] {
            // Same type as the first field: the leaf bound is tautological
            // (and self-referential bounds overflow the trait solver).
            if quote!(#ty).to_string() == quote!(#first).to_string() {
                continue;
            }
            where_clause
                .predicates
                .push(parse_quote!(#ty: #krate::Tree<Leaf = <#first as #krate::Tree>::Leaf>));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Tree for #name #ty_generics #where_clause {
            type Leaf = <#first as #krate::Tree>::Leaf;

            fn shape() -> #krate::Shape {
                #krate::Shape::branch([#(<#types as #krate::Tree>::shape()),*])
            }

            fn into_node(self) -> #krate::Node<Self::Leaf> {
                #krate::Node::branch([#(#krate::Tree::into_node(self.#members)),*])
            }

            fn from_node(node: #krate::Node<Self::Leaf>) -> #krate::Result<Self> {
                let mut children = #krate::primitives::tree::split_branch(
                    node,
                    &<Self as #krate::Tree>::shape(),
                )?;
                ::core::result::Result::Ok(Self {
                    #(#members: #krate::primitives::tree::next_child::<#types>(&mut children)?),*
                })
            }
        }
    })
}
