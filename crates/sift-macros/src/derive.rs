//! Implementation of the `#[derive(Choice)]` macro.
//!
//! Generates `sift_seeker::Choice` for enums of unit variants: the `KIND`
//! label, the `ALL` table in declaration order, and a `code` match.

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use crate::attrs::{parse_container_attrs, parse_variant_attrs, RenameRule};

/// Main implementation of the Choice derive macro.
pub fn choice_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let enum_name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(Error::new(
                input.span(),
                "Choice can only be derived for enums",
            ))
        }
    };

    if variants.is_empty() {
        return Err(Error::new(
            input.span(),
            "Choice requires at least one variant",
        ));
    }

    let container = parse_container_attrs(&input.attrs)?;
    let kind = container
        .kind
        .unwrap_or_else(|| RenameRule::KebabCase.apply(&enum_name.to_string()).replace('-', " "));

    let mut idents = Vec::with_capacity(variants.len());
    let mut codes = Vec::with_capacity(variants.len());
    let mut seen: HashMap<String, String> = HashMap::new();

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.span(),
                "Choice variants cannot carry data",
            ));
        }

        let attrs = parse_variant_attrs(&variant.attrs)?;
        let ident = &variant.ident;
        let code = attrs
            .rename
            .unwrap_or_else(|| container.rename_all.apply(&ident.to_string()));

        if let Some(previous) = seen.insert(code.clone(), ident.to_string()) {
            return Err(Error::new(
                variant.span(),
                format!(
                    "duplicate choice code '{}' (already used by `{}`)",
                    code, previous
                ),
            ));
        }

        idents.push(ident);
        codes.push(code);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::sift_seeker::Choice for #enum_name #ty_generics #where_clause {
            const KIND: &'static str = #kind;
            const ALL: &'static [Self] = &[#(#enum_name::#idents),*];

            fn code(self) -> &'static str {
                match self {
                    #(#enum_name::#idents => #codes,)*
                }
            }
        }
    })
}
