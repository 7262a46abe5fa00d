//! Implementation of the `#[derive(FieldEnum)]` macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_field_attrs;

/// Main implementation of the FieldEnum derive macro.
pub fn field_enum_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let enum_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "FieldEnum cannot be derived for generic enums",
        ));
    }

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(Error::new(
                input.span(),
                "FieldEnum can only be derived for enums",
            ))
        }
    };

    if variants.is_empty() {
        return Err(Error::new(
            input.span(),
            "FieldEnum needs at least one variant",
        ));
    }

    let mut names: Vec<String> = Vec::new();
    let mut table: Vec<TokenStream> = Vec::new();
    let mut arms: Vec<TokenStream> = Vec::new();

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.span(),
                "FieldEnum variants cannot carry data",
            ));
        }

        let attrs = parse_field_attrs(&variant.attrs)?;
        if attrs.skip {
            return Err(Error::new(
                attrs.span,
                "FieldEnum variants cannot be skipped",
            ));
        }

        let ident = &variant.ident;
        let name = attrs
            .rename
            .unwrap_or_else(|| ident.unraw().to_string());

        if names.iter().any(|seen| seen.eq_ignore_ascii_case(&name)) {
            return Err(Error::new(
                variant.span(),
                format!(
                    "duplicate variant name `{}` (variant names are case-insensitive)",
                    name
                ),
            ));
        }

        table.push(quote! {
            ::pagesift::EnumVariant::new(#name, #enum_name::#ident as i64)
        });
        arms.push(quote! {
            #enum_name::#ident => #enum_name::#ident as i64,
        });
        names.push(name);
    }

    let expanded = quote! {
        impl ::pagesift::FieldEnum for #enum_name {
            const VARIANTS: &'static [::pagesift::EnumVariant] = &[
                #(#table),*
            ];

            fn code(&self) -> i64 {
                match self {
                    #(#arms)*
                }
            }
        }

        impl ::pagesift::FieldValue for #enum_name {
            const KIND: ::pagesift::ValueKind =
                ::pagesift::ValueKind::Enum(<Self as ::pagesift::FieldEnum>::VARIANTS);

            fn field_value(&self) -> ::pagesift::Value<'_> {
                ::pagesift::Value::Enum(::pagesift::FieldEnum::code(self))
            }
        }
    };

    Ok(expanded)
}
