//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of the `Record` trait, a lazily
//! built field registry with one accessor per field, and field name
//! constants for building criteria without typos.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_field_attrs, parse_record_attrs, Named};
use super::case::{is_identifier, to_screaming_snake_case};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Record cannot be derived for generic structs",
        ));
    }

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let record_attrs = parse_record_attrs(&input.attrs)?;
    let key = record_attrs.key.ok_or_else(|| {
        Error::new(
            struct_name.span(),
            "Record needs a primary key: add #[sift(key = \"...\")]",
        )
    })?;

    // Collect field information
    let mut query_names: Vec<String> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut accessors: Vec<TokenStream> = Vec::new();
    let mut registrations: Vec<TokenStream> = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        // Parse field attributes
        let field_attrs = parse_field_attrs(&field.attrs)?;

        // Skip if marked with #[sift(skip)]
        if field_attrs.skip {
            continue;
        }

        // Determine the query field name
        let rust_name = field_name.unraw().to_string();
        let query_name = match (&field_attrs.rename, record_attrs.rename_all) {
            (Some(rename), _) => rename.clone(),
            (None, Some(rule)) => rule.apply(&rust_name),
            (None, None) => rust_name,
        };

        if query_names
            .iter()
            .any(|seen| seen.eq_ignore_ascii_case(&query_name))
        {
            return Err(Error::new(
                field.span(),
                format!(
                    "duplicate field name `{}` (field names are case-insensitive)",
                    query_name
                ),
            ));
        }

        // Generate constant name (SCREAMING_SNAKE_CASE)
        let const_str = to_screaming_snake_case(&query_name);
        if !is_identifier(&const_str) {
            return Err(Error::new(
                field_attrs.span,
                format!(
                    "field name `{}` must be usable as an identifier",
                    query_name
                ),
            ));
        }
        let const_name = format_ident!("{}", const_str);

        field_constants.push(quote! {
            /// Field name constant for building search criteria.
            pub const #const_name: &'static str = #query_name;
        });

        let accessor = format_ident!("__sift_field_{}", index);
        let ty = &field.ty;

        accessors.push(quote! {
            fn #accessor(record: &#struct_name) -> ::pagesift::Value<'_> {
                ::pagesift::FieldValue::field_value(&record.#field_name)
            }
        });

        registrations.push(quote! {
            .field::<#ty>(#query_name, #accessor)
        });

        query_names.push(query_name);
    }

    let key_name = canonical_name(&key, &query_names, "key", struct_name)?;
    let sort_name = match &record_attrs.sort {
        Some(sort) => canonical_name(sort, &query_names, "sort", struct_name)?,
        None => key_name.clone(),
    };
    let record_name = struct_name.unraw().to_string();

    // Generate the impl blocks
    let expanded = quote! {
        impl #struct_name {
            #(#field_constants)*
        }

        impl ::pagesift::Record for #struct_name {
            const DEFAULT_SORT: &'static str = #sort_name;
            const PRIMARY_KEY: &'static str = #key_name;

            fn registry() -> &'static ::pagesift::FieldRegistry<Self> {
                #(#accessors)*

                static REGISTRY: ::pagesift::__private::Lazy<
                    ::pagesift::FieldRegistry<#struct_name>,
                > = ::pagesift::__private::Lazy::new(|| {
                    ::pagesift::FieldRegistry::builder(#record_name)
                        #(#registrations)*
                        .build()
                });

                &REGISTRY
            }
        }
    };

    Ok(expanded)
}

/// Resolves a `key`/`sort` attribute to the registered spelling of the field.
fn canonical_name(
    named: &Named,
    query_names: &[String],
    what: &str,
    struct_name: &syn::Ident,
) -> Result<String> {
    query_names
        .iter()
        .find(|name| name.eq_ignore_ascii_case(&named.value))
        .cloned()
        .ok_or_else(|| {
            Error::new(
                named.span,
                format!(
                    "{} field `{}` is not a searchable field of `{}`",
                    what, named.value, struct_name
                ),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(tokens: &str) -> Result<String> {
        let input: DeriveInput = syn::parse_str(tokens)?;
        record_derive_impl(input).map(|ts| ts.to_string().replace(' ', ""))
    }

    #[test]
    fn test_generates_registry_and_constants() {
        let out = expand(
            r#"
            #[sift(key = "Id", sort = "datejoined", rename_all = "PascalCase")]
            struct Patron {
                id: u32,
                date_joined: Option<NaiveDate>,
                #[sift(skip)]
                notes: String,
            }
            "#,
        )
        .unwrap();

        assert!(out.contains("pubconstDATE_JOINED"));
        assert!(out.contains("constDEFAULT_SORT:&'staticstr=\"DateJoined\""));
        assert!(out.contains("constPRIMARY_KEY:&'staticstr=\"Id\""));
        assert!(out.contains(".field::<Option<NaiveDate>>(\"DateJoined\""));
        assert!(!out.contains("NOTES"));
    }

    #[test]
    fn test_sort_defaults_to_key() {
        let out = expand(
            r#"
            #[sift(key = "id")]
            struct Task { id: u32, title: String }
            "#,
        )
        .unwrap();
        assert!(out.contains("constDEFAULT_SORT:&'staticstr=\"id\""));
    }

    #[test]
    fn test_missing_key() {
        let err = expand("struct Task { id: u32 }").unwrap_err();
        assert!(err.to_string().contains("needs a primary key"));
    }

    #[test]
    fn test_unknown_key() {
        let err = expand(r#"#[sift(key = "uuid")] struct Task { id: u32 }"#).unwrap_err();
        assert!(err
            .to_string()
            .contains("key field `uuid` is not a searchable field of `Task`"));
    }

    #[test]
    fn test_skipped_sort_field() {
        let err = expand(
            r#"#[sift(key = "id", sort = "rank")] struct Task { id: u32, #[sift(skip)] rank: u8 }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("sort field `rank`"));
    }

    #[test]
    fn test_duplicate_names() {
        let err = expand(
            r#"#[sift(key = "id")] struct Task { id: u32, #[sift(rename = "ID")] other: u32 }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate field name `ID`"));
    }

    #[test]
    fn test_rejects_tuple_struct_and_generics() {
        let err = expand(r#"#[sift(key = "id")] struct Task(u32);"#).unwrap_err();
        assert!(err.to_string().contains("named fields"));

        let err = expand(r#"#[sift(key = "id")] struct Task<T> { id: T }"#).unwrap_err();
        assert!(err.to_string().contains("generic"));
    }

    #[test]
    fn test_unusable_rename() {
        let err = expand(
            r#"#[sift(key = "id")] struct Task { id: u32, #[sift(rename = "first name")] name: String }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("usable as an identifier"));
    }
}
