//! Attribute parsing for the `Record` and `FieldEnum` derive macros.
//!
//! Both derives read `#[sift(...)]`:
//!
//! - on a struct: `key = "..."`, `sort = "..."`, `rename_all = "..."`
//! - on a field or variant: `rename = "..."`, `skip` (fields only)

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, LitStr, Meta, MetaNameValue, Result, Token,
};

use super::case::RenameRule;

/// A string attribute value with the span it was written at.
#[derive(Debug, Clone)]
pub struct Named {
    pub value: String,
    pub span: Span,
}

impl From<LitStr> for Named {
    fn from(lit: LitStr) -> Self {
        Named {
            value: lit.value(),
            span: lit.span(),
        }
    }
}

/// Struct-level attributes from `#[sift(...)]`.
#[derive(Debug, Clone, Default)]
pub struct RecordAttr {
    /// Primary key field name, as used in criteria.
    pub key: Option<Named>,
    /// Default sort field name (defaults to the key).
    pub sort: Option<Named>,
    /// Naming rule applied to every field without an explicit rename.
    pub rename_all: Option<RenameRule>,
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("key") => {
                    attr.key = Some(string_value(nv, "key")?.into());
                }
                Meta::NameValue(nv) if nv.path.is_ident("sort") => {
                    attr.sort = Some(string_value(nv, "sort")?.into());
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                    let rule = string_value(nv, "rename_all")?;
                    attr.rename_all = Some(RenameRule::from_str(&rule.value(), rule.span())?);
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown sift attribute. Expected: key = \"...\", sort = \"...\", or rename_all = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Field- or variant-level attributes from `#[sift(...)]`.
#[derive(Debug, Clone)]
pub struct FieldAttr {
    /// Leave this field out of the registry.
    pub skip: bool,
    /// Custom name for criteria lookups.
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FieldAttr {
    fn default() -> Self {
        FieldAttr {
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                    attr.span = p.span();
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    let name = string_value(nv, "rename")?;
                    if name.value().is_empty() {
                        return Err(Error::new(name.span(), "rename must not be empty"));
                    }
                    attr.rename = Some(name.value());
                    attr.span = name.span();
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown sift field attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

fn string_value(nv: &MetaNameValue, name: &str) -> Result<LitStr> {
    match &nv.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        other => Err(Error::new(
            other.span(),
            format!("{} must be a string literal", name),
        )),
    }
}

/// Extract the struct-level `#[sift(...)]` attribute.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    for attr in attrs {
        if attr.path().is_ident("sift") {
            return attr.parse_args::<RecordAttr>();
        }
    }
    Ok(RecordAttr::default())
}

/// Extract `#[sift(...)]` attributes from a field's or variant's attributes.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    for attr in attrs {
        if attr.path().is_ident("sift") {
            return attr.parse_args::<FieldAttr>();
        }
    }
    Ok(FieldAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_record(tokens: &str) -> Result<RecordAttr> {
        syn::parse_str::<RecordAttr>(tokens)
    }

    fn parse_field(tokens: &str) -> Result<FieldAttr> {
        syn::parse_str::<FieldAttr>(tokens)
    }

    #[test]
    fn test_record_key_only() {
        let attr = parse_record(r#"key = "FormID""#).unwrap();
        assert_eq!(attr.key.map(|k| k.value), Some("FormID".to_string()));
        assert!(attr.sort.is_none());
        assert!(attr.rename_all.is_none());
    }

    #[test]
    fn test_record_all_options() {
        let attr =
            parse_record(r#"key = "FormID", sort = "DateJoined", rename_all = "PascalCase""#)
                .unwrap();
        assert_eq!(attr.sort.map(|s| s.value), Some("DateJoined".to_string()));
        assert_eq!(attr.rename_all, Some(RenameRule::PascalCase));
    }

    #[test]
    fn test_record_unknown_rule() {
        let err = parse_record(r#"rename_all = "kebab-case""#).unwrap_err();
        assert!(err.to_string().contains("unknown rename rule"));
    }

    #[test]
    fn test_record_unknown_option() {
        let err = parse_record(r#"table = "patrons""#).unwrap_err();
        assert!(err.to_string().contains("unknown sift attribute"));
    }

    #[test]
    fn test_record_non_string_key() {
        let err = parse_record("key = 1").unwrap_err();
        assert!(err.to_string().contains("key must be a string literal"));
    }

    #[test]
    fn test_field_skip() {
        let attr = parse_field("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.rename, None);
    }

    #[test]
    fn test_field_rename() {
        let attr = parse_field(r#"rename = "FormID""#).unwrap();
        assert!(!attr.skip);
        assert_eq!(attr.rename, Some("FormID".to_string()));
    }

    #[test]
    fn test_field_empty_rename() {
        let err = parse_field(r#"rename = """#).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_field_unknown() {
        let err = parse_field("String").unwrap_err();
        assert!(err.to_string().contains("unknown sift field attribute"));
    }
}
