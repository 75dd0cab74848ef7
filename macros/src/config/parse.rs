//! Attribute and field parsing for the Config derive.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Lit, Meta, Type};

/// Field status, controls template rendering and validation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Normal,
    Experimental,
    NotImplemented,
    Deprecated,
    Hidden,
}

impl FieldStatus {
    /// True for statuses that trigger a runtime diagnostic.
    pub fn is_flagged(self) -> bool {
        matches!(
            self,
            Self::Experimental | Self::NotImplemented | Self::Deprecated
        )
    }

    /// Path to the runtime counterpart in the main crate.
    pub fn to_tokens(self) -> TokenStream {
        match self {
            Self::Experimental => quote! { crate::config::types::FieldStatus::Experimental },
            Self::NotImplemented => quote! { crate::config::types::FieldStatus::NotImplemented },
            Self::Deprecated => quote! { crate::config::types::FieldStatus::Deprecated },
            Self::Normal | Self::Hidden => quote! {},
        }
    }
}

/// Parsed per-field information.
pub struct ConfigField {
    pub name: syn::Ident,
    pub toml_name: String,
    pub doc: Option<String>,
    pub inline_doc: Option<String>,
    pub status: FieldStatus,
    pub default: Option<String>,
    pub skip: bool,
    pub sub: bool,
    pub ty: Type,
}

impl ConfigField {
    pub fn from_field(field: &syn::Field) -> Option<Self> {
        let ident = field.ident.as_ref()?;
        let attrs = &field.attrs;

        Some(Self {
            name: ident.clone(),
            toml_name: get_string_attr(attrs, "name").unwrap_or_else(|| ident.to_string()),
            doc: extract_doc_comment(attrs),
            inline_doc: get_string_attr(attrs, "inline_doc"),
            status: parse_status(attrs),
            default: get_string_attr(attrs, "default"),
            skip: has_flag(attrs, "skip"),
            sub: has_flag(attrs, "sub"),
            ty: field.ty.clone(),
        })
    }
}

/// Section path from `#[config(section = "xxx")]`.
pub fn get_section(attrs: &[Attribute]) -> Option<String> {
    get_string_attr(attrs, "section")
}

/// String value from `#[config(key = "value")]`.
fn get_string_attr(attrs: &[Attribute], key: &str) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        let mut value = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                let lit: syn::LitStr = meta.value()?.parse()?;
                value = Some(lit.value());
            } else if meta.input.peek(syn::Token![=]) {
                // Consume other key = value pairs so parsing continues
                let _: syn::Token![=] = meta.input.parse()?;
                if meta.input.parse::<syn::Ident>().is_err() {
                    let _ = meta.input.parse::<syn::Lit>();
                }
            }
            Ok(())
        });
        if value.is_some() {
            return value;
        }
    }
    None
}

/// Bare flag like `#[config(skip)]`.
fn has_flag(attrs: &[Attribute], key: &str) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                found = true;
            } else if meta.input.peek(syn::Token![=]) {
                // Consume other key = value pairs so parsing continues
                let _: syn::Token![=] = meta.input.parse()?;
                if meta.input.parse::<syn::Ident>().is_err() {
                    let _ = meta.input.parse::<syn::Lit>();
                }
            }
            Ok(())
        });
        if found {
            return true;
        }
    }
    false
}

/// Status from `#[config(status = experimental)]`. The value is a bare
/// ident, not a string literal.
pub fn parse_status(attrs: &[Attribute]) -> FieldStatus {
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        let mut status = FieldStatus::Normal;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("status") {
                let _: syn::Token![=] = meta.input.parse()?;
                let ident: syn::Ident = meta.input.parse()?;
                status = match ident.to_string().as_str() {
                    "experimental" => FieldStatus::Experimental,
                    "not_implemented" => FieldStatus::NotImplemented,
                    "deprecated" => FieldStatus::Deprecated,
                    "hidden" => FieldStatus::Hidden,
                    _ => FieldStatus::Normal,
                };
            } else if meta.input.peek(syn::Token![=]) {
                // Skip other key = value pairs (section = "xxx", default = "x")
                let _: syn::Token![=] = meta.input.parse()?;
                if meta.input.parse::<syn::Ident>().is_err() {
                    let _ = meta.input.parse::<syn::Lit>();
                }
            }
            Ok(())
        });
        if status != FieldStatus::Normal {
            return status;
        }
    }
    FieldStatus::Normal
}

/// Join `#[doc = "..."]` lines into one trimmed block.
pub fn extract_doc_comment(attrs: &[Attribute]) -> Option<String> {
    let docs: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(nv) = &attr.meta
                && let syn::Expr::Lit(expr_lit) = &nv.value
                && let Lit::Str(s) = &expr_lit.lit
            {
                return Some(s.value());
            }
            None
        })
        .collect();

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n").trim().to_string())
    }
}
