//! Config derive macro.
//!
//! One derive produces three things for a section struct:
//! - `FIELDS`: const field path accessors for diagnostics
//! - `template()` / `template_with_header()`: commented TOML scaffold
//! - `validate_field_status()`: experimental/deprecated checks

mod emit;
mod parse;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use emit::{generate_template_code, infer_section, needs_runtime_default};
use parse::{ConfigField, FieldStatus, extract_doc_comment, get_section, parse_status};

/// Generate the Config implementation for one struct.
pub fn derive(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let fields_struct = syn::Ident::new(&format!("{name}Fields"), name.span());

    let section = get_section(&input.attrs).unwrap_or_else(|| infer_section(&name.to_string()));
    let section_doc = extract_doc_comment(&input.attrs).unwrap_or_default();
    let section_status = parse_status(&input.attrs);

    let Data::Struct(data) = &input.data else {
        return quote! { compile_error!("Config can only be derived for structs"); };
    };
    let Fields::Named(named) = &data.fields else {
        return quote! { compile_error!("Config requires named struct fields"); };
    };

    let infos: Vec<ConfigField> =
        named.named.iter().filter_map(ConfigField::from_field).collect();

    // FIELDS struct: every non-skip field gets a path constant
    let path_fields: Vec<_> = infos.iter().filter(|field| !field.skip).collect();

    let path_decls = path_fields.iter().map(|field| {
        let ident = &field.name;
        quote! { pub #ident: crate::config::FieldPath, }
    });

    let path_inits = path_fields.iter().map(|field| {
        let ident = &field.name;
        let full_path = join_path(&section, &field.toml_name);
        quote! { #ident: crate::config::FieldPath::new(#full_path), }
    });

    // Template: skip + hidden fields are excluded
    let template_fields: Vec<_> = infos
        .iter()
        .filter(|field| !field.skip && field.status != FieldStatus::Hidden)
        .collect();
    let template_code = generate_template_code(&template_fields);

    // Plain fields of this struct (not nested sections)
    let own_fields: Vec<_> = infos.iter().filter(|field| !field.skip && !field.sub).collect();

    let status_checks: Vec<_> = own_fields
        .iter()
        .filter(|field| field.status.is_flagged())
        .map(|field| {
            let ident = &field.name;
            let full_path = join_path(&section, &field.toml_name);
            let status = field.status.to_tokens();
            quote! {
                if self.#ident != default.#ident {
                    crate::config::types::check_field_status(#full_path, #status, diag);
                }
            }
        })
        .collect();

    let nested_calls: Vec<_> = infos
        .iter()
        .filter(|field| !field.skip && field.sub)
        .map(|field| {
            let ident = &field.name;
            quote! { self.#ident.validate_field_status(diag); }
        })
        .collect();

    // Section-level status fires when any own field deviates from defaults
    let section_status_check = if section_status.is_flagged() && !own_fields.is_empty() {
        let status = section_status.to_tokens();
        let deviations: Vec<_> = own_fields
            .iter()
            .map(|field| {
                let ident = &field.name;
                quote! { self.#ident != default.#ident }
            })
            .collect();
        quote! {
            if #(#deviations)||* {
                crate::config::types::check_section_status(#section, #status, diag);
            }
        }
    } else {
        quote! {}
    };

    let runtime_default = quote! { let default = Self::default(); };
    let needs_default = (section_status.is_flagged() && !own_fields.is_empty())
        || own_fields.iter().any(|field| field.status.is_flagged());
    let default_def = needs_default.then_some(runtime_default.clone()).unwrap_or_default();
    let template_default_def = needs_runtime_default(&template_fields)
        .then_some(runtime_default)
        .unwrap_or_default();

    quote! {
        /// Per-field path constants, generated by `#[derive(Config)]`.
        #[allow(non_camel_case_types)]
        pub struct #fields_struct {
            #(#path_decls)*
        }

        impl #name {
            /// Paths used when reporting diagnostics, e.g. `Self::FIELDS.title`.
            pub const FIELDS: #fields_struct = #fields_struct {
                #(#path_inits)*
            };

            /// TOML section this struct maps to, e.g. `site`.
            pub const TEMPLATE_SECTION: &'static str = #section;

            /// Comment lines placed above the section header.
            pub const TEMPLATE_DOC: &'static str = #section_doc;

            /// Generate the TOML template body for this section.
            pub fn template() -> String {
                #template_default_def
                let mut out = String::new();
                #template_code
                out
            }

            /// Generate the TOML template with a `[section]` header.
            pub fn template_with_header() -> String {
                let mut out = String::new();
                for line in Self::TEMPLATE_DOC.lines() {
                    out.push_str("# ");
                    out.push_str(line.trim());
                    out.push('\n');
                }
                if !Self::TEMPLATE_SECTION.is_empty() {
                    out.push_str(&format!("[{}]\n", Self::TEMPLATE_SECTION));
                }
                out.push_str(&Self::template());
                out
            }

            /// Flag uses of experimental, deprecated or unimplemented fields.
            #[allow(unused_variables)]
            pub fn validate_field_status(&self, diag: &mut crate::config::ConfigDiagnostics) {
                #default_def
                #section_status_check
                #(#status_checks)*
                #(#nested_calls)*
            }
        }
    }
}

fn join_path(section: &str, field: &str) -> String {
    if section.is_empty() {
        field.to_string()
    } else {
        format!("{section}.{field}")
    }
}
