//! TOML template emission for the Config derive.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use super::parse::{ConfigField, FieldStatus};

/// Generate the template body code for all fields.
pub fn generate_template_code(fields: &[&ConfigField]) -> TokenStream {
    let field_codes: Vec<TokenStream> = fields.iter().map(|f| field_template_code(f)).collect();
    quote! { #(#field_codes)* }
}

/// True when any field renders its value from `Self::default()`.
/// Optional fields and fields with an explicit default render from
/// compile-time strings instead.
pub fn needs_runtime_default(fields: &[&ConfigField]) -> bool {
    fields.iter().any(|f| {
        if f.sub || f.status == FieldStatus::Hidden {
            return false;
        }
        f.default.is_none() && !type_to_string(&f.ty).starts_with("Option<")
    })
}

/// Template code for a single field.
fn field_template_code(info: &ConfigField) -> TokenStream {
    let field_name = &info.name;
    let toml_name = &info.toml_name;

    let doc_code = if let Some(ref doc) = info.doc {
        let doc_block: String = doc.lines().map(|l| format!("# {}\n", l.trim())).collect();
        quote! { out.push_str(#doc_block); }
    } else {
        quote! {}
    };

    let (commented, status_note) = match info.status {
        FieldStatus::Normal => (false, None),
        FieldStatus::Experimental => (
            true,
            Some("# (experimental) this feature may change or be removed\n"),
        ),
        FieldStatus::NotImplemented => (true, Some("# (not implemented)\n")),
        FieldStatus::Deprecated => (
            true,
            Some("# (deprecated) this option will be removed in a future version\n"),
        ),
        FieldStatus::Hidden => return quote! {},
    };

    let status_code = match status_note {
        Some(note) => quote! { out.push_str(#note); },
        None => quote! {},
    };

    // Nested section: inline its full template
    if info.sub {
        let field_ty = &info.ty;
        return quote! {
            out.push('\n');
            #doc_code
            out.push_str(&<#field_ty>::template_with_header());
        };
    }

    let ty_str = type_to_string(&info.ty);
    let optional = ty_str.starts_with("Option<");

    // Optional without explicit default: commented-out placeholder
    if optional && info.default.is_none() {
        let line = match &info.inline_doc {
            Some(inline) => format!("# {toml_name} = \"\"  # {inline}\n"),
            None => format!("# {toml_name} = \"\"\n"),
        };
        return quote! {
            #doc_code
            #status_code
            out.push_str(#line);
        };
    }

    let prefix = if commented { "# " } else { "" };

    // Explicit default: value known at macro expansion time
    if let Some(ref default_val) = info.default {
        let formatted = toml_literal_for(default_val, &ty_str);
        let line = match &info.inline_doc {
            Some(inline) => format!("{prefix}{toml_name} = {formatted}  # {inline}\n"),
            None => format!("{prefix}{toml_name} = {formatted}\n"),
        };
        return quote! {
            #doc_code
            #status_code
            out.push_str(#line);
        };
    }

    // Otherwise serialize the Default::default() value at runtime
    let inline_code = match &info.inline_doc {
        Some(inline) => quote! {
            out.push_str("  # ");
            out.push_str(#inline);
        },
        None => quote! {},
    };

    quote! {
        #doc_code
        #status_code
        out.push_str(#prefix);
        out.push_str(#toml_name);
        out.push_str(" = ");
        out.push_str(&toml::Value::try_from(default.#field_name.clone())
            .map(|v| v.to_string())
            .unwrap_or_default());
        #inline_code
        out.push('\n');
    }
}

fn type_to_string(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}

/// Section name inferred from the struct name:
/// `ThemeSectionConfig` → `theme`, `SidebarConfig` → `sidebar`.
pub fn infer_section(name: &str) -> String {
    let name = name
        .strip_suffix("SectionConfig")
        .or_else(|| name.strip_suffix("Config"))
        .or_else(|| name.strip_suffix("Settings"))
        .unwrap_or(name);
    to_snake_case(name)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Quote a template default according to the field type. Strings, paths
/// and enum-like types get TOML string quoting, numerics and bools pass
/// through.
fn toml_literal_for(value: &str, ty: &str) -> String {
    match ty {
        "String" | "PathBuf" => format!("\"{value}\""),
        _ if !ty.starts_with("Option<")
            && !ty.starts_with("Vec<")
            && !ty.ends_with("Config")
            && !ty.ends_with("Settings")
            && !matches!(
                ty,
                "bool"
                    | "u8"
                    | "u16"
                    | "u32"
                    | "u64"
                    | "usize"
                    | "i8"
                    | "i16"
                    | "i32"
                    | "i64"
                    | "isize"
                    | "f32"
                    | "f64"
            ) =>
        {
            format!("\"{value}\"")
        }
        _ => value.to_string(),
    }
}
