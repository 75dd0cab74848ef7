//! Proc macros for folio.
//!
//! # Config derive macro
//!
//! Generates field path accessors, a commented TOML template, and
//! field-status validation for a config section struct.
//!
//! ```ignore
//! #[derive(Config)]
//! #[config(section = "site")]
//! /// Site metadata.
//! pub struct SiteSectionConfig {
//!     /// Site title shown in the browser tab.
//!     pub title: String,
//!
//!     /// URL path prefix the site is served under.
//!     #[config(default = "/", inline_doc = "must begin and end with /")]
//!     pub base: BasePath,
//!
//!     /// Full site URL.
//!     #[config(status = experimental)]
//!     pub url: Option<String>,
//!
//!     /// Runtime-only field.
//!     #[config(skip)]
//!     pub extra: FxHashMap<String, toml::Value>,
//! }
//!
//! // Generates:
//! // - SiteSectionConfig::FIELDS.title -> FieldPath("site.title")
//! // - SiteSectionConfig::template() -> commented TOML body
//! // - SiteSectionConfig::template_with_header() -> with [section] header
//! // - SiteSectionConfig::validate_field_status(&mut diag)
//! ```
//!
//! # Attributes
//!
//! Struct-level:
//! - `#[config(section = "path")]` - TOML section path (inferred from the
//!   struct name when absent: `ThemeSectionConfig` → `theme`)
//! - `#[config(status = ...)]` - status applied to the whole section
//!
//! Field-level:
//! - `#[config(skip)]` - exclude from FIELDS and template (runtime fields)
//! - `#[config(sub)]` - nested Config struct, template inlined recursively
//! - `#[config(name = "x")]` - custom TOML key
//! - `#[config(default = "x")]` - template default value
//! - `#[config(inline_doc = "x")]` - trailing `# x` comment on the line
//! - `#[config(status = experimental | deprecated | not_implemented | hidden)]`

mod config;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro that generates FIELDS, template() and validate_field_status().
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    config::derive(&input).into()
}
