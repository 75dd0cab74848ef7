//! `[site]` section.

use macros::Config;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::section::head::{HeadTag, validate_head_tags};
use crate::config::types::{ConfigDiagnostics, FieldPath};
use crate::core::BasePath;

const EXTRA_FIELD: FieldPath = FieldPath::new("site.extra");

/// Manifest keys that `site.extra` entries may not shadow.
const RESERVED_KEYS: [&str; 5] = ["base", "title", "description", "head", "themeConfig"];

/// Core site identity and addressing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title, shown in the browser tab and the navigation bar.
    pub title: String,

    /// One-line description used for the meta description tag.
    pub description: String,

    /// URL path prefix the site is served under.
    #[config(default = "/", inline_doc = "must start and end with /")]
    pub base: BasePath,

    /// Full public URL of the deployed site, including the base path.
    #[config(status = experimental)]
    pub url: Option<String>,

    /// Tags injected into `<head>` on every page, in authored order.
    #[serde(default)]
    #[config(skip)]
    pub head: Vec<HeadTag>,

    /// Free-form values forwarded to the manifest untouched.
    #[serde(default)]
    #[config(skip)]
    pub extra: FxHashMap<String, toml::Value>,

    /// Accept fields marked experimental without per-field hints.
    #[config(status = hidden)]
    pub allow_experimental: bool,
}

impl SiteSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(url) = &self.url {
            self.check_url(url, diag);
        }

        validate_head_tags(&self.head, diag);

        // Extra values land at the manifest top level, so they must not
        // shadow the fixed keys
        for key in RESERVED_KEYS {
            if self.extra.contains_key(key) {
                diag.error_with_hint(
                    EXTRA_FIELD,
                    format!("'{key}' would shadow the manifest key of the same name"),
                    "configure the corresponding [site] or [theme] field instead",
                );
            }
        }
    }

    /// `site.url` must be an absolute http(s) URL with a host.
    fn check_url(&self, url: &str, diag: &mut ConfigDiagnostics) {
        match url::Url::parse(url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!("unsupported scheme '{}'", parsed.scheme()),
                        "use format like https://example.com",
                    );
                } else if parsed.host_str().is_none() {
                    diag.error(Self::FIELDS.url, "missing host");
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::FIELDS.url,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }
    }
}
