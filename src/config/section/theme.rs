//! `[theme]` section.

use macros::Config;
use serde::{Deserialize, Serialize};

use crate::config::types::{ConfigDiagnostics, FieldPath};

const NAV_FIELD: FieldPath = FieldPath::new("theme.nav");

/// Theme presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
pub struct ThemeSectionConfig {
    /// Logo asset path shown in the navigation bar.
    pub logo: Option<String>,

    /// Top navigation bar entries, in display order.
    #[serde(default)]
    #[config(skip)]
    pub nav: Vec<NavEntry>,

    /// Sidebar behavior.
    #[config(inline_doc = "\"auto\", \"disabled\", or a manual tree")]
    pub sidebar: SidebarConfig,
}

impl ThemeSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (i, entry) in self.nav.iter().enumerate() {
            entry.validate(i, diag);
        }
        if let SidebarConfig::Tree(items) = &self.sidebar {
            validate_sidebar_items(items, diag);
        }
    }

    /// Rewrite backslashes in the logo path to forward slashes.
    ///
    /// Returns the corrected value when a rewrite happened so the
    /// caller can tell the author about it.
    pub fn normalize_logo(&mut self) -> Option<String> {
        let logo = self.logo.as_mut()?;
        if !logo.contains('\\') {
            return None;
        }
        *logo = logo.replace('\\', "/");
        Some(logo.clone())
    }
}

/// One navigation bar entry.
///
/// ```toml
/// [[theme.nav]]
/// text = "Guide"
/// link = "/guide/"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Label shown in the bar.
    pub text: String,
    /// Route or absolute URL the entry points at.
    pub link: String,
}

impl NavEntry {
    fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        if self.text.trim().is_empty() {
            diag.error(NAV_FIELD, format!("entry {index}: text must not be empty"));
        }
        if self.link.is_empty() {
            diag.error(NAV_FIELD, format!("entry {index}: link must not be empty"));
        } else if self.link.chars().any(char::is_whitespace) {
            diag.error(
                NAV_FIELD,
                format!("entry {index}: link '{}' contains whitespace", self.link),
            );
        } else if self.link.contains("://") {
            // External entries must be well-formed http(s) URLs
            match url::Url::parse(&self.link) {
                Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
                    diag.error_with_hint(
                        NAV_FIELD,
                        format!("entry {index}: unsupported scheme '{}'", parsed.scheme()),
                        "external links must use http or https",
                    );
                }
                Err(e) => {
                    diag.error(NAV_FIELD, format!("entry {index}: invalid URL: {e}"));
                }
                Ok(_) => {}
            }
        } else if !self.link.starts_with(['/', '#']) {
            // Probably meant as site-relative, which the consumer roots at `/`
            diag.warn(
                NAV_FIELD,
                format!("entry {index}: link '{}' does not start with '/'", self.link),
            );
        }
    }
}

// ============================================================================
// Sidebar
// ============================================================================

/// Sidebar setting as authored: a mode keyword or a manual tree.
///
/// ```toml
/// sidebar = "auto"
/// ```
/// or
/// ```toml
/// [[theme.sidebar]]
/// text = "Guide"
/// link = "/guide/"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarConfig {
    Switch(SidebarSwitch),
    Tree(Vec<SidebarItem>),
}

/// Keyword form of the sidebar setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarSwitch {
    #[default]
    Auto,
    Disabled,
}

/// Effective sidebar mode, independent of how it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarMode {
    Auto,
    ManualTree,
    Disabled,
}

impl SidebarMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::ManualTree => "manual-tree",
            Self::Disabled => "disabled",
        }
    }
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self::Switch(SidebarSwitch::Auto)
    }
}

impl SidebarConfig {
    pub fn mode(&self) -> SidebarMode {
        match self {
            Self::Switch(SidebarSwitch::Auto) => SidebarMode::Auto,
            Self::Switch(SidebarSwitch::Disabled) => SidebarMode::Disabled,
            Self::Tree(_) => SidebarMode::ManualTree,
        }
    }

    /// Manual tree items, if the sidebar was written as a tree.
    pub fn tree(&self) -> Option<&[SidebarItem]> {
        match self {
            Self::Tree(items) => Some(items),
            Self::Switch(_) => None,
        }
    }
}

/// One node of a manual sidebar tree. Leaves carry a link, groups
/// carry child items, a node may do both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidebarItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SidebarItem>,
}

impl SidebarItem {
    /// Total number of nodes in this subtree, itself included.
    pub fn count(&self) -> usize {
        1 + self.items.iter().map(SidebarItem::count).sum::<usize>()
    }
}

fn validate_sidebar_items(items: &[SidebarItem], diag: &mut ConfigDiagnostics) {
    const FIELD: FieldPath = FieldPath::new("theme.sidebar");

    for item in items {
        if item.text.trim().is_empty() {
            diag.error(FIELD, "item text must not be empty");
        }
        if item.link.is_none() && item.items.is_empty() {
            diag.error_with_hint(
                FIELD,
                format!("item '{}' has neither a link nor child items", item.text),
                "give it a `link` or nest entries under `items`",
            );
        }
        validate_sidebar_items(&item.items, diag);
    }
}
