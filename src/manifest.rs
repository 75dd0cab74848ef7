//! Exported site manifest.
//!
//! The manifest is the JSON contract consumed by site generators and
//! theme runtimes. Its shape is fixed:
//!
//! ```json
//! {
//!   "base": "/rust_camp_tutorial/",
//!   "title": "...",
//!   "description": "...",
//!   "head": [["link", { "rel": "icon", "href": "/logo.png" }]],
//!   "themeConfig": { "logo": "...", "nav": [...], "sidebar": "auto" }
//! }
//! ```
//!
//! Field order is part of the contract, so the struct fields are laid
//! out to serialize in exactly that order.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{HeadAttrs, NavEntry, SidebarConfig, SidebarItem, SidebarSwitch, SiteConfig};
use crate::core::BasePath;

/// Root manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteManifest {
    pub base: BasePath,
    pub title: String,
    pub description: String,
    pub head: Vec<HeadEntry>,
    #[serde(rename = "themeConfig")]
    pub theme_config: ThemeManifest,
    /// Free-form config values, exported verbatim at the top level.
    /// Sorted so repeated exports produce identical output.
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

/// Head tag as the consumer expects it: a `[tag, attrs]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadEntry(pub String, pub HeadAttrs);

/// Theme block of the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub nav: Vec<NavEntry>,
    pub sidebar: SidebarSetting,
}

impl SiteManifest {
    /// Build the manifest from a loaded configuration.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            base: config.site.base.clone(),
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            head: config
                .site
                .head
                .iter()
                .map(|t| HeadEntry(t.tag.clone(), t.attrs.clone()))
                .collect(),
            theme_config: ThemeManifest {
                logo: config.theme.logo.clone(),
                nav: config.theme.nav.clone(),
                sidebar: SidebarSetting::from_config(&config.theme.sidebar),
            },
            extra: config
                .site
                .extra
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Serialize to JSON, compact by default.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

// ============================================================================
// Sidebar encoding
// ============================================================================

/// Sidebar value in the manifest: `"auto"`, `false`, or an item array.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarSetting {
    Auto,
    Disabled,
    Tree(Vec<SidebarItem>),
}

impl SidebarSetting {
    fn from_config(sidebar: &SidebarConfig) -> Self {
        match sidebar {
            SidebarConfig::Switch(SidebarSwitch::Auto) => Self::Auto,
            SidebarConfig::Switch(SidebarSwitch::Disabled) => Self::Disabled,
            SidebarConfig::Tree(items) => Self::Tree(items.clone()),
        }
    }
}

impl Serialize for SidebarSetting {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Disabled => serializer.serialize_bool(false),
            Self::Tree(items) => items.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SidebarSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SidebarVisitor;

        impl<'de> Visitor<'de> for SidebarVisitor {
            type Value = SidebarSetting;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"auto\", false, or an array of sidebar items")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                match v {
                    "auto" => Ok(SidebarSetting::Auto),
                    other => Err(E::custom(format!("unknown sidebar keyword '{other}'"))),
                }
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v {
                    Err(E::custom("sidebar: true has no meaning, use \"auto\""))
                } else {
                    Ok(SidebarSetting::Disabled)
                }
            }

            fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let items =
                    Vec::deserialize(serde::de::value::SeqAccessDeserializer::new(seq))?;
                Ok(SidebarSetting::Tree(items))
            }
        }

        deserializer.deserialize_any(SidebarVisitor)
    }
}
