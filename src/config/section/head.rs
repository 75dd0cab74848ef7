//! Head injection descriptors.
//!
//! Each entry describes one HTML tag injected into the `<head>` of
//! every generated page: a tag name plus an ordered attribute map.
//! Sequence order is significant and duplicate tags are permitted
//! (several `<meta>` or `<link>` entries are normal).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::types::{ConfigDiagnostics, FieldPath};
use crate::utils::html;

const HEAD_FIELD: FieldPath = FieldPath::new("site.head");

/// `tag` must be a bare element name, e.g. `link` or `meta`.
static TAG_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]*$").unwrap()
});

/// One `<head>` tag descriptor.
///
/// ```toml
/// [[site.head]]
/// tag = "link"
/// attrs = { rel = "icon", href = "/logo.png" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadTag {
    /// Element name without angle brackets.
    pub tag: String,
    /// Attributes in authored order.
    #[serde(default)]
    pub attrs: HeadAttrs,
}

impl HeadTag {
    pub fn new(tag: impl Into<String>, attrs: HeadAttrs) -> Self {
        Self {
            tag: tag.into(),
            attrs,
        }
    }

    /// Render the descriptor to its literal tag string.
    ///
    /// Void elements (`link`, `meta`, ...) render without a closing tag.
    /// Attribute values are escaped; an empty value renders as a bare
    /// attribute name.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.tag.len() + 16);
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in self.attrs.iter() {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&html::escape_attr(value));
                out.push('"');
            }
        }
        out.push('>');
        if !html::is_void_element(&self.tag) {
            out.push_str("</");
            out.push_str(&self.tag);
            out.push('>');
        }
        out
    }
}

/// Render all head descriptors, one tag per line, in sequence order.
pub fn render_head(tags: &[HeadTag]) -> String {
    tags.iter()
        .map(|t| t.to_html())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate head entries: tag names and attribute names.
///
/// Duplicate tags in the sequence are fine, duplicate attribute names
/// inside one tag are already rejected at parse time.
pub fn validate_head_tags(tags: &[HeadTag], diag: &mut ConfigDiagnostics) {
    for (i, entry) in tags.iter().enumerate() {
        if entry.tag.contains(['<', '>']) {
            diag.error_with_hint(
                HEAD_FIELD,
                format!("entry {i}: tag '{}' contains angle brackets", entry.tag),
                "write the element name only, e.g. `link` instead of `<link>`",
            );
            continue;
        }
        if !TAG_NAME.is_match(&entry.tag) {
            diag.error(
                HEAD_FIELD,
                format!("entry {i}: '{}' is not a valid tag name", entry.tag),
            );
        }
        for (name, _) in entry.attrs.iter() {
            if name.is_empty() || name.contains([' ', '<', '>', '"', '\'', '=', '/']) {
                diag.error(
                    HEAD_FIELD,
                    format!("entry {i}: invalid attribute name '{name}'"),
                );
            }
        }
    }
}

// ============================================================================
// Ordered attribute map
// ============================================================================

/// Attribute map that preserves authored order.
///
/// Serializes as a plain map; deserializes from a map keeping source
/// order and rejecting duplicate names (the consuming tool would
/// silently drop one, which is never what the author meant).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadAttrs(Vec<(String, String)>);

impl HeadAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for HeadAttrs {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl Serialize for HeadAttrs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeadAttrs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AttrVisitor;

        impl<'de> Visitor<'de> for AttrVisitor {
            type Value = HeadAttrs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of attribute names to string values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs: Vec<(String, String)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    if pairs.iter().any(|(n, _)| *n == name) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate attribute name '{name}'"
                        )));
                    }
                    pairs.push((name, value));
                }
                Ok(HeadAttrs(pairs))
            }
        }

        deserializer.deserialize_map(AttrVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.site.head.is_empty());
    }

    #[test]
    fn test_icon_link_entry() {
        let config = test_parse_config(
            "[[site.head]]\ntag = \"link\"\nattrs = { rel = \"icon\", href = \"/logo.png\" }",
        );
        assert_eq!(config.site.head.len(), 1);
        let entry = &config.site.head[0];
        assert_eq!(entry.tag, "link");
        assert_eq!(entry.attrs.get("rel"), Some("icon"));
        assert_eq!(entry.attrs.get("href"), Some("/logo.png"));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let config = test_parse_config(
            r#"[[site.head]]
tag = "meta"
attrs = { name = "a" }

[[site.head]]
tag = "meta"
attrs = { name = "b" }

[[site.head]]
tag = "link"
attrs = { rel = "icon", href = "/logo.png" }
"#,
        );
        assert_eq!(config.site.head.len(), 3);
        assert_eq!(config.site.head[0].attrs.get("name"), Some("a"));
        assert_eq!(config.site.head[1].attrs.get("name"), Some("b"));
        assert_eq!(config.site.head[2].tag, "link");
    }

    #[test]
    fn test_attrs_keep_authored_order() {
        let config = test_parse_config(
            "[[site.head]]\ntag = \"meta\"\nattrs = { name = \"viewport\", content = \"width=device-width\" }",
        );
        let names: Vec<&str> = config.site.head[0].attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "content"]);
    }

    #[test]
    fn test_duplicate_attr_name_rejected() {
        let toml = "tag = \"meta\"\nattrs = { name = \"a\", name = \"b\" }";
        // Duplicate keys are invalid TOML before they ever reach the
        // visitor, but JSON input exercises our own duplicate check
        let json = r#"{"tag": "meta", "attrs": {"name": "a", "name": "b"}}"#;
        assert!(toml::from_str::<HeadTag>(toml).is_err());
        assert!(serde_json::from_str::<HeadTag>(json).is_err());
    }

    #[test]
    fn test_tag_name_required() {
        assert!(toml::from_str::<HeadTag>("attrs = { rel = \"icon\" }").is_err());
    }

    #[test]
    fn test_validate_accepts_common_tags() {
        let mut diag = ConfigDiagnostics::new();
        let tags = vec![
            HeadTag::new("link", [("rel", "icon"), ("href", "/logo.png")].into()),
            HeadTag::new("meta", [("name", "x"), ("content", "y")].into()),
            HeadTag::new("custom-element", HeadAttrs::new()),
        ];
        validate_head_tags(&tags, &mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_validate_rejects_angle_brackets() {
        let mut diag = ConfigDiagnostics::new();
        let tags = vec![HeadTag::new("<link>", HeadAttrs::new())];
        validate_head_tags(&tags, &mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_tag_and_attr_names() {
        let mut diag = ConfigDiagnostics::new();
        let tags = vec![
            HeadTag::new("1link", HeadAttrs::new()),
            HeadTag::new("meta", [("bad name", "x")].into()),
        ];
        validate_head_tags(&tags, &mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_to_html_void_element() {
        let tag = HeadTag::new("link", [("rel", "icon"), ("href", "/logo.png")].into());
        assert_eq!(tag.to_html(), r#"<link rel="icon" href="/logo.png">"#);
    }

    #[test]
    fn test_to_html_non_void_element() {
        let tag = HeadTag::new("script", [("src", "/a.js")].into());
        assert_eq!(tag.to_html(), r#"<script src="/a.js"></script>"#);
    }

    #[test]
    fn test_to_html_escapes_values() {
        let tag = HeadTag::new("meta", [("content", "a\"b<c>")].into());
        assert_eq!(tag.to_html(), "<meta content=\"a&quot;b&lt;c&gt;\">");
    }

    #[test]
    fn test_to_html_bare_attribute() {
        let tag = HeadTag::new("script", [("src", "/a.js"), ("defer", "")].into());
        assert_eq!(tag.to_html(), r#"<script src="/a.js" defer></script>"#);
    }

    #[test]
    fn test_render_head_joins_in_order() {
        let tags = vec![
            HeadTag::new("meta", [("charset", "utf-8")].into()),
            HeadTag::new("link", [("rel", "icon"), ("href", "/logo.png")].into()),
        ];
        let html = render_head(&tags);
        assert_eq!(
            html,
            "<meta charset=\"utf-8\">\n<link rel=\"icon\" href=\"/logo.png\">"
        );
    }

    #[test]
    fn test_attrs_json_round_trip_keeps_order() {
        let attrs: HeadAttrs = [("rel", "icon"), ("href", "/logo.png")].into();
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"rel":"icon","href":"/logo.png"}"#);
        let parsed: HeadAttrs = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, attrs);
    }
}
