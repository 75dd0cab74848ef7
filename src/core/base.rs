//! Base path type for type-safe URL prefix handling.
//!
//! - Internal representation: always decoded (human-readable)
//! - Output boundary: encode via [`BasePath::to_encoded`]

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// URL path prefix the built site is served under.
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts and ends with `/`
/// - Forward slashes only, no duplicate separators
///
/// The constructor normalizes rather than rejects: `docs` and `\docs\`
/// both become `/docs/`, the empty string becomes `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(Arc<str>);

impl BasePath {
    /// Create a base path, normalizing separators and slash placement.
    /// Strips query string and fragment.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().replace('\\', "/");

        if trimmed.is_empty() || trimmed == "/" {
            return Self(Arc::from("/"));
        }

        let path = Self::strip_query_fragment(&trimmed);

        // Rebuild from non-empty segments: collapses duplicate slashes
        // and pins the leading and trailing slash in one pass
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Self(Arc::from("/"));
        }

        let mut normalized = String::with_capacity(path.len() + 2);
        for segment in segments {
            normalized.push('/');
            normalized.push_str(segment);
        }
        normalized.push('/');

        Self(Arc::from(normalized))
    }

    /// Strip query string and fragment using the url crate.
    fn strip_query_fragment(path: &str) -> String {
        use percent_encoding::percent_decode_str;

        static ORIGIN: std::sync::OnceLock<url::Url> = std::sync::OnceLock::new();
        let origin = ORIGIN.get_or_init(|| url::Url::parse("http://x").unwrap());

        match origin.join(path) {
            Ok(parsed) => {
                // The url crate hands back a percent-encoded path, decode it
                percent_decode_str(parsed.path())
                    .decode_utf8()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| parsed.path().to_string())
            }
            Err(_) => path.split(['?', '#']).next().unwrap_or(path).to_string(),
        }
    }

    /// Get the decoded base path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the site is served from the server root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "/"
    }

    /// Resolve a site-relative route or asset path against the base.
    ///
    /// `/docs/`.join(`logo.png`) and `/docs/`.join(`/logo.png`) both
    /// yield `/docs/logo.png`.
    pub fn join(&self, route: &str) -> String {
        let route = route.trim_start_matches('/');
        if route.is_empty() {
            return self.0.to_string();
        }
        format!("{}{}", self.0, route)
    }

    /// Encode for href contexts (percent-encode non-ASCII and special
    /// characters, keep `/` intact).
    pub fn to_encoded(&self) -> String {
        use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

        // RFC 3986 unreserved marks stay literal
        const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
            .remove(b'-')
            .remove(b'.')
            .remove(b'_')
            .remove(b'~');

        self.0
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl std::fmt::Display for BasePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self(Arc::from("/"))
    }
}

impl AsRef<str> for BasePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for BasePath {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for BasePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for BasePath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for BasePath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for BasePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BasePath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_normalized_input() {
        let base = BasePath::new("/rust_camp_tutorial/");
        assert_eq!(base.as_str(), "/rust_camp_tutorial/");
    }

    #[test]
    fn test_new_adds_leading_slash() {
        assert_eq!(BasePath::new("docs/").as_str(), "/docs/");
    }

    #[test]
    fn test_new_adds_trailing_slash() {
        assert_eq!(BasePath::new("/docs").as_str(), "/docs/");
    }

    #[test]
    fn test_new_bare_name() {
        assert_eq!(BasePath::new("docs").as_str(), "/docs/");
    }

    #[test]
    fn test_new_empty_is_root() {
        assert_eq!(BasePath::new("").as_str(), "/");
        assert_eq!(BasePath::new("  ").as_str(), "/");
        assert_eq!(BasePath::new("/").as_str(), "/");
    }

    #[test]
    fn test_new_backslashes() {
        assert_eq!(BasePath::new("\\docs\\").as_str(), "/docs/");
        assert_eq!(BasePath::new("docs\\guide").as_str(), "/docs/guide/");
    }

    #[test]
    fn test_new_collapses_duplicate_slashes() {
        assert_eq!(BasePath::new("//docs///guide//").as_str(), "/docs/guide/");
    }

    #[test]
    fn test_new_strips_query() {
        assert_eq!(BasePath::new("/docs?v=1").as_str(), "/docs/");
    }

    #[test]
    fn test_new_strips_fragment() {
        assert_eq!(BasePath::new("/docs#top").as_str(), "/docs/");
    }

    #[test]
    fn test_new_extracts_path_from_full_url() {
        // Pasting the deployed URL instead of its path still works
        assert_eq!(BasePath::new("https://example.com/docs/").as_str(), "/docs/");
        assert_eq!(BasePath::new("https://example.com").as_str(), "/");
    }

    #[test]
    fn test_invariant_holds_for_arbitrary_input() {
        for raw in ["", "/", "a", "a/b", "\\a\\", "//a//", "a?x=1", "中文"] {
            let base = BasePath::new(raw);
            assert!(base.as_str().starts_with('/'), "input {raw:?}");
            assert!(base.as_str().ends_with('/'), "input {raw:?}");
            assert!(!base.as_str().is_empty(), "input {raw:?}");
        }
    }

    #[test]
    fn test_is_root() {
        assert!(BasePath::default().is_root());
        assert!(BasePath::new("/").is_root());
        assert!(!BasePath::new("/docs/").is_root());
    }

    #[test]
    fn test_join() {
        let base = BasePath::new("/rust_camp_tutorial/");
        assert_eq!(base.join("logo.png"), "/rust_camp_tutorial/logo.png");
        assert_eq!(base.join("/logo.png"), "/rust_camp_tutorial/logo.png");
        assert_eq!(base.join(""), "/rust_camp_tutorial/");
    }

    #[test]
    fn test_join_from_root() {
        let base = BasePath::default();
        assert_eq!(base.join("logo.png"), "/logo.png");
        assert_eq!(base.join("/"), "/");
    }

    #[test]
    fn test_to_encoded_chinese() {
        let base = BasePath::new("/教程/");
        assert_eq!(base.to_encoded(), "/%E6%95%99%E7%A8%8B/");
    }

    #[test]
    fn test_to_encoded_ascii_unchanged() {
        let base = BasePath::new("/rust_camp_tutorial/");
        assert_eq!(base.to_encoded(), "/rust_camp_tutorial/");
    }

    #[test]
    fn test_to_encoded_space() {
        let base = BasePath::new("/rust camp/");
        assert_eq!(base.to_encoded(), "/rust%20camp/");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", BasePath::new("/docs/")), "/docs/");
    }

    #[test]
    fn test_default_is_root() {
        assert_eq!(BasePath::default().as_str(), "/");
    }

    #[test]
    fn test_equality_with_str() {
        let base = BasePath::new("docs");
        assert_eq!(base, "/docs/");
    }

    #[test]
    fn test_serialize_deserialize() {
        let base = BasePath::new("/rust_camp_tutorial/");
        let json = serde_json::to_string(&base).unwrap();
        assert_eq!(json, r#""/rust_camp_tutorial/""#);

        let parsed: BasePath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, base);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let parsed: BasePath = serde_json::from_str(r#""docs""#).unwrap();
        assert_eq!(parsed.as_str(), "/docs/");
    }
}
