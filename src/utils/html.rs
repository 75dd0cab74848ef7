//! Small HTML helpers for head tag rendering.

use std::borrow::Cow;

/// Escape a value for use inside a double-quoted attribute.
///
/// Borrows when nothing needs escaping.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// The HTML void elements, which render as `<tag>` with no closing tag.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_borrows_plain_text() {
        assert!(matches!(escape_attr("hello world"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_attr_special_chars() {
        assert_eq!(escape_attr("<script>"), "&lt;script&gt;");
        assert_eq!(escape_attr("tom & jerry"), "tom &amp; jerry");
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape_attr("d'oh"), "d&#39;oh");
    }

    #[test]
    fn test_escape_attr_empty() {
        assert_eq!(escape_attr(""), "");
    }

    #[test]
    fn test_void_element_lookup() {
        for tag in ["link", "meta", "base", "br"] {
            assert!(is_void_element(tag), "{tag} should be void");
        }
        for tag in ["script", "title", "style", "div"] {
            assert!(!is_void_element(tag), "{tag} should not be void");
        }
    }
}
