//! Field status checks used by config validation.
//!
//! The derive macro tags fields and sections with a lifecycle status;
//! at validation time any tagged item the author actually set gets
//! routed through here.

use super::{ConfigDiagnostics, FieldPath};

/// Lifecycle status a config field or section can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Experimental,
    NotImplemented,
    Deprecated,
}

impl FieldStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Experimental => "experimental",
            Self::NotImplemented => "not implemented",
            Self::Deprecated => "deprecated",
        }
    }
}

/// Route one finding into the right diagnostic bucket.
fn report(path: FieldPath, status: FieldStatus, scope: &str, diag: &mut ConfigDiagnostics) {
    match status {
        FieldStatus::NotImplemented => diag.error_with_hint(
            path,
            format!("this {scope} is not implemented yet"),
            format!("remove this {scope} or wait for a future release"),
        ),
        FieldStatus::Deprecated => diag.warn(
            path,
            format!("this {scope} is deprecated and will be removed in a future version"),
        ),
        FieldStatus::Experimental => diag.experimental_hint(path),
    }
}

/// Check one field the author set to a non-default value.
pub fn check_field_status(field_path: &str, status: FieldStatus, diag: &mut ConfigDiagnostics) {
    if status == FieldStatus::Experimental && diag.allow_experimental {
        return;
    }
    let path = FieldPath::new(Box::leak(field_path.to_string().into_boxed_str()));
    report(path, status, "field", diag);
}

/// Check a whole section the author configured.
pub fn check_section_status(section: &str, status: FieldStatus, diag: &mut ConfigDiagnostics) {
    if status == FieldStatus::Experimental && diag.allow_experimental {
        return;
    }
    let path = FieldPath::new(Box::leak(format!("[{section}]").into_boxed_str()));
    report(path, status, "section", diag);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experimental_collects_hint() {
        let mut diag = ConfigDiagnostics::new();
        check_field_status("site.url", FieldStatus::Experimental, &mut diag);
        assert!(diag.has_advice());
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_experimental_suppressed_when_allowed() {
        let mut diag = ConfigDiagnostics::with_allow_experimental(true);
        check_field_status("site.url", FieldStatus::Experimental, &mut diag);
        assert!(!diag.has_advice());
    }

    #[test]
    fn test_not_implemented_is_error() {
        let mut diag = ConfigDiagnostics::new();
        check_field_status("site.future", FieldStatus::NotImplemented, &mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_deprecated_is_warning() {
        let mut diag = ConfigDiagnostics::new();
        check_section_status("legacy", FieldStatus::Deprecated, &mut diag);
        assert!(diag.has_advice());
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(FieldStatus::Experimental.label(), "experimental");
        assert_eq!(FieldStatus::Deprecated.label(), "deprecated");
    }
}
