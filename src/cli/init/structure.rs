//! Directory skeleton for a fresh site.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::debug;

/// Directories every scaffolded site starts with. Pages live under
/// `docs/`, images and other static files under `docs/assets/`.
const SKELETON_DIRS: &[&str] = &["docs", "docs/assets"];

/// Create the site skeleton, including the root itself if needed.
pub fn create_skeleton(root: &Path) -> Result<()> {
    for dir in SKELETON_DIRS {
        let target = root.join(dir);
        fs::create_dir_all(&target)
            .with_context(|| format!("failed to create '{}'", target.display()))?;
        debug!("init"; "created {}", target.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_skeleton_under_new_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my_docs");

        create_skeleton(&root).unwrap();

        assert!(root.join("docs").is_dir());
        assert!(root.join("docs/assets").is_dir());
    }

    #[test]
    fn test_tolerates_existing_root() {
        let temp = TempDir::new().unwrap();
        create_skeleton(temp.path()).unwrap();
        create_skeleton(temp.path()).unwrap();

        assert!(temp.path().join("docs").is_dir());
    }
}
