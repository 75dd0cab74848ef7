//! Target directory checks run before any file is written.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

/// How the site root was chosen on the command line.
#[derive(Debug, Clone, Copy)]
pub enum InitMode {
    /// `folio init`: scaffold into the current directory.
    CurrentDir,
    /// `folio init <name>`: scaffold into a fresh subdirectory.
    NewDir,
}

impl InitMode {
    /// Reject targets we would scribble over.
    ///
    /// The current directory may be reused only while it is empty; a
    /// named directory must not exist at all.
    pub fn check_target(self, root: &Path) -> Result<()> {
        match self {
            Self::CurrentDir if !dir_is_empty(root)? => bail!(
                "Current directory is not empty.\n\
                 Use `folio init <name>` to create in a new subdirectory."
            ),
            Self::NewDir if root.exists() => bail!(
                "Directory '{}' already exists.\n\
                 Choose a different name or remove the existing directory.",
                root.display()
            ),
            _ => Ok(()),
        }
    }
}

/// A missing directory counts as empty.
fn dir_is_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("failed to read directory '{}'", path.display()))?;
    Ok(entries.next().is_none())
}
