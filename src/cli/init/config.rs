//! Generated files for a fresh site: folio.toml, ignore files and the
//! starter page.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::section::{SiteSectionConfig, ThemeSectionConfig};

/// Default config filename
const CONFIG_FILE: &str = "folio.toml";

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Commented examples for the list-valued fields the section templates
/// leave out.
const HEAD_EXAMPLE: &str = "\
# Extra tags injected into <head> on every page:
# [[site.head]]
# tag = \"link\"
# attrs = { rel = \"icon\", href = \"/logo.png\" }
";

const NAV_EXAMPLE: &str = "\
# Navigation bar entries:
# [[theme.nav]]
# text = \"Home\"
# link = \"/\"
";

/// First page, so a fresh site has something to serve.
const STARTER_PAGE: &str = "\
# Welcome

This site was scaffolded by folio. Edit `folio.toml` to describe the
site, add pages under `docs/`, then run `folio check` to verify the
configuration and `folio export` to produce the site manifest.
";

/// The full commented config scaffold, assembled from the section
/// templates plus examples for the list-valued fields.
pub fn generate_config_template() -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# Folio configuration file (v{})\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("# https://github.com/folio-docs/folio\n\n");

    out.push_str(&SiteSectionConfig::template_with_header());
    out.push('\n');
    out.push_str(HEAD_EXAMPLE);
    out.push('\n');

    out.push_str(&ThemeSectionConfig::template_with_header());
    out.push('\n');
    out.push_str(NAV_EXAMPLE);

    out
}

/// Write the commented folio.toml scaffold.
pub fn write_config(root: &Path) -> Result<()> {
    let path = root.join(CONFIG_FILE);
    fs::write(&path, generate_config_template())
        .with_context(|| format!("failed to write '{}'", path.display()))
}

/// Write .gitignore and .ignore, covering the build output directory
/// and OS clutter. Existing ignore files are left alone.
pub fn write_ignore_files(root: &Path) -> Result<()> {
    let content = ["/dist/", ".DS_Store"].join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if path.exists() {
            continue;
        }
        fs::write(&path, &content)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    }

    Ok(())
}

/// Write docs/index.md so a fresh site has a first page. An existing
/// page is left alone.
pub fn write_starter_page(root: &Path) -> Result<()> {
    let path = root.join("docs/index.md");
    if path.exists() {
        return Ok(());
    }
    fs::write(&path, STARTER_PAGE)
        .with_context(|| format!("failed to write '{}'", path.display()))
}
