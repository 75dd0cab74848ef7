//! Site configuration management for `folio.toml`.
//!
//! ```text
//! config/
//! ├── section/       [site], [[site.head]] and [theme] definitions
//! ├── types/         diagnostics, errors, field status
//! └── mod.rs         SiteConfig: load, finalize, validate
//! ```
//!
//! Loading walks up from the working directory to find `folio.toml`,
//! parses it with unknown-key detection, then finalizes (root path,
//! base derivation, CLI overrides) and validates the result.

pub mod section;
pub mod types;
mod util;

use util::{extract_url_path, find_config_file};

// Flattened so callers write `config::HeadTag`, not `config::section::head::HeadTag`
pub use section::{
    HeadAttrs, HeadTag, NavEntry, SidebarConfig, SidebarItem, SidebarMode, SidebarSwitch,
    SiteSectionConfig, ThemeSectionConfig, render_head,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands, ExportArgs},
    core::BasePath,
    debug, log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// top-level configuration
// ============================================================================

/// The whole of `folio.toml`, plus runtime context filled in at load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// CLI arguments, set once at startup.
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path of the loaded config file.
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site root, the directory holding the config file.
    #[serde(skip)]
    pub root: PathBuf,

    /// Site identity (title, description, base, head)
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Theme presentation (logo, nav, sidebar)
    #[serde(default)]
    pub theme: ThemeSectionConfig,
}

impl SiteConfig {
    /// Load, finalize and validate the configuration for one command
    /// invocation.
    ///
    /// Init is special: there is no config file yet, so it gets a
    /// default config rooted at the target directory and validation is
    /// skipped.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        if !exists && !cli.is_init() {
            let name = cli.config.display();
            log!("error"; "Config file '{name}' not found. Run 'folio init' to create one.");
            std::process::exit(1);
        }

        let mut config = if cli.is_init() || !exists {
            Self::default()
        } else {
            Self::from_path(&config_path)?
        };

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);

        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Where the config file should be, and whether it is there.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("failed to resolve the current directory")?;

        // Init writes a fresh file at the target; everything else
        // searches upward so commands work from any subdirectory
        let dir = match &cli.command {
            Commands::Init {
                name: Some(name), ..
            } => cwd.join(name),
            Commands::Init { name: None, .. } => cwd,
            _ => {
                return Ok(match find_config_file(&cli.config) {
                    Some(path) => (path, true),
                    None => (cwd.join(&cli.config), false),
                });
            }
        };

        let path = dir.join(&cli.config);
        let exists = path.exists();
        Ok((path, exists))
    }

    /// Fill in everything the TOML alone cannot know.
    fn finalize(&mut self, cli: &Cli) {
        let root = match &cli.command {
            Commands::Init {
                name: Some(name), ..
            } => std::env::current_dir().unwrap_or_default().join(name),
            Commands::Init { name: None, .. } => std::env::current_dir().unwrap_or_default(),
            _ => self
                .config_path
                .parent()
                .map_or_else(PathBuf::new, Path::to_path_buf),
        };

        let root = crate::utils::normalize_path(&root);
        self.set_root(&root);
        self.config_path = crate::utils::normalize_path(&self.config_path);
        debug!("config"; "root resolved to {}", self.root.display());

        // Derive base from site.url, then let CLI overrides win
        self.sync_base_from_url();
        self.apply_command_options(cli);

        if let Some(fixed) = self.theme.normalize_logo() {
            log!("config"; "theme.logo contained backslashes, using '{}'", fixed);
        }
    }

    /// Derive `site.base` from `site.url`.
    ///
    /// A deployed URL like `https://example.github.io/my-project/`
    /// implies the site is served under `/my-project/`. The derived
    /// value fills in the base only when it was left at the root, an
    /// explicitly configured base always wins.
    fn sync_base_from_url(&mut self) {
        if !self.site.base.is_root() {
            return;
        }
        if let Some(ref url) = self.site.url
            && let Some(path) = extract_url_path(url)
            && !path.is_empty()
        {
            self.site.base = BasePath::new(&path);
        }
    }

    /// Read and parse the config file, reporting unknown keys.
    ///
    /// Unknown keys are shown to the author and require an explicit
    /// confirmation, a typo in `folio.toml` would otherwise silently
    /// turn a setting off.
    fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if ignored.is_empty() {
            return Ok(config);
        }

        Self::print_unknown_fields_warning(&ignored, path);
        if !Self::prompt_continue()? {
            bail!("Aborted, fix the unknown fields in the config file");
        }
        Ok(config)
    }

    /// Parse TOML content, collecting the paths of any unknown keys.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let config = serde_ignored::deserialize(toml::Deserializer::new(content), |path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // The file name alone is unambiguous, it always sits at the root
        let shown = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();

        eprintln!();
        log!("warning"; "unknown fields in {shown}, ignoring:");
        for field in fields {
            eprintln!("- {field}");
        }
        eprintln!();
    }

    /// Ask before continuing with unknown fields. Anything but an
    /// explicit yes aborts.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Joins `path` onto the site root.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// CLI arguments. Always present after `load`.
    pub const fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    // ========================================================================
    // command-line overrides
    // ========================================================================

    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Export { args } => self.apply_export_args(args),
            // Init scaffolds a fresh config, check reads as-is
            Commands::Init { .. } | Commands::Check { .. } => {}
        }
    }

    fn apply_export_args(&mut self, args: &ExportArgs) {
        if let Some(ref base) = args.base {
            self.site.base = BasePath::new(base);
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the loaded config, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!(ConfigError::Validation("config file not found".into()));
        }

        let diag = self.collect_diagnostics();
        diag.print_hints_and_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Run all section checks, collecting every diagnostic instead of
    /// failing on the first.
    pub fn collect_diagnostics(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::with_allow_experimental(self.site.allow_experimental);

        // Field status first (experimental, deprecated, not_implemented)
        self.site.validate_field_status(&mut diag);
        self.theme.validate_field_status(&mut diag);

        // Then each section's own rules
        self.site.validate(&mut diag);
        self.theme.validate(&mut diag);

        diag
    }
}

// ============================================================================
// test support
// ============================================================================

/// Parse a config snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(ignored.is_empty(), "test config has unknown fields: {ignored:?}");
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_toml_rejected() {
        // Unclosed bracket
        let err = SiteConfig::parse_with_ignored("[site\ntitle = \"My Docs\"").unwrap_err();
        assert!(err.to_string().contains("parsing error"));
    }

    #[test]
    fn test_root_accessors() {
        let mut config = SiteConfig::default();
        // Root stays empty until load fills it in
        assert_eq!(config.get_root(), Path::new(""));

        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
        assert_eq!(
            config.root_join("folio.toml"),
            PathBuf::from("/custom/path/folio.toml")
        );
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.title, "");
        assert!(config.site.base.is_root());
        assert_eq!(config.theme.logo, None);
    }

    #[test]
    fn test_unknown_section_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        // The config still parses, the unknown part is just reported
        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_unknown_field_typo_detected() {
        let content = "[site]\ntitel = \"Test\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.iter().any(|f| f.contains("titel")));
    }

    #[test]
    fn test_known_fields_pass_clean() {
        let content = "[site]\ntitle = \"Test\"\ndescription = \"Test\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_sync_base_from_url() {
        let mut config = test_parse_config(
            "[site]\nurl = \"https://example.github.io/my-project/\"\nallow_experimental = true",
        );
        config.sync_base_from_url();
        assert_eq!(config.site.base, "/my-project/");
    }

    #[test]
    fn test_explicit_base_wins_over_url() {
        let mut config = test_parse_config(
            "[site]\nbase = \"/docs/\"\nurl = \"https://example.github.io/my-project/\"",
        );
        config.sync_base_from_url();
        assert_eq!(config.site.base, "/docs/");
    }

    #[test]
    fn test_url_without_path_keeps_root_base() {
        let mut config = test_parse_config("[site]\nurl = \"https://example.com\"");
        config.sync_base_from_url();
        assert!(config.site.base.is_root());
    }

    #[test]
    fn test_collect_diagnostics_gathers_all_errors() {
        let config = test_parse_config(
            r#"[site]
title = "Test"

[[site.head]]
tag = "<link>"

[[theme.nav]]
text = ""
link = ""
"#,
        );
        let diag = config.collect_diagnostics();
        assert!(diag.has_errors());
        assert!(diag.len() >= 3);
    }
}
