//! Site scaffolding.
//!
//! `folio init` lays down a working site: the directory skeleton, a
//! fully commented `folio.toml`, ignore files and a starter page.
//!
//! - [`validate`]: target directory checks
//! - [`structure`]: directory skeleton
//! - [`config`]: generated files

mod config;
mod structure;
mod validate;

use anyhow::Result;

use crate::{config::SiteConfig, log};

pub use validate::InitMode;

/// Scaffold a new site at the configured root.
///
/// With `dry_run` the config template goes to stdout and nothing is
/// written.
pub fn new_site(site: &SiteConfig, has_name: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", config::generate_config_template());
        return Ok(());
    }

    let mode = if has_name { InitMode::NewDir } else { InitMode::CurrentDir };
    let root = site.get_root();
    if let Err(e) = mode.check_target(root) {
        log!("error"; "{e}");
        std::process::exit(1);
    }

    structure::create_skeleton(root)?;
    config::write_config(root)?;
    config::write_ignore_files(root)?;
    config::write_starter_page(root)?;

    log!("init"; "Site initialized successfully");
    log!("init"; "edit folio.toml, then run 'folio check'");
    Ok(())
}
