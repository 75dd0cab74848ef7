//! Folio - configuration tool for static documentation sites.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod logger;
mod manifest;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    // Subcommand handlers borrow the CLI for the whole run
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    match cli.color {
        ColorChoice::Auto => {} // leave TTY detection to owo-colors
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(cli)?;

    match &cli.command {
        Commands::Init { name, dry } => cli::init::new_site(&config, name.is_some(), *dry),
        Commands::Check { args } => cli::check::run_check(args, &config),
        Commands::Export { args } => cli::export::run_export(args, &config),
    }
}
