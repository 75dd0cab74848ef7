//! Manifest export command.
//!
//! Serializes the loaded config into the site manifest JSON, either to
//! stdout (the default, so it pipes cleanly into other tools) or to a
//! file given with `--output`.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::args::ExportArgs;
use crate::config::SiteConfig;
use crate::log;
use crate::manifest::SiteManifest;

pub fn run_export(args: &ExportArgs, config: &SiteConfig) -> Result<()> {
    let manifest = SiteManifest::from_config(config);
    let json = manifest.to_json(args.pretty)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let mut file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            writeln!(file, "{json}")?;
            log!("export"; "wrote manifest to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_manifest_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("dist").join("site.json");

        let config = test_parse_config(
            r#"[site]
title = "Rust训练营教程文档"
base = "/rust_camp_tutorial/"
"#,
        );
        let args = ExportArgs {
            pretty: false,
            output: Some(output.clone()),
            base: None,
        };
        run_export(&args, &config).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["base"], "/rust_camp_tutorial/");
        assert_eq!(parsed["title"], "Rust训练营教程文档");
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("site.json");

        let config = test_parse_config("[site]\ntitle = \"Docs\"");
        let args = ExportArgs {
            pretty: true,
            output: Some(output.clone()),
            base: None,
        };
        run_export(&args, &config).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("\n  \"title\""));
    }
}
