//! Config check command.
//!
//! Loading already rejects configs with validation errors, so by the
//! time this runs the config is sound. The job here is to show the
//! author what their file actually declares: the effective base, the
//! resolved nav targets, head tags and sidebar mode.

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use crate::cli::args::CheckArgs;
use crate::config::{SidebarConfig, SiteConfig, render_head};
use crate::log;
use crate::utils::plural_count;

pub fn run_check(args: &CheckArgs, config: &SiteConfig) -> Result<()> {
    let report = ConfigReport::from_config(config);
    report.print();

    // Head preview goes to stdout so it can be piped into a layout
    if args.head && !config.site.head.is_empty() {
        println!("{}", render_head(&config.site.head));
    }

    if args.strict {
        let diag = config.collect_diagnostics();
        if diag.has_advice() {
            bail!(
                "strict mode: config draws {}",
                plural_count(diag.advice_count(), "notice")
            );
        }
    }

    log!("check"; "config ok");
    Ok(())
}

/// What the config declares, gathered for display.
struct ConfigReport {
    source: String,
    title: String,
    description: String,
    base: String,
    /// Percent-encoded form, only when it differs from `base`.
    encoded_base: Option<String>,
    url: Option<String>,
    head_count: usize,
    logo: Option<String>,
    /// Nav entries with their links resolved against the base.
    nav: Vec<(String, String)>,
    sidebar: String,
    extra_count: usize,
}

impl ConfigReport {
    fn from_config(config: &SiteConfig) -> Self {
        let base = &config.site.base;

        let encoded = base.to_encoded();
        let encoded_base = (encoded != base.as_str()).then_some(encoded);

        // External links pass through, everything else serves under
        // the base
        let resolve = |link: &str| {
            if link.contains("://") {
                link.to_string()
            } else {
                base.join(link)
            }
        };

        let nav = config
            .theme
            .nav
            .iter()
            .map(|entry| (entry.text.clone(), resolve(&entry.link)))
            .collect();

        let sidebar = match &config.theme.sidebar {
            SidebarConfig::Tree(items) => {
                let total: usize = items.iter().map(|i| i.count()).sum();
                format!(
                    "{} ({})",
                    config.theme.sidebar.mode().label(),
                    plural_count(total, "item")
                )
            }
            SidebarConfig::Switch(_) => config.theme.sidebar.mode().label().to_string(),
        };

        Self {
            source: config
                .config_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "folio.toml".to_string()),
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            base: base.to_string(),
            encoded_base,
            url: config.site.url.clone(),
            head_count: config.site.head.len(),
            logo: config.theme.logo.as_deref().map(resolve),
            nav,
            sidebar,
            extra_count: config.site.extra.len(),
        }
    }

    /// Print the report to stderr, one labeled row per setting.
    fn print(&self) {
        eprintln!("{}{}{}", "[".dimmed(), self.source.cyan(), "]".dimmed());

        if self.title.is_empty() {
            self.row("title", &"(empty)".dimmed().to_string());
        } else {
            self.row("title", &self.title);
        }
        if !self.description.is_empty() {
            self.row("description", &self.description);
        }

        match &self.encoded_base {
            Some(encoded) => self.row(
                "base",
                &format!("{} {}", self.base, format!("(serves as {encoded})").dimmed()),
            ),
            None => self.row("base", &self.base),
        }
        if let Some(url) = &self.url {
            self.row("url", url);
        }

        self.row("head", &plural_count(self.head_count, "tag"));

        if let Some(logo) = &self.logo {
            self.row("logo", logo);
        }
        for (i, (text, link)) in self.nav.iter().enumerate() {
            let value = format!("{} {} {}", text, "->".dimmed(), link);
            if i == 0 {
                self.row("nav", &value);
            } else {
                self.row("", &value);
            }
        }
        self.row("sidebar", &self.sidebar);

        if self.extra_count > 0 {
            self.row("extra", &plural_count(self.extra_count, "value"));
        }
    }

    fn row(&self, label: &str, value: &str) {
        // Pad before styling so ANSI codes don't count against the width
        eprintln!("{} {}", format!("{label:<12}").bold(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn sample_config() -> SiteConfig {
        test_parse_config(
            r#"[site]
title = "Rust训练营教程文档"
base = "/rust_camp_tutorial/"

[[site.head]]
tag = "link"
attrs = { rel = "icon", href = "/logo.png" }

[[theme.nav]]
text = "首页"
link = "/"

[[theme.nav]]
text = "GitHub"
link = "https://github.com/example/repo"
"#,
        )
    }

    #[test]
    fn test_report_counts() {
        let report = ConfigReport::from_config(&sample_config());
        assert_eq!(report.head_count, 1);
        assert_eq!(report.nav.len(), 2);
        assert_eq!(report.sidebar, "auto");
        assert_eq!(report.extra_count, 0);
    }

    #[test]
    fn test_report_resolves_nav_against_base() {
        let report = ConfigReport::from_config(&sample_config());
        assert_eq!(report.nav[0].1, "/rust_camp_tutorial/");
        // External links stay untouched
        assert_eq!(report.nav[1].1, "https://github.com/example/repo");
    }

    #[test]
    fn test_report_shows_encoded_base_when_it_differs() {
        let config = test_parse_config("[site]\nbase = \"/教程/\"");
        let report = ConfigReport::from_config(&config);
        assert_eq!(report.base, "/教程/");
        assert_eq!(
            report.encoded_base.as_deref(),
            Some("/%E6%95%99%E7%A8%8B/")
        );
    }

    #[test]
    fn test_ascii_base_has_no_encoded_form() {
        let report = ConfigReport::from_config(&sample_config());
        assert_eq!(report.encoded_base, None);
    }

    #[test]
    fn test_report_resolves_logo_under_base() {
        let config = test_parse_config("[site]\nbase = \"/docs/\"\n\n[theme]\nlogo = \"/logo.png\"");
        let report = ConfigReport::from_config(&config);
        assert_eq!(report.logo.as_deref(), Some("/docs/logo.png"));
    }

    #[test]
    fn test_sidebar_tree_reports_item_count() {
        let config = test_parse_config(
            r#"[[theme.sidebar]]
text = "Guide"
link = "/guide/"

[[theme.sidebar]]
text = "Reference"

[[theme.sidebar.items]]
text = "Config"
link = "/reference/config.html"
"#,
        );
        let report = ConfigReport::from_config(&config);
        assert_eq!(report.sidebar, "manual-tree (3 items)");
    }

    #[test]
    fn test_strict_fails_on_experimental_use() {
        let config = test_parse_config("[site]\nurl = \"https://example.com\"");
        let args = CheckArgs {
            head: false,
            strict: true,
        };
        assert!(run_check(&args, &config).is_err());
    }

    #[test]
    fn test_strict_passes_when_experimental_allowed() {
        let config = test_parse_config(
            "[site]\nurl = \"https://example.com\"\nallow_experimental = true",
        );
        let args = CheckArgs {
            head: false,
            strict: true,
        };
        assert!(run_check(&args, &config).is_ok());
    }

    #[test]
    fn test_non_strict_tolerates_advice() {
        let config = test_parse_config("[site]\nurl = \"https://example.com\"");
        let args = CheckArgs {
            head: false,
            strict: false,
        };
        assert!(run_check(&args, &config).is_ok());
    }
}
