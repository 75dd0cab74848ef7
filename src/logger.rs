//! Terminal logging with colored module prefixes.
//!
//! All messages go to stderr so stdout stays reserved for command
//! output such as the exported manifest or a rendered head preview.
//!
//! ```ignore
//! log!("check"; "validated {} nav entries", count);
//! debug!("config"; "searching for {}", path.display());
//! ```

use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

use owo_colors::{OwoColorize, Style};

/// Set by the `--verbose` flag, read by `debug!`. Written once at
/// startup, so relaxed ordering is enough.
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Log a message under a `[module]` prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {
        $crate::logger::log($module, &format!($($arg)*))
    };
}

/// Like `log!`, but only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    };
}

#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);

    let mut stderr = stderr().lock();
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

/// Color a `[module]` prefix by module name.
#[inline]
fn colorize_prefix(module: &str) -> String {
    let style = match module {
        "init" => Style::new().bright_green(),
        "export" => Style::new().bright_blue(),
        "error" => Style::new().bright_red(),
        _ => Style::new().bright_yellow(),
    }
    .bold();
    format!("[{module}]").style(style).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_round_trip() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_prefix_is_bracketed() {
        let prefix = colorize_prefix("check");
        assert!(prefix.contains("[check]"));
    }
}
