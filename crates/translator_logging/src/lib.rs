#![deny(missing_docs)]
//! Shared logging utilities for the translator workspace.
//!
//! The `translator_*` macros route through a re-exported `log`, so crates
//! that only log need no direct dependency on the facade. Level selection
//! from the environment is shared by the app and the test initializer.

#[doc(hidden)]
pub use log as __log;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! translator_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! translator_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! translator_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! translator_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! translator_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
    }};
}

/// Truncates `text` to at most `max_chars` characters for log output,
/// appending an ellipsis when something was cut.
///
/// Source text and translations can be long and may be private; log lines
/// should carry a bounded preview only.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// Environment variable holding the maximum log level (`error` through `trace`).
pub const LOG_LEVEL_ENV: &str = "TRANSLATOR_LOG";

/// Level named by [`LOG_LEVEL_ENV`], or `default` when it is unset or not a
/// level name.
pub fn level_from_env(default: log::LevelFilter) -> log::LevelFilter {
    parse_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref()).unwrap_or(default)
}

fn parse_level(raw: Option<&str>) -> Option<log::LevelFilter> {
    raw?.trim().parse().ok()
}

/// Installs a terminal logger for tests. Safe to call from every test; only
/// the first call in a process takes effect.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let _ = TermLogger::init(
        level_from_env(log::LevelFilter::Debug),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
