//! Runner configuration.
//!
//! Defaults can be changed through the environment; command-line flags
//! override whatever the environment says.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use log::LevelFilter;
use microunit::FailureMode;

use crate::error::RunnerResult;

/// Log level, same names as the `log` crate (`error` .. `trace`).
pub const LOG_ENV: &str = "LOG";
/// `fail-fast` or `record`.
pub const MODE_ENV: &str = "MICROUNIT_MODE";
/// Enables test cases that ask the operator a question.
pub const INTERACTIVE_ENV: &str = "MICROUNIT_INTERACTIVE";

/// Set by [`RunConfig::install`]; read while test lists are built.
static INTERACTIVE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub log_level: LevelFilter,
    pub mode: FailureMode,
    pub interactive: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Off,
            mode: FailureMode::default(),
            interactive: false,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> RunnerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RunnerResult<Self> {
        let mut config = Self::default();

        if let Some(level) = lookup(LOG_ENV) {
            config.log_level = level_filter(&level);
        }
        if let Some(mode) = lookup(MODE_ENV) {
            config.mode = mode
                .parse()
                .with_context(|| format!("invalid {MODE_ENV} value `{mode}`"))?;
        }
        config.interactive = lookup(INTERACTIVE_ENV).is_some_and(|value| flag(&value));

        Ok(config)
    }

    /// Publish the settings test cases consult while they are listed.
    pub fn install(&self) {
        INTERACTIVE.store(self.interactive, Ordering::Relaxed);
    }
}

/// Unknown names turn logging off.
pub fn level_filter(name: &str) -> LevelFilter {
    match name.trim().to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

fn flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Whether interactive test cases should run, as last installed.
pub fn interactive() -> bool {
    INTERACTIVE.load(Ordering::Relaxed)
}
