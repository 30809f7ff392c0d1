//! Error handling for the runner binary.
//!
//! The library reports test failures through `microunit::TestError`; the
//! binary itself only needs flexible errors with context, so it uses
//! anyhow throughout.
//!
//! ```ignore
//! config::from_env().context("Failed to read runner configuration")?;
//! anyhow::bail!("no module matches `{}`", name);
//! ```

/// Result type alias using anyhow::Error.
pub type RunnerResult<T> = anyhow::Result<T>;
