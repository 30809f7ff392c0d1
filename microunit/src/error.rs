//! Signals raised by test methods, fixture hooks and assertions.
//!
//! Everything a test body can "raise" travels as a [`TestError`] inside a
//! [`UnitResult`], so `?` is the only propagation mechanism test code needs:
//!
//! ```ignore
//! fn test_parse(&mut self) -> UnitResult {
//!     let n: i32 = "42".parse().map_err(anyhow::Error::from)?;
//!     self.assert_equal(n, 42, "")
//! }
//! ```

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type alias used by test methods, hooks and assertion helpers.
pub type UnitResult<T = ()> = Result<T, TestError>;

/// A test asked to be skipped. Not an error: the runner counts it separately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SkipTest {
    reason: String,
}

impl SkipTest {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// The generic failure every assertion helper raises.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Caller misuse of an assertion helper, distinct from an assertion failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidArgument(pub String);

#[derive(Debug, Error)]
pub enum TestError {
    #[error("skipped: {0}")]
    Skip(#[from] SkipTest),

    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionFailure),

    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error("no test module named `{0}`")]
    ModuleNotFound(String),

    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TestError {
    pub fn skip(reason: impl Into<String>) -> Self {
        SkipTest::new(reason).into()
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        AssertionFailure::new(message).into()
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, TestError::Skip(_))
    }

    /// Text shown next to a test name in the progress report.
    pub fn detail(&self) -> String {
        match self {
            TestError::Skip(skip) => skip.reason().to_string(),
            TestError::Assertion(failure) => failure.message().to_string(),
            TestError::Other(err) => format!("{err:#}"),
            other => other.to_string(),
        }
    }
}

/// Result of executing a single test method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Skipped(String),
    /// An assertion did not hold.
    Failed(String),
    /// Anything else went wrong: an unexpected error or a panic.
    Errored(String),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Outcome::Errored(_))
    }
}

impl From<UnitResult> for Outcome {
    fn from(result: UnitResult) -> Self {
        match result {
            Ok(()) => Outcome::Passed,
            Err(TestError::Skip(skip)) => Outcome::Skipped(skip.reason().to_string()),
            Err(TestError::Assertion(failure)) => Outcome::Failed(failure.message().to_string()),
            Err(other) => Outcome::Errored(other.detail()),
        }
    }
}

impl fmt::Display for Outcome {
    /// Progress marker printed after `"{name} ..."`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => write!(f, " ok"),
            Outcome::Skipped(reason) => write!(f, " skipped: {reason}"),
            Outcome::Failed(message) => write!(f, " FAIL: {message}"),
            Outcome::Errored(message) => write!(f, " ERROR: {message}"),
        }
    }
}
