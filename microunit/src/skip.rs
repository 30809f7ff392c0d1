//! Skip wrappers for test methods.
//!
//! [`skip`] and [`skip_unless`] produce a [`Decorator`] that is applied to a
//! [`TestMethod`](crate::TestMethod) when the method list of a case is built.
//! A skipped method keeps its name but its body is never executed: invoking it
//! raises [`SkipTest`](crate::SkipTest) with the given reason.

use crate::case::TestMethod;

/// Wrapper produced by [`skip`] / [`skip_unless`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    reason: Option<String>,
}

impl Decorator {
    /// The wrapper that leaves a method unchanged.
    pub fn identity() -> Self {
        Self { reason: None }
    }

    pub fn apply<T>(self, method: TestMethod<T>) -> TestMethod<T> {
        match self.reason {
            Some(reason) => method.into_skipped(reason),
            None => method,
        }
    }

    pub fn skips(&self) -> bool {
        self.reason.is_some()
    }
}

/// Unconditionally replace the wrapped method with one that raises a skip.
pub fn skip(reason: impl Into<String>) -> Decorator {
    Decorator {
        reason: Some(reason.into()),
    }
}

/// Run the wrapped method only if `cond` holds, otherwise behave like [`skip`].
pub fn skip_unless(cond: bool, reason: impl Into<String>) -> Decorator {
    if cond {
        return Decorator::identity();
    }
    skip(reason)
}
