//! Assertion helpers available on every [`TestCase`].
//!
//! Each helper returns `Ok(())` when its condition holds and an
//! [`AssertionFailure`](crate::AssertionFailure) otherwise, so test bodies
//! chain them with `?`. An empty `msg` selects the default message, which
//! embeds the `Debug` form of the compared values.

mod approx;
mod raises;
mod traits;

pub use approx::{Approx, DEFAULT_PLACES};
pub use raises::{AssertRaisesContext, raised};
pub use traits::{Contains, Truthy, TypeSet};

use std::any::{Any, type_name};
use std::error::Error;
use std::fmt::Debug;
use std::io::{BufRead, Write};
use std::ptr;

use crate::case::TestCase;
use crate::error::{TestError, UnitResult};
use crate::prompt::{Answer, Prompt};

/// Raise a failure with `msg`.
pub fn fail(msg: &str) -> UnitResult {
    Err(TestError::assertion(msg))
}

fn check(cond: bool, msg: &str, default: impl FnOnce() -> String) -> UnitResult {
    if cond {
        return Ok(());
    }
    if msg.is_empty() {
        fail(&default())
    } else {
        fail(msg)
    }
}

pub trait Assertions {
    fn fail(&self, msg: &str) -> UnitResult {
        fail(msg)
    }

    fn assert_equal<A, B>(&self, x: A, y: B, msg: &str) -> UnitResult
    where
        A: PartialEq<B> + Debug,
        B: Debug,
    {
        check(x == y, msg, || format!("{x:?} vs (expected) {y:?}"))
    }

    fn assert_not_equal<A, B>(&self, x: A, y: B, msg: &str) -> UnitResult
    where
        A: PartialEq<B> + Debug,
        B: Debug,
    {
        check(x != y, msg, || format!("{x:?} not expected to be equal {y:?}"))
    }

    /// Passes when `x == y`, or `|x - y| <= delta`, or `|x - y|` rounds to
    /// zero at `places` decimal digits (7 unless given).
    fn assert_almost_equal(&self, x: f64, y: f64, approx: Approx, msg: &str) -> UnitResult {
        let tolerance = approx.tolerance()?;
        check(tolerance.close(x, y), msg, || {
            format!("{x:?} != {y:?} within {}", tolerance.describe())
        })
    }

    fn assert_not_almost_equal(&self, x: f64, y: f64, approx: Approx, msg: &str) -> UnitResult {
        let tolerance = approx.tolerance()?;
        check(tolerance.far(x, y), msg, || {
            format!("{x:?} == {y:?} within {}", tolerance.describe())
        })
    }

    /// Identity: both references point at the same object.
    fn assert_is<T: Debug + ?Sized>(&self, x: &T, y: &T, msg: &str) -> UnitResult {
        check(ptr::eq(x, y), msg, || format!("{x:?} is not {y:?}"))
    }

    fn assert_is_not<T: Debug + ?Sized>(&self, x: &T, y: &T, msg: &str) -> UnitResult {
        check(!ptr::eq(x, y), msg, || format!("{x:?} is {y:?}"))
    }

    fn assert_is_none<T: Debug>(&self, x: &Option<T>, msg: &str) -> UnitResult {
        check(x.is_none(), msg, || format!("{x:?} is not None"))
    }

    fn assert_is_not_none<T: Debug>(&self, x: &Option<T>, msg: &str) -> UnitResult {
        check(x.is_some(), msg, || format!("{x:?} is None"))
    }

    fn assert_true<T: Truthy + Debug>(&self, x: T, msg: &str) -> UnitResult {
        check(x.is_truthy(), msg, || format!("Expected {x:?} to be True"))
    }

    fn assert_false<T: Truthy + Debug>(&self, x: T, msg: &str) -> UnitResult {
        check(!x.is_truthy(), msg, || format!("Expected {x:?} to be False"))
    }

    fn assert_in<I, C>(&self, x: &I, y: &C, msg: &str) -> UnitResult
    where
        I: Debug + ?Sized,
        C: Contains<I> + Debug + ?Sized,
    {
        check(y.contains_item(x), msg, || {
            format!("Expected {x:?} to be in {y:?}")
        })
    }

    fn assert_is_instance<T: Any>(&self, x: &dyn Any, msg: &str) -> UnitResult {
        check(x.is::<T>(), msg, || {
            format!("Expected an instance of {}", type_name::<T>())
        })
    }

    /// Like [`assert_is_instance`](Self::assert_is_instance) for a tuple of
    /// candidate types.
    fn assert_is_instance_of<S: TypeSet>(&self, x: &dyn Any, msg: &str) -> UnitResult {
        check(S::matches(x), msg, || {
            format!("Expected an instance of one of {}", S::names())
        })
    }

    /// Guarded-block form: `self.assert_raises::<E>().run(|| ...)`.
    fn assert_raises<E>(&self) -> AssertRaisesContext<E>
    where
        E: Error + Send + Sync + 'static,
    {
        AssertRaisesContext::new()
    }

    /// Call `func` now and require it to raise an `E`. Other errors propagate.
    fn assert_raises_with<E, R>(&self, func: impl FnOnce() -> UnitResult<R>) -> UnitResult
    where
        E: Error + Send + Sync + 'static,
    {
        AssertRaisesContext::<E>::new().run(func)
    }

    fn assert_user_answers_yes(&self, text: &str, msg: &str) -> UnitResult {
        self.assert_user_answers_yes_with(&mut Prompt::stdio(), text, msg)
    }

    fn assert_user_answers_no(&self, text: &str, msg: &str) -> UnitResult {
        self.assert_user_answers_no_with(&mut Prompt::stdio(), text, msg)
    }

    fn assert_user_answers_yes_with<R: BufRead, W: Write>(
        &self,
        prompt: &mut Prompt<R, W>,
        text: &str,
        msg: &str,
    ) -> UnitResult {
        let confirmed = prompt.answers(text, Answer::Yes)?;
        self.assert_true(confirmed, msg)
    }

    fn assert_user_answers_no_with<R: BufRead, W: Write>(
        &self,
        prompt: &mut Prompt<R, W>,
        text: &str,
        msg: &str,
    ) -> UnitResult {
        let denied = prompt.answers(text, Answer::No)?;
        self.assert_true(denied, msg)
    }
}

impl<T: TestCase> Assertions for T {}
