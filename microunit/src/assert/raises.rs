//! Expected-error checks.
//!
//! An error "is an instance of" `E` when `E` is the error itself, appears in
//! its `source()` chain, or is a type an `anyhow::Error` downcasts to. Using
//! [`TestError`] as `E` therefore accepts every raised signal.

use std::any::type_name;
use std::error::Error;
use std::marker::PhantomData;

use crate::error::{TestError, UnitResult};

/// Guarded block created by `assert_raises::<E>()`.
///
/// [`run`](Self::run) executes the block and always performs the post-block
/// check: no error is a failure, an `E` is swallowed, anything else
/// propagates unchanged.
#[must_use = "the expected error is only checked by `run` or `exit`"]
pub struct AssertRaisesContext<E> {
    expected: PhantomData<fn() -> E>,
}

impl<E> AssertRaisesContext<E>
where
    E: Error + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            expected: PhantomData,
        }
    }

    pub fn expected(&self) -> &'static str {
        type_name::<E>()
    }

    pub fn run<R>(self, block: impl FnOnce() -> UnitResult<R>) -> UnitResult {
        let outcome = block();
        self.exit(outcome)
    }

    /// Post-block check on whatever the block produced.
    pub fn exit<R>(self, outcome: UnitResult<R>) -> UnitResult {
        match outcome {
            Ok(_) => Err(TestError::assertion(format!(
                "{} not raised",
                self.expected()
            ))),
            Err(err) if raised::<E>(&err) => {
                debug!("expected {} raised: {}", self.expected(), err);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

impl<E> Default for AssertRaisesContext<E>
where
    E: Error + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `err` carries an error of type `E`.
pub fn raised<E>(err: &TestError) -> bool
where
    E: Error + Send + Sync + 'static,
{
    if let TestError::Other(inner) = err {
        if inner.downcast_ref::<E>().is_some() || inner.chain().any(|cause| cause.is::<E>()) {
            return true;
        }
    }

    let mut cause: Option<&(dyn Error + 'static)> = Some(err);
    while let Some(current) = cause {
        if current.is::<E>() {
            return true;
        }
        cause = current.source();
    }
    false
}
