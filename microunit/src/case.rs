//! The test-case capability.
//!
//! A test case is any `Default` type that lists its test methods as named
//! entries. Fixture hooks default to no-ops. The `#[def_case]` attribute
//! generates the implementation from an inherent `impl` block; writing it by
//! hand looks like this:
//!
//! ```ignore
//! #[derive(Default)]
//! struct Stack(Vec<u32>);
//!
//! impl TestCase for Stack {
//!     fn set_up(&mut self) -> UnitResult {
//!         self.0 = vec![1, 2];
//!         Ok(())
//!     }
//!
//!     fn tests() -> Vec<TestMethod<Self>> {
//!         vec![TestMethod::new("test_pop", |s| {
//!             let top = s.0.pop();
//!             s.assert_equal(top, Some(2), "")
//!         })]
//!     }
//! }
//! ```

use std::any::type_name;
use std::fmt;

use crate::error::{SkipTest, UnitResult};
use crate::skip::Decorator;

/// `type_name` without generic arguments: `a::Foo` for `a::Foo<b::Bar>`.
fn type_path<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    full.split('<').next().unwrap_or(full)
}

/// Prefix a method name must carry to be executed by the runner.
pub const TEST_PREFIX: &str = "test";

pub trait TestCase: Sized + 'static {
    /// Name used for discovery ordering.
    fn name() -> &'static str {
        let path = type_path::<Self>();
        path.rsplit("::").next().unwrap_or(path)
    }

    /// Module path the case is discovered under.
    fn module() -> &'static str {
        type_path::<Self>()
            .rsplit_once("::")
            .map_or("", |(module, _)| module)
    }

    fn set_up(&mut self) -> UnitResult {
        Ok(())
    }

    fn tear_down(&mut self) -> UnitResult {
        Ok(())
    }

    /// Named test entries, in any order.
    fn tests() -> Vec<TestMethod<Self>>;
}

enum Body<T> {
    Run(fn(&mut T) -> UnitResult),
    Skip(String),
}

/// A `(name, callable)` pair registered by a test case.
pub struct TestMethod<T> {
    name: &'static str,
    body: Body<T>,
}

impl<T> TestMethod<T> {
    pub fn new(name: &'static str, test_fn: fn(&mut T) -> UnitResult) -> Self {
        Self {
            name,
            body: Body::Run(test_fn),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn decorate(self, decorator: Decorator) -> Self {
        decorator.apply(self)
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match &self.body {
            Body::Skip(reason) => Some(reason),
            Body::Run(_) => None,
        }
    }

    pub(crate) fn into_skipped(self, reason: String) -> Self {
        Self {
            name: self.name,
            body: Body::Skip(reason),
        }
    }

    pub fn invoke(&self, case: &mut T) -> UnitResult {
        match &self.body {
            Body::Run(test_fn) => test_fn(case),
            Body::Skip(reason) => Err(SkipTest::new(reason.clone()).into()),
        }
    }
}

impl<T> fmt::Debug for TestMethod<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestMethod")
            .field("name", &self.name)
            .field("skip", &self.skip_reason())
            .finish()
    }
}
