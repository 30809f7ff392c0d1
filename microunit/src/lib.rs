//! A small unit-test framework for constrained targets.
//!
//! Test cases group `test*` methods that share `set_up`/`tear_down` hooks.
//! Cases are registered in a [`Registry`], discovered per module and run by
//! a [`TestRunner`] that prints one progress line per test and a summary.

#[macro_use]
extern crate log;

pub mod assert;
pub mod case;
pub mod error;
pub mod prompt;
pub mod registry;
pub mod runner;
pub mod skip;
pub mod suite;

// Re-export the def_case attribute from microunit-macros
pub use microunit_macros::def_case;

// Re-export commonly used types
pub use assert::{Approx, AssertRaisesContext, Assertions, Contains, Truthy, TypeSet, fail};
pub use case::{TEST_PREFIX, TestCase, TestMethod};
pub use error::{AssertionFailure, InvalidArgument, Outcome, SkipTest, TestError, UnitResult};
pub use prompt::{Answer, Prompt, request_user_confirmation};
pub use registry::{Registry, main, main_with};
pub use runner::{FailureMode, TestResult, TestRunner};
pub use skip::{Decorator, skip, skip_unless};
pub use suite::{CaseDescriptor, TestSuite};
