//! Test-case descriptors and suites.

use std::any::TypeId;
use std::fmt;

use crate::case::TestCase;
use crate::error::UnitResult;
use crate::runner::{self, Execution};

/// A test-case type, erased so that different cases share one list.
#[derive(Clone, Copy)]
pub struct CaseDescriptor {
    pub name: &'static str,
    pub module: &'static str,
    type_id: TypeId,
    run_fn: fn(&mut Execution<'_>) -> UnitResult,
}

impl CaseDescriptor {
    pub fn of<T: TestCase + Default>() -> Self {
        Self {
            name: T::name(),
            module: T::module(),
            type_id: TypeId::of::<T>(),
            run_fn: runner::run_case::<T>,
        }
    }

    /// The case type itself; generic instantiations sharing a name differ.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// `module::Name`.
    pub fn path(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }

    pub(crate) fn run(&self, exec: &mut Execution<'_>) -> UnitResult {
        (self.run_fn)(exec)
    }
}

impl fmt::Debug for CaseDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseDescriptor")
            .field("name", &self.name)
            .field("module", &self.module)
            .finish()
    }
}

impl PartialEq for CaseDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CaseDescriptor {}

/// Ordered list of test-case types. No deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSuite {
    tests: Vec<CaseDescriptor>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_test(&mut self, case: CaseDescriptor) {
        self.tests.push(case);
    }

    pub fn add<T: TestCase + Default>(&mut self) {
        self.add_test(CaseDescriptor::of::<T>());
    }

    pub fn tests(&self) -> &[CaseDescriptor] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl FromIterator<CaseDescriptor> for TestSuite {
    fn from_iter<I: IntoIterator<Item = CaseDescriptor>>(iter: I) -> Self {
        Self {
            tests: iter.into_iter().collect(),
        }
    }
}
