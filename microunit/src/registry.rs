//! Test-case registry and module discovery.
//!
//! Cases are registered explicitly, then discovered per module: the cases
//! whose module path equals the requested one, sorted by name.
//!
//! ```ignore
//! let registry = microunit::cases![Accel, Thermo, Motor];
//! let result = microunit::main(&registry, "firmware::sensors")?;
//! ```

use std::collections::HashSet;
use std::io::Write;

use crate::case::TestCase;
use crate::error::{TestError, UnitResult};
use crate::runner::{TestResult, TestRunner};
use crate::suite::{CaseDescriptor, TestSuite};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    cases: Vec<CaseDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: TestCase + Default>(&mut self) -> &mut Self {
        self.add(CaseDescriptor::of::<T>())
    }

    pub fn add(&mut self, case: CaseDescriptor) -> &mut Self {
        trace!("registered test case {}", case.path());
        self.cases.push(case);
        self
    }

    pub fn cases(&self) -> &[CaseDescriptor] {
        &self.cases
    }

    /// Every module that has at least one case, sorted.
    pub fn modules(&self) -> Vec<&'static str> {
        let mut modules: Vec<&'static str> = self.cases.iter().map(|case| case.module).collect();
        modules.sort_unstable();
        modules.dedup();
        modules
    }

    pub fn contains_module(&self, module: &str) -> bool {
        self.cases.iter().any(|case| case.module == module)
    }

    /// Cases registered under `module`, sorted by name. A type registered
    /// more than once is listed once.
    pub fn test_cases(&self, module: &str) -> Vec<CaseDescriptor> {
        let mut seen = HashSet::new();
        let mut found: Vec<CaseDescriptor> = self
            .cases
            .iter()
            .filter(|case| case.module == module && seen.insert(case.type_id()))
            .copied()
            .collect();
        found.sort_by_key(|case| case.name);
        found
    }

    pub fn suite(&self, module: &str) -> UnitResult<TestSuite> {
        if !self.contains_module(module) {
            return Err(TestError::ModuleNotFound(module.to_string()));
        }

        let mut suite = TestSuite::new();
        for case in self.test_cases(module) {
            suite.add_test(case);
        }
        Ok(suite)
    }
}

impl FromIterator<CaseDescriptor> for Registry {
    fn from_iter<I: IntoIterator<Item = CaseDescriptor>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().collect(),
        }
    }
}

impl Extend<CaseDescriptor> for Registry {
    fn extend<I: IntoIterator<Item = CaseDescriptor>>(&mut self, iter: I) {
        for case in iter {
            self.add(case);
        }
    }
}

/// Build a [`Registry`] from a list of test-case types.
#[macro_export]
macro_rules! cases {
    ($($case:ty),* $(,)?) => {
        <$crate::Registry as ::core::iter::FromIterator<$crate::CaseDescriptor>>::from_iter([
            $($crate::CaseDescriptor::of::<$case>()),*
        ])
    };
}

/// Discover and run every case of `module`, then print the summary line.
pub fn main(registry: &Registry, module: &str) -> UnitResult<TestResult> {
    main_with(registry, module, &mut TestRunner::new())
}

pub fn main_with<W: Write>(
    registry: &Registry,
    module: &str,
    runner: &mut TestRunner<W>,
) -> UnitResult<TestResult> {
    let suite = registry.suite(module)?;
    info!("discovered {} test case(s) in {}", suite.len(), module);

    let result = runner.run(&suite)?;
    runner.print_summary(&result)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::runner::FailureMode;
    use crate::skip::skip;

    mod sensors {
        use super::super::*;
        use crate::TestMethod;

        #[derive(Default)]
        pub struct Thermo;

        impl TestCase for Thermo {
            fn tests() -> Vec<TestMethod<Self>> {
                vec![TestMethod::new("test_read", |_| Ok(()))]
            }
        }

        #[derive(Default)]
        pub struct Accel;

        impl TestCase for Accel {
            fn tests() -> Vec<TestMethod<Self>> {
                vec![
                    TestMethod::new("test_axes", |_| Ok(())),
                    TestMethod::new("test_range", |_| Ok(())).decorate(super::skip("no fixture")),
                ]
            }
        }

        /// Lives next to the cases but is not one.
        #[allow(dead_code)]
        pub struct Calibration {
            pub offset: i32,
        }
    }

    mod actuators {
        use super::super::*;
        use crate::TestMethod;

        #[derive(Default)]
        pub struct Motor;

        impl TestCase for Motor {
            fn tests() -> Vec<TestMethod<Self>> {
                vec![TestMethod::new("test_spin", |_| -> UnitResult {
                    Err(crate::TestError::assertion("stalled"))
                })]
            }
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register::<sensors::Thermo>()
            .register::<actuators::Motor>()
            .register::<sensors::Accel>();
        registry
    }

    #[test]
    fn test_discovery_filters_by_module_and_sorts_by_name() {
        let registry = registry();
        let module = <sensors::Thermo as TestCase>::module();

        let names: Vec<&str> = registry.test_cases(module).iter().map(|c| c.name).collect();
        assert_eq!(names, ["Accel", "Thermo"]);

        let suite = registry.suite(module).unwrap();
        assert_eq!(suite.len(), 2);
        assert_eq!(suite.tests()[0], CaseDescriptor::of::<sensors::Accel>());
    }

    #[test]
    fn test_duplicate_registration_runs_once() {
        let mut registry = registry();
        registry.register::<sensors::Thermo>();
        assert_eq!(registry.cases().len(), 4);

        let module = sensors::Thermo::module();
        let names: Vec<&str> = registry.test_cases(module).iter().map(|c| c.name).collect();
        assert_eq!(names, ["Accel", "Thermo"]);

        let mut runner = TestRunner::with_output(Vec::new());
        let result = main_with(&registry, module, &mut runner).unwrap();
        assert_eq!(result.tests_run, 3);
    }

    #[test]
    fn test_modules_are_sorted_and_unique() {
        let modules = registry().modules();
        assert_eq!(modules.len(), 2);
        assert!(modules[0].ends_with("actuators"));
        assert!(modules[1].ends_with("sensors"));
    }

    #[test]
    fn test_unknown_module() {
        let err = registry().suite("nowhere").unwrap_err();
        assert!(matches!(err, TestError::ModuleNotFound(m) if m == "nowhere"));
    }

    #[test]
    fn test_main_prints_progress_and_summary() {
        let registry = registry();
        let mut runner = TestRunner::with_output(Vec::new());
        let result = main_with(&registry, sensors::Accel::module(), &mut runner).unwrap();

        assert_eq!(result.tests_run, 3);
        assert_eq!(result.skipped, 1);
        assert_eq!(
            String::from_utf8(runner.into_output()).unwrap(),
            "test_axes ... ok\n\
             test_range ... skipped: no fixture\n\
             test_read ... ok\n\
             Ran 3 tests (1 skipped)\n"
        );
    }

    #[test]
    fn test_main_fail_fast_propagates() {
        let registry = registry();
        let mut runner = TestRunner::with_output(Vec::new()).with_mode(FailureMode::FailFast);
        let err = main_with(&registry, actuators::Motor::module(), &mut runner).unwrap_err();
        assert!(matches!(err, TestError::Assertion(_)));
    }

    #[test]
    fn test_cases_macro() {
        let registry = crate::cases![sensors::Thermo, actuators::Motor];
        assert_eq!(registry.cases().len(), 2);

        let empty = crate::cases![];
        assert!(empty.cases().is_empty());
    }
}
