//! End-to-end tests of `#[def_case]`, discovery and the runner.

use std::cell::RefCell;
use std::num::ParseIntError;

use anyhow::Context;
use microunit::{
    Approx, AssertionFailure, Assertions, FailureMode, InvalidArgument, Registry, TestCase,
    TestError, TestResult, TestRunner, UnitResult, def_case, main_with,
};
use pretty_assertions::assert_eq;

thread_local! {
    static CALLS: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

fn call(name: &'static str) {
    CALLS.with(|calls| calls.borrow_mut().push(name));
}

fn take_calls() -> Vec<&'static str> {
    CALLS.with(|calls| calls.borrow_mut().drain(..).collect())
}

fn run_module(registry: &Registry, module: &str, mode: FailureMode) -> (UnitResult<TestResult>, String) {
    let mut runner = TestRunner::with_output(Vec::new()).with_mode(mode);
    let result = main_with(registry, module, &mut runner);
    (result, String::from_utf8(runner.into_output()).unwrap())
}

mod fixtures {
    use super::*;

    #[derive(Default)]
    pub struct Lifecycle;

    #[def_case]
    impl Lifecycle {
        fn tear_down(&mut self) {
            call("tear_down");
        }

        fn test_b(&self) {
            call("test_b");
        }

        fn set_up(&mut self) {
            call("set_up");
        }

        fn test_a(&mut self) -> UnitResult {
            call("test_a");
            Ok(())
        }

        pub fn helper(&self) -> u32 {
            7
        }
    }

    #[derive(Default)]
    pub struct Counter {
        pub hits: u32,
    }

    #[def_case]
    impl Counter {
        fn test_first(&mut self) {
            self.hits += 1;
        }

        fn test_second(&mut self) -> UnitResult {
            self.hits += 1;
            self.assert_equal(self.hits, 2, "instance is shared across methods")
        }
    }

    pub struct Unrelated;
}

mod skips {
    use super::*;

    const HAS_FPU: bool = false;

    #[derive(Default)]
    pub struct Peripherals;

    #[def_case]
    impl Peripherals {
        fn tear_down(&mut self) {
            call("tear_down");
        }

        #[skip("no CAN transceiver")]
        fn test_can(&mut self) {
            call("test_can");
        }

        #[skip_unless(HAS_FPU, "FPU disabled")]
        fn test_fpu(&mut self) {
            call("test_fpu");
        }

        #[skip_unless(!HAS_FPU, "soft-float only")]
        fn test_soft_float(&mut self) -> UnitResult {
            call("test_soft_float");
            self.assert_almost_equal(0.1 + 0.2, 0.3, Approx::default(), "")
        }

        fn test_runtime_skip(&mut self) -> UnitResult {
            Err(TestError::skip("decided at run time"))
        }
    }
}

mod failures {
    use super::*;

    #[derive(Default)]
    pub struct Parsing;

    #[def_case]
    impl Parsing {
        fn test_a_passes(&self) -> UnitResult {
            self.assert_raises::<ParseIntError>()
                .run(|| Ok("0x1f".parse::<u8>().context("register value")?))
        }

        fn test_b_fails(&self) -> UnitResult {
            self.assert_in(&5, &[1, 2, 3], "")
        }

        fn test_c_errors(&self) -> anyhow::Result<()> {
            let value: u8 = "300".parse().context("baud divisor")?;
            anyhow::ensure!(value > 0);
            Ok(())
        }

        fn test_d_invalid(&self) -> UnitResult {
            self.assert_almost_equal(1.0, 1.0, Approx::places(2).with_delta(0.5), "")
        }

        fn test_e_raises(&self) -> UnitResult {
            self.assert_raises_with::<InvalidArgument, _>(|| {
                self.assert_not_almost_equal(1.0, 2.0, Approx::places(2).with_delta(0.5), "")
            })?;
            self.assert_raises_with::<AssertionFailure, _>(|| self.fail("expected"))
        }
    }
}

#[test]
fn test_lifecycle_order_and_name_sorting() {
    take_calls();
    let registry = microunit::cases![fixtures::Lifecycle, fixtures::Counter];
    let module = <fixtures::Lifecycle as TestCase>::module();
    assert!(module.ends_with("def_case::fixtures"));

    let (result, out) = run_module(&registry, module, FailureMode::FailFast);
    let result = result.unwrap();

    assert_eq!(
        take_calls(),
        ["set_up", "test_a", "tear_down", "set_up", "test_b", "tear_down"]
    );
    assert_eq!(
        out,
        "test_first ... ok\n\
         test_second ... ok\n\
         test_a ... ok\n\
         test_b ... ok\n\
         Ran 4 tests\n"
    );
    assert_eq!(result.tests_run, 4);
    assert!(result.was_successful());
}

#[test]
fn test_generated_case_metadata() {
    assert_eq!(fixtures::Lifecycle::name(), "Lifecycle");
    let names: Vec<&str> = fixtures::Lifecycle::tests().iter().map(|t| t.name()).collect();
    assert_eq!(names, ["test_b", "test_a"]);
    assert_eq!(fixtures::Lifecycle.helper(), 7);
    let _ = fixtures::Unrelated;
}

#[test]
fn test_skip_attributes() {
    take_calls();
    let registry = microunit::cases![skips::Peripherals];
    let module = skips::Peripherals::module();

    let (result, out) = run_module(&registry, module, FailureMode::FailFast);
    let result = result.unwrap();

    assert_eq!(
        out,
        "test_can ... skipped: no CAN transceiver\n\
         test_fpu ... skipped: FPU disabled\n\
         test_runtime_skip ... skipped: decided at run time\n\
         test_soft_float ... ok\n\
         Ran 4 tests (3 skipped)\n"
    );
    assert_eq!(result.skipped, 3);
    assert_eq!(result.failures + result.errors, 0);
    // Skipped bodies never ran and skips leave tear_down out.
    assert_eq!(take_calls(), ["test_soft_float", "tear_down"]);
}

#[test]
fn test_record_mode_reports_every_outcome() {
    let registry = microunit::cases![failures::Parsing];
    let module = failures::Parsing::module();

    let (result, out) = run_module(&registry, module, FailureMode::Record);
    let result = result.unwrap();

    assert_eq!(
        result,
        TestResult {
            tests_run: 5,
            failures: 1,
            errors: 2,
            skipped: 0,
        }
    );
    assert_eq!(
        out,
        "test_a_passes ... ok\n\
         test_b_fails ... FAIL: Expected 5 to be in [1, 2, 3]\n\
         test_c_errors ... ERROR: baud divisor: number too large to fit in target type\n\
         test_d_invalid ... ERROR: invalid argument: specify delta or places not both\n\
         test_e_raises ... ok\n\
         Ran 5 tests\n\
         FAILED (failures=1, errors=2)\n"
    );
}

#[test]
fn test_fail_fast_aborts_on_first_failure() {
    let registry = microunit::cases![failures::Parsing];
    let module = failures::Parsing::module();

    let (result, out) = run_module(&registry, module, FailureMode::FailFast);

    match result {
        Err(TestError::Assertion(failure)) => {
            assert_eq!(failure.message(), "Expected 5 to be in [1, 2, 3]")
        }
        other => panic!("expected the assertion to escape, got {other:?}"),
    }
    assert_eq!(out, "test_a_passes ... ok\ntest_b_fails ...");
}

#[test]
fn test_discovery_ignores_other_modules() {
    let mut registry = Registry::new();
    registry
        .register::<skips::Peripherals>()
        .register::<fixtures::Lifecycle>()
        .register::<fixtures::Counter>();

    let module = fixtures::Counter::module();
    let names: Vec<&str> = registry.test_cases(module).iter().map(|c| c.name).collect();
    assert_eq!(names, ["Counter", "Lifecycle"]);
    assert_eq!(registry.modules().len(), 2);
}
