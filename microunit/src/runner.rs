//! Test runner and result counters.
//!
//! The runner walks a [`TestSuite`] in order. For each case type it creates
//! one instance, then runs every `test*` method sorted by name:
//!
//! ```text
//! print "{name} ..."  ->  set_up  ->  tests_run += 1  ->  test  ->  tear_down  ->  print " ok"
//! ```
//!
//! A skip prints ` skipped: {reason}` and does not call `tear_down`. What
//! happens on any other error depends on the [`FailureMode`].

use std::any::Any;
use std::io::{self, Stdout, Write};
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use crate::case::{TEST_PREFIX, TestCase, TestMethod};
use crate::error::{InvalidArgument, Outcome, TestError, UnitResult};
use crate::suite::{CaseDescriptor, TestSuite};

/// What the runner does with an error that is not a skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// The error escapes `run` immediately; later tests do not run.
    FailFast,
    /// Count it as a failure or an error and keep going.
    #[default]
    Record,
}

impl FromStr for FailureMode {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "failfast" => Ok(FailureMode::FailFast),
            "record" => Ok(FailureMode::Record),
            other => Err(InvalidArgument(format!("unknown failure mode `{other}`"))),
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestResult {
    pub tests_run: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl TestResult {
    pub const fn new() -> Self {
        Self {
            tests_run: 0,
            failures: 0,
            errors: 0,
            skipped: 0,
        }
    }

    /// Skips do not count against success.
    pub fn was_successful(&self) -> bool {
        self.errors == 0 && self.failures == 0
    }

    /// Count an outcome. `tests_run` is advanced separately, before the
    /// test body is invoked.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Passed => {}
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failed(_) => self.failures += 1,
            Outcome::Errored(_) => self.errors += 1,
        }
    }

    pub fn merge(&mut self, other: &TestResult) {
        self.tests_run += other.tests_run;
        self.failures += other.failures;
        self.errors += other.errors;
        self.skipped += other.skipped;
    }

    /// `Ran {n} tests`, plus ` ({k} skipped)` when anything was skipped.
    pub fn summary(&self) -> String {
        let mut msg = format!("Ran {} tests", self.tests_run);
        if self.skipped > 0 {
            msg.push_str(&format!(" ({} skipped)", self.skipped));
        }
        msg
    }
}

/// State shared by the per-case routine during one run.
pub(crate) struct Execution<'a> {
    result: &'a mut TestResult,
    out: &'a mut dyn Write,
    mode: FailureMode,
}

/// Per-class routine: one instance of `T`, every `test*` method in name order.
pub(crate) fn run_case<T: TestCase + Default>(exec: &mut Execution<'_>) -> UnitResult {
    let mut case = T::default();

    let mut methods = T::tests();
    methods.retain(|method| {
        let runnable = method.name().starts_with(TEST_PREFIX);
        if !runnable {
            debug!("{}: ignoring entry `{}`", T::name(), method.name());
        }
        runnable
    });
    methods.sort_by_key(|method| method.name());

    debug!(
        "running {} test(s) of {}::{}",
        methods.len(),
        T::module(),
        T::name()
    );

    for method in &methods {
        exec.run_method(&mut case, method)?;
    }
    Ok(())
}

impl Execution<'_> {
    fn run_method<T: TestCase>(&mut self, case: &mut T, method: &TestMethod<T>) -> UnitResult {
        write!(self.out, "{} ...", method.name())?;
        self.out.flush()?;

        let outcome = match self.mode {
            FailureMode::FailFast => match invoke(case, method, self.result) {
                Err(err) if !err.is_skip() => {
                    error!("{}::{} aborted the run: {}", T::name(), method.name(), err);
                    return Err(err);
                }
                result => Outcome::from(result),
            },
            FailureMode::Record => invoke_recorded(case, method, self.result),
        };

        match &outcome {
            Outcome::Passed => debug!("{}::{} passed", T::name(), method.name()),
            Outcome::Skipped(reason) => info!("{}::{} skipped: {}", T::name(), method.name(), reason),
            Outcome::Failed(msg) => warn!("{}::{} failed: {}", T::name(), method.name(), msg),
            Outcome::Errored(msg) => warn!("{}::{} errored: {}", T::name(), method.name(), msg),
        }

        self.result.record(&outcome);
        writeln!(self.out, "{outcome}")?;
        Ok(())
    }
}

fn invoke<T: TestCase>(case: &mut T, method: &TestMethod<T>, result: &mut TestResult) -> UnitResult {
    case.set_up()?;
    result.tests_run += 1;
    method.invoke(case)?;
    case.tear_down()
}

/// Like [`invoke`], but panics are caught and `tear_down` also runs after a
/// failed body. The skip path still leaves `tear_down` out.
fn invoke_recorded<T: TestCase>(
    case: &mut T,
    method: &TestMethod<T>,
    result: &mut TestResult,
) -> Outcome {
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| -> UnitResult {
        case.set_up()?;
        result.tests_run += 1;
        let body = method.invoke(case);
        if body.as_ref().is_err_and(TestError::is_skip) {
            return body;
        }
        let teardown = case.tear_down();
        body.and(teardown)
    }));

    match attempt {
        Ok(outcome) => Outcome::from(outcome),
        Err(payload) => Outcome::Errored(format!("panicked: {}", panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs suites and writes the progress report to `W`.
pub struct TestRunner<W = Stdout> {
    out: W,
    mode: FailureMode,
}

impl TestRunner<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for TestRunner<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TestRunner<W> {
    pub fn with_output(out: W) -> Self {
        Self {
            out,
            mode: FailureMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: FailureMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> FailureMode {
        self.mode
    }

    /// Run every case of `suite` in order into a fresh [`TestResult`].
    ///
    /// In [`FailureMode::FailFast`] the first non-skip error is returned and
    /// the partial result is dropped.
    pub fn run(&mut self, suite: &TestSuite) -> UnitResult<TestResult> {
        let mut result = TestResult::new();
        for case in suite.tests() {
            self.run_class(case, &mut result)?;
        }

        info!(
            "run finished: {} run, {} failures, {} errors, {} skipped",
            result.tests_run, result.failures, result.errors, result.skipped
        );
        Ok(result)
    }

    pub fn run_class(&mut self, case: &CaseDescriptor, result: &mut TestResult) -> UnitResult {
        let mut exec = Execution {
            result,
            out: &mut self.out,
            mode: self.mode,
        };
        case.run(&mut exec)
    }

    /// Print the summary line, and in record mode a `FAILED` line when the
    /// run was unsuccessful.
    pub fn print_summary(&mut self, result: &TestResult) -> UnitResult {
        writeln!(self.out, "{}", result.summary())?;
        if self.mode == FailureMode::Record && !result.was_successful() {
            writeln!(
                self.out,
                "FAILED (failures={}, errors={})",
                result.failures, result.errors
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
