//! Bundled test cases.


use microunit::Registry;

/// Every test case this binary can run.
pub fn registry() -> Registry {
    microunit::cases![
        basics::Arithmetic,
        basics::Collections,
        console::Operator,
        ring::RingBuffer,
    ]
}

#[cfg(test)]
mod tests {
    use microunit::{FailureMode, TestCase, TestResult, TestRunner, main_with};
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(module: &str) -> (TestResult, String) {
        let registry = registry();
        let mut runner = TestRunner::with_output(Vec::new()).with_mode(FailureMode::FailFast);
        let result = main_with(&registry, module, &mut runner).unwrap();
        (result, String::from_utf8(runner.into_output()).unwrap())
    }

    #[test]
    fn test_bundled_modules() {
        let modules = registry().modules();
        assert_eq!(modules.len(), 3);
        assert!(modules.iter().all(|m| m.starts_with("microunit_runner::tests::")));
    }

    #[test]
    fn test_basics_pass() {
        let (result, out) = run(basics::Arithmetic::module());
        assert!(result.was_successful());
        assert_eq!(result.tests_run, 13);
        assert_eq!(result.skipped, 1);
        assert!(out.contains("test_wide_multiply ... skipped: wide multiply"));
        assert!(out.ends_with("Ran 13 tests (1 skipped)\n"));
    }

    #[test]
    fn test_ring_buffer_pass() {
        let (result, out) = run(ring::RingBuffer::module());
        assert_eq!(
            result,
            TestResult {
                tests_run: 4,
                ..TestResult::default()
            }
        );
        assert_eq!(
            out,
            "test_fifo_order ... ok\n\
             test_full_ring_rejects ... ok\n\
             test_starts_empty ... ok\n\
             test_wraps_after_pop ... ok\n\
             Ran 4 tests\n"
        );
    }
}
