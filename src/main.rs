//! microunit-runner - runs the bundled test cases from the command line.
//!
//! With no module argument every registered module runs in name order.
//! The process exits non-zero when any test failed or errored.

#[macro_use]
extern crate log;

mod config;
mod console;
mod error;
mod tests;

use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use log::LevelFilter;
use microunit::{FailureMode, Registry, TestResult, TestRunner, main_with};

use crate::config::RunConfig;
use crate::error::RunnerResult;

#[derive(Debug, Parser)]
#[command(name = "microunit", version, about = "Run the bundled microunit test cases")]
struct Cli {
    /// Module to run, as a full path or its trailing segments (e.g. `ring`)
    module: Option<String>,

    /// Stop at the first failing test
    #[arg(long)]
    fail_fast: bool,

    /// List modules and their test cases, then exit
    #[arg(long)]
    list: bool,

    /// Run the cases that ask the operator questions; overrides MICROUNIT_INTERACTIVE
    #[arg(long)]
    interactive: bool,

    /// Log level (off, error, warn, info, debug, trace); overrides LOG
    #[arg(long, value_name = "LEVEL")]
    log: Option<LevelFilter>,
}

fn main() -> RunnerResult<ExitCode> {
    let cli = Cli::parse();

    let mut config = RunConfig::from_env().context("Failed to read runner configuration")?;
    if let Some(level) = cli.log {
        config.log_level = level;
    }
    if cli.fail_fast {
        config.mode = FailureMode::FailFast;
    }
    if cli.interactive {
        config.interactive = true;
    }
    config.install();

    console::init_logger(config.log_level)?;
    debug!("runner configuration: {config:?}");

    let registry = tests::registry();
    if cli.list {
        list(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    let modules = match cli.module.as_deref() {
        Some(name) => vec![resolve_module(&registry, name)?],
        None => registry.modules(),
    };

    let mut runner = TestRunner::new().with_mode(config.mode);
    let mut total = TestResult::new();
    for module in modules {
        info!("running {module}");
        let result = main_with(&registry, module, &mut runner)
            .with_context(|| format!("test run of {module} aborted"))?;
        total.merge(&result);
    }

    if total.was_successful() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!(
            "{} of {} tests did not pass",
            total.failures + total.errors,
            total.tests_run
        );
        Ok(ExitCode::FAILURE)
    }
}

/// Map a module argument to a registered module path.
///
/// Exact paths win; otherwise the argument must match the trailing `::`
/// segments of exactly one module.
fn resolve_module(registry: &Registry, name: &str) -> RunnerResult<&'static str> {
    let modules = registry.modules();
    if let Some(module) = modules.iter().copied().find(|module| *module == name) {
        return Ok(module);
    }

    let suffix = format!("::{name}");
    let matches: Vec<&'static str> = modules
        .into_iter()
        .filter(|module| module.ends_with(&suffix))
        .collect();
    match matches.as_slice() {
        [module] => Ok(*module),
        [] => bail!("no test module named `{name}`"),
        _ => bail!("`{name}` is ambiguous: {}", matches.join(", ")),
    }
}

fn list(registry: &Registry) {
    for module in registry.modules() {
        println!("{module}");
        for case in registry.test_cases(module) {
            println!("    {}", case.name);
        }
    }
}
