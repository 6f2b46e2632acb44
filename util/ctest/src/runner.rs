// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test collection and runner module
//!
//! This module provides the `test_run()` function that collects and runs all
//! tests marked with `#[def_test]`, and `test_main()` which turns the result
//! into a process exit code.

use std::{
    any::Any,
    convert::Infallible,
    io::{self, Write},
    panic::{self, AssertUnwindSafe},
    process::ExitCode,
    time::Instant,
};

use crate::{
    config::{Config, DuplicatePolicy, Precedence},
    error::{CtestResult, RegistryError},
    registry::Registry,
    report::{Report, ReportEntry, Reporter, TestStats},
    test_framework::{Failure, FailureScope, TestCase},
    test_framework_basic::TestResult,
};

/// Exit status used when the run could not start or its report could not be written.
pub const SETUP_FAILURE: u8 = 2;

/// Executes registered tests one at a time on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestRunner {
    precedence: Precedence,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precedence(precedence: Precedence) -> Self {
        Self { precedence }
    }

    /// Run every test in `registry` and return the report.
    pub fn run(&self, registry: &Registry) -> Report {
        let Ok(report) = self.run_with(registry, |_| Ok::<_, Infallible>(()));
        report
    }

    /// Run every test, handing each entry to `observer` as soon as it completes.
    ///
    /// An observer error stops the run.
    pub fn run_with<E>(
        &self,
        registry: &Registry,
        mut observer: impl FnMut(&ReportEntry) -> Result<(), E>,
    ) -> Result<Report, E> {
        let mut report = Report::with_capacity(registry.len());
        for case in registry {
            let entry = self.run_case(case);
            observer(&entry)?;
            report.push(entry);
        }
        Ok(report)
    }

    /// Run a single test in isolation.
    ///
    /// A panic escaping the body is treated as an abort and its message is
    /// recorded as a failure.
    pub fn run_case(&self, case: &TestCase) -> ReportEntry {
        debug!("running {}::{}", case.module, case.name);
        let start = Instant::now();

        let scope = FailureScope::begin();
        let result = panic::catch_unwind(AssertUnwindSafe(|| case.run()));
        let mut failures = scope.finish();

        let aborted = match result {
            Ok(TestResult::Ok) => false,
            Ok(TestResult::Aborted) => true,
            Err(payload) => {
                failures.push(Failure {
                    message: format!("panicked: {}", panic_message(payload.as_ref())),
                    file: case.file,
                    line: case.line,
                });
                true
            }
        };
        let outcome = self.precedence.resolve(failures.len(), aborted);
        debug!(
            "{} finished in {:?}: {} ({} failures)",
            case.name,
            start.elapsed(),
            outcome,
            failures.len()
        );

        ReportEntry {
            name: case.name,
            module: case.module,
            outcome,
            failures,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "Box<dyn Any>"
    }
}

/// Count passed, failed and aborted entries.
pub fn summarize(report: &Report) -> TestStats {
    report.summarize()
}

/// Apply the duplicate-name policy to `registry`.
pub fn check_duplicates(registry: &Registry, policy: DuplicatePolicy) -> Result<(), RegistryError> {
    if policy == DuplicatePolicy::Allow {
        return Ok(());
    }
    let duplicates = registry.duplicates();
    if duplicates.is_empty() {
        return Ok(());
    }
    match policy {
        DuplicatePolicy::Reject => Err(RegistryError::DuplicateNames(duplicates)),
        _ => {
            for name in duplicates {
                warn!("test name `{}` is declared more than once", name);
            }
            Ok(())
        }
    }
}

/// Run `registry` under `config`, writing the report to `out` as tests complete.
///
/// A write error stops the output but not the run; it is returned once every
/// test has executed.
pub fn run_registry(config: &Config, registry: &Registry, out: impl Write) -> CtestResult<Report> {
    check_duplicates(registry, config.duplicates)?;
    if registry.is_empty() {
        warn!("no tests found");
    }

    let mut reporter = Reporter::new(out, config.color.enabled());
    let mut write_error = None;
    let Ok(report) = TestRunner::with_precedence(config.precedence).run_with(registry, |entry| {
        if write_error.is_some() {
            return Ok::<_, Infallible>(());
        }
        if let Err(err) = reporter.entry(entry) {
            error!("report output failed, running remaining tests silently: {}", err);
            write_error = Some(err);
        }
        Ok(())
    });
    match write_error {
        Some(err) => Err(err.into()),
        None => {
            reporter.summary(&report.summarize())?;
            Ok(report)
        }
    }
}

/// Run all registered tests with configuration from the environment,
/// printing the report to stdout.
pub fn test_run() -> CtestResult<Report> {
    let config = Config::from_env()?;
    ctest_logger::set_log_level(config.log_level);

    let registry = Registry::collect();
    info!("running {} tests", registry.len());
    run_registry(&config, &registry, io::stdout().lock())
}

/// Run all tests and return whether all tests passed
pub fn test_run_ok() -> bool {
    match test_run() {
        Ok(report) => report.summarize().all_passed(),
        Err(err) => {
            error!("{}", err);
            false
        }
    }
}

/// Entry point for a test binary.
///
/// Exits with 0 iff every test passed, 1 if any failed or aborted, and
/// [`SETUP_FAILURE`] if the run could not complete.
pub fn test_main() -> ExitCode {
    ctest_logger::init_logger();
    match test_run() {
        Ok(report) if report.summarize().all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("ctest: {err}");
            ExitCode::from(SETUP_FAILURE)
        }
    }
}
