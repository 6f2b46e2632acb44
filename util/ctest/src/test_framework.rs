// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test descriptors and failure recording.

use core::{cell::Cell, fmt};
use std::{
    panic::Location,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::test_framework_basic::TestResult;

/// Signature of a test body.
pub type TestFn = fn() -> TestResult;

/// A registered test.
#[derive(Clone, Copy)]
pub struct TestCase {
    pub name: &'static str,
    /// Module the test was declared in. Empty for tests added at runtime.
    pub module: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    pub body: TestFn,
}

impl TestCase {
    pub const fn new(
        name: &'static str,
        module: &'static str,
        file: &'static str,
        line: u32,
        column: u32,
        body: TestFn,
    ) -> Self {
        Self {
            name,
            module,
            file,
            line,
            column,
            body,
        }
    }

    /// Build a case located at the caller, with no module.
    #[track_caller]
    pub fn at_caller(name: &'static str, body: TestFn) -> Self {
        let location = Location::caller();
        Self::new(
            name,
            "",
            location.file(),
            location.line(),
            location.column(),
            body,
        )
    }

    /// Sort key giving declaration order within a file.
    pub(crate) fn source_key(&self) -> (&'static str, u32, u32) {
        (self.file, self.line, self.column)
    }

    #[inline]
    pub fn run(&self) -> TestResult {
        (self.body)()
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("file", &self.file)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

/// One recorded assertion failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub file: &'static str,
    pub line: u32,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)
    }
}

/// Failures of the running test, from whichever thread records them.
static FAILURES: spin::Mutex<Option<Vec<Failure>>> = spin::Mutex::new(None);

/// Held by the outermost scope, so one test runs at a time in a process.
static RUNNING: Mutex<()> = Mutex::new(());

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Collects the failures recorded by any thread while it is alive.
///
/// Scopes nest on the thread that opened them: finishing one restores the
/// sink that was active before it. The outermost scope excludes scopes on
/// other threads until it ends. A thread spawned by a test must be joined
/// before the test returns, or its late failures land in the next test.
pub(crate) struct FailureScope {
    previous: Option<Vec<Failure>>,
    finished: bool,
    _running: Option<MutexGuard<'static, ()>>,
}

impl FailureScope {
    pub(crate) fn begin() -> Self {
        let running =
            (DEPTH.get() == 0).then(|| RUNNING.lock().unwrap_or_else(PoisonError::into_inner));
        DEPTH.set(DEPTH.get() + 1);
        let previous = FAILURES.lock().replace(Vec::new());
        Self {
            previous,
            finished: false,
            _running: running,
        }
    }

    pub(crate) fn finish(mut self) -> Vec<Failure> {
        self.finished = true;
        let previous = self.previous.take();
        let failures = core::mem::replace(&mut *FAILURES.lock(), previous);
        failures.unwrap_or_default()
    }
}

impl Drop for FailureScope {
    fn drop(&mut self) {
        if !self.finished {
            *FAILURES.lock() = self.previous.take();
        }
        DEPTH.set(DEPTH.get() - 1);
    }
}

#[doc(hidden)]
pub fn __record_failure(file: &'static str, line: u32, message: String) {
    let failure = Failure {
        message,
        file,
        line,
    };
    debug!("{}", failure);
    let orphan = match FAILURES.lock().as_mut() {
        Some(failures) => {
            failures.push(failure);
            None
        }
        None => Some(failure),
    };
    if let Some(failure) = orphan {
        warn!("assertion failed outside of a running test: {}", failure);
    }
}

fn with_extra(mut message: String, extra: Option<String>) -> String {
    if let Some(extra) = extra {
        message.push_str(": ");
        message.push_str(&extra);
    }
    message
}

#[doc(hidden)]
#[allow(clippy::too_many_arguments)]
pub fn __record_eq_failure(
    file: &'static str,
    line: u32,
    macro_name: &str,
    actual_expr: &str,
    expected_expr: &str,
    actual: &dyn fmt::Debug,
    expected: &dyn fmt::Debug,
    extra: Option<String>,
) {
    let message = format!(
        "{macro_name}!({actual_expr}, {expected_expr}) failed: expected {expected:?}, actual {actual:?}"
    );
    __record_failure(file, line, with_extra(message, extra));
}

#[doc(hidden)]
pub fn __record_ne_failure(
    file: &'static str,
    line: u32,
    macro_name: &str,
    actual_expr: &str,
    expected_expr: &str,
    actual: &dyn fmt::Debug,
    extra: Option<String>,
) {
    let message = format!(
        "{macro_name}!({actual_expr}, {expected_expr}) failed: expected a value other than {actual:?}"
    );
    __record_failure(file, line, with_extra(message, extra));
}

#[doc(hidden)]
pub fn __record_value_failure(
    file: &'static str,
    line: u32,
    macro_name: &str,
    expr: &str,
    expected: &str,
    actual: &dyn fmt::Debug,
    extra: Option<String>,
) {
    let message = format!("{macro_name}!({expr}) failed: expected {expected}, actual {actual:?}");
    __record_failure(file, line, with_extra(message, extra));
}

#[doc(hidden)]
pub fn __record_fail(file: &'static str, line: u32, extra: Option<String>) {
    let message = match extra {
        Some(extra) => format!("fail!(): {extra}"),
        None => "fail!() reached".into(),
    };
    __record_failure(file, line, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soft_failures() -> TestResult {
        let t = 2 + 2;
        crate::expect_eq!(t, 5);
        crate::expect_ne!(t, 4, "t was {}", t);
        crate::expect_zero!(t);
        crate::expect_nonzero!(0u8);
        crate::expect_true!(t < 0);
        crate::expect_false!(t > 0);
        crate::fail!();
        TestResult::Ok
    }

    fn fatal_after_soft() -> TestResult {
        crate::fail!("before {}", "abort");
        crate::assert_eq!(1 + 1, 3);
        crate::fail!("unreachable");
        TestResult::Ok
    }

    fn all_hold() -> TestResult {
        crate::expect_eq!(2 + 2, 4);
        crate::expect_ne!(2 + 2, 5);
        crate::expect_zero!(0);
        crate::expect_nonzero!(-1i64);
        crate::expect_true!(1 < 2);
        crate::expect_false!(2 < 1);
        crate::assert!(true);
        crate::assert_ne!("a", "b");
        TestResult::Ok
    }

    #[test]
    fn soft_assertions_record_and_continue() {
        let scope = FailureScope::begin();
        assert_eq!(soft_failures(), TestResult::Ok);
        let failures = scope.finish();

        let messages: Vec<_> = failures.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "expect_eq!(t, 5) failed: expected 5, actual 4",
                "expect_ne!(t, 4) failed: expected a value other than 4: t was 4",
                "expect_zero!(t) failed: expected zero, actual 4",
                "expect_nonzero!(0u8) failed: expected nonzero, actual 0",
                "expect_true!(t < 0) failed: expected true, actual false",
                "expect_false!(t > 0) failed: expected false, actual true",
                "fail!() reached",
            ]
        );
        assert!(failures.iter().all(|f| f.file.ends_with("test_framework.rs")));
    }

    #[test]
    fn fatal_assertion_records_then_aborts() {
        let scope = FailureScope::begin();
        assert_eq!(fatal_after_soft(), TestResult::Aborted);
        let failures = scope.finish();

        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].message, "fail!(): before abort");
        assert_eq!(
            failures[1].message,
            "assert_eq!(1 + 1, 3) failed: expected 3, actual 2"
        );
    }

    #[test]
    fn passing_assertions_record_nothing() {
        let scope = FailureScope::begin();
        assert_eq!(all_hold(), TestResult::Ok);
        assert!(scope.finish().is_empty());
    }

    #[test]
    fn nested_scopes_restore_outer_sink() {
        let outer = FailureScope::begin();
        __record_failure("outer.rs", 1, "first".into());

        let inner = FailureScope::begin();
        __record_failure("inner.rs", 2, "second".into());
        let inner_failures = inner.finish();

        __record_failure("outer.rs", 3, "third".into());
        let outer_failures = outer.finish();

        assert_eq!(inner_failures.len(), 1);
        assert_eq!(inner_failures[0].to_string(), "inner.rs:2: second");
        let outer_lines: Vec<_> = outer_failures.iter().map(|f| f.line).collect();
        assert_eq!(outer_lines, [1, 3]);
    }

    #[test]
    fn dropped_scope_restores_outer_sink() {
        let outer = FailureScope::begin();
        let inner = FailureScope::begin();
        __record_failure("inner.rs", 1, "discarded".into());
        drop(inner);
        __record_failure("outer.rs", 2, "kept".into());

        let failures = outer.finish();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message, "kept");
    }

    #[test]
    fn failures_from_spawned_threads_are_collected() {
        let scope = FailureScope::begin();
        let worker = std::thread::spawn(|| {
            let t = 2 + 2;
            crate::expect_eq!(t, 5);
        });
        worker.join().unwrap();
        __record_failure("main.rs", 3, "after join".into());
        let failures = scope.finish();

        let messages: Vec<_> = failures.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            ["expect_eq!(t, 5) failed: expected 5, actual 4", "after join"]
        );
    }

    #[test]
    fn caller_location_is_captured() {
        fn body() -> TestResult {
            TestResult::Ok
        }
        let case = TestCase::at_caller("located", body);
        assert_eq!(case.module, "");
        assert!(case.file.ends_with("test_framework.rs"));
        assert_eq!(case.run(), TestResult::Ok);
    }
}
