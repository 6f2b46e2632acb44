// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Run results and their console rendering.

use core::fmt;
use std::io::{self, Write};

use ctest_logger::{AnsiColor, paint};

use crate::{test_framework::Failure, test_framework_basic::TestOutcome};

/// Result of executing one registered test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub name: &'static str,
    pub module: &'static str,
    pub outcome: TestOutcome,
    /// Failures in the order they were recorded, including those recorded
    /// before an abort.
    pub failures: Vec<Failure>,
}

/// One entry per registered test, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given name.
    pub fn get(&self, name: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn summarize(&self) -> TestStats {
        let mut stats = TestStats::default();
        for entry in &self.entries {
            stats.record(entry.outcome);
        }
        stats
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a ReportEntry;
    type IntoIter = core::slice::Iter<'a, ReportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Outcome counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub aborted: usize,
}

impl TestStats {
    pub fn record(&mut self, outcome: TestOutcome) {
        self.total += 1;
        match outcome {
            TestOutcome::Passed => self.passed += 1,
            TestOutcome::Failed => self.failed += 1,
            TestOutcome::Aborted => self.aborted += 1,
        }
    }

    /// `true` when every test passed. An empty run counts as passing.
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Renders the tally, e.g. `3 passed, 2 failed, 1 aborted`.
impl fmt::Display for TestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} aborted",
            self.passed, self.failed, self.aborted
        )
    }
}

/// Writes report lines as tests complete.
pub struct Reporter<W> {
    out: W,
    color: bool,
    module: Option<&'static str>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            module: None,
        }
    }

    fn colored(&self, color: AnsiColor, text: &str) -> String {
        if self.color {
            paint(color, text)
        } else {
            text.to_string()
        }
    }

    /// Print one entry, preceded by a module heading when the module changes.
    pub fn entry(&mut self, entry: &ReportEntry) -> io::Result<()> {
        if self.module != Some(entry.module) {
            self.module = Some(entry.module);
            if !entry.module.is_empty() {
                writeln!(self.out, "{}:", entry.module)?;
            }
        }

        let color = match entry.outcome {
            TestOutcome::Passed => AnsiColor::Green,
            TestOutcome::Failed => AnsiColor::Red,
            TestOutcome::Aborted => AnsiColor::Yellow,
        };
        let label = self.colored(color, &format!("{}:", entry.outcome));
        writeln!(self.out, "{label} {}", entry.name)?;
        for failure in &entry.failures {
            writeln!(self.out, "    {failure}")?;
        }
        Ok(())
    }

    /// Print the final tally and verdict.
    pub fn summary(&mut self, stats: &TestStats) -> io::Result<()> {
        let (color, verdict) = if stats.all_passed() {
            (AnsiColor::Green, "all tests passed")
        } else {
            (AnsiColor::Red, "tests failed")
        };
        let tally = format!("executed {} tests: {}", stats.total, stats);
        writeln!(self.out, "{}", self.colored(color, &tally))?;
        writeln!(self.out, "{}", self.colored(color, verdict))?;
        self.out.flush()
    }

    /// Print a complete report.
    pub fn report(&mut self, report: &Report) -> io::Result<TestStats> {
        for entry in report {
            self.entry(entry)?;
        }
        let stats = report.summarize();
        self.summary(&stats)?;
        Ok(stats)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
