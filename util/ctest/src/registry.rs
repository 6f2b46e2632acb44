// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test case registry
//!
//! `#[def_test]` places a [`TestCase`] into the [`CTESTS`] distributed slice
//! at link time. [`Registry::collect`] is the single explicit pass that turns
//! that slice into an ordered registry before anything runs.

use std::collections::HashMap;

use linkme::distributed_slice;

use crate::test_framework::{TestCase, TestFn};

/// Every test declared with `#[def_test]` in the final binary.
///
/// The linker decides the placement of entries; use [`Registry::collect`]
/// rather than iterating this directly.
#[distributed_slice]
pub static CTESTS: [TestCase];

/// Ordered, append-only collection of test cases.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    pub const fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Build a registry from every `#[def_test]` in the binary.
    ///
    /// Entries are sorted by source file, then line and column, which gives
    /// declaration order within a file and a stable file order for a build.
    pub fn collect() -> Self {
        let registry = Self::from_cases(CTESTS.iter().copied());
        debug!("collected {} registered tests", registry.len());
        registry
    }

    /// Build a registry from `cases`, ordering them by source location.
    pub fn from_cases(cases: impl IntoIterator<Item = TestCase>) -> Self {
        let mut cases: Vec<_> = cases.into_iter().collect();
        cases.sort_by_key(TestCase::source_key);
        Self { cases }
    }

    /// Append a test located at the caller.
    #[track_caller]
    pub fn declare(&mut self, name: &'static str, body: TestFn) -> &mut Self {
        self.push(TestCase::at_caller(name, body))
    }

    /// Append an already built test case.
    pub fn push(&mut self, case: TestCase) -> &mut Self {
        trace!("declare {}::{} ({}:{})", case.module, case.name, case.file, case.line);
        self.cases.push(case);
        self
    }

    /// Iterate over the cases in registration order.
    pub fn all_entries(&self) -> impl ExactSizeIterator<Item = &TestCase> + Clone + '_ {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Names declared more than once, in order of first declaration.
    pub fn duplicates(&self) -> Vec<&'static str> {
        let mut seen: HashMap<&'static str, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for case in &self.cases {
            let count = seen.entry(case.name).or_default();
            *count += 1;
            if *count == 2 {
                duplicates.push(case.name);
            }
        }
        duplicates
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a TestCase;
    type IntoIter = core::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}
