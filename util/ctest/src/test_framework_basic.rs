// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Basic value types shared by test bodies, the runner and the report.

use core::fmt;

/// Control flow returned by a test body.
///
/// Bodies declared with `#[def_test]` without a return type get an implicit
/// `TestResult::Ok` appended. Fatal assertions and `abort!()` return
/// `TestResult::Aborted` early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum TestResult {
    /// The body ran to completion.
    Ok,
    /// The body was cut short.
    Aborted,
}

/// Final state of one executed test.
///
/// Variants are ordered by severity, so `max` picks the worse outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestOutcome {
    Passed,
    Failed,
    Aborted,
}

impl TestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "pass",
            Self::Failed => "fail",
            Self::Aborted => "abort",
        }
    }

    pub fn is_passed(&self) -> bool {
        *self == Self::Passed
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types with a zero value, used by `expect_zero!` and `expect_nonzero!`.
pub trait Zero {
    fn is_zero(&self) -> bool;
}

macro_rules! impl_zero {
    ($zero:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl Zero for $ty {
                #[inline]
                fn is_zero(&self) -> bool {
                    *self == $zero
                }
            }
        )+
    };
}

impl_zero!(0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_zero!(0.0 => f32, f64);

impl<T: Zero + ?Sized> Zero for &T {
    #[inline]
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_severity_order() {
        assert!(TestOutcome::Passed < TestOutcome::Failed);
        assert!(TestOutcome::Failed < TestOutcome::Aborted);
        assert_eq!(
            TestOutcome::Failed.max(TestOutcome::Aborted),
            TestOutcome::Aborted
        );
    }

    #[test]
    fn zero_values() {
        assert!(0i32.is_zero());
        assert!(0u64.is_zero());
        assert!(!(-1i8).is_zero());
        assert!(0.0f64.is_zero());
        assert!((-0.0f32).is_zero());
        assert!(!(0.5f32).is_zero());
        assert!((&0usize).is_zero());
    }
}
