// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Assertion macros.
//!
//! Soft assertions (`expect_*!`, `fail!`) record a failure against the test
//! currently running on this thread and let the body continue. Fatal
//! assertions (`assert!`, `assert_eq!`, `assert_ne!`) record a failure and
//! then return `TestResult::Aborted` from the body, as does `abort!()`.
//!
//! The aborting macros expand to a `return`, so they only work directly inside
//! a test body, not inside closures or helpers returning other types.

#[doc(hidden)]
#[macro_export]
macro_rules! __message {
    () => {
        ::core::option::Option::None::<::std::string::String>
    };
    ($($arg:tt)+) => {
        ::core::option::Option::Some(::std::format!($($arg)+))
    };
}

/// Soft check that `actual == expected`.
#[macro_export]
macro_rules! expect_eq {
    ($actual:expr, $expected:expr $(, $($arg:tt)+)?) => {
        match (&$actual, &$expected) {
            (actual, expected) => {
                if !(*actual == *expected) {
                    $crate::__record_eq_failure(
                        ::core::file!(),
                        ::core::line!(),
                        "expect_eq",
                        ::core::stringify!($actual),
                        ::core::stringify!($expected),
                        actual,
                        expected,
                        $crate::__message!($($($arg)+)?),
                    );
                }
            }
        }
    };
}

/// Soft check that `actual != expected`.
#[macro_export]
macro_rules! expect_ne {
    ($actual:expr, $expected:expr $(, $($arg:tt)+)?) => {
        match (&$actual, &$expected) {
            (actual, expected) => {
                if *actual == *expected {
                    $crate::__record_ne_failure(
                        ::core::file!(),
                        ::core::line!(),
                        "expect_ne",
                        ::core::stringify!($actual),
                        ::core::stringify!($expected),
                        actual,
                        $crate::__message!($($($arg)+)?),
                    );
                }
            }
        }
    };
}

/// Soft check that a numeric value is zero.
#[macro_export]
macro_rules! expect_zero {
    ($value:expr $(, $($arg:tt)+)?) => {
        match &$value {
            value => {
                if !$crate::Zero::is_zero(value) {
                    $crate::__record_value_failure(
                        ::core::file!(),
                        ::core::line!(),
                        "expect_zero",
                        ::core::stringify!($value),
                        "zero",
                        value,
                        $crate::__message!($($($arg)+)?),
                    );
                }
            }
        }
    };
}

/// Soft check that a numeric value is not zero.
#[macro_export]
macro_rules! expect_nonzero {
    ($value:expr $(, $($arg:tt)+)?) => {
        match &$value {
            value => {
                if $crate::Zero::is_zero(value) {
                    $crate::__record_value_failure(
                        ::core::file!(),
                        ::core::line!(),
                        "expect_nonzero",
                        ::core::stringify!($value),
                        "nonzero",
                        value,
                        $crate::__message!($($($arg)+)?),
                    );
                }
            }
        }
    };
}

/// Soft check that a condition holds.
#[macro_export]
macro_rules! expect_true {
    ($cond:expr $(, $($arg:tt)+)?) => {
        if !$cond {
            $crate::__record_value_failure(
                ::core::file!(),
                ::core::line!(),
                "expect_true",
                ::core::stringify!($cond),
                "true",
                &false,
                $crate::__message!($($($arg)+)?),
            );
        }
    };
}

/// Soft check that a condition does not hold.
#[macro_export]
macro_rules! expect_false {
    ($cond:expr $(, $($arg:tt)+)?) => {
        if $cond {
            $crate::__record_value_failure(
                ::core::file!(),
                ::core::line!(),
                "expect_false",
                ::core::stringify!($cond),
                "false",
                &true,
                $crate::__message!($($($arg)+)?),
            );
        }
    };
}

/// Record an unconditional failure and keep going.
#[macro_export]
macro_rules! fail {
    ($($arg:tt)*) => {
        $crate::__record_fail(::core::file!(), ::core::line!(), $crate::__message!($($arg)*))
    };
}

/// Stop the current test immediately.
#[macro_export]
macro_rules! abort {
    () => {
        return $crate::TestResult::Aborted
    };
}

/// Fatal check that a condition holds.
#[macro_export]
macro_rules! assert {
    ($cond:expr $(, $($arg:tt)+)?) => {
        if !$cond {
            $crate::__record_value_failure(
                ::core::file!(),
                ::core::line!(),
                "assert",
                ::core::stringify!($cond),
                "true",
                &false,
                $crate::__message!($($($arg)+)?),
            );
            return $crate::TestResult::Aborted;
        }
    };
}

/// Fatal check that `actual == expected`.
#[macro_export]
macro_rules! assert_eq {
    ($actual:expr, $expected:expr $(, $($arg:tt)+)?) => {
        match (&$actual, &$expected) {
            (actual, expected) => {
                if !(*actual == *expected) {
                    $crate::__record_eq_failure(
                        ::core::file!(),
                        ::core::line!(),
                        "assert_eq",
                        ::core::stringify!($actual),
                        ::core::stringify!($expected),
                        actual,
                        expected,
                        $crate::__message!($($($arg)+)?),
                    );
                    return $crate::TestResult::Aborted;
                }
            }
        }
    };
}

/// Fatal check that `actual != expected`.
#[macro_export]
macro_rules! assert_ne {
    ($actual:expr, $expected:expr $(, $($arg:tt)+)?) => {
        match (&$actual, &$expected) {
            (actual, expected) => {
                if *actual == *expected {
                    $crate::__record_ne_failure(
                        ::core::file!(),
                        ::core::line!(),
                        "assert_ne",
                        ::core::stringify!($actual),
                        ::core::stringify!($expected),
                        actual,
                        $crate::__message!($($($arg)+)?),
                    );
                    return $crate::TestResult::Aborted;
                }
            }
        }
    };
}
