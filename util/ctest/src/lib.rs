// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! A small self-registering unit test framework.
//!
//! ```rust,ignore
//! use ctest::{abort, def_test, expect_eq, fail};
//!
//! #[def_test]
//! fn addition() {
//!     let t = 2 + 2;
//!     expect_eq!(t, 4);
//! }
//!
//! #[def_test]
//! fn bail_out() {
//!     let t = -1;
//!     if t < 0 {
//!         abort!();
//!     }
//!     fail!();
//! }
//!
//! ctest::main!();
//! ```

#[macro_use]
extern crate log;

mod assertions;
pub mod config;
pub mod error;
pub mod registry;
pub mod report;
pub mod runner;
pub mod test_framework;
pub mod test_framework_basic;

// Re-export the def_test attribute from the macros crate
pub use ctest_macros::def_test;
// Re-export the runner entry points
pub use runner::{TestRunner, check_duplicates, run_registry, summarize, test_main, test_run, test_run_ok};
// Re-export hidden helper functions for assertion macros
// These are used internally by the assertion macros and should not be called directly
#[doc(hidden)]
pub use test_framework::{
    __record_eq_failure, __record_fail, __record_failure, __record_ne_failure,
    __record_value_failure,
};
// Re-export commonly used types
pub use config::{ColorChoice, Config, DuplicatePolicy, Precedence};
pub use error::{ConfigError, CtestError, CtestResult, RegistryError};
pub use registry::{CTESTS, Registry};
pub use report::{Report, ReportEntry, Reporter, TestStats};
pub use test_framework::{Failure, TestCase, TestFn};
pub use test_framework_basic::{TestOutcome, TestResult, Zero};

#[doc(hidden)]
pub mod __private {
    pub use linkme::{self, distributed_slice};
}

/// Define `fn main` for a test binary that runs every `#[def_test]` in it.
#[macro_export]
macro_rules! main {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::test_main()
        }
    };
}
