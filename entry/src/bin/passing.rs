// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! A test binary in which every test passes.

use ctest::{TestResult, assert_ne, def_test, expect_eq, expect_false, expect_nonzero, expect_zero};

#[def_test]
fn sum_matches() {
    let t = 2 + 2;
    expect_eq!(t, 4);
}

#[def_test]
fn difference_is_zero() {
    let t = 4 - 4;
    expect_zero!(t);
    expect_nonzero!(t + 1);
}

#[def_test]
fn worker_agrees() {
    let worker = std::thread::spawn(|| {
        let words = ["ctest", "passes"];
        expect_false!(words.is_empty());
        expect_eq!(words.join(" "), "ctest passes");
    });
    if worker.join().is_err() {
        ctest::abort!();
    }
}

#[def_test]
fn explicit_ok() -> TestResult {
    assert_ne!(1, 2);
    TestResult::Ok
}

ctest::main!();
