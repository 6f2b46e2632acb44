// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use ctest::{abort, def_test, expect_eq, expect_ne, fail};

#[def_test]
fn a_failing_test() {
    let t = 2 + 2;
    expect_eq!(t, 5);
}

#[def_test]
fn another_failing_test() {
    let t = 2 + 2;
    expect_ne!(t, 4);
}

#[def_test]
fn yet_another_failing_test() {
    let t = 4;
    if t < 0 {
        abort!();
    }

    fail!();
}
