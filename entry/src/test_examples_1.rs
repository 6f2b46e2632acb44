// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use ctest::{abort, def_test, expect_eq, expect_zero, fail};

#[def_test]
fn test_something() {
    let t = 2 + 2;
    expect_eq!(t, 4);
}

#[def_test]
fn test_something_else() {
    let t = 0;
    expect_zero!(t);
}

#[def_test]
fn yet_another_test() {
    let t = -1;
    if t < 0 {
        abort!();
    }

    fail!();
}
