// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Demo test binary. Every `#[def_test]` below is collected at startup and
//! run by `ctest::main!`; the exit status reports whether all of them passed.

mod test_examples_1;
mod test_examples_2;

ctest::main!();
