// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Errors raised while setting up or reporting a run. Assertion failures are
//! not errors; they are recorded in the report.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate test names: {}", .0.join(", "))]
    DuplicateNames(Vec<&'static str>),
}

/// Any error that stops a run from producing a complete report.
#[derive(Debug, Error)]
pub enum CtestError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type CtestResult<T = ()> = Result<T, CtestError>;
