// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Runner configuration.
//!
//! There is no command line; [`Config::from_env`] reads `CTEST_LOG`,
//! `CTEST_COLOR`, `CTEST_DUPLICATES` and `CTEST_PRECEDENCE`.

use std::{env, io::IsTerminal, str::FromStr};

use log::LevelFilter;
use strum::{Display, EnumString};

use crate::{error::ConfigError, test_framework_basic::TestOutcome};

pub const ENV_LOG: &str = "CTEST_LOG";
pub const ENV_COLOR: &str = "CTEST_COLOR";
pub const ENV_DUPLICATES: &str = "CTEST_DUPLICATES";
pub const ENV_PRECEDENCE: &str = "CTEST_PRECEDENCE";

/// When to color the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
        }
    }
}

/// What to do when several tests share a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DuplicatePolicy {
    Allow,
    #[default]
    Warn,
    Reject,
}

/// Outcome of a test that recorded soft failures and then aborted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Precedence {
    #[default]
    AbortWins,
    FailureWins,
}

impl Precedence {
    /// Resolve the outcome of one execution.
    pub fn resolve(self, failure_count: usize, aborted: bool) -> TestOutcome {
        match (aborted, failure_count) {
            (false, 0) => TestOutcome::Passed,
            (false, _) => TestOutcome::Failed,
            (true, 0) => TestOutcome::Aborted,
            (true, _) => match self {
                Self::AbortWins => TestOutcome::Aborted,
                Self::FailureWins => TestOutcome::Failed,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum level of diagnostics written to stderr.
    pub log_level: LevelFilter,
    pub color: ColorChoice,
    pub duplicates: DuplicatePolicy,
    pub precedence: Precedence,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Warn,
            color: ColorChoice::default(),
            duplicates: DuplicatePolicy::default(),
            precedence: Precedence::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by the `CTEST_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(level) = parse_var(&lookup, ENV_LOG)? {
            config.log_level = level;
        }
        if let Some(color) = parse_var(&lookup, ENV_COLOR)? {
            config.color = color;
        }
        if let Some(duplicates) = parse_var(&lookup, ENV_DUPLICATES)? {
            config.duplicates = duplicates;
        }
        if let Some(precedence) = parse_var(&lookup, ENV_PRECEDENCE)? {
            config.precedence = precedence;
        }
        Ok(config)
    }

    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(
        vars: &[(&'static str, &'static str)],
    ) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        move |var| vars.get(var).map(|value| value.to_string())
    }

    #[test]
    fn defaults_without_variables() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.duplicates, DuplicatePolicy::Warn);
        assert_eq!(config.precedence, Precedence::AbortWins);
    }

    #[test]
    fn variables_override_defaults() {
        let config = Config::from_lookup(lookup_in(&[
            (ENV_LOG, "Debug"),
            (ENV_COLOR, "never"),
            (ENV_DUPLICATES, "Reject"),
            (ENV_PRECEDENCE, " failure-wins "),
        ]))
        .unwrap();

        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.precedence, Precedence::FailureWins);
    }

    #[test]
    fn invalid_value_names_the_variable() {
        let err = Config::from_lookup(lookup_in(&[(ENV_PRECEDENCE, "sometimes")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: ENV_PRECEDENCE,
                value: "sometimes".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid value \"sometimes\" for CTEST_PRECEDENCE"
        );
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = Config::from_lookup(lookup_in(&[(ENV_LOG, "bogus")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: ENV_LOG,
                value: "bogus".into(),
            }
        );
        assert_eq!(err.to_string(), "invalid value \"bogus\" for CTEST_LOG");

        let off = Config::from_lookup(lookup_in(&[(ENV_LOG, "off")])).unwrap();
        assert_eq!(off.log_level, LevelFilter::Off);
    }

    #[test]
    fn policies_display_as_kebab_case() {
        assert_eq!(Precedence::FailureWins.to_string(), "failure-wins");
        assert_eq!(DuplicatePolicy::Warn.to_string(), "warn");
        assert_eq!(ColorChoice::Always.to_string(), "always");
    }

    #[test]
    fn precedence_resolution() {
        for precedence in [Precedence::AbortWins, Precedence::FailureWins] {
            assert_eq!(precedence.resolve(0, false), TestOutcome::Passed);
            assert_eq!(precedence.resolve(2, false), TestOutcome::Failed);
            assert_eq!(precedence.resolve(0, true), TestOutcome::Aborted);
        }
        assert_eq!(Precedence::AbortWins.resolve(1, true), TestOutcome::Aborted);
        assert_eq!(Precedence::FailureWins.resolve(1, true), TestOutcome::Failed);
    }

    #[test]
    fn explicit_color_choices() {
        assert!(ColorChoice::Always.enabled());
        assert!(!ColorChoice::Never.enabled());
    }
}
