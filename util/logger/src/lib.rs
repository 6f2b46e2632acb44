// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Console logger used by the ctest runner.
//!
//! Log records go to stderr so that stdout only carries the test report.

use std::{
    fmt::{self, Display, Write as _},
    io::{self, Write},
};

use log::{Level, LevelFilter, Log, Metadata, Record};

macro_rules! color_fmt {
    ($color_code:expr, $($arg:tt)*) => {
        format_args!("\u{1B}[{}m{}\u{1B}[m", $color_code as u8, format_args!($($arg)*))
    };
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black         = 30,
    Red           = 31,
    Green         = 32,
    Yellow        = 33,
    Blue          = 34,
    Magenta       = 35,
    Cyan          = 36,
    White         = 37,
    BrightBlack   = 90,
    BrightRed     = 91,
    BrightGreen   = 92,
    BrightYellow  = 93,
    BrightBlue    = 94,
    BrightMagenta = 95,
    BrightCyan    = 96,
    BrightWhite   = 97,
}

/// Wrap `text` in the escape sequence for `color`.
pub fn paint(color: AnsiColor, text: impl Display) -> String {
    let mut out = String::new();
    let _ = out.write_fmt(color_fmt!(color, "{}", text));
    out
}

struct ConsoleLogger;

impl Log for ConsoleLogger {
    #[inline]
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let line = record.line().unwrap_or(0);
        let path = record.target();
        let color = match level {
            Level::Error => AnsiColor::Red,
            Level::Warn => AnsiColor::Yellow,
            Level::Info => AnsiColor::Green,
            Level::Debug => AnsiColor::Cyan,
            Level::Trace => AnsiColor::BrightBlack,
        };

        let _ = print_fmt(color_fmt!(
            AnsiColor::White,
            "[{time} {path}:{line}] {args}\n",
            time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
            path = path,
            line = line,
            args = color_fmt!(color, "{}", record.args()),
        ));
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Write preformatted arguments to stderr, serialized against other log lines.
pub fn print_fmt(args: fmt::Arguments) -> io::Result<()> {
    static LOCK: spin::Mutex<()> = spin::Mutex::new(());

    let _guard = LOCK.lock();
    io::stderr().lock().write_fmt(args)
}

/// Install the console logger with the default `warn` level.
///
/// Returns `false` if another logger was already installed; the level is
/// left untouched in that case.
pub fn init_logger() -> bool {
    if log::set_logger(&ConsoleLogger).is_err() {
        return false;
    }
    log::set_max_level(LevelFilter::Warn);
    true
}

/// Set the global level.
pub fn set_log_level(level: LevelFilter) {
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_text_in_escape_codes() {
        assert_eq!(paint(AnsiColor::Green, "pass"), "\u{1B}[32mpass\u{1B}[m");
        assert_eq!(paint(AnsiColor::Red, 42), "\u{1B}[31m42\u{1B}[m");
    }

    #[test]
    fn level_controls_enabled_records() {
        set_log_level(LevelFilter::Info);
        let logger = ConsoleLogger;
        let metadata = |level| Metadata::builder().level(level).target("ctest").build();
        assert!(logger.enabled(&metadata(Level::Warn)));
        assert!(logger.enabled(&metadata(Level::Info)));
        assert!(!logger.enabled(&metadata(Level::Debug)));
    }
}
