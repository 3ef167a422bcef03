//! FILENAME: core/engine/src/logging.rs
// PURPOSE: Category-tagged logging for the formula engine.
// CONTEXT: Messages go through the `log` facade so the host decides where they
// end up. Every line is prefixed with a short category (PARSE, VARS, EVAL).

use std::fmt;

pub const TARGET: &str = "formula_engine";

pub fn write_log(level: log::Level, category: &str, message: fmt::Arguments<'_>) {
    log::log!(target: TARGET, level, "[{}] {}", category, message);
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Debug, $cat, format_args!($($arg)*))
    };
}

macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Info, $cat, format_args!($($arg)*))
    };
}

macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Warn, $cat, format_args!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub(crate) use log_debug;
pub(crate) use log_info;
pub(crate) use log_warn;
