//! crates/logging/src/macros.rs
//! Formatting macros that route through the thread-local sink.

/// Emit a diagnostic at the named [`LogLevel`](crate::LogLevel) variant.
///
/// The message is only formatted when the level passes the current thread's
/// threshold.
///
/// # Example
/// ```
/// use logging::{drain_events, init, log_at, LogConfig, LogLevel};
///
/// init(LogConfig::capture(LogLevel::Debug));
/// log_at!(Debug, "sendfile range {} to {}", 0, 4096);
/// log_at!(MaxDebug, "suppressed");
///
/// let events = drain_events();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].message, "sendfile range 0 to 4096");
/// ```
#[macro_export]
macro_rules! log_at {
    ($level:ident, $($arg:tt)*) => {{
        let level = $crate::LogLevel::$level;
        if $crate::enabled(level) {
            $crate::emit(level, ::std::format!($($arg)*));
        }
    }};
}

/// Emit a fatal diagnostic.
#[macro_export]
macro_rules! fatal_log {
    ($($arg:tt)*) => {
        $crate::log_at!(Fatal, $($arg)*)
    };
}

/// Emit a warning diagnostic.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::log_at!(Warn, $($arg)*)
    };
}

/// Emit a debug diagnostic.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::log_at!(Debug, $($arg)*)
    };
}
