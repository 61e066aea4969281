//! crates/logging/src/thread_local.rs
//! Thread-local storage for sink configuration and event collection.

use std::cell::RefCell;
use std::io::{self, Write};

use super::config::{LogConfig, LogDestination};
use super::levels::LogLevel;

thread_local! {
    static CONFIG: RefCell<LogConfig> = RefCell::new(LogConfig::default());
    #[allow(clippy::missing_const_for_thread_local)]
    static EVENTS: RefCell<Vec<DiagnosticEvent>> = RefCell::new(Vec::new());
}

/// Diagnostic captured by a [`LogDestination::Capture`] sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// Severity the message was emitted at.
    pub level: LogLevel,
    /// The rendered message.
    pub message: String,
}

/// Initialize the sink configuration for the current thread.
pub fn init(config: LogConfig) {
    CONFIG.with(|c| {
        *c.borrow_mut() = config;
    });
}

/// Returns the configuration active on the current thread.
pub fn current() -> LogConfig {
    CONFIG.with(|c| *c.borrow())
}

/// Check whether a message at `level` would be emitted on this thread.
pub fn enabled(level: LogLevel) -> bool {
    CONFIG.with(|c| c.borrow().admits(level))
}

/// Emit a diagnostic at `level`.
///
/// Messages above the thread's threshold are dropped. Accepted messages go to
/// the configured [`LogDestination`]; a failure to write to stderr is ignored
/// since diagnostics never drive control flow.
pub fn emit(level: LogLevel, message: String) {
    let config = current();
    if !config.admits(level) {
        return;
    }

    match config.destination {
        LogDestination::Stderr => {
            let _ = render_line(&mut io::stderr().lock(), level, &message);
        }
        LogDestination::Capture => {
            EVENTS.with(|e| e.borrow_mut().push(DiagnosticEvent { level, message }));
        }
        #[cfg(feature = "tracing")]
        LogDestination::Tracing => super::tracing_bridge::forward(level, &message),
    }
}

/// Drain all collected events, clearing the internal buffer.
pub fn drain_events() -> Vec<DiagnosticEvent> {
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}

/// Writes `range-send LEVEL: message` followed by a newline.
pub fn render_line<W: Write>(writer: &mut W, level: LogLevel, message: &str) -> io::Result<()> {
    writeln!(writer, "range-send {level}: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_and_check() {
        init(LogConfig::capture(LogLevel::Info));

        assert!(enabled(LogLevel::Error));
        assert!(enabled(LogLevel::Info));
        assert!(!enabled(LogLevel::Debug));
    }

    #[test]
    fn test_emit_and_drain() {
        init(LogConfig::capture(LogLevel::Debug));
        drain_events();

        emit(LogLevel::Warn, "first".to_string());
        emit(LogLevel::Debug, "second".to_string());

        let events = drain_events();
        assert_eq!(
            events,
            vec![
                DiagnosticEvent {
                    level: LogLevel::Warn,
                    message: "first".to_string(),
                },
                DiagnosticEvent {
                    level: LogLevel::Debug,
                    message: "second".to_string(),
                },
            ]
        );

        // Events should be drained
        assert!(drain_events().is_empty());
    }

    #[test]
    fn emit_drops_messages_above_threshold() {
        init(LogConfig::capture(LogLevel::Warn));
        drain_events();

        emit(LogLevel::Debug, "hidden".to_string());
        emit(LogLevel::MaxDebug, "hidden".to_string());

        assert!(drain_events().is_empty());
    }

    #[test]
    fn stderr_destination_does_not_capture() {
        init(LogConfig::new(LogLevel::MaxDebug));
        drain_events();

        emit(LogLevel::Off, "never".to_string());
        emit(LogLevel::MaxDebug, "to stderr".to_string());

        assert!(drain_events().is_empty());
    }

    #[test]
    fn render_line_formats_level_prefix() {
        let mut out = Vec::new();
        render_line(&mut out, LogLevel::Warn, "sendfile disabled").unwrap();
        assert_eq!(out, b"range-send warn: sendfile disabled\n");
    }

    #[test]
    fn reinit_overwrites_config() {
        init(LogConfig::capture(LogLevel::MaxDebug));
        assert!(enabled(LogLevel::MaxDebug));

        init(LogConfig::capture(LogLevel::Error));
        assert!(!enabled(LogLevel::Warn));
        assert_eq!(current().level, LogLevel::Error);
    }

    #[test]
    fn configuration_is_per_thread() {
        init(LogConfig::capture(LogLevel::MaxDebug));

        let other = std::thread::spawn(|| current()).join().unwrap();

        assert_eq!(other, LogConfig::default());
        assert_eq!(current().level, LogLevel::MaxDebug);
    }
}
