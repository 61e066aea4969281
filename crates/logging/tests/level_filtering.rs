//! Integration tests for threshold filtering through the public macros.
//!
//! Each test runs on its own thread, so the thread-local sink set up by
//! `init` never leaks between tests.

use logging::{
    DiagnosticEvent, LogConfig, LogLevel, debug_log, drain_events, enabled, fatal_log, init,
    log_at, warn_log,
};

fn capture(level: LogLevel) {
    init(LogConfig::capture(level));
    drain_events();
}

// ============================================================================
// Threshold Tests
// ============================================================================

/// Verifies every level at or below the threshold is captured in order.
#[test]
fn captures_levels_at_or_below_threshold() {
    capture(LogLevel::Debug);

    fatal_log!("fatal {}", 1);
    log_at!(Error, "error {}", 2);
    warn_log!("warn {}", 3);
    log_at!(Info, "info {}", 4);
    debug_log!("debug {}", 5);
    log_at!(MaxDebug, "maxdebug {}", 6);

    let levels: Vec<LogLevel> = drain_events().into_iter().map(|e| e.level).collect();
    assert_eq!(
        levels,
        vec![
            LogLevel::Fatal,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
        ]
    );
}

/// Verifies the default warn threshold hides debug chatter.
#[test]
fn default_threshold_hides_debug() {
    init(LogConfig {
        destination: logging::LogDestination::Capture,
        ..LogConfig::default()
    });
    drain_events();

    debug_log!("hidden");
    warn_log!("shown");

    assert_eq!(
        drain_events(),
        vec![DiagnosticEvent {
            level: LogLevel::Warn,
            message: "shown".to_string(),
        }]
    );
}

/// Verifies the off threshold silences even fatal messages.
#[test]
fn off_threshold_silences_everything() {
    capture(LogLevel::Off);

    fatal_log!("nobody hears this");

    assert!(!enabled(LogLevel::Fatal));
    assert!(drain_events().is_empty());
}

// ============================================================================
// Lazy Formatting Tests
// ============================================================================

/// Verifies arguments are not evaluated when the level is filtered out.
#[test]
fn filtered_messages_skip_formatting() {
    capture(LogLevel::Warn);

    let mut evaluated = false;
    let mut probe = || {
        evaluated = true;
        "value"
    };
    log_at!(MaxDebug, "probe {}", probe());

    assert!(!evaluated);
    assert!(drain_events().is_empty());
}

/// Verifies verbosity counts raise the threshold one level per step.
#[test]
fn verbose_level_two_admits_debug() {
    init(LogConfig {
        destination: logging::LogDestination::Capture,
        ..LogConfig::from_verbose_level(2)
    });
    drain_events();

    debug_log!("visible at -vv");
    log_at!(MaxDebug, "needs -vvv");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "visible at -vv");
}

#[cfg(feature = "serde")]
#[test]
fn config_serializes_with_lowercase_names() {
    let json = serde_json::to_string(&LogConfig::capture(LogLevel::MaxDebug)).unwrap();
    assert_eq!(json, r#"{"level":"maxdebug","destination":"capture"}"#);

    let back: LogConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, LogConfig::capture(LogLevel::MaxDebug));
}
