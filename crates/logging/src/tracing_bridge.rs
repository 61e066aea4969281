//! crates/logging/src/tracing_bridge.rs
//! Bridge from the diagnostic sink to the tracing crate.
//!
//! With [`LogDestination::Tracing`](crate::LogDestination::Tracing) every
//! accepted diagnostic becomes a `tracing` event under the [`TARGET`] target,
//! so embedders that already run a subscriber see transfer diagnostics next to
//! their own.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LogConfig, LogLevel, init_tracing};
//!
//! init_tracing(LogConfig::new(LogLevel::Debug));
//! logging::debug_log!("sendfile range {} to {}", 0, 4096);
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

use super::config::{LogConfig, LogDestination};
use super::levels::LogLevel;

/// Target attached to forwarded events.
pub const TARGET: &str = "range_send";

/// Map a sink level to a tracing level.
///
/// `Fatal` has no tracing counterpart and is reported as `ERROR`.
pub const fn to_tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Off | LogLevel::Fatal | LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::MaxDebug => Level::TRACE,
    }
}

/// Directive string understood by [`EnvFilter`] for a sink threshold.
pub const fn filter_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Off => "range_send=off",
        LogLevel::Fatal | LogLevel::Error => "range_send=error",
        LogLevel::Warn => "range_send=warn",
        LogLevel::Info => "range_send=info",
        LogLevel::Debug => "range_send=debug",
        LogLevel::MaxDebug => "range_send=trace",
    }
}

pub(crate) fn forward(level: LogLevel, message: &str) {
    match level {
        LogLevel::Off => {}
        LogLevel::Fatal => tracing::error!(target: "range_send", fatal = true, "{}", message),
        LogLevel::Error => tracing::error!(target: "range_send", "{}", message),
        LogLevel::Warn => tracing::warn!(target: "range_send", "{}", message),
        LogLevel::Info => tracing::info!(target: "range_send", "{}", message),
        LogLevel::Debug => tracing::debug!(target: "range_send", "{}", message),
        LogLevel::MaxDebug => tracing::trace!(target: "range_send", "{}", message),
    }
}

/// Initialize tracing output for the sink.
///
/// Switches the calling thread's sink to [`LogDestination::Tracing`] and
/// installs a global fmt subscriber. `RUST_LOG` takes precedence over the
/// configured level when set. Installing a second global subscriber fails
/// silently, matching `tracing_subscriber`'s `try_init` semantics.
pub fn init_tracing(config: LogConfig) {
    super::thread_local::init(LogConfig {
        destination: LogDestination::Tracing,
        ..config
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config.level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
