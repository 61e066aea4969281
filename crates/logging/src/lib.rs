#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the leveled diagnostic sink used by the transfer crates in
//! this workspace. Callers hand it a [`LogLevel`] and a formatted message;
//! the sink decides, from the calling thread's [`LogConfig`], whether the
//! message is dropped, rendered to stderr, captured in memory, or forwarded
//! to `tracing`.
//!
//! # Design
//!
//! Configuration and captured events live in thread-local storage, so each
//! worker thread (and each test) owns an independent sink. The formatting
//! macros ([`log_at!`], [`debug_log!`], [`warn_log!`], [`fatal_log!`]) check the
//! threshold before building the message string.
//!
//! # Invariants
//!
//! - Diagnostics never influence control flow; a failed stderr write is
//!   swallowed.
//! - [`LogLevel::Off`] is a threshold only and is never emitted.
//! - Captured events keep emission order and are cleared by
//!   [`drain_events`].
//!
//! # Examples
//!
//! ```
//! use logging::{debug_log, drain_events, init, warn_log, LogConfig, LogLevel};
//!
//! init(LogConfig::capture(LogLevel::Warn));
//! warn_log!("sendfile unsupported, falling back");
//! debug_log!("not captured at warn");
//!
//! let events = drain_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].level, LogLevel::Warn);
//! ```

mod config;
mod levels;
mod macros;
mod thread_local;

#[cfg(feature = "tracing")]
pub mod tracing_bridge;

pub use config::{LOG_ENV_VAR, LogConfig, LogDestination};
pub use levels::LogLevel;
pub use thread_local::{DiagnosticEvent, current, drain_events, emit, enabled, init, render_line};

#[cfg(feature = "tracing")]
pub use tracing_bridge::init_tracing;
