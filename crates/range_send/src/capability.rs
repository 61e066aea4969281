//! One-way switch recording whether the zero-copy path is still worth trying.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::sendfile::SENDFILE_AVAILABLE;

/// Process-wide capability shared by [`send_range`](crate::send_range) and
/// [`RangeSender::new`](crate::RangeSender::new).
static PROCESS_CAPABILITY: SendfileCapability = SendfileCapability::new(SENDFILE_AVAILABLE);

/// Whether the zero-copy path may still be attempted.
///
/// Starts enabled on platforms that compile a zero-copy adapter and disabled
/// elsewhere. Once cleared it stays cleared: there is no way to re-enable it.
/// Two threads racing on the transition is harmless; the loser just issues a
/// failing zero-copy call before falling back itself.
#[derive(Debug)]
pub struct SendfileCapability {
    enabled: AtomicBool,
}

impl SendfileCapability {
    /// Creates a capability in the given initial state.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Creates a capability that starts enabled iff this build has an adapter.
    #[must_use]
    pub const fn for_platform() -> Self {
        Self::new(SENDFILE_AVAILABLE)
    }

    /// The capability shared by every default sender in this process.
    #[must_use]
    pub fn process() -> &'static Self {
        &PROCESS_CAPABILITY
    }

    /// Returns `true` while the zero-copy path may be attempted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Clears the capability.
    ///
    /// Returns `true` only for the call that performed the transition, so the
    /// caller can log the downgrade exactly once.
    pub fn disable(&self) -> bool {
        self.enabled.swap(false, Ordering::Relaxed)
    }
}

impl Default for SendfileCapability {
    fn default() -> Self {
        Self::for_platform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disable_transitions_once() {
        let capability = SendfileCapability::new(true);
        assert!(capability.is_enabled());

        assert!(capability.disable());
        assert!(!capability.is_enabled());

        assert!(!capability.disable());
        assert!(!capability.is_enabled());
    }

    #[test]
    fn starting_disabled_never_reports_transition() {
        let capability = SendfileCapability::new(false);
        assert!(!capability.disable());
        assert!(!capability.is_enabled());
    }

    #[test]
    fn platform_default_matches_adapter_availability() {
        assert_eq!(SendfileCapability::default().is_enabled(), SENDFILE_AVAILABLE);
    }

    #[test]
    fn process_capability_is_a_single_instance() {
        assert!(std::ptr::eq(
            SendfileCapability::process(),
            SendfileCapability::process()
        ));
    }

    #[test]
    fn concurrent_disable_has_one_winner() {
        use std::sync::Arc;
        use std::thread;

        let capability = Arc::new(SendfileCapability::new(true));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let capability = Arc::clone(&capability);
                thread::spawn(move || capability.disable())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert!(!capability.is_enabled());
    }
}
