//! Applies a [`WouldBlockPolicy`] to consecutive would-block results.

use std::thread;

use crate::config::WouldBlockPolicy;
use crate::error::{IoOp, TransferError};

/// Counts consecutive would-block results for the call currently in flight.
#[derive(Debug)]
pub(crate) struct RetryState {
    policy: WouldBlockPolicy,
    consecutive: u32,
}

impl RetryState {
    pub(crate) const fn new(policy: WouldBlockPolicy) -> Self {
        Self {
            policy,
            consecutive: 0,
        }
    }

    /// Records a would-block result and decides whether to retry.
    ///
    /// Returns `Err` once a bounded policy runs out of retries.
    pub(crate) fn on_would_block(&mut self, op: IoOp, offset: u64) -> Result<(), TransferError> {
        self.consecutive = self.consecutive.saturating_add(1);
        match self.policy {
            WouldBlockPolicy::Spin => Ok(()),
            WouldBlockPolicy::Yield => {
                thread::yield_now();
                Ok(())
            }
            WouldBlockPolicy::Bounded { max_retries } if self.consecutive > max_retries => {
                Err(TransferError::RetriesExhausted {
                    op,
                    offset,
                    attempts: max_retries,
                })
            }
            WouldBlockPolicy::Bounded { .. } => Ok(()),
        }
    }

    /// Resets the counter after a call made progress.
    pub(crate) fn on_progress(&mut self) {
        self.consecutive = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_never_gives_up() {
        let mut state = RetryState::new(WouldBlockPolicy::Spin);
        for _ in 0..10_000 {
            assert!(state.on_would_block(IoOp::Write, 0).is_ok());
        }
    }

    #[test]
    fn yield_never_gives_up() {
        let mut state = RetryState::new(WouldBlockPolicy::Yield);
        for _ in 0..100 {
            assert!(state.on_would_block(IoOp::Read, 0).is_ok());
        }
    }

    #[test]
    fn bounded_allows_exactly_max_retries() {
        let mut state = RetryState::new(WouldBlockPolicy::Bounded { max_retries: 3 });
        for _ in 0..3 {
            assert!(state.on_would_block(IoOp::Sendfile, 42).is_ok());
        }
        let err = state.on_would_block(IoOp::Sendfile, 42).unwrap_err();
        assert!(matches!(
            err,
            TransferError::RetriesExhausted {
                op: IoOp::Sendfile,
                offset: 42,
                attempts: 3,
            }
        ));
    }

    #[test]
    fn progress_resets_the_budget() {
        let mut state = RetryState::new(WouldBlockPolicy::Bounded { max_retries: 1 });
        assert!(state.on_would_block(IoOp::Write, 0).is_ok());
        state.on_progress();
        assert!(state.on_would_block(IoOp::Write, 10).is_ok());
        assert!(state.on_would_block(IoOp::Write, 10).is_err());
    }

    #[test]
    fn zero_retry_budget_fails_immediately() {
        let mut state = RetryState::new(WouldBlockPolicy::Bounded { max_retries: 0 });
        assert!(state.on_would_block(IoOp::Read, 0).is_err());
    }
}
