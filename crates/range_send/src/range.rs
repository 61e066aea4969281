//! Inclusive byte ranges over a source file.

use std::fmt;

/// Inclusive byte interval `[start, end]` over a source file.
///
/// A range whose `start` lies past its `end` is empty and transfers nothing;
/// this is how callers express a zero-length request without a signed end
/// offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransferRange {
    start: u64,
    end: u64,
}

impl TransferRange {
    /// Creates the range `[start, end]`.
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// First offset in the range.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Last offset in the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Returns `true` when the range covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of bytes covered, saturating at `u64::MAX` for `[0, u64::MAX]`.
    #[must_use]
    pub const fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    /// Returns `true` when `offset` lies inside the range.
    #[must_use]
    pub const fn contains(&self, offset: u64) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Bytes still to send when the cursor sits at `offset`.
    ///
    /// Zero once `offset` has moved past `end`. Offsets before `start` are
    /// counted from `start`.
    #[must_use]
    pub const fn remaining_from(&self, offset: u64) -> u64 {
        let from = if offset < self.start { self.start } else { offset };
        if from > self.end {
            0
        } else {
            (self.end - from).saturating_add(1)
        }
    }
}

impl fmt::Display for TransferRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
