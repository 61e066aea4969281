//! Tunables for a [`RangeSender`](crate::RangeSender).

/// Largest length requested from a single zero-copy call (2^31 - 1).
///
/// Keeps the count inside a signed 32-bit range on every platform and avoids
/// huge single kernel transfers.
pub const MAX_SENDFILE_CHUNK: usize = 0x7fff_ffff;

/// Default size of the fallback read/write buffer (64 KiB).
pub const DEFAULT_FALLBACK_BUFFER_SIZE: usize = 64 * 1024;

/// What to do when a call reports would-block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WouldBlockPolicy {
    /// Retry immediately, without limit.
    #[default]
    Spin,
    /// Yield the thread before each retry, without limit.
    Yield,
    /// Retry immediately, but give up after `max_retries` consecutive
    /// would-block results on the same call.
    Bounded {
        /// Consecutive retries allowed before the transfer stops.
        max_retries: u32,
    },
}

/// Configuration for range transfers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SendConfig {
    /// Size of the single buffer used by the read/write fallback.
    pub fallback_buffer_size: usize,
    /// Upper bound on one zero-copy request. Values above
    /// [`MAX_SENDFILE_CHUNK`] are clamped to it.
    pub max_sendfile_chunk: usize,
    /// Reaction to would-block results from any call.
    pub would_block: WouldBlockPolicy,
}

impl Default for SendConfig {
    fn default() -> Self {
        Self {
            fallback_buffer_size: DEFAULT_FALLBACK_BUFFER_SIZE,
            max_sendfile_chunk: MAX_SENDFILE_CHUNK,
            would_block: WouldBlockPolicy::Spin,
        }
    }
}

impl SendConfig {
    /// Creates a config optimized for large media files.
    #[must_use]
    pub fn for_large_files() -> Self {
        Self {
            fallback_buffer_size: 256 * 1024, // 256 KB
            ..Self::default()
        }
    }

    /// Creates a config optimized for many small files.
    #[must_use]
    pub fn for_small_files() -> Self {
        Self {
            fallback_buffer_size: 16 * 1024, // 16 KB
            ..Self::default()
        }
    }

    /// Sets the fallback buffer size.
    pub fn with_fallback_buffer_size(mut self, size: usize) -> Self {
        self.fallback_buffer_size = size;
        self
    }

    /// Sets the per-call zero-copy cap.
    pub fn with_max_sendfile_chunk(mut self, size: usize) -> Self {
        self.max_sendfile_chunk = size;
        self
    }

    /// Sets the would-block policy.
    pub fn with_would_block(mut self, policy: WouldBlockPolicy) -> Self {
        self.would_block = policy;
        self
    }

    /// Fallback buffer size actually allocated (never zero).
    #[must_use]
    pub fn effective_buffer_size(&self) -> usize {
        self.fallback_buffer_size.max(1)
    }

    /// Per-call zero-copy cap actually used (between 1 and [`MAX_SENDFILE_CHUNK`]).
    #[must_use]
    pub fn effective_sendfile_chunk(&self) -> usize {
        self.max_sendfile_chunk.clamp(1, MAX_SENDFILE_CHUNK)
    }
}
