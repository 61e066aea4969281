//! Scratch buffer for the read/write fallback.
//!
//! One buffer is allocated when a transfer enters the fallback path and is
//! released when that path returns, whatever the outcome. Allocation failure
//! is not recoverable: it is logged at fatal level and the process aborts
//! through [`handle_alloc_error`].

use std::alloc::{Layout, handle_alloc_error};
use std::ops::{Deref, DerefMut};

use logging::fatal_log;

/// Owned byte buffer released on drop.
#[derive(Debug)]
pub(crate) struct ScratchBuffer {
    bytes: Vec<u8>,
}

impl ScratchBuffer {
    /// Allocates a zeroed buffer of exactly `size` bytes.
    pub(crate) fn allocate(size: usize) -> Self {
        let mut bytes = Vec::new();
        if let Err(err) = bytes.try_reserve_exact(size) {
            fatal_log!("cannot allocate {size}-byte transfer buffer: {err}");
            match Layout::array::<u8>(size) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => std::process::abort(),
            }
        }
        bytes.resize(size, 0);

        #[cfg(test)]
        stats::record_allocation();

        Self { bytes }
    }
}

impl Deref for ScratchBuffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bytes
    }
}

#[cfg(test)]
impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        stats::record_release();
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_exact_zeroed_length() {
        let buffer = ScratchBuffer::allocate(4096);
        assert_eq!(buffer.len(), 4096);
        assert!(buffer.iter().all(|&b| b == 0));
    }

    #[test]
    fn writable_through_deref_mut() {
        let mut buffer = ScratchBuffer::allocate(8);
        buffer[..3].copy_from_slice(b"abc");
        assert_eq!(&buffer[..3], b"abc");
    }

    #[test]
    fn drop_is_counted() {
        stats::reset();
        {
            let _buffer = ScratchBuffer::allocate(16);
            assert_eq!(stats::snapshot(), (1, 0));
        }
        assert_eq!(stats::snapshot(), (1, 1));
    }
}
