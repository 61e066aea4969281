//! Zero-copy file-to-socket transfer using the `sendfile` syscall.
//!
//! Every supported OS ships a `sendfile`, but no two agree on its signature:
//!
//! - **Linux/Android**: `sendfile(out_fd, in_fd, *offset, count)` takes the
//!   offset by pointer and returns the byte count.
//! - **macOS/iOS**: `sendfile(fd, s, offset, *len, hdtr, flags)` takes the
//!   offset by value and reports the byte count back through `len`, even when
//!   the call fails with `EAGAIN` after partial progress.
//! - **FreeBSD**: `sendfile(fd, s, offset, nbytes, hdtr, *sbytes, flags)`
//!   reports the byte count through `sbytes`.
//!
//! Each adapter normalizes its platform call to a single shape: take
//! `(socket, source, &mut offset, len)`, advance `offset` in place by the
//! bytes actually sent, and return the raw result. Headers/trailers are always
//! `NULL` and flags always zero. The adapter is chosen at compile time; on
//! other targets, or with the `sendfile` feature disabled, a stub reports the
//! facility as absent and the orchestrator goes straight to read/write.

use std::io;
use std::os::fd::BorrowedFd;

#[cfg(all(feature = "sendfile", any(target_os = "linux", target_os = "android")))]
mod linux;
#[cfg(all(feature = "sendfile", any(target_os = "linux", target_os = "android")))]
use linux as sys;

#[cfg(all(feature = "sendfile", any(target_os = "macos", target_os = "ios")))]
mod apple;
#[cfg(all(feature = "sendfile", any(target_os = "macos", target_os = "ios")))]
use apple as sys;

#[cfg(all(feature = "sendfile", target_os = "freebsd"))]
mod freebsd;
#[cfg(all(feature = "sendfile", target_os = "freebsd"))]
use freebsd as sys;

#[cfg(not(all(
    feature = "sendfile",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd"
    )
)))]
mod stub;
#[cfg(not(all(
    feature = "sendfile",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd"
    )
)))]
use stub as sys;

/// `true` when this build carries a zero-copy adapter for the target OS.
pub const SENDFILE_AVAILABLE: bool = sys::AVAILABLE;

/// A kernel-mediated file-to-socket transfer facility.
///
/// Implementations must advance `offset` by exactly the number of bytes that
/// reached the socket, including on an error that follows partial progress.
/// The orchestrator trusts the offset, not the returned count, to decide
/// where the next call starts.
pub trait ZeroCopySend {
    /// Returns `false` when the facility does not exist in this build.
    fn is_available(&self) -> bool {
        true
    }

    /// Sends up to `len` bytes of `source` starting at `*offset` to `socket`.
    ///
    /// A short count is not an error. `Ok(0)` for a non-zero `len` means the
    /// source has no bytes at `*offset`.
    fn send(
        &self,
        socket: BorrowedFd<'_>,
        source: BorrowedFd<'_>,
        offset: &mut u64,
        len: usize,
    ) -> io::Result<usize>;
}

impl<T: ZeroCopySend + ?Sized> ZeroCopySend for &T {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn send(
        &self,
        socket: BorrowedFd<'_>,
        source: BorrowedFd<'_>,
        offset: &mut u64,
        len: usize,
    ) -> io::Result<usize> {
        (**self).send(socket, source, offset, len)
    }
}

/// The host's `sendfile`, or the absent-facility stub.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemSendfile;

impl ZeroCopySend for SystemSendfile {
    fn is_available(&self) -> bool {
        SENDFILE_AVAILABLE
    }

    fn send(
        &self,
        socket: BorrowedFd<'_>,
        source: BorrowedFd<'_>,
        offset: &mut u64,
        len: usize,
    ) -> io::Result<usize> {
        sys::sendfile(socket, source, offset, len)
    }
}

/// Converts a source offset to the platform `off_t`, failing with
/// `EOVERFLOW` when it does not fit.
#[cfg_attr(not(feature = "sendfile"), allow(dead_code))]
fn to_off_t(offset: u64) -> io::Result<libc::off_t> {
    libc::off_t::try_from(offset).map_err(|_| io::Error::from_raw_os_error(libc::EOVERFLOW))
}
