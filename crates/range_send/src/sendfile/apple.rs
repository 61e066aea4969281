//! macOS/iOS `sendfile(2)`.
//!
//! The byte count comes back through the in/out `len` argument and is valid
//! even when the call fails with `EAGAIN` or `EINTR`, so the offset is
//! advanced before the error is surfaced.

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};
use std::ptr;

use super::to_off_t;

pub(super) const AVAILABLE: bool = true;

pub(super) fn sendfile(
    socket: BorrowedFd<'_>,
    source: BorrowedFd<'_>,
    offset: &mut u64,
    len: usize,
) -> io::Result<usize> {
    let off = to_off_t(*offset)?;
    let mut sent = libc::off_t::try_from(len).unwrap_or(libc::off_t::MAX);

    // SAFETY: Both descriptors are borrowed for the duration of the call,
    // `sent` is a live off_t the kernel overwrites with the bytes sent, and a
    // null header/trailer pointer is permitted.
    let rc = unsafe {
        libc::sendfile(
            source.as_raw_fd(),
            socket.as_raw_fd(),
            off,
            &mut sent,
            ptr::null_mut(),
            0,
        )
    };
    let err = (rc == -1).then(io::Error::last_os_error);

    let sent = u64::try_from(sent).unwrap_or(0);
    *offset += sent;
    match err {
        Some(err) => Err(err),
        None => Ok(sent as usize),
    }
}
