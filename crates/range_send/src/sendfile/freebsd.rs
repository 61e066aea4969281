//! FreeBSD `sendfile(2)`.

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
    let mut sent: libc::off_t = 0;

    // SAFETY: Both descriptors are borrowed for the duration of the call,
    // `sent` is a live off_t the kernel fills with the bytes sent, and a null
    // header/trailer pointer is permitted.
    let rc = unsafe {
        libc::sendfile(
            source.as_raw_fd(),
            socket.as_raw_fd(),
            off,
            len,
            ptr::null_mut(),
            &mut sent,
            0,
        )
    };
    let err = (rc == -1).then(io::Error::last_os_error);

    // `sbytes` is filled in on EAGAIN/EINTR as well as on success.
    let sent = u64::try_from(sent).unwrap_or(0);
    *offset += sent;
    match err {
        Some(err) => Err(err),
        None => Ok(sent as usize),
    }
}
