//! Linux/Android `sendfile(2)`.

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};

use super::to_off_t;

pub(super) const AVAILABLE: bool = true;

pub(super) fn sendfile(
    socket: BorrowedFd<'_>,
    source: BorrowedFd<'_>,
    offset: &mut u64,
    len: usize,
) -> io::Result<usize> {
    let mut off = to_off_t(*offset)?;

    // SAFETY: Both descriptors are borrowed for the duration of the call and
    // `off` is a live, exclusively borrowed off_t. The kernel reads the source
    // at `off` without touching its file position and writes the new offset
    // back through the pointer.
    let sent = unsafe { libc::sendfile(socket.as_raw_fd(), source.as_raw_fd(), &mut off, len) };
    if sent < 0 {
        return Err(io::Error::last_os_error());
    }

    // The kernel only moves `off` forward from a non-negative start.
    *offset = u64::try_from(off).unwrap_or(*offset);
    Ok(sent as usize)
}
