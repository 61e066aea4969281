//! Placeholder for targets (or builds) without a zero-copy adapter.

use std::io;
use std::os::fd::BorrowedFd;

pub(super) const AVAILABLE: bool = false;

pub(super) fn sendfile(
    _socket: BorrowedFd<'_>,
    _source: BorrowedFd<'_>,
    _offset: &mut u64,
    _len: usize,
) -> io::Result<usize> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "sendfile is not available on this platform",
    ))
}
