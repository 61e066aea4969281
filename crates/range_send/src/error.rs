//! Error types and errno classification for range transfers.
//!
//! Nothing in this crate returns these errors to the caller as `Err`: a
//! failure ends the transfer, is logged, and is reported through
//! [`TransferEnd::Failed`](crate::TransferEnd::Failed) in the summary.

use std::fmt;
use std::io;

/// The call that produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoOp {
    /// A zero-copy `sendfile` call.
    Sendfile,
    /// Repositioning the source cursor.
    Seek,
    /// Reading the source into the fallback buffer.
    Read,
    /// Writing the fallback buffer to the socket.
    Write,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sendfile => "sendfile",
            Self::Seek => "lseek",
            Self::Read => "read",
            Self::Write => "write",
        })
    }
}

/// Why a transfer stopped early.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// A call failed with a non-retryable error.
    #[error("{op} error at offset {offset}: {source}")]
    Io {
        /// The failing call.
        op: IoOp,
        /// Source offset the call was working on.
        offset: u64,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// A call kept reporting would-block past the configured retry budget.
    #[error("{op} still would block at offset {offset} after {attempts} retries")]
    RetriesExhausted {
        /// The call being retried.
        op: IoOp,
        /// Source offset the call was working on.
        offset: u64,
        /// Number of retries performed.
        attempts: u32,
    },
}

impl TransferError {
    /// Creates an I/O error with call and offset context.
    pub fn io(op: IoOp, offset: u64, source: io::Error) -> Self {
        Self::Io { op, offset, source }
    }

    /// The call that failed.
    #[must_use]
    pub const fn op(&self) -> IoOp {
        match self {
            Self::Io { op, .. } | Self::RetriesExhausted { op, .. } => *op,
        }
    }
}

/// How the orchestrator reacts to a failed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The peer stopped reading (`EPIPE`, `ECONNRESET`): end quietly.
    PeerClosed,
    /// The zero-copy facility rejects this offset, size or descriptor pair
    /// (`EINVAL`, `EOVERFLOW`, `ENOSYS`): abandon the fast path.
    Unsupported,
    /// Transient (`EAGAIN`/`EWOULDBLOCK`, `EINTR`): retry the same call.
    WouldBlock,
    /// Anything else: stop the transfer.
    Fatal,
}

impl ErrorClass {
    /// Classifies an error returned by a transfer syscall.
    #[must_use]
    pub fn of(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset => {
                return Self::PeerClosed;
            }
            io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => return Self::WouldBlock,
            io::ErrorKind::Unsupported => return Self::Unsupported,
            _ => {}
        }
        match err.raw_os_error() {
            Some(code) if code == libc::EINVAL || code == libc::EOVERFLOW => Self::Unsupported,
            Some(code) if code == libc::ENOSYS => Self::Unsupported,
            _ => Self::Fatal,
        }
    }
}
