//! Transfer orchestration: zero-copy first, buffered read/write after.
//!
//! A transfer walks the range in at most two phases. While the
//! [`SendfileCapability`] is enabled, chunks of up to
//! [`SendConfig::effective_sendfile_chunk`] bytes go through the
//! [`ZeroCopySend`] backend. If the backend rejects the descriptor pair,
//! offset or size, the capability is cleared for every later transfer sharing
//! it and the rest of this range continues through the fallback, starting at
//! the first byte the fast path did not deliver.

use std::os::fd::{AsFd, BorrowedFd};

use logging::{debug_log, warn_log};

use crate::capability::SendfileCapability;
use crate::config::SendConfig;
use crate::error::{ErrorClass, IoOp, TransferError};
use crate::fallback;
use crate::range::TransferRange;
use crate::retry::RetryState;
use crate::sendfile::{SystemSendfile, ZeroCopySend};

/// Why a transfer stopped.
#[derive(Debug)]
pub enum TransferEnd {
    /// Every byte of the range reached the socket (or the range was empty).
    Complete,
    /// The peer stopped reading; no further bytes were sent.
    PeerClosed,
    /// The source ended before the range did.
    SourceExhausted,
    /// A call failed in a way that cannot be retried.
    Failed(TransferError),
}

impl TransferEnd {
    /// Returns `true` for [`TransferEnd::Complete`].
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// What a single transfer did.
///
/// Purely informational: a short transfer has already been logged and the
/// caller is expected to close the connection either way.
#[derive(Debug)]
pub struct TransferSummary {
    /// The requested range.
    pub range: TransferRange,
    /// Bytes delivered by the zero-copy path.
    pub zero_copy_bytes: u64,
    /// Bytes delivered by the read/write fallback.
    pub buffered_bytes: u64,
    /// `true` when this transfer cleared the shared capability.
    pub downgraded: bool,
    /// Why the transfer stopped.
    pub end: TransferEnd,
}

impl TransferSummary {
    fn new(range: TransferRange) -> Self {
        Self {
            range,
            zero_copy_bytes: 0,
            buffered_bytes: 0,
            downgraded: false,
            end: TransferEnd::Complete,
        }
    }

    /// Total bytes that reached the socket.
    #[must_use]
    pub const fn bytes_sent(&self) -> u64 {
        self.zero_copy_bytes + self.buffered_bytes
    }

    /// Returns `true` when the whole range was delivered.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.end.is_complete()
    }

    /// Returns `true` when the read/write fallback carried any part of the
    /// transfer.
    #[must_use]
    pub const fn used_fallback(&self) -> bool {
        self.buffered_bytes > 0
    }
}

enum ZeroCopyExit {
    Finished(TransferEnd),
    Rejected,
}

/// Sends inclusive file ranges to sockets.
///
/// Holds a backend, a reference to the capability it shares with other
/// senders, and the tunables. Cheap to construct; a server typically keeps
/// one per worker or builds one per request.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use std::net::TcpStream;
///
/// use range_send::{RangeSender, TransferRange};
///
/// let file = File::open("movie.mkv")?;
/// let socket = TcpStream::connect("192.0.2.10:8200")?;
/// let summary = RangeSender::new().transfer(&socket, &file, TransferRange::new(0, 1023));
/// if !summary.is_complete() {
///     eprintln!("sent {} of {} bytes", summary.bytes_sent(), summary.range.len());
/// }
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct RangeSender<'c, Z = SystemSendfile> {
    backend: Z,
    capability: &'c SendfileCapability,
    config: SendConfig,
}

impl RangeSender<'static, SystemSendfile> {
    /// Creates a sender using the host `sendfile`, the process-wide
    /// capability and the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(SystemSendfile, SendfileCapability::process())
    }
}

impl Default for RangeSender<'static, SystemSendfile> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c, Z: ZeroCopySend> RangeSender<'c, Z> {
    /// Creates a sender over an explicit backend and capability.
    pub fn with_backend(backend: Z, capability: &'c SendfileCapability) -> Self {
        Self {
            backend,
            capability,
            config: SendConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SendConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SendConfig {
        &self.config
    }

    /// The capability this sender consults and may clear.
    #[must_use]
    pub const fn capability(&self) -> &'c SendfileCapability {
        self.capability
    }

    /// The zero-copy backend.
    #[must_use]
    pub const fn backend(&self) -> &Z {
        &self.backend
    }

    /// Sends `range` of `source` to `socket`.
    ///
    /// Bytes arrive in order with no gaps or duplicates. The transfer never
    /// returns an error: anything that ends it early is logged and reported
    /// in [`TransferSummary::end`]. Neither descriptor is closed.
    pub fn transfer<S: AsFd, F: AsFd>(
        &self,
        socket: S,
        source: F,
        range: TransferRange,
    ) -> TransferSummary {
        let socket = socket.as_fd();
        let source = source.as_fd();
        let mut summary = TransferSummary::new(range);

        if range.is_empty() {
            debug_log!("empty range {range}, nothing to send");
            return summary;
        }

        let mut offset = range.start();
        if self.backend.is_available() && self.capability.is_enabled() {
            let exit = self.send_zero_copy(socket, source, range, &mut offset);
            summary.zero_copy_bytes = offset - range.start();
            match exit {
                ZeroCopyExit::Finished(end) => {
                    summary.end = end;
                    log_summary(&summary);
                    return summary;
                }
                ZeroCopyExit::Rejected => {
                    if self.capability.disable() {
                        warn_log!(
                            "sendfile rejected at offset {offset}; using read/write from now on"
                        );
                        summary.downgraded = true;
                    }
                }
            }
        }

        let (next, end) = fallback::copy_range(socket, source, range, offset, &self.config);
        summary.buffered_bytes = next - offset;
        summary.end = end;
        log_summary(&summary);
        summary
    }

    fn send_zero_copy(
        &self,
        socket: BorrowedFd<'_>,
        source: BorrowedFd<'_>,
        range: TransferRange,
        offset: &mut u64,
    ) -> ZeroCopyExit {
        let cap = self.config.effective_sendfile_chunk() as u64;
        let mut retry = RetryState::new(self.config.would_block);

        loop {
            let remaining = range.remaining_from(*offset);
            if remaining == 0 {
                return ZeroCopyExit::Finished(TransferEnd::Complete);
            }
            let len = remaining.min(cap) as usize;
            debug_log!("sendfile {len} bytes at offset {offset}");

            let before = *offset;
            let result = self.backend.send(socket, source, offset, len);
            let progressed = offset.saturating_sub(before);

            match result {
                Ok(_) if progressed == 0 => {
                    debug_log!("source exhausted at offset {offset}");
                    return ZeroCopyExit::Finished(TransferEnd::SourceExhausted);
                }
                Ok(_) => retry.on_progress(),
                Err(err) => {
                    debug_log!(
                        "sendfile error at offset {offset}: errno {}",
                        err.raw_os_error().unwrap_or(0)
                    );
                    if progressed > 0 {
                        retry.on_progress();
                    }
                    match ErrorClass::of(&err) {
                        ErrorClass::PeerClosed => {
                            return ZeroCopyExit::Finished(TransferEnd::PeerClosed);
                        }
                        ErrorClass::Unsupported => return ZeroCopyExit::Rejected,
                        ErrorClass::WouldBlock => {
                            if let Err(exhausted) = retry.on_would_block(IoOp::Sendfile, *offset) {
                                return ZeroCopyExit::Finished(TransferEnd::Failed(exhausted));
                            }
                        }
                        ErrorClass::Fatal => {
                            let err = TransferError::io(IoOp::Sendfile, *offset, err);
                            return ZeroCopyExit::Finished(TransferEnd::Failed(err));
                        }
                    }
                }
            }
        }
    }
}

fn log_summary(summary: &TransferSummary) {
    match &summary.end {
        TransferEnd::Complete => debug_log!(
            "range {} complete: {} bytes ({} zero-copy, {} buffered)",
            summary.range,
            summary.bytes_sent(),
            summary.zero_copy_bytes,
            summary.buffered_bytes
        ),
        TransferEnd::Failed(err) => debug_log!(
            "range {} stopped after {} bytes: {err}",
            summary.range,
            summary.bytes_sent()
        ),
        other => debug_log!(
            "range {} stopped after {} bytes: {other:?}",
            summary.range,
            summary.bytes_sent()
        ),
    }
}

/// Sends the inclusive range `[start, end]` of `source` to `socket`.
///
/// Uses the host `sendfile` while the process-wide capability allows it and
/// buffered read/write otherwise. Returns nothing: a transfer cut short by
/// the peer, the source, or an I/O error has already been logged, and the
/// caller closes the connection as usual. `start > end` sends nothing.
pub fn send_range<S: AsFd, F: AsFd>(socket: S, source: F, start: u64, end: u64) {
    RangeSender::new().transfer(socket, source, TransferRange::new(start, end));
}
