//! Buffered read/write path used when zero-copy is unavailable or rejected.
//!
//! Each chunk repositions the source with `lseek`, reads at most one buffer,
//! and writes what was read to the socket. A short write leaves the rest of
//! the chunk for the next iteration, which re-seeks to the new offset and
//! reads it again.

use std::io;
use std::os::fd::BorrowedFd;

use logging::{debug_log, log_at};
use rustix::fs::{SeekFrom, seek};

use crate::buffer::ScratchBuffer;
use crate::config::SendConfig;
use crate::error::{ErrorClass, IoOp, TransferError};
use crate::range::TransferRange;
use crate::retry::RetryState;
use crate::sender::TransferEnd;

/// Copies `range` from `offset` onwards through a single scratch buffer.
///
/// Returns the offset of the first byte not delivered together with the
/// reason the loop stopped.
pub(crate) fn copy_range(
    socket: BorrowedFd<'_>,
    source: BorrowedFd<'_>,
    range: TransferRange,
    mut offset: u64,
    config: &SendConfig,
) -> (u64, TransferEnd) {
    debug_log!("falling back to read/write at offset {offset}");

    let mut buffer = ScratchBuffer::allocate(config.effective_buffer_size());
    let mut retry = RetryState::new(config.would_block);

    loop {
        let remaining = range.remaining_from(offset);
        if remaining == 0 {
            return (offset, TransferEnd::Complete);
        }
        let want = usize::try_from(remaining).map_or(buffer.len(), |r| r.min(buffer.len()));

        if let Err(errno) = seek(source, SeekFrom::Start(offset)) {
            debug_log!("lseek to {offset} failed: errno {}", errno.raw_os_error());
            let err = TransferError::io(IoOp::Seek, offset, errno.into());
            return (offset, TransferEnd::Failed(err));
        }

        let filled = match read_chunk(source, &mut buffer[..want], offset, &mut retry) {
            Ok(0) => {
                debug_log!("source exhausted at offset {offset}");
                return (offset, TransferEnd::SourceExhausted);
            }
            Ok(n) => n,
            Err(end) => return (offset, end),
        };
        log_at!(MaxDebug, "read {filled} bytes at offset {offset}");

        match write_chunk(socket, &buffer[..filled], offset, &mut retry) {
            Ok(written) => {
                log_at!(MaxDebug, "wrote {written} bytes at offset {offset}");
                offset += written as u64;
            }
            Err(end) => return (offset, end),
        }
    }
}

fn read_chunk(
    source: BorrowedFd<'_>,
    buf: &mut [u8],
    offset: u64,
    retry: &mut RetryState,
) -> Result<usize, TransferEnd> {
    loop {
        match rustix::io::read(source, &mut *buf) {
            Ok(n) => {
                retry.on_progress();
                return Ok(n);
            }
            Err(errno) => {
                debug_log!("read error at offset {offset}: errno {}", errno.raw_os_error());
                let err = io::Error::from(errno);
                if ErrorClass::of(&err) == ErrorClass::WouldBlock {
                    retry
                        .on_would_block(IoOp::Read, offset)
                        .map_err(TransferEnd::Failed)?;
                    continue;
                }
                return Err(TransferEnd::Failed(TransferError::io(
                    IoOp::Read,
                    offset,
                    err,
                )));
            }
        }
    }
}

fn write_chunk(
    socket: BorrowedFd<'_>,
    buf: &[u8],
    offset: u64,
    retry: &mut RetryState,
) -> Result<usize, TransferEnd> {
    loop {
        match rustix::io::write(socket, buf) {
            Ok(0) => {
                let err = io::Error::from(io::ErrorKind::WriteZero);
                return Err(TransferEnd::Failed(TransferError::io(
                    IoOp::Write,
                    offset,
                    err,
                )));
            }
            Ok(n) => {
                retry.on_progress();
                return Ok(n);
            }
            Err(errno) => {
                debug_log!("write error at offset {offset}: errno {}", errno.raw_os_error());
                let err = io::Error::from(errno);
                match ErrorClass::of(&err) {
                    ErrorClass::PeerClosed => return Err(TransferEnd::PeerClosed),
                    ErrorClass::WouldBlock => {
                        retry
                            .on_would_block(IoOp::Write, offset)
                            .map_err(TransferEnd::Failed)?;
                    }
                    ErrorClass::Unsupported | ErrorClass::Fatal => {
                        return Err(TransferEnd::Failed(TransferError::io(
                            IoOp::Write,
                            offset,
                            err,
                        )));
                    }
                }
            }
        }
    }
}
