//! Send a byte range of a file to a connected socket.
//!
//! This crate is the body-transmission step of an HTTP media server: once the
//! response headers are out, [`send_range`] delivers bytes `[start, end]` of
//! the opened file to the client socket, in order, with no gaps or duplicates.
//!
//! # Strategy
//!
//! - **Zero-copy first.** While the shared [`SendfileCapability`] is enabled,
//!   the range is moved with the host `sendfile` in requests of at most
//!   [`MAX_SENDFILE_CHUNK`] bytes.
//! - **Graceful downgrade.** If the kernel rejects the descriptor pair, the
//!   offset or the size (`EINVAL`, `EOVERFLOW`, `ENOSYS`), the capability is
//!   cleared for every later transfer and the current range continues through
//!   a buffered read/write loop from the first byte not yet sent.
//! - **Quiet termination.** A peer that hangs up, a source that ends early, and
//!   any other I/O failure all end the transfer without an error value; the
//!   cause is logged through the `logging` crate and reported in the
//!   [`TransferSummary`] returned by [`RangeSender::transfer`].
//!
//! # Platform support
//!
//! Zero-copy adapters exist for Linux/Android, macOS/iOS and FreeBSD behind
//! the default `sendfile` feature. Other Unix targets, or builds without the
//! feature, always use the buffered path.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::net::TcpStream;
//!
//! let file = File::open("/srv/media/clip.mp4")?;
//! let socket = TcpStream::connect("192.0.2.1:8200")?;
//!
//! // After writing "206 Partial Content" headers for bytes 1000-1999:
//! range_send::send_range(&socket, &file, 1000, 1999);
//! # Ok::<(), std::io::Error>(())
//! ```

#![cfg(unix)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

mod buffer;
mod capability;
mod config;
mod error;
mod fallback;
mod range;
mod retry;
mod sender;
pub mod sendfile;

pub use capability::SendfileCapability;
pub use config::{DEFAULT_FALLBACK_BUFFER_SIZE, MAX_SENDFILE_CHUNK, SendConfig, WouldBlockPolicy};
pub use error::{ErrorClass, IoOp, TransferError};
pub use range::TransferRange;
pub use sender::{RangeSender, TransferEnd, TransferSummary, send_range};
pub use sendfile::{SENDFILE_AVAILABLE, SystemSendfile, ZeroCopySend};
