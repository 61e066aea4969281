//! Shared fixtures for tests that push file ranges through real sockets.
//!
//! Everything here panics on setup failure; these helpers only run inside
//! tests where a failed fixture should abort the test.

#![cfg(unix)]
#![allow(clippy::missing_panics_doc)]

use std::io::{Read, Seek, SeekFrom, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::os::unix::net::UnixStream;
use std::thread::{self, JoinHandle};

use tempfile::NamedTempFile;

/// Deterministic, non-repeating-per-256 byte pattern of `len` bytes.
#[must_use]
pub fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 7 + i / 251) % 256) as u8).collect()
}

/// Creates a temp file holding `content`, positioned at offset 0.
#[must_use]
pub fn temp_file_with(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content).expect("write temp file");
    file.flush().expect("flush temp file");
    file.seek(SeekFrom::Start(0)).expect("rewind temp file");
    file
}

/// Connected Unix stream pair: `(sender, receiver)`.
#[must_use]
pub fn unix_pair() -> (UnixStream, UnixStream) {
    UnixStream::pair().expect("create unix socket pair")
}

/// Connected loopback TCP pair: `(sender, receiver)`.
#[must_use]
pub fn tcp_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    let sender = TcpStream::connect(addr).expect("connect loopback");
    let (receiver, _) = listener.accept().expect("accept loopback");
    (sender, receiver)
}

/// Reads `reader` to end on a background thread.
///
/// Drain the receiving end while the sender blocks, otherwise transfers
/// larger than the socket buffer deadlock.
pub fn spawn_drain<R>(mut reader: R) -> JoinHandle<Vec<u8>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut received = Vec::new();
        reader.read_to_end(&mut received).expect("drain socket");
        received
    })
}

/// Reads exactly `limit` bytes (or until EOF) and then drops the reader.
///
/// Used to simulate a client that hangs up mid-stream.
pub fn spawn_partial_reader<R>(mut reader: R, limit: usize) -> JoinHandle<Vec<u8>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut received = vec![0u8; limit];
        let mut filled = 0;
        while filled < limit {
            match reader.read(&mut received[filled..]) {
                Ok(0) | Err(_) => break,
                Ok(n) => filled += n,
            }
        }
        received.truncate(filled);
        received
    })
}

/// Shuts down the write half so a draining peer sees EOF.
pub fn finish_tcp(stream: &TcpStream) {
    let _ = stream.shutdown(Shutdown::Write);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterned_is_deterministic() {
        assert_eq!(patterned(1000), patterned(1000));
        assert_eq!(patterned(3).len(), 3);
    }

    #[test]
    fn patterned_differs_across_blocks_of_256() {
        let data = patterned(2048);
        assert_ne!(&data[..256], &data[256..512]);
    }

    #[test]
    fn temp_file_round_trips_content() {
        let mut file = temp_file_with(b"fixture");
        let mut read_back = String::new();
        file.read_to_string(&mut read_back).unwrap();
        assert_eq!(read_back, "fixture");
    }

    #[test]
    fn unix_pair_drains_until_close() {
        let (mut tx, rx) = unix_pair();
        let drain = spawn_drain(rx);
        tx.write_all(b"hello").unwrap();
        drop(tx);
        assert_eq!(drain.join().unwrap(), b"hello");
    }

    #[test]
    fn tcp_pair_is_connected() {
        let (mut tx, rx) = tcp_pair();
        let drain = spawn_drain(rx);
        tx.write_all(b"over loopback").unwrap();
        finish_tcp(&tx);
        assert_eq!(drain.join().unwrap(), b"over loopback");
    }

    #[test]
    fn partial_reader_stops_at_limit() {
        let (mut tx, rx) = unix_pair();
        let reader = spawn_partial_reader(rx, 4);
        tx.write_all(b"abcdefgh").unwrap();
        assert_eq!(reader.join().unwrap(), b"abcd");
    }
}
