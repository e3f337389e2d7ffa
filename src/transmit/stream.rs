//! Streaming a built request onto a connection and draining the reply.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::request::BuiltRequest;
use crate::rng::{chance, random_bytes};

/// Largest single write.
const MAX_WRITE: usize = 512;
/// Longest pause between writes.
const MAX_PAUSE: Duration = Duration::from_millis(20);
/// Most junk bytes appended after the request.
const MAX_TRAILING_JUNK: usize = 12;
const DRAIN_BUFFER: usize = 1024;

/// A byte stream a request can be sprayed onto.
pub trait Transport: Read + Write {
    /// Close the write half, leaving the read half open.
    fn shutdown_write(&mut self) -> io::Result<()>;

    /// Bound the next blocking read.
    fn set_read_deadline(&mut self, remaining: Duration) -> io::Result<()>;
}

impl Transport for TcpStream {
    fn shutdown_write(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Write)
    }

    fn set_read_deadline(&mut self, remaining: Duration) -> io::Result<()> {
        // A zero read timeout is rejected by the OS.
        self.set_read_timeout(Some(remaining.max(Duration::from_millis(1))))
    }
}

/// Send `request.raw[..cutoff]` in random 1-512 byte writes.
///
/// Each write has its own 0.18 chance of one XOR-flipped byte, and is
/// followed by a short pause with probability 0.3. A truncated request
/// half-closes the connection with probability 0.5 (failure ignored). With
/// probability 0.2 a few random bytes follow the request.
pub fn stream_request(
    transport: &mut impl Transport,
    request: &BuiltRequest,
    rng: &mut impl Rng,
) -> io::Result<()> {
    let payload = &request.raw;
    let limit = request.cutoff.min(payload.len()).max(1);
    let mut index = 0;
    while index < limit {
        let chunk = rng.random_range(1..=MAX_WRITE.min(limit - index));
        let mut segment = payload[index..(index + chunk).min(payload.len())].to_vec();
        if !segment.is_empty() && chance(rng, 0.18) {
            let pos = rng.random_range(0..segment.len());
            segment[pos] ^= rng.random_range(1..=255u8);
        }
        transport.write_all(&segment)?;
        index += chunk;
        if chance(rng, 0.3) {
            thread::sleep(MAX_PAUSE.mul_f64(rng.random::<f64>()));
        }
    }

    if limit < payload.len() && chance(rng, 0.5) {
        let _ = transport.shutdown_write();
    }

    if chance(rng, 0.2) {
        let len = rng.random_range(1..=MAX_TRAILING_JUNK);
        transport.write_all(&random_bytes(rng, len))?;
    }
    transport.flush()
}

/// Read and discard whatever the peer sends for up to `timeout`.
///
/// Stops early on EOF, on any read error, or with probability 0.35 after
/// each successful read. Never fails.
pub fn drain(transport: &mut impl Transport, rng: &mut impl Rng, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    let mut buf = [0u8; DRAIN_BUFFER];
    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        if transport.set_read_deadline(deadline - now).is_err() {
            break;
        }
        match transport.read(&mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if chance(rng, 0.35) {
                    break;
                }
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}
