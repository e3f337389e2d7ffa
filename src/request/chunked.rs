//! Chunked transfer-encoding with junk frames and tail truncation.
//!
//! Wire format of one frame:
//!
//! ```text
//! <hex-size>\r\n
//! <data>\r\n
//! ```
//!
//! terminated by `0\r\n\r\n`.

use bytes::{BufMut, BytesMut};
use rand::Rng;

use crate::rng::chance;

/// Largest real chunk, in bytes.
const MAX_CHUNK: usize = 16;
/// Largest injected junk frame, in bytes.
const MAX_JUNK: usize = 8;
/// Filler byte of injected junk frames.
pub const JUNK_BYTE: u8 = b'X';

const TERMINATOR: &[u8] = b"0\r\n\r\n";

/// A chunk-framed body and the start offsets of its injected junk frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkedBody {
    pub bytes: Vec<u8>,
    /// Offset into `bytes` of each junk frame's size line still present
    /// after truncation, ascending.
    pub junk: Vec<usize>,
}

/// Frame `body` into 1-16 byte chunks, injecting a junk frame of 0-8
/// [`JUNK_BYTE`]s after a chunk with probability 0.2, and dropping a random
/// tail of the result with probability 0.3.
///
/// An empty body encodes to the bare terminator.
pub fn encode_chunked(body: &[u8], rng: &mut impl Rng) -> ChunkedBody {
    if body.is_empty() {
        return ChunkedBody {
            bytes: TERMINATOR.to_vec(),
            junk: Vec::new(),
        };
    }

    let mut out = BytesMut::with_capacity(body.len() * 2 + TERMINATOR.len());
    let mut junk = Vec::new();
    let mut position = 0;
    while position < body.len() {
        let size = rng.random_range(1..=MAX_CHUNK.min(body.len() - position));
        put_frame(&mut out, &body[position..position + size]);
        position += size;
        if chance(rng, 0.2) {
            let len = rng.random_range(0..=MAX_JUNK);
            junk.push(out.len());
            put_frame(&mut out, &[JUNK_BYTE; MAX_JUNK][..len]);
        }
    }
    out.put_slice(TERMINATOR);

    if chance(rng, 0.3) {
        let drop = rng.random_range(0..out.len());
        out.truncate(out.len() - drop);
        junk.retain(|&offset| offset < out.len());
    }
    ChunkedBody {
        bytes: out.to_vec(),
        junk,
    }
}

fn put_frame(out: &mut BytesMut, data: &[u8]) {
    out.put_slice(format!("{:x}\r\n", data.len()).as_bytes());
    out.put_slice(data);
    out.put_slice(b"\r\n");
}

/// One decoded frame. `data` may be shorter than `size` when the encoding
/// was cut inside the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Offset of the size line in the encoding.
    pub offset: usize,
    pub size: usize,
    pub data: &'a [u8],
}

/// Walk every frame of a possibly truncated chunked encoding.
///
/// Zero-size frames do not stop the walk, since injected junk frames may be
/// empty. Decoding ends at the first malformed or incomplete size line, or
/// after a frame whose data was cut short.
pub fn decode_frames(encoded: &[u8]) -> Vec<Frame<'_>> {
    let mut frames = Vec::new();
    let mut pos = 0;
    while pos < encoded.len() {
        let offset = pos;
        let Some(line_len) = encoded[pos..].windows(2).position(|w| w == b"\r\n") else {
            break;
        };
        let Some(size) = std::str::from_utf8(&encoded[pos..pos + line_len])
            .ok()
            .and_then(|line| usize::from_str_radix(line.trim(), 16).ok())
        else {
            break;
        };
        pos += line_len + 2;

        let take = size.min(encoded.len() - pos);
        frames.push(Frame {
            offset,
            size,
            data: &encoded[pos..pos + take],
        });
        pos += take;
        if take < size {
            break;
        }
        if encoded[pos..].starts_with(b"\r\n") {
            pos += 2;
        }
    }
    frames
}

/// Concatenate the data of every frame not starting at one of the `junk`
/// offsets.
pub fn reassemble(encoded: &[u8], junk: &[usize]) -> Vec<u8> {
    decode_frames(encoded)
        .into_iter()
        .filter(|frame| !junk.contains(&frame.offset))
        .flat_map(|frame| frame.data.iter().copied())
        .collect()
}
