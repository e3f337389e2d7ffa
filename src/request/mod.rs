//! Fuzzed HTTP/1.x request builder.
//!
//! [`build_request`] assembles a byte-exact request candidate: a mutated
//! request line, a mutated header block, an optional (possibly chunked and
//! truncated) body, a deliberately wrong `Content-Length`, and a possibly
//! malformed head terminator. The result carries a cutoff for partial sends
//! and a linger flag telling the transmitter whether to drain a response.

pub mod chunked;
pub mod headers;
pub mod path;

use bytes::{BufMut, Bytes, BytesMut};
use rand::Rng;

use crate::payload::{OutputKind, Payload, creative_inputs};
use crate::rng::{chance, pick, random_bytes, sub_seed};
use crate::tables::{BODY_METHODS, HEADER_NAMES, HTTP_METHODS, HTTP_VERSIONS};

use self::chunked::encode_chunked;
use self::headers::{fuzz_header_value, fuzz_host, mutate_token};
use self::path::fuzz_path;

const TRANSFER_ENCODINGS: &[&str] = &["chunked", "Chunked", "gzip, chunked"];
const CONNECTION_VALUES: &[&str] = &["keep-alive", "close", "upgrade", "keepalive, timeout=5"];
const EXPECT_VALUES: &[&str] = &["100-continue", "fail", "100-Continue"];
const BROKEN_TERMINATORS: &[&str] = &["\n", "\r", "", "\r\n\r"];

/// Largest uniformly random body.
const MAX_RANDOM_BODY: usize = 1024;
/// Largest junk tail appended to a payload body.
const MAX_BODY_JUNK: usize = 32;
/// Largest positive skew applied to a declared `Content-Length`.
pub const MAX_LENGTH_OVERSTATEMENT: usize = 64;
/// Largest negative skew applied to a declared `Content-Length`.
pub const MAX_LENGTH_UNDERSTATEMENT: usize = 32;

/// A request candidate plus how to send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRequest {
    /// Request method as written on the request line.
    pub method: String,
    /// Head followed by the transmitted (possibly chunk-framed) body.
    pub raw: Bytes,
    /// Number of leading bytes of `raw` to send, `1..=raw.len()`.
    pub cutoff: usize,
    /// Whether to drain a response after sending.
    pub linger: bool,
    /// Length of the request line, headers and terminator.
    pub head_len: usize,
    /// Body before any transfer encoding. Empty when no body was chosen.
    pub body: Bytes,
    /// Whether the transmitted body is chunk-framed.
    pub chunked: bool,
    /// Offsets into [`transmitted_body`](Self::transmitted_body) of injected
    /// junk chunk frames. Empty unless `chunked`.
    pub junk_frames: Vec<usize>,
    /// Value of the `Content-Length` header, if one was declared.
    pub declared_length: Option<usize>,
}

impl BuiltRequest {
    /// Bytes after the head.
    pub fn transmitted_body(&self) -> &[u8] {
        &self.raw[self.head_len..]
    }

    /// Whether less than the full request will be sent.
    pub fn is_truncated(&self) -> bool {
        self.cutoff < self.raw.len()
    }
}

/// Build one fuzzed request.
pub fn build_request(rng: &mut impl Rng) -> BuiltRequest {
    let mut method = pick(rng, HTTP_METHODS).to_string();
    if chance(rng, 0.35) {
        method = mutate_token(&method, rng);
    }

    let target = fuzz_path(rng);
    let version = pick(rng, HTTP_VERSIONS);
    let request_line = format!("{method} {target} {version}\r\n");

    let mut headers: Vec<(String, String)> = Vec::new();
    if chance(rng, 0.85) {
        headers.push(("Host".to_string(), fuzz_host(rng)));
    }

    let extra = rng.random_range(0..=8);
    for _ in 0..extra {
        let name = mutate_token(*pick(rng, HEADER_NAMES), rng);
        headers.push((name.clone(), fuzz_header_value(rng)));
        if chance(rng, 0.15) {
            headers.push((name, fuzz_header_value(rng)));
        }
    }

    let include_body = BODY_METHODS.contains(&method.as_str()) || chance(rng, 0.35);
    let body = if include_body {
        build_body(rng)
    } else {
        Vec::new()
    };
    let use_chunked = include_body && chance(rng, 0.25);

    let (transmitted, junk_frames) = if use_chunked {
        headers.push((
            "Transfer-Encoding".to_string(),
            pick(rng, TRANSFER_ENCODINGS).to_string(),
        ));
        let encoded = encode_chunked(&body, rng);
        (encoded.bytes, encoded.junk)
    } else {
        (body.clone(), Vec::new())
    };

    let declare_length = include_body && (!use_chunked || chance(rng, 0.5));
    let declared_length = declare_length.then(|| skew_length(transmitted.len(), rng));
    if let Some(declared) = declared_length {
        headers.push(("Content-Length".to_string(), declared.to_string()));
    }

    if chance(rng, 0.4) {
        headers.push((
            "Connection".to_string(),
            pick(rng, CONNECTION_VALUES).to_string(),
        ));
    }
    if chance(rng, 0.2) {
        headers.push(("Expect".to_string(), pick(rng, EXPECT_VALUES).to_string()));
    }

    let terminator = if chance(rng, 0.2) {
        *pick(rng, BROKEN_TERMINATORS)
    } else {
        "\r\n"
    };

    let mut head = request_line;
    for (name, value) in &headers {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }
    head.push_str(terminator);
    let head = encode_latin1_lossy(&head);

    let mut raw = BytesMut::with_capacity(head.len() + transmitted.len());
    raw.put_slice(&head);
    raw.put_slice(&transmitted);
    let raw = raw.freeze();

    let mut cutoff = raw.len();
    if !transmitted.is_empty() && chance(rng, 0.6) {
        cutoff = head.len() + rng.random_range(0..=transmitted.len());
    } else if chance(rng, 0.1) && cutoff > 0 {
        cutoff = rng.random_range(1..=cutoff);
    }

    let linger = chance(rng, 0.5);
    BuiltRequest {
        method,
        raw,
        cutoff: cutoff.max(1),
        linger,
        head_len: head.len(),
        body: Bytes::from(body),
        chunked: use_chunked,
        junk_frames,
        declared_length,
    }
}

/// Random bytes (0.4) or 1-3 generated payloads joined by CRLF, sometimes
/// followed by random junk.
fn build_body(rng: &mut impl Rng) -> Vec<u8> {
    if chance(rng, 0.4) {
        let len = rng.random_range(0..=MAX_RANDOM_BODY);
        return random_bytes(rng, len);
    }

    let count = rng.random_range(1..=3);
    let parts: Vec<Vec<u8>> = creative_inputs(count, Some(sub_seed(rng)), OutputKind::Bytes)
        .into_iter()
        .map(Payload::into_bytes)
        .collect();
    let mut blob = parts.join(&b"\r\n"[..]);
    if chance(rng, 0.3) {
        let len = rng.random_range(0..=MAX_BODY_JUNK);
        blob.extend(random_bytes(rng, len));
    }
    blob
}

/// The true length, skewed with probability 0.6 by an offset in
/// `[-min(len, 32), +64]`. Never negative.
fn skew_length(len: usize, rng: &mut impl Rng) -> usize {
    if !chance(rng, 0.6) {
        return len;
    }
    let under = len.min(MAX_LENGTH_UNDERSTATEMENT) as i64;
    let offset = rng.random_range(-under..=MAX_LENGTH_OVERSTATEMENT as i64);
    (len as i64 + offset).max(0) as usize
}

/// Encode as Latin-1, silently dropping characters above U+00FF.
pub fn encode_latin1_lossy(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| u8::try_from(u32::from(c)).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_cutoff_within_bounds() {
        let mut rng = seeded(Some(71));
        for _ in 0..500 {
            let request = build_request(&mut rng);
            assert!(request.cutoff >= 1);
            assert!(request.cutoff <= request.raw.len());
        }
    }

    #[test]
    fn test_body_methods_declare_or_chunk() {
        let mut rng = seeded(Some(72));
        for _ in 0..500 {
            let request = build_request(&mut rng);
            if BODY_METHODS.contains(&request.method.as_str()) {
                assert!(request.declared_length.is_some() || request.chunked);
            }
        }
    }

    #[test]
    fn test_declared_length_skew_is_bounded() {
        let mut rng = seeded(Some(73));
        let mut declared = 0;
        for _ in 0..1000 {
            let request = build_request(&mut rng);
            let Some(value) = request.declared_length else {
                continue;
            };
            declared += 1;
            let actual = request.transmitted_body().len();
            assert!(value <= actual + MAX_LENGTH_OVERSTATEMENT);
            assert!(value + actual.min(MAX_LENGTH_UNDERSTATEMENT) >= actual);
        }
        assert!(declared > 0);
    }

    #[test]
    fn test_chunked_requests_announce_transfer_encoding() {
        let mut rng = seeded(Some(74));
        for _ in 0..500 {
            let request = build_request(&mut rng);
            let head = &request.raw[..request.head_len];
            let announces = head
                .windows(b"Transfer-Encoding: ".len())
                .any(|w| w == b"Transfer-Encoding: ");
            assert_eq!(announces, request.chunked);
        }
    }

    #[test]
    fn test_chunked_body_decodes_to_prefix() {
        let mut rng = seeded(Some(77));
        let mut seen = 0;
        for _ in 0..2000 {
            let request = build_request(&mut rng);
            if !request.chunked {
                assert!(request.junk_frames.is_empty());
                continue;
            }
            seen += 1;
            let decoded = chunked::reassemble(request.transmitted_body(), &request.junk_frames);
            assert!(request.body.starts_with(&decoded));
        }
        assert!(seen > 0);
    }

    #[test]
    fn test_request_starts_with_method() {
        let mut rng = seeded(Some(75));
        for _ in 0..200 {
            let request = build_request(&mut rng);
            let prefix = format!("{} /", request.method);
            assert!(request.raw.starts_with(prefix.as_bytes()));
        }
    }

    #[test]
    fn test_latin1_drops_wide_characters() {
        assert_eq!(encode_latin1_lossy("a\u{e9}\u{2622}b"), vec![b'a', 0xe9, b'b']);
    }

    #[test]
    fn test_skew_never_negative() {
        let mut rng = seeded(Some(76));
        for len in 0..40 {
            for _ in 0..20 {
                let skewed = skew_length(len, &mut rng);
                assert!(skewed + len.min(MAX_LENGTH_UNDERSTATEMENT) >= len);
                assert!(skewed <= len + MAX_LENGTH_OVERSTATEMENT);
            }
        }
    }
}
