#![no_main]

//! Fuzz target for chunked framing.
//!
//! Encodes arbitrary bodies and checks the lenient decoder only ever
//! recovers a prefix, then feeds raw input straight to the decoder, which
//! must not panic on garbage.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use warmup_fuzz::request::chunked::{decode_frames, encode_chunked, reassemble};
use warmup_fuzz::rng::seeded;

#[derive(Debug, Arbitrary)]
struct Input {
    seed: u64,
    body: Vec<u8>,
    raw: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let encoded = encode_chunked(&input.body, &mut seeded(Some(input.seed)));
    assert!(input.body.starts_with(&reassemble(&encoded.bytes, &encoded.junk)));

    for frame in decode_frames(&input.raw) {
        assert!(frame.data.len() <= frame.size);
    }
});
