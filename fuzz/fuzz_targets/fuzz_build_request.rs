#![no_main]

//! Fuzz target for the request builder.
//!
//! libFuzzer drives the seed; every built request must keep its cutoff and
//! head length inside the raw bytes, and a declared `Content-Length` must
//! stay within the skew window. Chunked bodies must decode to a prefix of
//! the unencoded body.

use libfuzzer_sys::fuzz_target;

use warmup_fuzz::request::chunked::reassemble;
use warmup_fuzz::request::{MAX_LENGTH_OVERSTATEMENT, MAX_LENGTH_UNDERSTATEMENT, build_request};
use warmup_fuzz::rng::seeded;

fuzz_target!(|seed: u64| {
    let mut rng = seeded(Some(seed));
    for _ in 0..4 {
        let request = build_request(&mut rng);
        assert!(request.cutoff >= 1 && request.cutoff <= request.raw.len());
        assert!(request.head_len <= request.raw.len());

        if let Some(declared) = request.declared_length {
            let actual = request.transmitted_body().len();
            assert!(declared <= actual + MAX_LENGTH_OVERSTATEMENT);
            assert!(declared + actual.min(MAX_LENGTH_UNDERSTATEMENT) >= actual);
        }

        if request.chunked {
            let decoded = reassemble(request.transmitted_body(), &request.junk_frames);
            assert!(request.body.starts_with(&decoded));
        }
    }
});
