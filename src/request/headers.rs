//! Header names, header values and the `Host` header.

use rand::Rng;

use crate::payload::single_text;
use crate::rng::{chance, pick, random_string, sub_seed};
use crate::tables::{HEADER_CHARS, HEADER_VALUE_TOKENS, HOST_LABEL_CHARS};

const TOKEN_SUFFIXES: &[&str] = &["+", "FUZZ", "*", " "];
const TOKEN_INFIXES: &[char] = &['-', '_', ':'];

/// Longest payload-derived header value, in characters.
const MAX_PAYLOAD_VALUE_CHARS: usize = 128;

/// Lower-case (0.3), suffix (0.25) and infix (0.2) a method or header name.
pub fn mutate_token(token: &str, rng: &mut impl Rng) -> String {
    let mut token = token.to_string();
    if chance(rng, 0.3) {
        token = token.to_lowercase();
    }
    if chance(rng, 0.25) {
        token.push_str(*pick(rng, TOKEN_SUFFIXES));
    }
    if chance(rng, 0.2) && !token.is_empty() {
        let chars = token.chars().count();
        let at = rng.random_range(0..chars);
        let byte = token
            .char_indices()
            .nth(at)
            .map_or(token.len(), |(idx, _)| idx);
        token.insert(byte, *pick(rng, TOKEN_INFIXES));
    }
    token
}

/// A bracketed IPv6 literal (0.2) or 1-4 random DNS labels with an optional
/// port.
pub fn fuzz_host(rng: &mut impl Rng) -> String {
    if chance(rng, 0.2) {
        let groups: Vec<String> = (0..8)
            .map(|_| format!("{:x}", rng.random_range(0..=0xffffu32)))
            .collect();
        return format!("[{}]", groups.join(":"));
    }

    let count = rng.random_range(1..=4);
    let labels: Vec<String> = (0..count)
        .map(|_| {
            let len = rng.random_range(1..=12);
            random_string(rng, HOST_LABEL_CHARS, len)
        })
        .collect();
    let mut host = labels.join(".");
    if chance(rng, 0.4) {
        host.push_str(&format!(":{}", rng.random_range(0..=65535u32)));
    }
    host
}

/// A literal token (0.3), a random header-safe string (0.3), or a generated
/// payload cut to 128 characters.
pub fn fuzz_header_value(rng: &mut impl Rng) -> String {
    let roll = rng.random::<f64>();
    if roll < 0.3 {
        return pick(rng, HEADER_VALUE_TOKENS).to_string();
    }
    if roll < 0.6 {
        let len = rng.random_range(0..=48);
        return random_string(rng, HEADER_CHARS, len);
    }
    let seed = sub_seed(rng);
    single_text(seed)
        .chars()
        .take(MAX_PAYLOAD_VALUE_CHARS)
        .collect()
}
