//! Request target: path segments, query string and fragment.

use rand::Rng;

use crate::payload::single_text;
use crate::rng::{chance, pick, random_string, sub_seed};
use crate::tables::{PATH_TOKENS, PAYLOAD_MARKER, QUERY_KEYS, QUERY_VALUE_CHARS};

const SEGMENT_SUFFIXES: &[&str] = &[";", "%00", "?", "//"];
const FRAGMENTS: &[&str] = &["#fragment", "#../../", "#%0d%0a"];
const KEY_SUFFIXES: &[&str] = &["_", "-", "%0d%0a"];
const VALUE_SUFFIXES: &[&str] = &["%00", "../../", "`"];
const PAIR_DELIMITERS: &[&str] = &["&", ";", "&&", "&;"];

/// Build a request target of 1-6 segments with an optional query (0.6) and
/// fragment (0.15). The fragment lands before the query.
pub fn fuzz_path(rng: &mut impl Rng) -> String {
    let count = rng.random_range(1..=6);
    let mut segments = Vec::with_capacity(count);
    for _ in 0..count {
        let mut segment = pick(rng, PATH_TOKENS).to_string();
        if segment.contains(PAYLOAD_MARKER) {
            let payload = single_text(sub_seed(rng));
            let escaped = payload.trim().replace('/', "%2F");
            let replacement = if escaped.is_empty() { "fuzz" } else { escaped.as_str() };
            segment = segment.replace(PAYLOAD_MARKER, replacement);
        }
        if chance(rng, 0.25) {
            segment = segment.to_uppercase();
        }
        if chance(rng, 0.2) {
            segment.push_str(*pick(rng, SEGMENT_SUFFIXES));
        }
        segments.push(segment);
    }

    let mut base = format!("/{}", segments.join("/"));
    if chance(rng, 0.3) {
        base = base.replace("//", "/");
    }

    let query = if chance(rng, 0.6) {
        fuzz_query(rng)
    } else {
        String::new()
    };
    if chance(rng, 0.15) {
        base.push_str(*pick(rng, FRAGMENTS));
    }
    base + &query
}

/// `?` followed by 1-4 key/value pairs joined by a random delimiter.
pub fn fuzz_query(rng: &mut impl Rng) -> String {
    let count = rng.random_range(1..=4);
    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let mut key = pick(rng, QUERY_KEYS).to_string();
        if chance(rng, 0.3) {
            key.push_str(*pick(rng, KEY_SUFFIXES));
        }
        let len = rng.random_range(0..=12);
        let mut value = random_string(rng, QUERY_VALUE_CHARS, len);
        if chance(rng, 0.25) {
            value.push_str(*pick(rng, VALUE_SUFFIXES));
        }
        pairs.push(format!("{key}={value}"));
    }
    format!("?{}", pairs.join(*pick(rng, PAIR_DELIMITERS)))
}
