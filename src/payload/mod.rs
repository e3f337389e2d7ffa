//! Payload mutators and the batch generator.
//!
//! Four strategies each turn a random source into one text payload:
//!
//! - **Record**: perturbed booking-form records ([`record`]).
//! - **Format**: corrupted date-format strings ([`format`]).
//! - **Markdown**: markdown/HTML fragment soup ([`markdown`]).
//! - **Hybrid**: the three above spliced with control-character glue
//!   ([`hybrid`]).
//!
//! [`creative_inputs`] picks a strategy uniformly for every payload.

pub mod format;
pub mod hybrid;
pub mod markdown;
pub mod record;

use rand::Rng;

use crate::rng::{pick, seeded};

/// One generated payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    /// Borrow the payload as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(text) => text.as_bytes(),
            Payload::Bytes(bytes) => bytes,
        }
    }

    /// Consume the payload into raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Text(text) => text.into_bytes(),
            Payload::Bytes(bytes) => bytes,
        }
    }

    /// Consume the payload into text; byte payloads are decoded lossily.
    pub fn into_text(self) -> String {
        match self {
            Payload::Text(text) => text,
            Payload::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Which [`Payload`] variant the batch generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    Text,
    #[default]
    Bytes,
}

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Record,
    Format,
    Markdown,
    Hybrid,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Record,
        Strategy::Format,
        Strategy::Markdown,
        Strategy::Hybrid,
    ];

    /// Pick a strategy uniformly.
    pub fn random(rng: &mut impl Rng) -> Self {
        *pick(rng, &Self::ALL)
    }

    /// Run the strategy once.
    pub fn mutate(self, rng: &mut impl Rng) -> String {
        match self {
            Strategy::Record => record::mutate_record(rng).to_string(),
            Strategy::Format => format::mutate_format(rng),
            Strategy::Markdown => markdown::mutate_markdown(rng),
            Strategy::Hybrid => hybrid::mutate_hybrid(rng),
        }
    }
}

/// Generate `count` payloads from a fresh generator seeded with `seed`.
///
/// The same `(count, seed, kind)` always yields the same batch when a seed is
/// given.
pub fn creative_inputs(count: usize, seed: Option<u64>, kind: OutputKind) -> Vec<Payload> {
    let mut rng = seeded(seed);
    generate(&mut rng, count, kind)
}

/// Generate `count` payloads from an existing generator.
pub fn generate(rng: &mut impl Rng, count: usize, kind: OutputKind) -> Vec<Payload> {
    (0..count)
        .map(|_| {
            let text = Strategy::random(rng).mutate(rng);
            match kind {
                OutputKind::Text => Payload::Text(text),
                OutputKind::Bytes => Payload::Bytes(text.into_bytes()),
            }
        })
        .collect()
}

/// Convenience: one text payload from a nested seed.
pub(crate) fn single_text(seed: u64) -> String {
    creative_inputs(1, Some(seed), OutputKind::Text)
        .pop()
        .map(Payload::into_text)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_batch() {
        let a = creative_inputs(64, Some(1234), OutputKind::Bytes);
        let b = creative_inputs(64, Some(1234), OutputKind::Bytes);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_batch() {
        let a = creative_inputs(16, Some(1), OutputKind::Text);
        let b = creative_inputs(16, Some(2), OutputKind::Text);
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(creative_inputs(0, Some(5), OutputKind::Text).is_empty());
    }

    #[test]
    fn test_output_kind_selects_variant() {
        let text = creative_inputs(8, Some(9), OutputKind::Text);
        assert!(text.iter().all(|p| matches!(p, Payload::Text(_))));

        let bytes = creative_inputs(8, Some(9), OutputKind::Bytes);
        assert!(bytes.iter().all(|p| matches!(p, Payload::Bytes(_))));

        // Same seed, same content; only the encoding differs.
        let as_bytes: Vec<Vec<u8>> = text.into_iter().map(Payload::into_bytes).collect();
        let raw: Vec<Vec<u8>> = bytes.into_iter().map(Payload::into_bytes).collect();
        assert_eq!(as_bytes, raw);
    }

    #[test]
    fn test_every_strategy_produces_output() {
        let mut rng = seeded(Some(77));
        for strategy in Strategy::ALL {
            assert!(!strategy.mutate(&mut rng).is_empty());
        }
    }

    #[test]
    fn test_single_text_matches_batch() {
        let batch = creative_inputs(1, Some(42), OutputKind::Text);
        assert_eq!(batch[0], Payload::Text(single_text(42)));
    }
}
