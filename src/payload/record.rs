//! Booking-record mutator.
//!
//! Perturbs each field of the baseline booking form, optionally shuffles the
//! field order and inserts an empty field, then joins the result with a
//! random separator.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::rng::{chance, pick};
use crate::tables::BOOKING_BASE_FIELDS;

const GLITCHES: &[&str] = &["", "'", "\"", "\\"];
const DASH_REPLACEMENTS: &[&str] = &["/", " ", "_"];
const SUBCOMPONENT_JOINERS: &[&str] = &["-", "/", "::", ""];
const SEPARATORS: &[&str] = &[";", ",", "|", "::", "\t"];

/// A mutated booking record before it is rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub fields: Vec<String>,
    pub separator: &'static str,
    pub trailer: &'static str,
    /// Whether an empty field was inserted.
    pub inserted: bool,
}

impl fmt::Display for BookingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.fields.join(self.separator), self.trailer)
    }
}

/// Mutate the baseline record.
pub fn mutate_record(rng: &mut impl Rng) -> BookingRecord {
    let mut fields: Vec<String> = BOOKING_BASE_FIELDS
        .iter()
        .map(|field| mutate_field(field, rng))
        .collect();

    if chance(rng, 0.35) {
        fields.shuffle(rng);
    }

    let separator = *pick(rng, SEPARATORS);
    let trailer = *pick(rng, &["", separator, "\n"]);

    let inserted = chance(rng, 0.25);
    if inserted {
        let at = rng.random_range(0..=fields.len());
        fields.insert(at, String::new());
    }

    BookingRecord {
        fields,
        separator,
        trailer,
        inserted,
    }
}

fn mutate_field(value: &str, rng: &mut impl Rng) -> String {
    if value.is_empty() {
        return String::new();
    }
    let action = rng.random::<f64>();
    if action < 0.2 {
        value.to_uppercase()
    } else if action < 0.4 {
        value.chars().rev().collect()
    } else if action < 0.6 {
        let glitch = *pick(rng, GLITCHES);
        let repeat = rng.random_range(1..=3);
        format!("{value}{}", glitch.repeat(repeat))
    } else if action < 0.8 {
        value.replace('-', *pick(rng, DASH_REPLACEMENTS))
    } else {
        shuffle_subcomponents(value, rng)
    }
}

/// Split on `T`, `-` and `:` (plus whitespace), shuffle the pieces and
/// rejoin them. Values with fewer than two pieces come back unchanged.
fn shuffle_subcomponents(value: &str, rng: &mut impl Rng) -> String {
    let mut chunks: Vec<&str> = value
        .split(|c: char| c == 'T' || c == '-' || c == ':' || c.is_whitespace())
        .filter(|chunk| !chunk.is_empty())
        .collect();
    if chunks.len() < 2 {
        return value.to_string();
    }
    chunks.shuffle(rng);
    chunks.join(*pick(rng, SUBCOMPONENT_JOINERS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_field_count_tracks_insertion() {
        let mut rng = seeded(Some(99));
        for _ in 0..500 {
            let record = mutate_record(&mut rng);
            let expected = BOOKING_BASE_FIELDS.len() + usize::from(record.inserted);
            assert_eq!(record.fields.len(), expected);
        }
    }

    #[test]
    fn test_render_joins_with_separator_and_trailer() {
        let record = BookingRecord {
            fields: vec!["a".into(), "".into(), "b".into()],
            separator: "::",
            trailer: "\n",
            inserted: false,
        };
        assert_eq!(record.to_string(), "a::::b\n");
    }

    #[test]
    fn test_shuffle_subcomponents_keeps_pieces() {
        let mut rng = seeded(Some(4));
        let out = shuffle_subcomponents("2025-05-21T21:48", &mut rng);
        for piece in ["2025", "05", "21", "48"] {
            assert!(out.contains(piece), "{out} lost {piece}");
        }
    }

    #[test]
    fn test_shuffle_subcomponents_single_piece_unchanged() {
        let mut rng = seeded(Some(4));
        assert_eq!(shuffle_subcomponents("single", &mut rng), "single");
    }

    #[test]
    fn test_empty_field_untouched() {
        let mut rng = seeded(Some(8));
        for _ in 0..50 {
            assert_eq!(mutate_field("", &mut rng), "");
        }
    }
}
