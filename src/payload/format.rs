//! Date-format string mutator.

use rand::Rng;

use crate::rng::{chance, pick};
use crate::tables::{DATE_DIRECTIVES, LITERAL_TOKENS};

const CORRUPTIONS: &[&str] = &["::::", "'", "\""];
const JOINERS: &[&str] = &[" ", "-", "|", ""];

/// Build a format string of 3-10 parts mixing bracketed literals and
/// (possibly corrupted) directives.
pub fn mutate_format(rng: &mut impl Rng) -> String {
    let length = rng.random_range(3..=10);
    let mut parts = Vec::with_capacity(length);
    for _ in 0..length {
        if chance(rng, 0.3) {
            parts.push(format!("[{}]", pick(rng, LITERAL_TOKENS)));
            continue;
        }
        let mut directive = pick(rng, DATE_DIRECTIVES).to_string();
        if chance(rng, 0.15) {
            directive = directive.to_lowercase();
        }
        if chance(rng, 0.2) {
            directive.push_str(*pick(rng, CORRUPTIONS));
        }
        parts.push(directive);
    }
    parts.join(*pick(rng, JOINERS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_format_is_never_empty() {
        let mut rng = seeded(Some(11));
        for _ in 0..200 {
            assert!(!mutate_format(&mut rng).is_empty());
        }
    }

    #[test]
    fn test_format_draws_from_tables() {
        let mut rng = seeded(Some(12));
        let mut saw_literal = false;
        for _ in 0..200 {
            let out = mutate_format(&mut rng);
            saw_literal |= LITERAL_TOKENS
                .iter()
                .any(|token| out.contains(&format!("[{token}]")));
        }
        assert!(saw_literal);
    }

    #[test]
    fn test_corruption_suffix_appears() {
        let mut rng = seeded(Some(13));
        let corrupted = (0..200)
            .map(|_| mutate_format(&mut rng))
            .filter(|out| out.contains("::::"))
            .count();
        assert!(corrupted > 0);
    }
}
