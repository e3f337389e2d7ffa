//! Markdown/HTML fragment mutator.

use rand::Rng;

use crate::rng::{chance, pick};
use crate::tables::{DATE_DIRECTIVES, DATE_MARKER, MARKDOWN_SNIPPETS};

const LINE_ENDINGS: &[&str] = &["\n", "\r\n"];
const BALANCERS: &[&str] = &["**", "__", "~~"];
const COMMENT: &str = "<!-- fuzz: \u{2622} -->\n";

/// Concatenate 2-6 snippets, optionally wrapped in an emphasis marker and
/// prefixed with an HTML comment.
pub fn mutate_markdown(rng: &mut impl Rng) -> String {
    let count = rng.random_range(2..=6);
    let mut segments: Vec<String> = Vec::with_capacity(count + 2);
    for _ in 0..count {
        let mut segment = pick(rng, MARKDOWN_SNIPPETS).to_string();
        if segment.contains(DATE_MARKER) {
            segment = segment.replace(DATE_MARKER, *pick(rng, DATE_DIRECTIVES));
        }
        if chance(rng, 0.4) {
            segment.push_str(*pick(rng, LINE_ENDINGS));
        }
        segments.push(segment);
    }

    if chance(rng, 0.3) {
        let balancer = *pick(rng, BALANCERS);
        segments[0].insert_str(0, balancer);
        segments.push(balancer.to_string());
    }

    if chance(rng, 0.2) {
        segments.insert(0, COMMENT.to_string());
    }
    segments.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_date_marker_always_substituted() {
        let mut rng = seeded(Some(21));
        for _ in 0..300 {
            assert!(!mutate_markdown(&mut rng).contains(DATE_MARKER));
        }
    }

    #[test]
    fn test_balancer_wraps_both_ends() {
        let mut rng = seeded(Some(22));
        let mut wrapped = 0;
        for _ in 0..300 {
            let out = mutate_markdown(&mut rng);
            let body = out.strip_prefix(COMMENT).unwrap_or(&out);
            for balancer in BALANCERS {
                if body.starts_with(balancer) && body.ends_with(balancer) {
                    wrapped += 1;
                    break;
                }
            }
        }
        assert!(wrapped > 0);
    }
}
