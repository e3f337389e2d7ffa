//! Splices the other three mutators into one labelled payload.

use rand::Rng;

use super::format::mutate_format;
use super::markdown::mutate_markdown;
use super::record::mutate_record;
use crate::rng::pick;

const GLUES: &[&str] = &["\u{0}", "\u{1}", "\n---\n", "\u{1f}"];

pub fn mutate_hybrid(rng: &mut impl Rng) -> String {
    let record = mutate_record(rng);
    let format = mutate_format(rng);
    let markdown = mutate_markdown(rng);
    let glue = *pick(rng, GLUES);
    [
        format!("FORM={record}"),
        format!("FMT={format}"),
        format!("BODY=\n{markdown}"),
    ]
    .join(glue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_hybrid_has_all_labels_in_order() {
        let mut rng = seeded(Some(31));
        for _ in 0..100 {
            let out = mutate_hybrid(&mut rng);
            assert!(out.starts_with("FORM="));
            let fmt = out.find("FMT=").expect("FMT label");
            let body = out.rfind("BODY=\n").expect("BODY label");
            assert!(fmt < body);
        }
    }
}
