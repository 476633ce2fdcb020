//! Sentence-level repeat removal for model output.
//!
//! Sentences are found with a plain textual rule: a boundary sits right after
//! `.`, `!` or `?` when one or more spaces follow. Abbreviations, decimals and
//! quoted punctuation are not special-cased, so `"Dr. Smith"` splits too.
//! Repeats are matched by exact string equality.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"[.!?] +").expect("sentence boundary pattern is valid"))
}

/// Splits `text` into sentence units. The punctuation stays with the unit it
/// ends and the run of spaces after it is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;

    for m in boundary().find_iter(text) {
        // The punctuation mark is a single ASCII byte.
        units.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    units.push(&text[start..]);

    units
}

/// Keeps the first occurrence of every sentence unit and joins the survivors
/// with a single space.
pub fn remove_repetition(text: &str) -> String {
    let mut seen = HashSet::new();
    let unique: Vec<&str> = split_sentences(text)
        .into_iter()
        .filter(|unit| seen.insert(*unit))
        .collect();

    unique.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_repeated_sentence() {
        assert_eq!(
            remove_repetition("The sky is blue. The sky is blue. It may rain."),
            "The sky is blue. It may rain."
        );
    }

    #[test]
    fn keeps_first_occurrence_order() {
        assert_eq!(
            remove_repetition("One. Two! One. Three?"),
            "One. Two! Three?"
        );
    }

    #[test]
    fn unique_sentences_only_get_spacing_normalized() {
        assert_eq!(
            remove_repetition("First one.   Second one!  Third"),
            "First one. Second one! Third"
        );
    }

    #[test]
    fn text_without_boundaries_passes_through() {
        let text = "no punctuation here\nat all";
        assert_eq!(remove_repetition(text), text);
        assert_eq!(remove_repetition(""), "");
    }

    #[test]
    fn near_duplicates_are_kept() {
        assert_eq!(
            remove_repetition("It is late. It is late! it is late."),
            "It is late. It is late! it is late."
        );
    }

    #[test]
    fn punctuation_without_space_does_not_split() {
        assert_eq!(split_sentences("Pi is 3.14. Yes."), vec!["Pi is 3.14.", "Yes."]);
        assert_eq!(split_sentences("a.\nb"), vec!["a.\nb"]);
    }

    #[test]
    fn naive_split_breaks_abbreviations() {
        assert_eq!(split_sentences("Dr. Smith left."), vec!["Dr.", "Smith left."]);
    }

    #[test]
    fn trailing_space_leaves_empty_unit() {
        assert_eq!(split_sentences("Done. "), vec!["Done.", ""]);
        assert_eq!(remove_repetition("Done. Done. "), "Done. ");
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        assert_eq!(
            remove_repetition("Café ouvert. Café ouvert. Très bien!"),
            "Café ouvert. Très bien!"
        );
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "The sky is blue. The sky is blue. It may rain.",
            "a. b. a.  c!   b. ",
            "What?  What?  What?",
            "one two three",
            "x. ",
            "",
            "  leading. leading. ",
        ];
        for sample in samples {
            let once = remove_repetition(sample);
            assert_eq!(remove_repetition(&once), once, "input: {:?}", sample);
        }
    }

    #[test]
    fn output_units_are_pairwise_distinct() {
        let out = remove_repetition("A. B. A. C. B. A. D?");
        let units = split_sentences(&out);
        let distinct: HashSet<_> = units.iter().collect();
        assert_eq!(units.len(), distinct.len());
        assert_eq!(units, vec!["A.", "B.", "C.", "D?"]);
    }
}
