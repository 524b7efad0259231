//! Module B: finds every dictionary word spellable from a letter bag.

use std::collections::BTreeSet;

use log::debug;

use crate::letters::LetterMultiset;

/// Returns every word in `dictionary` that is spellable from `letters`
/// (case-folded, multiset containment) and whose length falls in
/// `[min_len, max_len]`.
///
/// Results are deduplicated and ordered longest-first, ties broken
/// alphabetically, so downstream callers see a deterministic order.
pub fn find_valid_words(
    letters: &str,
    dictionary: &[String],
    min_len: usize,
    max_len: usize,
) -> Vec<String> {
    let bag = LetterMultiset::from_word(letters);

    let unique: BTreeSet<String> = dictionary
        .iter()
        .map(|w| w.to_ascii_uppercase())
        .filter(|w| w.len() >= min_len && w.len() <= max_len)
        .filter(|w| bag.contains(&LetterMultiset::from_word(w)))
        .collect();

    let mut found: Vec<String> = unique.into_iter().collect();
    found.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    debug!(
        "found {} usable word(s) for bag \"{}\" in range {}..={}",
        found.len(),
        letters,
        min_len,
        max_len
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn filters_by_spellability_and_length() {
        let dictionary = dict(&["cat", "cats", "car", "dog", "at", "a"]);
        let found = find_valid_words("cats", &dictionary, 3, 8);
        assert_eq!(found, vec!["CATS".to_string(), "CAT".to_string()]);
    }

    #[test]
    fn deduplicates_case_variants() {
        let dictionary = dict(&["Cat", "CAT", "cat"]);
        let found = find_valid_words("cat", &dictionary, 3, 8);
        assert_eq!(found, vec!["CAT".to_string()]);
    }

    #[test]
    fn empty_dictionary_yields_no_words() {
        assert!(find_valid_words("abc", &[], 3, 8).is_empty());
    }
}
