//! Module A: a multiset of uppercase Latin letters.
//!
//! Backs both the player's letter bag and every dictionary word, so
//! "can this word be spelled from this bag" reduces to a multiset
//! containment check.

use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterMultiset {
    counts: HashMap<char, usize>,
}

impl LetterMultiset {
    pub fn new() -> Self {
        LetterMultiset::default()
    }

    /// Builds a multiset from a word, folding case to uppercase and
    /// ignoring any character outside `A-Z`.
    pub fn from_word(word: &str) -> Self {
        let mut counts = HashMap::new();
        for c in word.chars() {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_alphabetic() {
                *counts.entry(c).or_insert(0) += 1;
            }
        }
        LetterMultiset { counts }
    }

    pub fn count(&self, letter: char) -> usize {
        *self.counts.get(&letter.to_ascii_uppercase()).unwrap_or(&0)
    }

    /// True if every letter in `other` is available in `self` in at
    /// least the requested quantity.
    pub fn contains(&self, other: &LetterMultiset) -> bool {
        other.counts.iter().all(|(c, &n)| self.count(*c) >= n)
    }

    pub fn len(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A canonical string for anagram comparisons: every letter present,
    /// sorted, with repeats kept.
    pub fn signature(&self) -> String {
        let mut letters: Vec<char> = Vec::with_capacity(self.len());
        for (&c, &n) in &self.counts {
            for _ in 0..n {
                letters.push(c);
            }
        }
        letters.sort_unstable();
        letters.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_respects_repeated_letters() {
        let bag = LetterMultiset::from_word("aabbc");
        assert!(bag.contains(&LetterMultiset::from_word("cab")));
        assert!(bag.contains(&LetterMultiset::from_word("abab")));
        assert!(!bag.contains(&LetterMultiset::from_word("aaa")));
        assert!(!bag.contains(&LetterMultiset::from_word("z")));
    }

    #[test]
    fn case_is_folded() {
        let bag = LetterMultiset::from_word("CaT");
        assert_eq!(bag.count('c'), 1);
        assert_eq!(bag.count('C'), 1);
    }

    #[test]
    fn signature_ignores_order() {
        assert_eq!(
            LetterMultiset::from_word("listen").signature(),
            LetterMultiset::from_word("silent").signature()
        );
        assert_ne!(
            LetterMultiset::from_word("listen").signature(),
            LetterMultiset::from_word("linens").signature()
        );
    }

    #[test]
    fn empty_multiset_is_contained_by_anything() {
        let empty = LetterMultiset::new();
        assert!(LetterMultiset::from_word("cat").contains(&empty));
        assert!(empty.is_empty());
    }
}
