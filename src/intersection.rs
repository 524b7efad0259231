//! Module C: the intersection graph of a word pool.
//!
//! Distinct from [`crate::graph::Graph`], which tracks connectivity
//! between already-*placed* words; this module records, for every pair
//! of candidate words, every shared-letter crossing they could form if
//! placed perpendicular to one another. The placement search (module F)
//! uses it to prefer well-connected words; it never touches the grid.

use std::collections::HashMap;

use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intersection {
    /// Index into the first word where the shared letter falls.
    pub index_a: usize,
    /// Index into the second word where the shared letter falls.
    pub index_b: usize,
    pub letter: char,
}

#[derive(Debug, Default)]
pub struct IntersectionGraph {
    adjacency: HashMap<String, HashMap<String, Vec<Intersection>>>,
}

impl IntersectionGraph {
    /// Builds the graph over every pair in `words`. O(n^2 * L^2) in the
    /// word count and average length, which is fine for the dozens to
    /// low hundreds of candidates this crate expects.
    pub fn build(words: &[String]) -> Self {
        let mut adjacency: HashMap<String, HashMap<String, Vec<Intersection>>> = HashMap::new();

        for a in words {
            for b in words {
                if a == b {
                    continue;
                }
                let mut crossings = Vec::new();
                for (index_a, letter_a) in a.chars().enumerate() {
                    for (index_b, letter_b) in b.chars().enumerate() {
                        if letter_a == letter_b {
                            crossings.push(Intersection {
                                index_a,
                                index_b,
                                letter: letter_a,
                            });
                        }
                    }
                }
                if !crossings.is_empty() {
                    adjacency.entry(a.clone()).or_default().insert(b.clone(), crossings);
                }
            }
        }

        debug!("built intersection graph over {} word(s)", words.len());
        IntersectionGraph { adjacency }
    }

    /// Every crossing between `a` and `b`, empty if they share no letter.
    pub fn intersections(&self, a: &str, b: &str) -> &[Intersection] {
        self.adjacency
            .get(a)
            .and_then(|row| row.get(b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total crossings `word` could form with any other word in the pool.
    pub fn connections(&self, word: &str) -> usize {
        self.adjacency
            .get(word)
            .map(|row| row.values().map(Vec::len).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_crossings_between_sharing_words() {
        let words = vec!["CAT".to_string(), "ACE".to_string(), "DOG".to_string()];
        let graph = IntersectionGraph::build(&words);

        let crossings = graph.intersections("CAT", "ACE");
        assert!(!crossings.is_empty());
        assert!(crossings
            .iter()
            .any(|i| i.letter == 'A' && i.index_a == 0 && i.index_b == 1));
        assert!(crossings
            .iter()
            .any(|i| i.letter == 'C' && i.index_a == 1 && i.index_b == 0));

        assert!(graph.intersections("CAT", "DOG").is_empty());
    }

    #[test]
    fn connections_sums_crossings_across_every_partner() {
        let words = vec!["CAT".to_string(), "ACE".to_string(), "CAR".to_string()];
        let graph = IntersectionGraph::build(&words);
        assert!(graph.connections("CAT") > 0);
        assert_eq!(graph.connections("CAT"), graph.intersections("CAT", "ACE").len()
            + graph.intersections("CAT", "CAR").len());
    }
}
