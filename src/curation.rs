//! Module I: the offline wordlist curation pipeline.
//!
//! Takes a raw dictionary and produces a self-describing curated
//! wordlist: every word's sub-words, a length-bucketed "fun score"
//! percentile, and anagram deduplication, plus summary statistics. Not
//! part of the hot path: this runs once, offline, to build the file
//! [`crate::dictionary::find_valid_words`] and [`crate::generator::generate`]
//! consume at runtime.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::CurationError;
use crate::letters::LetterMultiset;

const MIN_SUB_WORDS: usize = 3;

/// Per-length cap on sub-word count used to normalise the "count bonus"
/// term of the fun score, so an 8-letter word isn't unfairly favoured
/// over a 3-letter word purely for having more possible sub-words.
fn sub_word_cap(word_len: usize) -> f64 {
    match word_len {
        3 => 3.0,
        4 => 12.0,
        5 => 30.0,
        6 => 50.0,
        7 => 80.0,
        _ => 100.0,
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WordRecord {
    pub sub_words: Vec<String>,
    pub sub_word_count: usize,
    pub fun_score: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub version: String,
    pub generated_at: String,
    pub min_sub_words: usize,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CuratedWordlist {
    pub metadata: Metadata,
    pub words_by_length: BTreeMap<String, Vec<String>>,
    pub words: HashMap<String, WordRecord>,
}

impl CuratedWordlist {
    /// Serialises the wordlist to its self-describing JSON dump, the
    /// `spec.md` §6 "Curated wordlist file format". Writing the result to
    /// disk under a caller-chosen filename is the caller's job; this crate
    /// only owns the wire shape.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a previously dumped wordlist back into memory.
    pub fn from_json(json: &str) -> serde_json::Result<CuratedWordlist> {
        serde_json::from_str(json)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DedupStats {
    pub original: usize,
    pub filtered_out: usize,
    pub kept: usize,
}

/// Summary statistics handed back alongside [`CuratedWordlist`], mirroring
/// the teacher's `CrosswordGridScore::average_scores` aggregation pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct CurationReport {
    pub dedup: DedupStats,
    pub bucket_counts: BTreeMap<usize, usize>,
    pub bucket_mean_fun_score: BTreeMap<usize, f64>,
}

struct Candidate {
    word: String,
    sub_words: Vec<String>,
    raw_score: f64,
}

fn raw_fun_score(word: &str, sub_words: &[String]) -> f64 {
    let distinct_letters: HashSet<char> = word.chars().collect();
    let diversity = distinct_letters.len() as f64 / word.len() as f64;

    let lengths: Vec<f64> = sub_words.iter().map(|w| w.len() as f64).collect();
    let mean_len = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let variance = lengths.iter().map(|l| (l - mean_len).powi(2)).sum::<f64>() / lengths.len() as f64;
    let spread = (variance.sqrt() / 2.5).min(1.0);

    let count_bonus = (sub_words.len() as f64 / sub_word_cap(word.len())).min(1.0);

    let meaty_fraction = sub_words.iter().filter(|w| w.len() >= 4).count() as f64 / sub_words.len() as f64;

    let long_bonus = (sub_words.iter().filter(|w| w.len() >= 5).count() as f64 / 5.0).min(1.0);

    0.20 * diversity + 0.20 * spread + 0.30 * count_bonus + 0.15 * meaty_fraction + 0.15 * long_bonus
}

/// Curates `raw_words` into a self-describing wordlist.
///
/// Words in `excluded_words` (case-insensitive) are dropped both as
/// curated entries and as candidate sub-words, and never appear anywhere
/// in the output.
pub fn curate_wordlist(raw_words: &[String], excluded_words: &[String]) -> Result<(CuratedWordlist, CurationReport), CurationError> {
    if raw_words.is_empty() {
        return Err(CurationError::EmptyRawWordlist);
    }

    let excluded: HashSet<String> = excluded_words.iter().map(|w| w.to_ascii_uppercase()).collect();
    // A BTreeSet, not a HashSet: iteration order feeds the candidate list
    // below, and that order decides tie-breaks during anagram dedup, so it
    // has to be reproducible (alphabetic) rather than hash-dependent.
    let dictionary: BTreeSet<String> = raw_words
        .iter()
        .map(|w| w.to_ascii_uppercase())
        .filter(|w| !excluded.contains(w))
        .collect();

    let mut candidates: Vec<Candidate> = Vec::new();
    for word in dictionary.iter().filter(|w| (3..=8).contains(&w.len())) {
        let bag = LetterMultiset::from_word(word);
        let mut sub_words: Vec<String> = dictionary
            .iter()
            .filter(|other| *other != word && other.len() >= 3 && other.len() <= word.len())
            .filter(|other| bag.contains(&LetterMultiset::from_word(other)))
            .cloned()
            .collect();
        sub_words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        if sub_words.len() < MIN_SUB_WORDS {
            continue;
        }
        let raw_score = raw_fun_score(word, &sub_words);
        candidates.push(Candidate { word: word.clone(), sub_words, raw_score });
    }

    let original_count = candidates.len();

    // Percentile-rank each candidate within its own length bucket, so a
    // 3-letter word is judged against other 3-letter words, not 8s.
    let mut buckets_by_len: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, candidate) in candidates.iter().enumerate() {
        buckets_by_len.entry(candidate.word.len()).or_default().push(index);
    }

    let mut percentile = vec![0.0_f64; candidates.len()];
    let mut bucket_counts = BTreeMap::new();
    let mut bucket_mean_fun_score = BTreeMap::new();

    for (&len, indices) in buckets_by_len.iter() {
        let mut ranked = indices.clone();
        ranked.sort_by(|&a, &b| candidates[a].raw_score.partial_cmp(&candidates[b].raw_score).unwrap());
        let n = ranked.len();
        for (rank, &index) in ranked.iter().enumerate() {
            let p = if n <= 1 { 0.5 } else { rank as f64 / (n - 1) as f64 };
            percentile[index] = (p * 1000.0).round() / 1000.0;
        }
        bucket_counts.insert(len, n);
        let mean = indices.iter().map(|&i| percentile[i]).sum::<f64>() / n as f64;
        bucket_mean_fun_score.insert(len, mean);
    }

    // Anagram dedup: among words sharing a sorted-letter signature, keep
    // only the highest-percentile one.
    let mut best_for_signature: HashMap<String, usize> = HashMap::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let signature = LetterMultiset::from_word(&candidate.word).signature();
        match best_for_signature.get(&signature) {
            Some(&existing) if percentile[existing] >= percentile[index] => {}
            _ => {
                best_for_signature.insert(signature, index);
            }
        }
    }
    let kept_indices: HashSet<usize> = best_for_signature.into_values().collect();
    let kept_count = kept_indices.len();
    let filtered_out = original_count - kept_count;

    let mut words: HashMap<String, WordRecord> = HashMap::new();
    let mut by_length: BTreeMap<usize, Vec<(String, f64)>> = BTreeMap::new();
    for &index in &kept_indices {
        let candidate = &candidates[index];
        words.insert(
            candidate.word.clone(),
            WordRecord {
                sub_words: candidate.sub_words.clone(),
                sub_word_count: candidate.sub_words.len(),
                fun_score: percentile[index],
            },
        );
        by_length.entry(candidate.word.len()).or_default().push((candidate.word.clone(), percentile[index]));
    }

    let words_by_length: BTreeMap<String, Vec<String>> = by_length
        .into_iter()
        .map(|(len, mut entries)| {
            entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(&b.0)));
            (len.to_string(), entries.into_iter().map(|(word, _)| word).collect())
        })
        .collect();

    let wordlist = CuratedWordlist {
        metadata: Metadata {
            version: "2.0".to_string(),
            generated_at: Utc::now().to_rfc3339(),
            min_sub_words: MIN_SUB_WORDS,
            description: "Curated wordlist with sub-word and fun-score statistics".to_string(),
        },
        words_by_length,
        words,
    };

    let report = CurationReport {
        dedup: DedupStats { original: original_count, filtered_out, kept: kept_count },
        bucket_counts,
        bucket_mean_fun_score,
    };

    info!(
        "curated {} word(s) from {} raw candidate(s) ({} dropped as anagram duplicates)",
        kept_count, original_count, filtered_out
    );
    debug!("bucket counts: {:?}", report.bucket_counts);

    Ok((wordlist, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn empty_raw_wordlist_is_rejected() {
        crate::logging::init_logger(true);
        let err = curate_wordlist(&[], &[]).unwrap_err();
        assert_eq!(err, CurationError::EmptyRawWordlist);
    }

    #[test]
    fn words_without_enough_sub_words_are_dropped() {
        let raw = words(&["cat", "cab", "cap"]);
        let (wordlist, _) = curate_wordlist(&raw, &[]).unwrap();
        assert!(wordlist.words.is_empty());
    }

    #[test]
    fn anagrams_are_deduplicated_keeping_one_entry() {
        let raw = words(&["listen", "silent", "enlist", "lis", "ten", "sit", "net", "lit", "nit", "its"]);
        let (wordlist, report) = curate_wordlist(&raw, &[]).unwrap();
        let anagram_count = ["LISTEN", "SILENT", "ENLIST"]
            .iter()
            .filter(|w| wordlist.words.contains_key(**w))
            .count();
        assert_eq!(anagram_count, 1);
        assert!(report.dedup.filtered_out >= 2);
    }

    #[test]
    fn anagram_tie_break_is_alphabetic_and_reproducible() {
        // ENLIST, LISTEN, SILENT, TINSEL are exact anagrams, so raw_fun_score
        // ties between them; the dedup survivor must be chosen the same way
        // every run, not by HashSet iteration order.
        let raw = words(&["enlist", "listen", "silent", "tinsel", "lis", "ten", "sit", "net", "lit", "nit", "its"]);
        for _ in 0..5 {
            let (wordlist, _) = curate_wordlist(&raw, &[]).unwrap();
            let survivor = ["ENLIST", "LISTEN", "SILENT", "TINSEL"]
                .iter()
                .find(|w| wordlist.words.contains_key(**w))
                .copied();
            assert_eq!(survivor, Some("ENLIST"));
        }
    }

    #[test]
    fn excluded_words_never_appear_as_entries_or_sub_words() {
        let raw = words(&["cats", "cat", "cast", "cast", "cat", "act", "sac", "sat"]);
        let (wordlist, _) = curate_wordlist(&raw, &["cat".to_string()]).unwrap();
        assert!(!wordlist.words.contains_key("CAT"));
        for record in wordlist.words.values() {
            assert!(!record.sub_words.contains(&"CAT".to_string()));
        }
    }

    #[test]
    fn fun_score_is_a_percentile_within_its_length_bucket() {
        let raw = words(&[
            "cats", "cast", "acts", "tacs", "scat", "cat", "act", "sat", "tas", "ats", "sac",
        ]);
        let (wordlist, _) = curate_wordlist(&raw, &[]).unwrap();
        for record in wordlist.words.values() {
            assert!((0.0..=1.0).contains(&record.fun_score));
        }
    }

    #[test]
    fn json_dump_round_trips() {
        let raw = words(&["cats", "cast", "acts", "scat", "cat", "act", "sat", "tas", "ats", "sac"]);
        let (wordlist, _) = curate_wordlist(&raw, &[]).unwrap();
        let json = wordlist.to_json().unwrap();
        assert!(json.contains("\"version\""));
        let restored = CuratedWordlist::from_json(&json).unwrap();
        assert_eq!(wordlist, restored);
    }
}
