use std::collections::HashSet;

use rstest::rstest;

use wordbag_crossword::generator::{GeneratorParams, PlacementStrategy};
use wordbag_crossword::grid::Direction;
use wordbag_crossword::{generate, GeneratorError};

fn dictionary() -> Vec<String> {
    vec![
        "CAT", "CATS", "SAT", "ACT", "CAST", "TAX", "ARC", "CAR", "RAT", "TAR", "ACE", "CARTS",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn homework_dictionary() -> Vec<String> {
    vec![
        "HOME", "WORK", "HOMEWORK", "HOW", "MORE", "ROME", "HERO", "HORE", "WORM", "MOW", "ROW",
        "OWE", "HOE", "HER", "ORE", "WOE", "OAR", "WORE", "MORE", "MOOR", "ROOM", "WHOM", "WORKER",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// S1: a tiny bag that must succeed, place CATS, and never surface TAX.
#[test]
fn s1_tiny_bag_places_cats_and_excludes_unspellable_words() {
    wordbag_crossword::logging::init_logger(true);
    let result = generate("CATS", &dictionary(), GeneratorParams::default()).unwrap();
    let all_words: HashSet<&str> = result
        .best
        .words
        .iter()
        .map(|w| w.word.as_str())
        .chain(result.best.bonus_words.iter().map(|w| w.as_str()))
        .collect();

    assert!(result.best.words.iter().any(|w| w.word == "CATS"));
    for expected in ["CAT", "SAT", "ACT", "CAST"] {
        assert!(all_words.contains(expected), "expected {expected} among words or bonus words");
    }
    assert!(!all_words.contains("TAX"));
}

/// S2: a bag with no usable dictionary entries fails with InsufficientWords.
#[test]
fn s2_forced_failure_reports_insufficient_words() {
    let dictionary = vec!["ABCDEFGH".to_string()]; // unreachable from QZX anyway
    let err = generate("QZX", &dictionary, GeneratorParams::default()).unwrap_err();
    assert_eq!(err, GeneratorError::InsufficientWords { found: 0, required: 4 });
}

/// S3: the same inputs and seed must yield a bit-identical result.
#[test]
fn s3_same_seed_yields_identical_results() {
    let params = GeneratorParams { seed: 42, ..GeneratorParams::default() };
    let first = generate("READS", &dictionary(), params.clone()).unwrap();
    let second = generate("READS", &dictionary(), params).unwrap();
    assert_eq!(first.best.grid, second.best.grid);
    assert_eq!(first.best.metrics, second.best.metrics);
    assert_eq!(first.all_candidates.len(), second.all_candidates.len());
}

/// S4: crossword laws hold over every pair of placed words, and every
/// non-initial word shares at least one cell with an earlier word.
#[test]
fn s4_every_placement_obeys_crossword_laws() {
    let result = generate("HOMEWORK", &homework_dictionary(), GeneratorParams::default()).unwrap();
    let words = &result.best.words;
    assert!(words.len() >= 2, "need at least two placed words to exercise crossing rules");

    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            continue;
        }
        let shares_a_cell = words[..i].iter().any(|earlier| {
            word.cells().iter().any(|(loc, ch)| {
                earlier.cells().iter().any(|(earlier_loc, earlier_ch)| earlier_loc == loc && earlier_ch == ch)
            })
        });
        assert!(shares_a_cell, "word {} at index {} has no intersection with an earlier word", word.word, i);
    }

    // R1: any two words overlap on at most agreeing letters.
    for a in words.iter() {
        for b in words.iter() {
            if std::ptr::eq(a, b) {
                continue;
            }
            for (loc_a, ch_a) in a.cells() {
                for (loc_b, ch_b) in b.cells() {
                    if loc_a == loc_b {
                        assert_eq!(ch_a, ch_b, "overlapping cells must agree on letter");
                    }
                }
            }
        }
    }
}

/// S6: an empty grid scores zero on every component, never NaN.
#[test]
fn s6_empty_grid_scores_zero_everywhere() {
    use wordbag_crossword::grid::Grid;
    use wordbag_crossword::scoring::score_components;

    let grid = Grid::new();
    let components = score_components(&grid);
    assert_eq!(components.intersections, 0.0);
    assert_eq!(components.symmetry, 0.0);
    assert_eq!(components.compactness, 0.0);
    assert_eq!(components.density, 0.0);
    assert!(!components.compactness.is_nan());
    assert!(!components.density.is_nan());
}

#[rstest]
#[case(PlacementStrategy::LongestFirst)]
#[case(PlacementStrategy::MostConnectedFirst)]
#[case(PlacementStrategy::Random)]
fn every_strategy_produces_a_valid_connected_grid(#[case] strategy: PlacementStrategy) {
    let params = GeneratorParams { placement_strategy: strategy, seed: 7, ..GeneratorParams::default() };
    let result = generate("CATS", &dictionary(), params).unwrap();
    assert!(!result.best.words.is_empty());
}

/// Property 5 (Normalization) and property 9 (Ranking).
#[test]
fn normalized_bounds_and_non_increasing_ranking_hold() {
    let result = generate("HOMEWORK", &homework_dictionary(), GeneratorParams::default()).unwrap();
    for puzzle in &result.all_candidates {
        assert!(puzzle.grid.rows.iter().any(|row| row.chars().any(|c| c != ' ')));
    }
    for window in result.all_candidates.windows(2) {
        assert!(window[0].metrics.overall_score >= window[1].metrics.overall_score);
    }
}

/// Property 6: placed words and bonus words are disjoint and cover every valid word.
#[test]
fn placed_and_bonus_words_partition_the_valid_word_set() {
    let result = generate("CATS", &dictionary(), GeneratorParams::default()).unwrap();
    let placed: HashSet<&str> = result.best.words.iter().map(|w| w.word.as_str()).collect();
    let bonus: HashSet<&str> = result.best.bonus_words.iter().map(|w| w.as_str()).collect();
    assert!(placed.is_disjoint(&bonus));

    let valid_words = wordbag_crossword::find_valid_words("CATS", &dictionary(), 3, 10);
    let union: HashSet<&str> = placed.union(&bonus).copied().collect();
    let expected: HashSet<&str> = valid_words.iter().map(String::as_str).collect();
    assert_eq!(union, expected);
}

#[test]
fn rejects_inverted_min_max_word_count() {
    let params = GeneratorParams { min_word_count: 9, max_word_count: 3, ..GeneratorParams::default() };
    let err = generate("CATS", &dictionary(), params).unwrap_err();
    assert_eq!(err, GeneratorError::BadParam { field: "min_word_count" });
}

#[test]
fn horizontal_and_vertical_directions_both_appear_in_a_rich_bag() {
    let result = generate("HOMEWORK", &homework_dictionary(), GeneratorParams::default()).unwrap();
    let directions: HashSet<Direction> = result.best.words.iter().map(|w| w.direction).collect();
    assert!(directions.len() <= 2);
}
