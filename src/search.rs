//! Module F: the placement search.
//!
//! Recursively places an ordered list of words onto a grid, backtracking
//! whenever a word has no valid candidate location left. Several
//! full attempts are made per call, each with a different word ordering,
//! so the caller ends up with more than one usable layout to rank.

use std::collections::HashSet;

use log::{debug, trace};

use rand::seq::SliceRandom;

use crate::error::GeneratorError;
use crate::grid::connectivity::is_four_connected;
use crate::grid::validity::validate_placement;
use crate::grid::{Direction, Grid, Location, PlacedWord};
use crate::intersection::IntersectionGraph;
use crate::prng::{rng_for_seed, sine_random};
use crate::scoring::placement_heuristic;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementStrategy {
    LongestFirst,
    MostConnectedFirst,
    Random,
}

#[derive(Clone, Debug)]
pub struct SearchParams {
    pub min_word_length: usize,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub must_include_longest_word: bool,
    pub strategy: PlacementStrategy,
    pub max_placement_candidates: usize,
    pub candidates_to_generate: usize,
    pub seed: u64,
}

/// Orders `valid_words` for one placement attempt according to
/// `params.strategy`, then (for attempts after the first) lightly
/// perturbs the order by swapping adjacent pairs when a seeded PRNG roll
/// exceeds 0.7, enough to explore different layouts across attempts
/// without discarding the strategy's overall preference.
fn order_words(
    valid_words: &[String],
    graph: &IntersectionGraph,
    params: &SearchParams,
    attempt_index: usize,
    attempt_seed: u64,
) -> Vec<String> {
    let mut eligible: Vec<String> = valid_words
        .iter()
        .filter(|w| w.len() >= params.min_word_length)
        .cloned()
        .collect();

    match params.strategy {
        PlacementStrategy::LongestFirst => {
            eligible.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        }
        PlacementStrategy::MostConnectedFirst => {
            eligible.sort_by(|a, b| {
                graph
                    .connections(b)
                    .cmp(&graph.connections(a))
                    .then_with(|| b.len().cmp(&a.len()))
                    .then_with(|| a.cmp(b))
            });
        }
        PlacementStrategy::Random => {
            eligible.sort();
            let mut rng = rng_for_seed(attempt_seed);
            eligible.shuffle(&mut rng);
        }
    }

    eligible.truncate(params.max_word_count);

    if params.must_include_longest_word {
        if let Some(longest) = valid_words
            .iter()
            .filter(|w| w.len() >= params.min_word_length)
            .max_by_key(|w| w.len())
            .cloned()
        {
            match eligible.iter().position(|w| w == &longest) {
                Some(pos) if pos != 0 => {
                    let word = eligible.remove(pos);
                    eligible.insert(0, word);
                }
                Some(_) => {}
                None if !eligible.is_empty() => {
                    eligible[0] = longest;
                }
                None => eligible.push(longest),
            }
        }
    }

    perturb(eligible, attempt_index, attempt_seed)
}

fn perturb(mut ordered: Vec<String>, attempt_index: usize, seed: u64) -> Vec<String> {
    if attempt_index == 0 || ordered.len() < 2 {
        return ordered;
    }
    for i in 0..ordered.len() - 1 {
        if sine_random(seed.wrapping_add(i as u64)) > 0.7 {
            ordered.swap(i, i + 1);
        }
    }
    ordered
}

/// Every `(anchor, direction)` at which `word` could cross an
/// already-placed word. Deduplicated; does not validate the candidate.
fn candidate_locations(grid: &Grid, word: &str) -> Vec<(Location, Direction)> {
    if grid.is_empty() {
        return vec![(Location::new(0, 0), Direction::Horizontal)];
    }

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for placed in grid.placed_words() {
        for (word_index, word_letter) in word.chars().enumerate() {
            for (placed_index, placed_letter) in placed.word.chars().enumerate() {
                if word_letter != placed_letter {
                    continue;
                }
                let (direction, anchor) = match placed.direction {
                    Direction::Horizontal => (
                        Direction::Vertical,
                        Location::new(placed.anchor.row - word_index as isize, placed.anchor.col + placed_index as isize),
                    ),
                    Direction::Vertical => (
                        Direction::Horizontal,
                        Location::new(placed.anchor.row + placed_index as isize, placed.anchor.col - word_index as isize),
                    ),
                };
                if seen.insert((anchor, direction)) {
                    candidates.push((anchor, direction));
                }
            }
        }
    }
    candidates
}

/// Recursively places `words[index..]` onto `grid`, trying the
/// best-scoring valid candidates for `words[index]` first and
/// backtracking on dead ends. Returns the first completed grid found.
fn place_remaining(
    grid: &Grid,
    words: &[String],
    index: usize,
    params: &SearchParams,
    should_cancel: &dyn Fn() -> bool,
) -> Option<Grid> {
    if should_cancel() {
        return None;
    }
    if index == words.len() {
        return Some(grid.clone());
    }

    let word = &words[index];
    let old_bounds = grid.bounds();
    let grid_was_empty = grid.is_empty();

    let mut scored: Vec<(Location, Direction, usize, f64)> = candidate_locations(grid, word)
        .into_iter()
        .filter_map(|(anchor, direction)| {
            let candidate = PlacedWord::new(word.clone(), anchor, direction);
            let intersections = validate_placement(grid, &candidate).ok()?;
            let mut trial = grid.clone();
            trial.place_word(word, anchor, direction).ok()?;
            let score = placement_heuristic(old_bounds, trial.bounds(), intersections.len(), grid_was_empty);
            Some((anchor, direction, intersections.len(), score))
        })
        .collect();

    scored.sort_by(|a, b| b.3.partial_cmp(&a.3).unwrap_or(std::cmp::Ordering::Equal));

    for (anchor, direction, _, _) in scored.into_iter().take(params.max_placement_candidates) {
        let mut next = grid.clone();
        if next.place_word(word, anchor, direction).is_ok() {
            trace!("placed \"{}\" at {:?}, recursing to word {}", word, anchor, index + 1);
            if let Some(result) = place_remaining(&next, words, index + 1, params, should_cancel) {
                return Some(result);
            }
        }
    }
    None
}

/// Runs up to `2 * candidates_to_generate` full placement attempts, each
/// with its own word ordering, and returns every connected grid produced,
/// up to `candidates_to_generate`.
pub fn search_candidates(
    valid_words: &[String],
    graph: &IntersectionGraph,
    params: &SearchParams,
    should_cancel: &dyn Fn() -> bool,
) -> Result<Vec<Grid>, GeneratorError> {
    if valid_words.len() < params.min_word_count {
        return Err(GeneratorError::InsufficientWords {
            found: valid_words.len(),
            required: params.min_word_count,
        });
    }

    let max_attempts = params.candidates_to_generate.saturating_mul(2).max(1);
    let mut results = Vec::new();

    for attempt in 0..max_attempts {
        if should_cancel() {
            return Err(GeneratorError::Cancelled);
        }
        let attempt_seed = params.seed.wrapping_add(attempt as u64);
        let ordered = order_words(valid_words, graph, params, attempt, attempt_seed);
        if ordered.len() < params.min_word_count {
            continue;
        }

        if let Some(mut grid) = place_remaining(&Grid::new(), &ordered, 0, params, should_cancel) {
            grid.normalize();
            if is_four_connected(&grid) {
                results.push(grid);
            }
        }

        if results.len() >= params.candidates_to_generate {
            break;
        }
    }

    debug!("search produced {} candidate grid(s) over {} attempt(s)", results.len(), max_attempts);

    if results.is_empty() {
        return Err(GeneratorError::NoValidLayout);
    }
    Ok(results)
}
