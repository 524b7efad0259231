//! Module H: the generator façade.
//!
//! Wires the word finder, intersection graph, placement search and
//! scorer together into the crate's single public `generate` entry
//! point, in the manner of the teacher's `CrosswordGenerator`, but as a
//! direct backtracking search rather than a genetic-algorithm loop.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::dictionary::find_valid_words;
use crate::error::GeneratorError;
use crate::grid::{Grid, GridSnapshot, Location, PlacedWord};
use crate::intersection::IntersectionGraph;
use crate::scoring::{self, ScoreWeights};
use crate::search::{self, SearchParams};
pub use crate::search::PlacementStrategy;

/// Tunable knobs for a single call to [`generate`]. `Default::default()`
/// matches the field table documented for this crate's public API.
#[derive(Clone)]
pub struct GeneratorParams {
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub must_include_longest_word: bool,
    pub placement_strategy: PlacementStrategy,
    pub max_placement_candidates: usize,
    /// Declared for parity with the field this crate's predecessor carried
    /// but never enforced; advisory only, never checked by the search.
    pub max_backtrack_depth: usize,
    pub compactness_weight: f64,
    pub density_weight: f64,
    pub intersection_weight: f64,
    pub symmetry_weight: f64,
    pub candidates_to_generate: usize,
    pub seed: u64,
    /// Externally supplied "fun score" (e.g. from a curated wordlist),
    /// blended into the final ranking score alongside grid geometry.
    pub fun_score: Option<f64>,
    /// Consulted at every backtracking step; returning `true` aborts the
    /// search with [`GeneratorError::Cancelled`]. Cooperative: there is no
    /// background thread to kill, so a callback that never returns `true`
    /// never cancels anything.
    pub should_cancel: Option<Arc<dyn Fn() -> bool + Send + Sync>>,
}

impl std::fmt::Debug for GeneratorParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("GeneratorParams")
            .field("min_word_length", &self.min_word_length)
            .field("max_word_length", &self.max_word_length)
            .field("min_word_count", &self.min_word_count)
            .field("max_word_count", &self.max_word_count)
            .field("must_include_longest_word", &self.must_include_longest_word)
            .field("placement_strategy", &self.placement_strategy)
            .field("max_placement_candidates", &self.max_placement_candidates)
            .field("max_backtrack_depth", &self.max_backtrack_depth)
            .field("compactness_weight", &self.compactness_weight)
            .field("density_weight", &self.density_weight)
            .field("intersection_weight", &self.intersection_weight)
            .field("symmetry_weight", &self.symmetry_weight)
            .field("candidates_to_generate", &self.candidates_to_generate)
            .field("seed", &self.seed)
            .field("fun_score", &self.fun_score)
            .field("should_cancel", &self.should_cancel.is_some())
            .finish()
    }
}

impl Default for GeneratorParams {
    fn default() -> Self {
        GeneratorParams {
            min_word_length: 3,
            max_word_length: 10,
            min_word_count: 4,
            max_word_count: 8,
            must_include_longest_word: true,
            placement_strategy: PlacementStrategy::LongestFirst,
            max_placement_candidates: 10,
            max_backtrack_depth: 5,
            compactness_weight: 0.4,
            density_weight: 0.2,
            intersection_weight: 0.3,
            symmetry_weight: 0.1,
            candidates_to_generate: 10,
            seed: rand::random(),
            fun_score: None,
            should_cancel: None,
        }
    }
}

impl GeneratorParams {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.min_word_length == 0 || self.min_word_length > self.max_word_length {
            return Err(GeneratorError::BadParam { field: "min_word_length" });
        }
        if self.min_word_count == 0 || self.min_word_count > self.max_word_count {
            return Err(GeneratorError::BadParam { field: "min_word_count" });
        }
        if self.max_placement_candidates == 0 {
            return Err(GeneratorError::BadParam { field: "max_placement_candidates" });
        }
        if self.candidates_to_generate == 0 {
            return Err(GeneratorError::BadParam { field: "candidates_to_generate" });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PuzzleMetrics {
    pub grid_width: usize,
    pub grid_height: usize,
    pub total_cells: usize,
    pub filled_cells: usize,
    pub density: f64,
    pub intersection_count: usize,
    pub overall_score: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Puzzle {
    pub id: u64,
    pub letters: String,
    pub words: Vec<PlacedWord>,
    pub bonus_words: Vec<String>,
    pub grid: GridSnapshot,
    pub metrics: PuzzleMetrics,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GenerationResult {
    pub best: Puzzle,
    pub all_candidates: Vec<Puzzle>,
}

/// A stable key for a finished grid's layout, used to drop duplicate
/// candidates before scoring: the sorted `(row, col): letter` list, so two
/// grids with the same shape and letters collide regardless of the order
/// their words were placed in.
fn canonical_key(grid: &Grid) -> String {
    let mut entries: Vec<(Location, char)> = grid
        .filled_locations()
        .map(|loc| (*loc, grid.get(*loc).expect("location came from filled_locations")))
        .collect();
    entries.sort_by_key(|(loc, _)| (loc.row, loc.col));
    entries
        .iter()
        .map(|(loc, ch)| format!("({},{}):{}", loc.row, loc.col, ch))
        .collect::<Vec<_>>()
        .join("|")
}

/// Runs the full pipeline: finds usable words, builds their intersection
/// graph, searches for valid layouts, scores and ranks them, and returns
/// the best one alongside every other candidate produced.
pub fn generate(letters: &str, dictionary: &[String], params: GeneratorParams) -> Result<GenerationResult, GeneratorError> {
    params.validate()?;

    let dictionary_in_bounds = dictionary
        .iter()
        .any(|w| w.len() >= params.min_word_length && w.len() <= params.max_word_length);
    if !dictionary_in_bounds {
        return Err(GeneratorError::EmptyDictionary);
    }

    let valid_words = find_valid_words(letters, dictionary, params.min_word_length, params.max_word_length);
    if valid_words.len() < params.min_word_count {
        return Err(GeneratorError::InsufficientWords {
            found: valid_words.len(),
            required: params.min_word_count,
        });
    }

    let graph = IntersectionGraph::build(&valid_words);
    let search_params = SearchParams {
        min_word_length: params.min_word_length,
        min_word_count: params.min_word_count,
        max_word_count: params.max_word_count,
        must_include_longest_word: params.must_include_longest_word,
        strategy: params.placement_strategy,
        max_placement_candidates: params.max_placement_candidates,
        candidates_to_generate: params.candidates_to_generate,
        seed: params.seed,
    };

    let should_cancel = params.should_cancel.clone();
    let cancel_check: Box<dyn Fn() -> bool> = match should_cancel {
        Some(callback) => Box::new(move || callback()),
        None => Box::new(|| false),
    };

    let grids = search::search_candidates(&valid_words, &graph, &search_params, cancel_check.as_ref())?;

    let mut seen_keys = HashSet::new();
    let unique_grids: Vec<Grid> = grids
        .into_iter()
        .filter(|grid| seen_keys.insert(canonical_key(grid)))
        .collect();

    let weights = ScoreWeights {
        compactness: params.compactness_weight,
        density: params.density_weight,
        intersections: params.intersection_weight,
        symmetry: params.symmetry_weight,
    };
    let valid_word_set: BTreeSet<String> = valid_words.iter().cloned().collect();

    let mut scored: Vec<(f64, Puzzle)> = unique_grids
        .into_iter()
        .map(|grid| {
            let components = scoring::score_components(&grid);
            let grid_score = scoring::overall_score(&components, &weights);
            let final_score = scoring::final_score(grid_score, params.fun_score);

            let placed_names: HashSet<&str> = grid.placed_words().iter().map(|w| w.word.as_str()).collect();
            let bonus_words: Vec<String> = valid_word_set
                .iter()
                .filter(|w| !placed_names.contains(w.as_str()))
                .cloned()
                .collect();

            let (min_row, max_row, min_col, max_col) = grid.bounds();
            let width = (max_col - min_col + 1).max(1) as usize;
            let height = (max_row - min_row + 1).max(1) as usize;
            let total_cells = width * height;
            let filled_cells = grid.filled_cell_count();

            let metrics = PuzzleMetrics {
                grid_width: width,
                grid_height: height,
                total_cells,
                filled_cells,
                density: filled_cells as f64 / total_cells as f64,
                intersection_count: grid.crossing_count(),
                overall_score: final_score,
            };

            let puzzle = Puzzle {
                id: 0,
                letters: letters.to_ascii_uppercase(),
                words: grid.placed_words().to_vec(),
                bonus_words,
                grid: grid.to_snapshot(),
                metrics,
            };
            (final_score, puzzle)
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(params.candidates_to_generate);

    let all_candidates: Vec<Puzzle> = scored
        .into_iter()
        .enumerate()
        .map(|(index, (_, mut puzzle))| {
            puzzle.id = (index + 1) as u64;
            puzzle
        })
        .collect();

    let best = all_candidates.first().cloned().ok_or(GeneratorError::NoValidLayout)?;
    info!(
        "generated {} candidate puzzle(s) for letters \"{}\", best score {:.3}",
        all_candidates.len(),
        letters,
        best.metrics.overall_score
    );

    Ok(GenerationResult { best, all_candidates })
}
