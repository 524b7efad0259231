//! Module G: the grid scorer.
//!
//! Combines several cheap geometric measures of a completed grid into a
//! single ranking score, and separately scores a single candidate
//! placement during the search so the backtracker can try its most
//! promising candidates first.

use ndarray::Array2;

use crate::grid::Grid;
use crate::utils::{binarise_array, binarise_array_threshold};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreWeights {
    pub compactness: f64,
    pub density: f64,
    pub intersections: f64,
    pub symmetry: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            compactness: 0.4,
            density: 0.2,
            intersections: 0.3,
            symmetry: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridScoreComponents {
    pub compactness: f64,
    pub density: f64,
    pub intersections: f64,
    pub symmetry: f64,
}

/// Builds a per-cell coverage-count array over `grid`'s bounding box: how
/// many placed words cover each cell. The same dense-matrix
/// snapshot-for-scoring idea as the teacher's `CrosswordGridMatrix`.
fn coverage_counts(grid: &Grid) -> Array2<u32> {
    let (min_row, max_row, min_col, max_col) = grid.bounds();
    let height = (max_row - min_row + 1).max(1) as usize;
    let width = (max_col - min_col + 1).max(1) as usize;
    let mut counts = Array2::<u32>::zeros((height, width));
    for word in grid.placed_words() {
        for (location, _) in word.cells() {
            let r = (location.row - min_row) as usize;
            let c = (location.col - min_col) as usize;
            counts[[r, c]] += 1;
        }
    }
    counts
}

/// Binary occupancy bitmap of `grid`'s bounding box: 1 where any word
/// covers the cell, 0 elsewhere.
fn to_bitmap(grid: &Grid) -> Array2<u8> {
    binarise_array(&coverage_counts(grid))
}

/// Binary crossing bitmap: 1 only where two or more placed words overlap.
/// An ndarray-based cross-check of [`Grid::crossing_count`]'s HashMap
/// tally, built off the teacher's `CrosswordGridMatrix::count_squares`
/// threshold idiom.
fn crossing_bitmap(grid: &Grid) -> Array2<u8> {
    binarise_array_threshold(&coverage_counts(grid), 2)
}

/// Mean fraction of filled cells whose point-reflection through the
/// bounding box's centre is also filled. A full array reversal on both
/// axes is exactly a 180-degree point reflection, rounding the centre
/// the same way regardless of whether the bounding box has odd or even
/// dimensions.
fn symmetry(grid: &Grid) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    let bitmap = to_bitmap(grid);
    let rotated = bitmap.slice(ndarray::s![..;-1, ..;-1]);
    let filled = bitmap.iter().filter(|&&v| v == 1).count();
    if filled == 0 {
        return 0.0;
    }
    let matching = bitmap
        .iter()
        .zip(rotated.iter())
        .filter(|&(&a, &b)| a == 1 && b == 1)
        .count();
    matching as f64 / filled as f64
}

fn compactness(grid: &Grid) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    let (min_row, max_row, min_col, max_col) = grid.bounds();
    let height = (max_row - min_row + 1).max(1) as f64;
    let width = (max_col - min_col + 1).max(1) as f64;
    let aspect = height.min(width) / height.max(width);
    let fill_ratio = grid.filled_cell_count() as f64 / (height * width);
    0.5 * aspect + 0.5 * fill_ratio
}

fn density(grid: &Grid) -> f64 {
    let (min_row, max_row, min_col, max_col) = grid.bounds();
    let area = ((max_row - min_row + 1).max(1) * (max_col - min_col + 1).max(1)) as f64;
    grid.filled_cell_count() as f64 / area
}

fn intersection_ratio(grid: &Grid) -> f64 {
    let placed = grid.placed_words().len();
    if placed <= 1 {
        return 0.0;
    }
    (grid.crossing_count() as f64 / (placed - 1) as f64).min(1.0)
}

pub fn score_components(grid: &Grid) -> GridScoreComponents {
    GridScoreComponents {
        compactness: compactness(grid),
        density: density(grid),
        intersections: intersection_ratio(grid),
        symmetry: symmetry(grid),
    }
}

pub fn overall_score(components: &GridScoreComponents, weights: &ScoreWeights) -> f64 {
    weights.compactness * components.compactness
        + weights.density * components.density
        + weights.intersections * components.intersections
        + weights.symmetry * components.symmetry
}

/// Blends a grid's geometric score with an optional externally supplied
/// "fun score" (e.g. from a curated wordlist) at a fixed 85/15 split, so
/// geometry still dominates the ranking.
pub fn final_score(grid_score: f64, fun_score: Option<f64>) -> f64 {
    match fun_score {
        Some(fun) => 0.85 * grid_score + 0.15 * fun,
        None => grid_score,
    }
}

/// Heuristic used by the search (module F) to rank placement candidates
/// for the same word during backtracking: higher is more promising.
/// Rewards a tighter aspect ratio and more crossings, penalises growing
/// the bounding box.
pub fn placement_heuristic(
    old_bounds: (isize, isize, isize, isize),
    new_bounds: (isize, isize, isize, isize),
    new_intersections: usize,
    grid_was_empty: bool,
) -> f64 {
    if grid_was_empty {
        return 100.0;
    }
    let (old_min_r, old_max_r, old_min_c, old_max_c) = old_bounds;
    let (new_min_r, new_max_r, new_min_c, new_max_c) = new_bounds;

    let old_area = ((old_max_r - old_min_r + 1).max(1) * (old_max_c - old_min_c + 1).max(1)) as f64;
    let new_height = (new_max_r - new_min_r + 1).max(1) as f64;
    let new_width = (new_max_c - new_min_c + 1).max(1) as f64;
    let new_area = new_height * new_width;

    let aspect = new_height.min(new_width) / new_height.max(new_width);
    let expansion_penalty = new_area - old_area;

    aspect * 100.0 - expansion_penalty + new_intersections as f64 * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use crate::grid::Location;

    #[test]
    fn empty_grid_scores_zero_on_every_component() {
        let components = score_components(&Grid::new());
        assert_eq!(components.compactness, 0.0);
        assert_eq!(components.density, 0.0);
        assert_eq!(components.intersections, 0.0);
        assert_eq!(components.symmetry, 0.0);
    }

    #[test]
    fn single_word_has_zero_intersections_and_positive_compactness() {
        let mut grid = Grid::new();
        grid.place_word("CAT", Location::new(0, 0), Direction::Horizontal).unwrap();
        let components = score_components(&grid);
        assert_eq!(components.intersections, 0.0);
        assert!(components.compactness > 0.0);
    }

    #[test]
    fn crossing_words_score_higher_intersections() {
        let mut grid = Grid::new();
        grid.place_word("CAT", Location::new(0, 0), Direction::Horizontal).unwrap();
        grid.place_word("ACE", Location::new(0, 1), Direction::Vertical).unwrap();
        let components = score_components(&grid);
        assert!(components.intersections > 0.0);
    }

    #[test]
    fn symmetric_cross_shape_scores_high_symmetry() {
        let mut grid = Grid::new();
        grid.place_word("CAT", Location::new(0, -1), Direction::Horizontal).unwrap();
        grid.place_word("CAB", Location::new(-1, 0), Direction::Vertical).unwrap();
        assert!(symmetry(&grid) > 0.0);
    }

    #[test]
    fn crossing_bitmap_agrees_with_the_grid_s_own_tally() {
        let mut grid = Grid::new();
        grid.place_word("CAT", Location::new(0, 0), Direction::Horizontal).unwrap();
        grid.place_word("ACE", Location::new(0, 1), Direction::Vertical).unwrap();
        let bitmap_crossings = crossing_bitmap(&grid).iter().filter(|&&v| v == 1).count();
        assert_eq!(bitmap_crossings, grid.crossing_count());
    }

    #[test]
    fn fun_score_nudges_final_score_without_dominating() {
        let base = final_score(0.8, None);
        let with_fun = final_score(0.8, Some(1.0));
        assert!(with_fun > base);
        assert!(with_fun < base + 0.2);
    }

    #[test]
    fn empty_grid_placement_gets_maximal_heuristic() {
        assert_eq!(placement_heuristic((0, 0, 0, 0), (0, 0, 0, 4), 0, true), 100.0);
    }
}
