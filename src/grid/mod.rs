//! Module D: the sparse crossword grid.
//!
//! Cells live in a `HashMap<Location, char>`, the same shape as the
//! teacher's `CrosswordGrid::cell_map`, rather than a dense matrix, so the
//! grid can grow in any direction without ever resizing an array.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

pub mod connectivity;
pub mod validity;

use crate::error::GeneratorError;
pub use validity::validate_placement;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Location {
    pub row: isize,
    pub col: isize,
}

impl Location {
    pub fn new(row: isize, col: isize) -> Self {
        Location { row, col }
    }

    pub fn step(&self, direction: Direction, amount: isize) -> Location {
        match direction {
            Direction::Horizontal => Location::new(self.row, self.col + amount),
            Direction::Vertical => Location::new(self.row + amount, self.col),
        }
    }

    /// The other axis's immediate neighbours: above/below for a
    /// horizontal word, left/right for a vertical one.
    pub fn perpendicular_neighbours(&self, direction: Direction) -> (Location, Location) {
        match direction {
            Direction::Horizontal => (Location::new(self.row - 1, self.col), Location::new(self.row + 1, self.col)),
            Direction::Vertical => (Location::new(self.row, self.col - 1), Location::new(self.row, self.col + 1)),
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A word as it sits in the grid: its text, anchor cell and direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub anchor: Location,
    pub direction: Direction,
}

impl PlacedWord {
    pub fn new(word: impl Into<String>, anchor: Location, direction: Direction) -> Self {
        PlacedWord { word: word.into(), anchor, direction }
    }

    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Every `(Location, letter)` pair the word occupies, in order.
    pub fn cells(&self) -> Vec<(Location, char)> {
        self.word
            .chars()
            .enumerate()
            .map(|(i, ch)| (self.anchor.step(self.direction, i as isize), ch))
            .collect()
    }

    pub fn boundary_before(&self) -> Location {
        self.anchor.step(self.direction, -1)
    }

    pub fn boundary_after(&self) -> Location {
        self.anchor.step(self.direction, self.word.len() as isize)
    }
}

/// A flattened, rectangular snapshot of a grid, suitable for display or
/// serialisation. Empty cells are rendered as a space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Grid {
    cells: HashMap<Location, char>,
    placed: Vec<PlacedWord>,
    bounds: Option<(isize, isize, isize, isize)>,
}

impl Grid {
    pub fn new() -> Self {
        Grid::default()
    }

    pub fn get(&self, location: Location) -> Option<char> {
        self.cells.get(&location).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.placed
    }

    /// `(min_row, max_row, min_col, max_col)`, `(0, 0, 0, 0)` if empty.
    pub fn bounds(&self) -> (isize, isize, isize, isize) {
        self.bounds.unwrap_or((0, 0, 0, 0))
    }

    pub fn filled_cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn filled_locations(&self) -> impl Iterator<Item = &Location> {
        self.cells.keys()
    }

    /// Number of cells covered by two or more placed words.
    pub fn crossing_count(&self) -> usize {
        let mut coverage: HashMap<Location, usize> = HashMap::new();
        for word in &self.placed {
            for (location, _) in word.cells() {
                *coverage.entry(location).or_insert(0) += 1;
            }
        }
        coverage.values().filter(|&&count| count >= 2).count()
    }

    fn expand_bounds(&mut self, location: Location) {
        self.bounds = Some(match self.bounds {
            None => (location.row, location.row, location.col, location.col),
            Some((min_row, max_row, min_col, max_col)) => (
                min_row.min(location.row),
                max_row.max(location.row),
                min_col.min(location.col),
                max_col.max(location.col),
            ),
        });
    }

    /// Validates `word` at `anchor`/`direction` and, if accepted, writes
    /// its letters into the grid. Rejecting a placement the validator
    /// already accepted would be a bug in the search (module F), so a
    /// failure here always surfaces as [`GeneratorError::InvalidPlacement`].
    pub fn place_word(&mut self, word: &str, anchor: Location, direction: Direction) -> Result<(), GeneratorError> {
        let candidate = PlacedWord::new(word, anchor, direction);
        validate_placement(self, &candidate).map_err(|rule| GeneratorError::InvalidPlacement {
            word: word.to_string(),
            at: anchor,
            rule,
        })?;

        for (location, ch) in candidate.cells() {
            self.cells.insert(location, ch);
            self.expand_bounds(location);
        }
        debug!("placed \"{}\" at {:?} ({:?})", word, anchor, direction);
        self.placed.push(candidate);
        Ok(())
    }

    /// Shifts every cell and placed word so the bounding box's top-left
    /// corner sits at `(0, 0)`.
    pub fn normalize(&mut self) {
        let (min_row, _, min_col, _) = self.bounds();
        if min_row == 0 && min_col == 0 {
            return;
        }
        let shifted: HashMap<Location, char> = self
            .cells
            .drain()
            .map(|(loc, ch)| (Location::new(loc.row - min_row, loc.col - min_col), ch))
            .collect();
        self.cells = shifted;
        for word in &mut self.placed {
            word.anchor = Location::new(word.anchor.row - min_row, word.anchor.col - min_col);
        }
        if let Some((min_r, max_r, min_c, max_c)) = self.bounds {
            self.bounds = Some((min_r - min_row, max_r - min_row, min_c - min_col, max_c - min_col));
        }
    }

    pub fn to_snapshot(&self) -> GridSnapshot {
        let (min_row, max_row, min_col, max_col) = self.bounds();
        let height = (max_row - min_row + 1).max(1) as usize;
        let width = (max_col - min_col + 1).max(1) as usize;
        let mut rows = vec![vec![' '; width]; height];
        for (location, &ch) in &self.cells {
            let r = (location.row - min_row) as usize;
            let c = (location.col - min_col) as usize;
            rows[r][c] = ch;
        }
        GridSnapshot {
            width,
            height,
            rows: rows.into_iter().map(|row| row.into_iter().collect()).collect(),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let snapshot = self.to_snapshot();
        for row in &snapshot.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
