//! Module E: the placement validator.
//!
//! Checks a candidate word placement against a grid in the fixed order
//! R1-R5; the first rule broken is the one returned, so failures are
//! deterministic regardless of which other rules the candidate also
//! breaks.

use log::trace;

use crate::error::PlacementError;

use super::{Direction, Grid, Location, PlacedWord};

/// Validates `candidate` against `grid`. On success, returns every cell
/// the candidate shares with an already-placed word (its intersections).
pub fn validate_placement(grid: &Grid, candidate: &PlacedWord) -> Result<Vec<Location>, PlacementError> {
    let cells = candidate.cells();
    trace!("validating \"{}\" at {:?} ({:?})", candidate.word, candidate.anchor, candidate.direction);

    // R1: every cell the candidate shares with an existing letter must agree.
    let mut intersections = Vec::new();
    for (location, letter) in &cells {
        if let Some(existing) = grid.get(*location) {
            if existing != *letter {
                return Err(PlacementError::LetterMismatch {
                    location: *location,
                    existing,
                    expected: *letter,
                });
            }
            intersections.push(*location);
        }
    }

    // R2: every non-intersection cell must have empty perpendicular neighbours,
    // so the candidate never silently forms an unintended parallel word.
    for (location, _) in &cells {
        if intersections.contains(location) {
            continue;
        }
        let (first, second) = location.perpendicular_neighbours(candidate.direction);
        if grid.get(first).is_some() || grid.get(second).is_some() {
            return Err(PlacementError::ParallelAdjacency { location: *location });
        }
    }

    // R3/R4: the cells immediately before and after the word must be empty,
    // so placements don't run two words together end to end.
    let before = candidate.boundary_before();
    if grid.get(before).is_some() {
        return Err(PlacementError::MissingBoundaryBefore { location: before });
    }
    let after = candidate.boundary_after();
    if grid.get(after).is_some() {
        return Err(PlacementError::MissingBoundaryAfter { location: after });
    }

    // R5: the first word in a grid needs no anchor, every later word does.
    if !grid.is_empty() && intersections.is_empty() {
        return Err(PlacementError::NotAnchored);
    }

    Ok(intersections)
}
