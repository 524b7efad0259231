use thiserror::Error;

use crate::grid::Location;

/// Failure of a single rule check against a candidate word placement.
///
/// Checked in the fixed order R1-R5 described by the validator; the first
/// rule a candidate breaks is the one reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("letter mismatch at {location:?}: grid already has '{existing}', candidate needs '{expected}'")]
    LetterMismatch {
        location: Location,
        existing: char,
        expected: char,
    },

    #[error("cell at {location:?} would sit beside an unintended parallel word")]
    ParallelAdjacency { location: Location },

    #[error("cell before the word's start at {location:?} is already occupied")]
    MissingBoundaryBefore { location: Location },

    #[error("cell after the word's end at {location:?} is already occupied")]
    MissingBoundaryAfter { location: Location },

    #[error("word shares no cell with any previously placed word")]
    NotAnchored,
}

/// Errors surfaced by [`crate::generator::generate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    #[error("found {found} usable word(s), need at least {required}")]
    InsufficientWords { found: usize, required: usize },

    #[error("no valid layout found after exhausting all placement attempts")]
    NoValidLayout,

    #[error("internal error: rejected placement of \"{word}\" at {at:?}: {rule}")]
    InvalidPlacement {
        word: String,
        at: Location,
        rule: PlacementError,
    },

    #[error("dictionary contains no word usable with the given letters")]
    EmptyDictionary,

    #[error("invalid parameter `{field}`")]
    BadParam { field: &'static str },

    #[error("generation was cancelled")]
    Cancelled,
}

/// Errors surfaced by [`crate::curation::curate_wordlist`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurationError {
    #[error("raw word list is empty")]
    EmptyRawWordlist,
}
