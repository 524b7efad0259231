pub mod logging;
pub mod utils;
pub mod error;
pub mod letters;
pub mod dictionary;
pub mod graph;
pub mod intersection;
pub mod grid;
pub mod scoring;
pub mod prng;
pub mod search;
pub mod generator;
pub mod curation;

pub use dictionary::find_valid_words;
pub use error::{CurationError, GeneratorError, PlacementError};
pub use generator::{generate, GeneratorParams, GenerationResult};
pub use curation::{curate_wordlist, CuratedWordlist, CurationReport};

/// Strips every character not present in `allowed_chars` from `string`.
///
/// Used to normalise raw letter bags and dictionary entries to the
/// uppercase Latin alphabet before they reach the rest of the pipeline.
pub fn sanitise_string(string: &str, allowed_chars: &str) -> String {
    string.replace(|c: char| allowed_chars.find(c).is_none(), "")
}
