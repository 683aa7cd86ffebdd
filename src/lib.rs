#![warn(missing_docs)]

//! # Letter soup
//!
//! Generates letter-soup word search puzzles for vocabulary exercises: every word is
//! hidden horizontally or vertically in a square grid, the remaining cells are filled
//! with noise letters, and each placement is recorded so answers can be graded later.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let puzzle = letter_soup::generate_puzzle_with_rng(&["cat", "dog"], None, &mut rng).unwrap();
//!
//! assert_eq!(puzzle.size(), 9);
//! assert!(puzzle.contains_word("cat"));
//! ```

pub mod config;
pub mod grid;
pub mod placement;
pub mod sizing;

pub use config::GeneratorConfig;
pub use grid::LetterGrid;
pub use placement::{
    generate_puzzle, generate_puzzle_with_rng, word_is_present, Direction, Placement,
    PlacementStrategy, Puzzle, WordOutcome, DEFAULT_MAX_ATTEMPTS,
};
pub use sizing::{compute_grid_size, MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Trims and upper-cases a word, or returns [`None`] if it is empty or holds anything but `A`–`Z`.
///
/// Both the sizer and the placement engine only consider words that survive this.
pub fn normalize_word(word: &str) -> Option<String> {
    let word = word.trim().to_uppercase();

    if word.is_empty() || !word.chars().all(|ch| ch.is_ascii_uppercase()) {
        return None;
    }

    Some(word)
}

/// An error that happened when creating or reading a puzzle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A grid of size zero was requested.
    #[error("grid size must be at least 1")]
    ZeroGridSize,

    /// A stored grid could not be read back.
    #[error("malformed grid: {reason}")]
    MalformedGrid {
        /// What was wrong with the grid.
        reason: String,
    },

    /// A configuration document could not be parsed.
    #[error("invalid generator configuration: {0}")]
    Config(#[from] serde_json::Error),
}
