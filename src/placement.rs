//! Places words into a grid and fills the rest with noise letters.

use std::fmt::Display;

use array2d::Array2D;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    config::GeneratorConfig, grid::LetterGrid, normalize_word, sizing::compute_grid_size, Error,
};

/// How many randomized trials a word gets before it is abandoned.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// The direction a word runs from its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The word runs left to right.
    Horizontal,

    /// The word runs top to bottom.
    Vertical,
}

impl Direction {
    /// Returns a random direction, each with equal odds.
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..2) {
            0 => Direction::Horizontal,
            1 => Direction::Vertical,
            _ => unreachable!(),
        }
    }

    /// The cell `offset` steps away from `from` in this direction.
    pub fn step(self, from: (usize, usize), offset: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (from.0, from.1 + offset),
            Direction::Vertical => (from.0 + offset, from.1),
        }
    }

    /// The lowercase name used when a placement is stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where one word was embedded in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The uppercase word.
    pub word: String,

    /// Row of the first letter.
    pub row: usize,

    /// Column of the first letter.
    pub col: usize,

    /// The direction the word runs in.
    pub direction: Direction,

    /// The number of letters in the word.
    pub length: usize,
}

impl Placement {
    /// Creates a placement, taking the length from the word's character count.
    pub fn new(word: impl Into<String>, row: usize, col: usize, direction: Direction) -> Self {
        let word = word.into();
        let length = word.chars().count();

        Self {
            word,
            row,
            col,
            direction,
            length,
        }
    }

    /// Returns all cells of the grid that the word spans across.
    pub fn indices(&self) -> Vec<(usize, usize)> {
        (0..self.length)
            .map(|i| self.direction.step((self.row, self.col), i))
            .collect()
    }

    /// Whether every cell of the placement lies inside a `size` × `size` grid.
    pub fn in_bounds(&self, size: usize) -> bool {
        let (end_row, end_col) = self
            .direction
            .step((self.row, self.col), self.length.saturating_sub(1));

        self.row < size && self.col < size && end_row < size && end_col < size
    }
}

/// What happened to a single word during generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordOutcome {
    /// The word was written into the grid at this position.
    Placed(Placement),

    /// No fitting position was found; the word is left out of the puzzle.
    Skipped {
        /// How many candidate positions were tried.
        attempts: usize,
    },
}

/// How the engine searches for a position for each word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Draw a random direction and anchor up to `max_attempts` times.
    ///
    /// A trial whose direction is too short for the word still uses up an attempt.
    Randomized {
        /// Trial budget per word.
        max_attempts: usize,
    },

    /// Try every direction and anchor, in shuffled order, until one fits.
    ///
    /// A word is only skipped when no position fits the words already placed.
    Exhaustive,
}

impl Default for PlacementStrategy {
    fn default() -> Self {
        PlacementStrategy::Randomized {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A grid under construction, where unused cells are still [`None`].
#[derive(Debug)]
pub struct Board {
    cells: Array2D<Option<char>>,
}

impl Board {
    /// Creates an empty `size` × `size` board.
    pub fn new(size: usize) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::ZeroGridSize);
        }

        Ok(Self {
            cells: Array2D::filled_with(None, size, size),
        })
    }

    /// The number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.cells.num_rows()
    }

    /// Whether each cell the word would cover is either empty or already holds the needed letter.
    pub fn fits(&self, letters: &[char], anchor: (usize, usize), direction: Direction) -> bool {
        letters.iter().enumerate().all(|(i, &ch)| {
            let (row, col) = direction.step(anchor, i);
            match self.cells.get(row, col) {
                Some(Some(existing)) => *existing == ch,
                Some(None) => true,
                None => false,
            }
        })
    }

    fn write(&mut self, letters: &[char], anchor: (usize, usize), direction: Direction) {
        for (i, &ch) in letters.iter().enumerate() {
            self.cells[direction.step(anchor, i)] = Some(ch);
        }
    }

    /// Tries to place one uppercase word, writing it into the board on success.
    pub fn place_word(
        &mut self,
        word: &str,
        strategy: PlacementStrategy,
        rng: &mut impl Rng,
    ) -> WordOutcome {
        let letters: Vec<char> = word.chars().collect();

        let found = match strategy {
            PlacementStrategy::Randomized { max_attempts } => {
                self.search_randomized(&letters, max_attempts, rng)
            }
            PlacementStrategy::Exhaustive => self.search_exhaustive(&letters, rng),
        };

        match found {
            Ok((anchor, direction)) => {
                self.write(&letters, anchor, direction);
                WordOutcome::Placed(Placement::new(word, anchor.0, anchor.1, direction))
            }
            Err(attempts) => WordOutcome::Skipped { attempts },
        }
    }

    /// Last anchor row and column for a word of `len` letters, or [`None`] if it cannot fit.
    fn anchor_limits(&self, len: usize, direction: Direction) -> Option<(usize, usize)> {
        let size = self.size();
        let last = size.checked_sub(len)?;

        Some(match direction {
            Direction::Horizontal => (size - 1, last),
            Direction::Vertical => (last, size - 1),
        })
    }

    fn search_randomized(
        &self,
        letters: &[char],
        max_attempts: usize,
        rng: &mut impl Rng,
    ) -> Result<((usize, usize), Direction), usize> {
        for _ in 0..max_attempts {
            let direction = Direction::random(rng);

            let Some((max_row, max_col)) = self.anchor_limits(letters.len(), direction) else {
                continue;
            };

            let anchor = (rng.gen_range(0..=max_row), rng.gen_range(0..=max_col));

            if self.fits(letters, anchor, direction) {
                return Ok((anchor, direction));
            }
        }

        Err(max_attempts)
    }

    fn search_exhaustive(
        &self,
        letters: &[char],
        rng: &mut impl Rng,
    ) -> Result<((usize, usize), Direction), usize> {
        let mut candidates = Vec::new();

        for direction in [Direction::Horizontal, Direction::Vertical] {
            if let Some((max_row, max_col)) = self.anchor_limits(letters.len(), direction) {
                for row in 0..=max_row {
                    for col in 0..=max_col {
                        candidates.push(((row, col), direction));
                    }
                }
            }
        }

        candidates.shuffle(rng);

        candidates
            .iter()
            .copied()
            .find(|&(anchor, direction)| self.fits(letters, anchor, direction))
            .ok_or(candidates.len())
    }

    /// Fills every empty cell with a random uppercase letter, row by row.
    pub fn fill(self, rng: &mut impl Rng) -> LetterGrid {
        let size = self.size();
        let mut cells = self.cells.elements_row_major_iter();

        let filled = Array2D::filled_by_row_major(
            || match cells.next() {
                Some(Some(ch)) => *ch,
                _ => random_letter(rng),
            },
            size,
            size,
        );

        LetterGrid::from_array(filled)
    }
}

fn random_letter(rng: &mut impl Rng) -> char {
    rng.gen_range(b'A'..=b'Z') as char
}

/// Normalizes the words, drops those that cannot go in the grid, and orders them longest first.
fn normalize_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(words.len());

    for word in words {
        match normalize_word(word.as_ref()) {
            Some(word) => normalized.push(word),
            None if word.as_ref().trim().is_empty() => tracing::debug!("ignoring empty word"),
            None => tracing::warn!(word = word.as_ref(), "ignoring word with letters outside A-Z"),
        }
    }

    // Stable, so equal lengths keep their input order
    normalized.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));
    normalized
}

/// A generated letter soup: the filled grid plus where each word went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    grid: LetterGrid,
    placements: Vec<Placement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<String>,
}

impl Puzzle {
    /// Generates a puzzle for the words using the given configuration and random source.
    ///
    /// When `config.grid_size` is [`None`] the size is computed from the words. Words that
    /// cannot be placed are recorded in [`Puzzle::skipped`] rather than failing the puzzle.
    pub fn generate<S: AsRef<str>>(
        words: &[S],
        config: &GeneratorConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, Error> {
        let size = config
            .grid_size
            .unwrap_or_else(|| compute_grid_size(words));

        let mut board = Board::new(size)?;
        let mut placements = Vec::new();
        let mut skipped = Vec::new();

        for word in normalize_words(words) {
            match board.place_word(&word, config.strategy, rng) {
                WordOutcome::Placed(placement) => {
                    tracing::debug!(
                        word = %placement.word,
                        row = placement.row,
                        col = placement.col,
                        direction = %placement.direction,
                        "placed word"
                    );
                    placements.push(placement);
                }
                WordOutcome::Skipped { attempts } => {
                    tracing::warn!(word = %word, attempts, size, "could not place word");
                    skipped.push(word);
                }
            }
        }

        tracing::info!(
            size,
            placed = placements.len(),
            skipped = skipped.len(),
            "generated letter soup"
        );

        Ok(Self {
            grid: board.fill(rng),
            placements,
            skipped,
        })
    }

    /// The filled letter grid.
    pub fn grid(&self) -> &LetterGrid {
        &self.grid
    }

    /// One record per word that made it into the grid, longest words first.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Words (uppercase) that could not be placed.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// The grid dimension.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Whether the word can be found in this puzzle; see [`word_is_present`].
    pub fn contains_word(&self, word: &str) -> bool {
        word_is_present(word, &self.grid, &self.placements)
    }

    /// Splits the puzzle into its grid and placement records.
    pub fn into_parts(self) -> (LetterGrid, Vec<Placement>) {
        (self.grid, self.placements)
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut words_iter = self.placements.iter().map(|p| p.word.as_str());

        for row in self.grid.rows() {
            f.write_str(&row.join(" "))?;
            writeln!(f, " | {}", words_iter.next().unwrap_or(""))?;
        }

        // More words than rows
        for word in words_iter {
            writeln!(f, "{:width$} | {}", "", word, width = self.size() * 2 - 1)?;
        }

        Ok(())
    }
}

/// Generates a puzzle with the default strategy and a thread-local random source.
pub fn generate_puzzle<S: AsRef<str>>(words: &[S], size: Option<usize>) -> Result<Puzzle, Error> {
    generate_puzzle_with_rng(words, size, &mut rand::thread_rng())
}

/// Generates a puzzle with the default strategy and the given random source.
pub fn generate_puzzle_with_rng<S: AsRef<str>>(
    words: &[S],
    size: Option<usize>,
    rng: &mut impl Rng,
) -> Result<Puzzle, Error> {
    let config = GeneratorConfig {
        grid_size: size,
        ..GeneratorConfig::default()
    };

    Puzzle::generate(words, &config, rng)
}

/// Whether `word` is recorded in `placements` or can be read straight off the grid.
///
/// The comparison is case-insensitive. The grid scan only looks left to right
/// and top to bottom, the two directions words are placed in.
pub fn word_is_present(word: &str, grid: &LetterGrid, placements: &[Placement]) -> bool {
    let word = word.trim().to_uppercase();
    if word.is_empty() {
        return false;
    }

    placements.iter().any(|placement| placement.word == word) || grid.find_word(&word).is_some()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn placement_indices() {
        let placement = Placement::new("CAT", 1, 2, Direction::Vertical);
        assert_eq!(placement.length, 3);
        assert_eq!(placement.indices(), vec![(1, 2), (2, 2), (3, 2)]);
        assert!(placement.in_bounds(4));
        assert!(!placement.in_bounds(3));
    }

    #[test]
    fn direction_names() {
        assert_eq!(
            serde_json::to_string(&Direction::Horizontal).unwrap(),
            r#""horizontal""#
        );
        assert_eq!(Direction::Vertical.to_string(), "vertical");
    }

    #[test]
    fn zero_size_board() {
        assert!(matches!(Board::new(0), Err(Error::ZeroGridSize)));
    }

    #[test]
    fn fits_allows_matching_overlap() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::new(5).unwrap();
        let cat: Vec<char> = "CAT".chars().collect();
        let arm: Vec<char> = "ARM".chars().collect();
        let dog: Vec<char> = "DOG".chars().collect();

        assert!(board.fits(&cat, (0, 0), Direction::Horizontal));
        board.write(&cat, (0, 0), Direction::Horizontal);

        // shares the A at (0, 1)
        assert!(board.fits(&arm, (0, 1), Direction::Vertical));
        // would overwrite C with D
        assert!(!board.fits(&dog, (0, 0), Direction::Vertical));
        // runs off the board
        assert!(!board.fits(&dog, (0, 3), Direction::Horizontal));

        let grid = board.fill(&mut rng);
        assert_eq!(grid.find_word("CAT"), Some((0, 0, Direction::Horizontal)));
    }

    #[test]
    fn too_long_word_burns_every_attempt() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new(4).unwrap();

        let outcome = board.place_word(
            "ELEPHANT",
            PlacementStrategy::Randomized { max_attempts: 100 },
            &mut rng,
        );
        assert_eq!(outcome, WordOutcome::Skipped { attempts: 100 });

        let outcome = board.place_word("ELEPHANT", PlacementStrategy::Exhaustive, &mut rng);
        assert_eq!(outcome, WordOutcome::Skipped { attempts: 0 });
    }

    #[test]
    fn exhaustive_finds_the_only_slot() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new(3).unwrap();

        // Fill every row except the middle one with a word that blocks "XYZ"
        board.write(&['A', 'A', 'A'], (0, 0), Direction::Horizontal);
        board.write(&['B', 'B', 'B'], (2, 0), Direction::Horizontal);

        let outcome = board.place_word("XYZ", PlacementStrategy::Exhaustive, &mut rng);
        assert_eq!(
            outcome,
            WordOutcome::Placed(Placement::new("XYZ", 1, 0, Direction::Horizontal))
        );
    }

    #[test]
    fn normalizes_and_orders_words() {
        let words = normalize_words(&["cat", " ", "Hippo", "dog", ""]);
        assert_eq!(words, vec!["HIPPO", "CAT", "DOG"]);
    }

    #[test]
    fn words_outside_the_alphabet_never_reach_the_grid() {
        let mut rng = StdRng::seed_from_u64(21);
        let puzzle =
            generate_puzzle_with_rng(&["café", "a1b", "cat"], Some(8), &mut rng).unwrap();

        assert_eq!(puzzle.placements().len(), 1);
        assert_eq!(puzzle.placements()[0].word, "CAT");
        for row in 0..8 {
            for col in 0..8 {
                assert!(puzzle.grid()[(row, col)].is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn fill_leaves_no_gaps() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = Board::new(6).unwrap().fill(&mut rng);

        for row in 0..6 {
            for col in 0..6 {
                assert!(grid[(row, col)].is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn skipped_words_are_reported() {
        let mut rng = StdRng::seed_from_u64(5);
        let puzzle = generate_puzzle_with_rng(&["cat", "thisisaverylongword"], Some(8), &mut rng)
            .unwrap();

        assert_eq!(puzzle.skipped(), ["THISISAVERYLONGWORD".to_string()]);
        assert_eq!(puzzle.placements().len(), 1);
    }

    #[test]
    fn display_lists_words_beside_rows() {
        let mut rng = StdRng::seed_from_u64(9);
        let puzzle = generate_puzzle_with_rng(&["cat"], Some(8), &mut rng).unwrap();
        let text = puzzle.to_string();
        let first = text.lines().next().unwrap();

        assert_eq!(text.lines().count(), 8);
        assert!(first.ends_with(" | CAT"));
    }
}
