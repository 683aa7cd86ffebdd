//! Picks a square grid dimension from the shape of a word list.

use crate::normalize_word;

/// The smallest grid the sizer will ever return.
pub const MIN_GRID_SIZE: usize = 8;

/// The largest grid the sizer will ever return.
pub const MAX_GRID_SIZE: usize = 25;

/// Grid fill ratio (target letters / cells) above which the grid is enlarged.
const MAX_LETTER_DENSITY: f64 = 0.25;

/// Computes a grid size for the given words.
///
/// Only the character counts of the words matter; words the engine would drop (see
/// [`normalize_word`]) are not counted. The result is odd and lies in
/// `MIN_GRID_SIZE..=MAX_GRID_SIZE` for any non-empty list; an empty list yields [`MIN_GRID_SIZE`].
pub fn compute_grid_size<S: AsRef<str>>(words: &[S]) -> usize {
    let lengths: Vec<usize> = words
        .iter()
        .filter_map(|word| normalize_word(word.as_ref()))
        .map(|word| word.chars().count())
        .collect();

    if lengths.is_empty() {
        return MIN_GRID_SIZE;
    }

    let max_len = lengths.iter().copied().max().unwrap_or(0);
    let count = lengths.len();
    let total_letters: usize = lengths.iter().sum();

    let mut size = (max_len + 2).max(MIN_GRID_SIZE);

    // The brackets add up, they are not exclusive
    if count > 10 {
        size += 2;
    }
    if count > 20 {
        size += 3;
    }
    if count > 30 {
        size += 2;
    }

    let density = total_letters as f64 / (size * size) as f64;
    if density > MAX_LETTER_DENSITY {
        size = (size as f64 * 1.2) as usize;
    }

    if max_len > 15 {
        size = size.max(max_len + 3);
    }

    if size % 2 == 0 {
        size += 1;
    }

    size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
}
