//! The finished letter grid and the literal word scan over it.

use std::{fmt::Display, ops::Index};

use array2d::Array2D;
use serde::{Deserialize, Serialize};

use crate::{
    placement::{Direction, Placement},
    Error,
};

/// A square grid in which every cell holds one uppercase letter.
///
/// Serializes as a list of rows of single-character strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<String>>", try_from = "Vec<Vec<String>>")]
pub struct LetterGrid {
    cells: Array2D<char>,
}

impl LetterGrid {
    pub(crate) fn from_array(cells: Array2D<char>) -> Self {
        debug_assert_eq!(cells.num_rows(), cells.num_columns());
        Self { cells }
    }

    /// The number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.cells.num_rows()
    }

    /// Gets the letter at the given cell, or [`None`] when it is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row, col).copied()
    }

    /// The grid as rows of single-letter strings, the shape it is stored in.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.cells
            .rows_iter()
            .map(|row| row.map(|ch| ch.to_string()).collect())
            .collect()
    }

    /// Reads the letters covered by a placement, or [`None`] if it runs off the grid.
    pub fn read(&self, placement: &Placement) -> Option<String> {
        placement
            .indices()
            .into_iter()
            .map(|(row, col)| self.get(row, col))
            .collect()
    }

    /// Scans rows left to right, then columns top to bottom, for the literal word.
    ///
    /// Returns the anchor and direction of the first hit. The word is expected in
    /// uppercase; an empty word is never found.
    pub fn find_word(&self, word: &str) -> Option<(usize, usize, Direction)> {
        let letters: Vec<char> = word.chars().collect();
        let size = self.size();

        if letters.is_empty() || letters.len() > size {
            return None;
        }

        let last_anchor = size - letters.len();

        for row in 0..size {
            for col in 0..=last_anchor {
                if self.spells(&letters, row, col, Direction::Horizontal) {
                    return Some((row, col, Direction::Horizontal));
                }
            }
        }

        for row in 0..=last_anchor {
            for col in 0..size {
                if self.spells(&letters, row, col, Direction::Vertical) {
                    return Some((row, col, Direction::Vertical));
                }
            }
        }

        None
    }

    fn spells(&self, letters: &[char], row: usize, col: usize, direction: Direction) -> bool {
        letters.iter().enumerate().all(|(i, &ch)| {
            let (r, c) = direction.step((row, col), i);
            self.cells[(r, c)] == ch
        })
    }
}

impl Index<(usize, usize)> for LetterGrid {
    type Output = char;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index]
    }
}

impl From<LetterGrid> for Vec<Vec<String>> {
    fn from(grid: LetterGrid) -> Self {
        grid.rows()
    }
}

impl TryFrom<Vec<Vec<String>>> for LetterGrid {
    type Error = Error;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        let size = rows.len();

        if size == 0 {
            return Err(Error::MalformedGrid {
                reason: "grid has no rows".to_string(),
            });
        }

        let mut letters = Vec::with_capacity(size);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(Error::MalformedGrid {
                    reason: format!("row {} has {} cells, expected {}", i, row.len(), size),
                });
            }

            let mut parsed = Vec::with_capacity(size);
            for cell in row {
                let mut chars = cell.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if ch.is_ascii_uppercase() => parsed.push(ch),
                    _ => {
                        return Err(Error::MalformedGrid {
                            reason: format!(
                                "cell {:?} in row {} is not a single uppercase letter",
                                cell, i
                            ),
                        })
                    }
                }
            }
            letters.push(parsed);
        }

        let cells = Array2D::from_rows(&letters).map_err(|e| Error::MalformedGrid {
            reason: format!("{:?}", e),
        })?;

        Ok(Self { cells })
    }
}

impl Display for LetterGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.cells.rows_iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }

            for (j, ch) in row.enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", ch)?;
            }
        }

        Ok(())
    }
}
