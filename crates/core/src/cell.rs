//! Cell coordinates and rectangular ranges.
//!
//! Rows and columns are 0-based everywhere; A1 notation is only used for
//! display and for comment anchors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell position within a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
}

impl CellPos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// A1-style reference, e.g. `(0, 0)` -> `"A1"`.
    pub fn to_a1(&self) -> String {
        format!("{}{}", col_to_letters(self.col), self.row as u128 + 1)
    }

    /// Parse an A1-style reference. `$` markers are ignored.
    pub fn from_a1(reference: &str) -> Option<Self> {
        let cleaned: String = reference.trim().chars().filter(|c| *c != '$').collect();
        let split = cleaned.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = cleaned.split_at(split);
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let row: usize = digits.parse().ok()?;
        if row == 0 {
            return None;
        }
        let mut col = 0usize;
        for c in letters.chars() {
            let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            col = col.checked_mul(26)?.checked_add(digit)?;
        }
        Some(Self { row: row - 1, col: col - 1 })
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// An inclusive rectangular range of cells.
///
/// Constructors normalize the corners so `start <= end` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeRef {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl RangeRef {
    pub fn new(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            start_row: start_row.min(end_row),
            start_col: start_col.min(end_col),
            end_row: start_row.max(end_row),
            end_col: start_col.max(end_col),
        }
    }

    /// Single-cell range.
    pub fn cell(row: usize, col: usize) -> Self {
        Self::new(row, col, row, col)
    }

    pub fn top_left(&self) -> CellPos {
        CellPos::new(self.start_row, self.start_col)
    }

    pub fn rows(&self) -> usize {
        (self.end_row - self.start_row).saturating_add(1)
    }

    pub fn cols(&self) -> usize {
        (self.end_col - self.start_col).saturating_add(1)
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row >= self.start_row
            && pos.row <= self.end_row
            && pos.col >= self.start_col
            && pos.col <= self.end_col
    }

    /// Iterate the cells of the range row by row, left to right.
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        (self.start_row..=self.end_row)
            .flat_map(move |row| (self.start_col..=self.end_col).map(move |col| CellPos::new(row, col)))
    }

    /// A1-style range reference, e.g. `"A1:C3"` (or `"B2"` for a single cell).
    pub fn to_a1(&self) -> String {
        let start = self.top_left().to_a1();
        if self.rows() == 1 && self.cols() == 1 {
            start
        } else {
            format!("{}:{}", start, CellPos::new(self.end_row, self.end_col).to_a1())
        }
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Convert 0-based column index to Excel-style letter(s).
pub fn col_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}
