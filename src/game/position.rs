use std::fmt;

use serde::{Deserialize, Serialize};

/// A board coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Build a position from signed coordinates, if both fall inside a
    /// `rows x cols` board.
    pub fn checked(row: isize, col: isize, rows: usize, cols: usize) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < rows && col < cols).then_some(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
