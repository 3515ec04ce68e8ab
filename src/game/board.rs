use std::fmt;

use super::{Player, Position};
use crate::error::MoveError;

pub const STANDARD_ROWS: usize = 6;
pub const STANDARD_COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// A `rows x cols` grid stored row-major. Pieces fall towards the last row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Create an empty 6x7 board
    pub fn standard() -> Self {
        Self::new(STANDARD_ROWS, STANDARD_COLS)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells on the board
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row `rows - 1` is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Like [`Board::get`], but `None` outside the grid.
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        (pos.row < self.rows && pos.col < self.cols).then(|| self.get(pos.row, pos.col))
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Columns that can still take a piece
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop a piece for `player` in a column, returns the position where it landed
    pub fn place_piece(&mut self, player: Player, col: usize) -> Result<Position, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                column: col,
                columns: self.cols,
            });
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull { column: col });
        }

        // Find the lowest empty row in this column
        let row = (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
            .ok_or(MoveError::ColumnFull { column: col })?;

        self.cells[row * self.cols + col] = player.to_cell();
        Ok(Position::new(row, col))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.get(row, col).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
