//! Precomputed win combinations.
//!
//! For every cell of a board shape the index stores each run of
//! [`CONNECT`] cells that passes through it, so the terminal check after a
//! move only has to look at the runs through the landing cell.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use super::Position;

/// Number of pieces in a row needed to win.
pub const CONNECT: usize = 4;

/// A candidate winning run. Cells are distinct and listed in step order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Line([Position; CONNECT]);

impl Line {
    pub fn cells(&self) -> &[Position; CONNECT] {
        &self.0
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// Walk `CONNECT` cells from `(row, col)` by `(d_row, d_col)`; `None` if
    /// any cell leaves the board.
    fn walk(
        (row, col): (isize, isize),
        (d_row, d_col): (isize, isize),
        rows: usize,
        cols: usize,
    ) -> Option<Line> {
        let mut cells = [Position::new(0, 0); CONNECT];
        for (step, cell) in (0..).zip(cells.iter_mut()) {
            *cell = Position::checked(row + d_row * step, col + d_col * step, rows, cols)?;
        }
        Some(Line(cells))
    }
}

/// Anchor position -> every line through it.
///
/// Immutable once built and safe to share across threads by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationIndex {
    rows: usize,
    cols: usize,
    #[serde(serialize_with = "serialize_sorted")]
    lines: HashMap<Position, Vec<Line>>,
}

/// Positions are not string keys, so emit `[anchor, lines]` pairs in board order.
fn serialize_sorted<S: Serializer>(
    lines: &HashMap<Position, Vec<Line>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut entries: Vec<_> = lines.iter().collect();
    entries.sort_by_key(|(pos, _)| **pos);
    serializer.collect_seq(entries)
}

impl CombinationIndex {
    /// Build the index for a `rows x cols` board.
    pub fn build(rows: usize, cols: usize) -> Self {
        let mut lines = HashMap::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let anchor = Position::new(row, col);
                lines.insert(anchor, lines_for_anchor(anchor, rows, cols));
            }
        }

        let index = CombinationIndex { rows, cols, lines };
        log::debug!(
            "built combination index for {}x{} board: {} lines",
            rows,
            cols,
            index.line_count()
        );
        index
    }

    /// `(rows, cols)` of the board shape this index was built for.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, anchor: Position) -> Option<&[Line]> {
        self.lines.get(&anchor).map(Vec::as_slice)
    }

    /// Lines through `anchor`; empty for positions outside the shape.
    pub fn lines_through(&self, anchor: Position) -> &[Line] {
        self.get(anchor).unwrap_or(&[])
    }

    /// Total number of stored lines, counting a line once per anchor.
    pub fn line_count(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &[Line])> {
        self.lines.iter().map(|(&pos, lines)| (pos, lines.as_slice()))
    }
}

fn lines_for_anchor(anchor: Position, rows: usize, cols: usize) -> Vec<Line> {
    let (i, j) = (anchor.row as isize, anchor.col as isize);
    let mut found = Vec::new();

    // The last piece in a column is always its top piece, so only look down.
    found.extend(Line::walk((i, j), (1, 0), rows, cols));

    let reach = CONNECT as isize - 1;
    for k in -reach..=0 {
        // Anchor sits at index -k of a run starting in column j + k.
        let Some(horizontal) = Line::walk((i, j + k), (0, 1), rows, cols) else {
            continue;
        };
        found.push(horizontal);
        found.extend(Line::walk((i + k, j + k), (1, 1), rows, cols));
        found.extend(Line::walk((i - k, j + k), (-1, 1), rows, cols));
    }

    found
}
