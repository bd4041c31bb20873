//! Demonstration worlds for the harness runner.
//!
//! Worlds provide domain data only (states, actions, goal test, costs and
//! heuristics). Traversal, deduplication and budgets belong to the engine.

pub mod page_collect;
pub mod ridge;
pub mod rubik2d;

use thiserror::Error;

/// A world could not be built from the supplied rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("initial and goal grids differ in shape")]
    ShapeMismatch,

    #[error("unknown cell {cell:?} at row {row}, column {col}")]
    UnknownCell { cell: char, row: usize, col: usize },

    #[error("expected exactly one {what}, found {found}")]
    MarkerCount { what: &'static str, found: usize },

    #[error("start ({row}, {col}) lies outside the grid")]
    StartOutOfBounds { row: usize, col: usize },
}

/// Split `rows` into a rectangular grid of chars.
pub(crate) fn parse_grid(rows: &[&str]) -> Result<Vec<Vec<char>>, WorldError> {
    let grid: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
    let width = grid.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(WorldError::Empty);
    }
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != width {
            return Err(WorldError::Ragged {
                row,
                expected: width,
                found: cells.len(),
            });
        }
    }
    Ok(grid)
}
