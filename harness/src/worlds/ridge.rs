//! `Ridge`: a height map for local search.
//!
//! Each cell holds a digit height `0..=9`. A state is a cell; its successors
//! are the in-bounds neighbours (south, north, east, west) and its value is
//! the height. Restarts drop the climber on a uniformly random cell.

use rand::Rng;
use wayfinder_kernel::LocalProblem;

use super::page_collect::Pos;
use super::{parse_grid, WorldError};

#[derive(Debug, Clone)]
pub struct Ridge {
    heights: Vec<Vec<i64>>,
    start: Pos,
}

impl Ridge {
    /// # Errors
    ///
    /// Returns [`WorldError`] for a malformed grid or a non-digit cell.
    pub fn from_rows(rows: &[&str], start: Pos) -> Result<Self, WorldError> {
        let grid = parse_grid(rows)?;
        let mut heights = Vec::with_capacity(grid.len());
        for (row, cells) in grid.iter().enumerate() {
            let mut line = Vec::with_capacity(cells.len());
            for (col, &cell) in cells.iter().enumerate() {
                let height = cell
                    .to_digit(10)
                    .ok_or(WorldError::UnknownCell { cell, row, col })?;
                line.push(i64::from(height));
            }
            heights.push(line);
        }
        if start.row >= heights.len() || start.col >= heights[0].len() {
            return Err(WorldError::StartOutOfBounds {
                row: start.row,
                col: start.col,
            });
        }
        Ok(Self { heights, start })
    }

    /// Highest cell value anywhere on the map.
    #[must_use]
    pub fn peak(&self) -> i64 {
        self.heights.iter().flatten().copied().max().unwrap_or(0)
    }

    fn rows(&self) -> usize {
        self.heights.len()
    }

    fn cols(&self) -> usize {
        self.heights[0].len()
    }
}

impl LocalProblem for Ridge {
    type State = Pos;

    fn initial_state(&self) -> Pos {
        self.start
    }

    fn successors(&self, pos: &Pos) -> Vec<Pos> {
        let mut out = Vec::with_capacity(4);
        if pos.row + 1 < self.rows() {
            out.push(Pos::new(pos.row + 1, pos.col));
        }
        if pos.row > 0 {
            out.push(Pos::new(pos.row - 1, pos.col));
        }
        if pos.col + 1 < self.cols() {
            out.push(Pos::new(pos.row, pos.col + 1));
        }
        if pos.col > 0 {
            out.push(Pos::new(pos.row, pos.col - 1));
        }
        out
    }

    fn value(&self, pos: &Pos) -> i64 {
        self.heights[pos.row][pos.col]
    }

    fn restart_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Pos {
        Pos::new(
            rng.random_range(0..self.rows()),
            rng.random_range(0..self.cols()),
        )
    }
}
