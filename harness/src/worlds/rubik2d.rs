//! `Rubik2D`: a grid of symbols whose rows and columns rotate cyclically.
//!
//! A row rotation by `shift` moves every cell of the row `shift` places to
//! the right (wrapping); a column rotation moves every cell of the column
//! `shift` places down. The goal grid is a constructor parameter.
//!
//! Actions are enumerated rows first, then columns, each by increasing index
//! and shift. They render as `r:<row>:<shift>` / `c:<col>:<shift>`.

use std::fmt;

use wayfinder_kernel::{Cost, Problem, ProblemError};

use super::{parse_grid, WorldError};

/// An immutable `rows × cols` grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<Vec<char>>,
}

impl Grid {
    /// # Errors
    ///
    /// Returns [`WorldError`] for an empty or ragged grid.
    pub fn from_rows(rows: &[&str]) -> Result<Self, WorldError> {
        Ok(Self {
            cells: parse_grid(rows)?,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// The symbol at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Row `row` rotated right by `shift`; `None` if there is no such row.
    #[must_use]
    pub fn rotate_row(&self, row: usize, shift: usize) -> Option<Self> {
        let mut cells = self.cells.clone();
        let cols = self.cols();
        cells.get_mut(row)?.rotate_right(shift % cols);
        Some(Self { cells })
    }

    /// Column `col` rotated down by `shift`; `None` if there is no such column.
    #[must_use]
    pub fn rotate_col(&self, col: usize, shift: usize) -> Option<Self> {
        if col >= self.cols() {
            return None;
        }
        let rows = self.rows();
        let mut cells = self.cells.clone();
        for (r, row) in cells.iter_mut().enumerate() {
            row[col] = self.cells[(r + rows - shift % rows) % rows][col];
        }
        Some(Self { cells })
    }

    /// Number of cells that differ from `other` (same shape assumed).
    fn misplaced(&self, other: &Self) -> usize {
        self.cells
            .iter()
            .flatten()
            .zip(other.cells.iter().flatten())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Row { index: usize, shift: usize },
    Col { index: usize, shift: usize },
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row { index, shift } => write!(f, "r:{index}:{shift}"),
            Self::Col { index, shift } => write!(f, "c:{index}:{shift}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rubik2D {
    initial: Grid,
    goal: Grid,
    actions: Vec<Rotation>,
}

impl Rubik2D {
    /// # Errors
    ///
    /// Returns [`WorldError::ShapeMismatch`] if the grids differ in shape.
    pub fn new(initial: Grid, goal: Grid) -> Result<Self, WorldError> {
        if initial.rows() != goal.rows() || initial.cols() != goal.cols() {
            return Err(WorldError::ShapeMismatch);
        }
        let mut actions = Vec::new();
        for index in 0..initial.rows() {
            for shift in 1..initial.cols() {
                actions.push(Rotation::Row { index, shift });
            }
        }
        for index in 0..initial.cols() {
            for shift in 1..initial.rows() {
                actions.push(Rotation::Col { index, shift });
            }
        }
        Ok(Self {
            initial,
            goal,
            actions,
        })
    }

    /// Convenience: build both grids from rows.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if either grid is malformed or shapes differ.
    pub fn from_rows(initial: &[&str], goal: &[&str]) -> Result<Self, WorldError> {
        Self::new(Grid::from_rows(initial)?, Grid::from_rows(goal)?)
    }

    #[must_use]
    pub fn goal(&self) -> &Grid {
        &self.goal
    }

    /// The rotation that undoes `action`.
    #[must_use]
    pub fn inverse(&self, action: Rotation) -> Rotation {
        match action {
            Rotation::Row { index, shift } => {
                let cols = self.goal.cols();
                Rotation::Row {
                    index,
                    shift: (cols - shift % cols) % cols,
                }
            }
            Rotation::Col { index, shift } => {
                let rows = self.goal.rows();
                Rotation::Col {
                    index,
                    shift: (rows - shift % rows) % rows,
                }
            }
        }
    }
}

impl Problem for Rubik2D {
    type State = Grid;
    type Action = Rotation;

    fn initial_state(&self) -> Grid {
        self.initial.clone()
    }

    fn actions(&self, _state: &Grid) -> Vec<Rotation> {
        self.actions.clone()
    }

    fn result(&self, state: &Grid, action: &Rotation) -> Result<Grid, ProblemError> {
        let invalid = || ProblemError::InvalidAction {
            action: action.to_string(),
        };
        match *action {
            Rotation::Row { index, shift } if shift != 0 && shift < state.cols() => {
                state.rotate_row(index, shift).ok_or_else(invalid)
            }
            Rotation::Col { index, shift } if shift != 0 && shift < state.rows() => {
                state.rotate_col(index, shift).ok_or_else(invalid)
            }
            Rotation::Row { .. } | Rotation::Col { .. } => Err(invalid()),
        }
    }

    fn goal_test(&self, state: &Grid) -> bool {
        *state == self.goal
    }

    /// One rotation changes at most `max(rows, cols)` cells.
    fn heuristic(&self, state: &Grid) -> Cost {
        let per_move = self.goal.rows().max(self.goal.cols());
        state.misplaced(&self.goal).div_ceil(per_move) as Cost
    }
}
