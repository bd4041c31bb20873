//! `PageCollect`: walk a maze, pick up every page, then reach the exit.
//!
//! Cells: `#` wall, ` ` or `.` floor, `@` start, `p` page, `X` exit.
//! Moves are tried in the order south, north, east, west; a move is legal if
//! the target cell is inside the grid and not a wall. Stepping onto a page
//! collects it. The goal is standing on the exit with no pages left.
//!
//! The heuristic is the Manhattan distance to the nearest remaining page, or
//! to the exit once all pages are collected. Both are lower bounds on the
//! remaining walk, so A* stays optimal.

use std::collections::BTreeSet;
use std::fmt;

use wayfinder_kernel::{Cost, Problem, ProblemError};

use super::{parse_grid, WorldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub fn manhattan(self, other: Self) -> Cost {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as Cost
    }
}

/// Player position plus the pages still on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageState {
    pub position: Pos,
    pub remaining: BTreeSet<Pos>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    South,
    North,
    East,
    West,
}

impl Move {
    const ORDER: [Move; 4] = [Move::South, Move::North, Move::East, Move::West];

    fn apply(self, pos: Pos) -> Option<Pos> {
        match self {
            Self::South => Some(Pos::new(pos.row + 1, pos.col)),
            Self::North => pos.row.checked_sub(1).map(|r| Pos::new(r, pos.col)),
            Self::East => Some(Pos::new(pos.row, pos.col + 1)),
            Self::West => pos.col.checked_sub(1).map(|c| Pos::new(pos.row, c)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::South => "s",
            Self::North => "n",
            Self::East => "e",
            Self::West => "w",
        })
    }
}

#[derive(Debug, Clone)]
pub struct PageCollect {
    walls: Vec<Vec<bool>>,
    start: Pos,
    exit: Pos,
    pages: BTreeSet<Pos>,
}

impl PageCollect {
    /// Parse a maze.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] for a malformed grid, an unknown cell, or a
    /// start / exit marker that is missing or repeated.
    pub fn from_rows(rows: &[&str]) -> Result<Self, WorldError> {
        let grid = parse_grid(rows)?;
        let mut walls = Vec::with_capacity(grid.len());
        let mut starts = Vec::new();
        let mut exits = Vec::new();
        let mut pages = BTreeSet::new();

        for (row, cells) in grid.iter().enumerate() {
            let mut wall_row = Vec::with_capacity(cells.len());
            for (col, &cell) in cells.iter().enumerate() {
                let pos = Pos::new(row, col);
                match cell {
                    '#' | ' ' | '.' => {}
                    '@' => starts.push(pos),
                    'X' => exits.push(pos),
                    'p' => {
                        pages.insert(pos);
                    }
                    other => {
                        return Err(WorldError::UnknownCell {
                            cell: other,
                            row,
                            col,
                        })
                    }
                }
                wall_row.push(cell == '#');
            }
            walls.push(wall_row);
        }

        let start = single(starts, "start '@'")?;
        let exit = single(exits, "exit 'X'")?;
        Ok(Self {
            walls,
            start,
            exit,
            pages,
        })
    }

    #[must_use]
    pub fn exit(&self) -> Pos {
        self.exit
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn is_open(&self, pos: Pos) -> bool {
        self.walls
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .is_some_and(|wall| !wall)
    }
}

fn single(found: Vec<Pos>, what: &'static str) -> Result<Pos, WorldError> {
    match found.as_slice() {
        [pos] => Ok(*pos),
        _ => Err(WorldError::MarkerCount {
            what,
            found: found.len(),
        }),
    }
}

impl Problem for PageCollect {
    type State = PageState;
    type Action = Move;

    fn initial_state(&self) -> PageState {
        let mut remaining = self.pages.clone();
        remaining.remove(&self.start);
        PageState {
            position: self.start,
            remaining,
        }
    }

    fn actions(&self, state: &PageState) -> Vec<Move> {
        Move::ORDER
            .into_iter()
            .filter(|m| m.apply(state.position).is_some_and(|p| self.is_open(p)))
            .collect()
    }

    fn result(&self, state: &PageState, action: &Move) -> Result<PageState, ProblemError> {
        let position = action
            .apply(state.position)
            .filter(|&p| self.is_open(p))
            .ok_or_else(|| ProblemError::InvalidAction {
                action: action.to_string(),
            })?;
        let mut remaining = state.remaining.clone();
        remaining.remove(&position);
        Ok(PageState {
            position,
            remaining,
        })
    }

    fn goal_test(&self, state: &PageState) -> bool {
        state.position == self.exit && state.remaining.is_empty()
    }

    fn heuristic(&self, state: &PageState) -> Cost {
        state
            .remaining
            .iter()
            .map(|&page| state.position.manhattan(page))
            .min()
            .unwrap_or_else(|| state.position.manhattan(self.exit))
    }
}
