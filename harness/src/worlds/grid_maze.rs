//! `GridMaze`: 4-connected weighted grid parsed from ASCII.
//!
//! ```text
//! S..#
//! .#.#
//! .9..
//! ##.G
//! ```
//!
//! `#` is a wall, `S` the start, `G` the goal, `.` a cell of entry cost 1 and
//! `1`-`9` a cell of that entry cost. Moving into a cell costs its entry
//! cost. The heuristic is Manhattan distance, admissible because every
//! entry cost is at least 1.

use waypoint_search::SearchWorld;

/// A grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Error parsing a maze.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell {ch:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, ch: char },
    #[error("maze has no start cell 'S'")]
    MissingStart,
    #[error("maze has no goal cell 'G'")]
    MissingGoal,
    #[error("maze has more than one '{marker}' cell")]
    Duplicate { marker: char },
}

/// Parsed grid maze.
#[derive(Debug, Clone)]
pub struct GridMaze {
    width: usize,
    height: usize,
    /// Entry cost per cell in row-major order; `None` is a wall.
    costs: Vec<Option<u8>>,
    start: Cell,
    goal: Cell,
}

impl GridMaze {
    /// Parse a maze. Leading and trailing blank lines and per-line
    /// surrounding whitespace are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`MazeError`] for ragged rows, unknown characters, or a
    /// missing or repeated start or goal.
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map(|r| r.chars().count()).ok_or(MazeError::Empty)?;

        let mut costs = Vec::with_capacity(width * rows.len());
        let mut start = None;
        let mut goal = None;
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MazeError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cost = match ch {
                    '#' => None,
                    '.' => Some(1),
                    'S' | 'G' => {
                        let slot = if ch == 'S' { &mut start } else { &mut goal };
                        if slot.replace(Cell::new(row, col)).is_some() {
                            return Err(MazeError::Duplicate { marker: ch });
                        }
                        Some(1)
                    }
                    // Digits 1-9 fit in u8.
                    #[allow(clippy::cast_possible_truncation)]
                    '1'..='9' => ch.to_digit(10).map(|d| d as u8),
                    _ => return Err(MazeError::UnknownCell { row, col, ch }),
                };
                costs.push(cost);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            costs,
            start: start.ok_or(MazeError::MissingStart)?,
            goal: goal.ok_or(MazeError::MissingGoal)?,
        })
    }

    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Entry cost of `cell`, `None` for walls and out-of-range cells.
    #[must_use]
    pub fn entry_cost(&self, cell: Cell) -> Option<u8> {
        if cell.row >= self.height || cell.col >= self.width {
            return None;
        }
        self.costs[cell.row * self.width + cell.col]
    }

    /// Total entry cost of walking `path` (the start cell is free).
    #[must_use]
    pub fn path_cost(&self, path: &[Cell]) -> Option<f64> {
        path.iter()
            .skip(1)
            .map(|&cell| self.entry_cost(cell).map(f64::from))
            .sum()
    }
}

impl SearchWorld for GridMaze {
    type State = Cell;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "grid_maze"
    }

    fn successors(&self, state: &Cell) -> Vec<(Cell, f64)> {
        // Fixed order: up, down, left, right.
        let neighbours = [
            state.row.checked_sub(1).map(|row| Cell::new(row, state.col)),
            Some(Cell::new(state.row + 1, state.col)),
            state.col.checked_sub(1).map(|col| Cell::new(state.row, col)),
            Some(Cell::new(state.row, state.col + 1)),
        ];
        neighbours
            .into_iter()
            .flatten()
            .filter_map(|cell| self.entry_cost(cell).map(|cost| (cell, f64::from(cost))))
            .collect()
    }

    fn is_goal(&self, state: &Cell) -> bool {
        *state == self.goal
    }

    #[allow(clippy::cast_precision_loss)]
    fn heuristic(&self, state: &Cell) -> f64 {
        state.manhattan(self.goal) as f64
    }
}
