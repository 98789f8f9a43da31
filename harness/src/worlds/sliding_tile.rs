//! `SlidingTile`: the 3×3 sliding puzzle (8-puzzle).
//!
//! Tiles are `1..=8`, `0` is the blank. Every move slides one tile into the
//! blank at unit cost. The goal is `1 2 3 / 4 5 6 / 7 8 _`. The heuristic is
//! the sum of tile Manhattan distances.

use std::fmt;

use waypoint_search::SearchWorld;

const SIDE: usize = 3;
const CELLS: usize = SIDE * SIDE;

/// Error constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected 9 tiles, found {found}")]
    WrongLength { found: usize },
    #[error("tiles must be a permutation of 0..=8")]
    NotAPermutation,
    #[error("invalid tile {token:?}")]
    BadToken { token: String },
}

/// A 3×3 board, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board([u8; CELLS]);

impl Board {
    /// The solved board.
    #[must_use]
    pub const fn goal() -> Self {
        Self([1, 2, 3, 4, 5, 6, 7, 8, 0])
    }

    /// Build a board from row-major tiles.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotAPermutation`] unless `tiles` holds each of
    /// `0..=8` exactly once.
    pub fn from_tiles(tiles: [u8; CELLS]) -> Result<Self, BoardError> {
        let mut seen = [false; CELLS];
        for &t in &tiles {
            let slot = seen
                .get_mut(usize::from(t))
                .ok_or(BoardError::NotAPermutation)?;
            if *slot {
                return Err(BoardError::NotAPermutation);
            }
            *slot = true;
        }
        Ok(Self(tiles))
    }

    /// Parse whitespace-separated tiles, `0` or `_` for the blank.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] for bad tokens, a wrong count, or a
    /// non-permutation.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let tiles = text
            .split_whitespace()
            .map(|token| match token {
                "_" => Ok(0),
                t => t
                    .parse::<u8>()
                    .map_err(|_| BoardError::BadToken { token: t.to_string() }),
            })
            .collect::<Result<Vec<u8>, _>>()?;
        let tiles: [u8; CELLS] = tiles
            .as_slice()
            .try_into()
            .map_err(|_| BoardError::WrongLength { found: tiles.len() })?;
        Self::from_tiles(tiles)
    }

    #[must_use]
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.0
    }

    fn blank(&self) -> usize {
        self.0.iter().position(|&t| t == 0).unwrap_or(0)
    }

    /// Whether the goal is reachable: the number of inversions among the
    /// non-blank tiles is even.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let tiles: Vec<u8> = self.0.iter().copied().filter(|&t| t != 0).collect();
        let inversions = tiles
            .iter()
            .enumerate()
            .map(|(i, a)| tiles[i + 1..].iter().filter(|b| a > b).count())
            .sum::<usize>();
        inversions % 2 == 0
    }

    /// Sum of tile Manhattan distances to their goal cells.
    #[must_use]
    pub fn manhattan(&self) -> u32 {
        let total: usize = self
            .0
            .iter()
            .enumerate()
            .filter(|(_, &t)| t != 0)
            .map(|(pos, &t)| {
                let target = usize::from(t) - 1;
                (pos / SIDE).abs_diff(target / SIDE) + (pos % SIDE).abs_diff(target % SIDE)
            })
            .sum();
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Boards reachable by one move, in fixed order: blank up, down, left,
    /// right.
    #[must_use]
    pub fn neighbours(&self) -> Vec<Board> {
        let blank = self.blank();
        let (row, col) = (blank / SIDE, blank % SIDE);
        let targets = [
            (row > 0).then(|| blank - SIDE),
            (row + 1 < SIDE).then(|| blank + SIDE),
            (col > 0).then(|| blank - 1),
            (col + 1 < SIDE).then(|| blank + 1),
        ];
        targets
            .into_iter()
            .flatten()
            .map(|target| {
                let mut next = self.0;
                next.swap(blank, target);
                Board(next)
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(if i % SIDE == 0 { " / " } else { " " })?;
            }
            if *t == 0 {
                f.write_str("_")?;
            } else {
                write!(f, "{t}")?;
            }
        }
        Ok(())
    }
}

/// The 8-puzzle as a search world.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingTile;

impl SearchWorld for SlidingTile {
    type State = Board;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "sliding_tile"
    }

    fn successors(&self, state: &Board) -> Vec<(Board, f64)> {
        state.neighbours().into_iter().map(|b| (b, 1.0)).collect()
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == Board::goal()
    }

    fn heuristic(&self, state: &Board) -> f64 {
        f64::from(state.manhattan())
    }
}
