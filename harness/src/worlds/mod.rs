//! World implementations for the harness runner.

pub mod grid_maze;
pub mod sliding_tile;
pub mod weighted_graph;

pub use grid_maze::{Cell, GridMaze, MazeError};
pub use sliding_tile::{Board, BoardError, SlidingTile};
pub use weighted_graph::WeightedGraph;
