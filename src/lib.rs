//! # maze_pathfinding
//!
//! Grid pathfinding and maze generation on a square, 4-connected grid. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic and
//! insertion-order tie-breaking, so results are reproducible. Also carves
//! loop-free mazes by randomized backtracking.
//!
//! Both algorithms report progress through a step observer which can stop them early, so a
//! front end can animate the search or the carve without the core knowing about drawing.
mod astar;
mod cell;
mod editor;
mod error;
mod grid;
mod maze;

pub use crate::astar::{PathFinder, PathResult, SearchStep};
pub use crate::cell::{Cell, CellState};
pub use crate::editor::Editor;
pub use crate::error::GridError;
pub use crate::grid::Grid;
pub use crate::maze::{Maze, MazeGenerator};
pub use grid_util::point::Point;

/// Row count an interactive session starts with.
pub const DEFAULT_ROWS: usize = 70;
/// Cost of every move between orthogonal neighbours.
pub const EDGE_COST: u32 = 1;
/// Every this many carved passages the chance of carving on a paced scan drops.
pub const THROTTLE_DIVISOR: usize = 50;
/// A 4-neighbourhood fits inline.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Answer of a step observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepControl {
    Continue,
    /// Abandon the run. Cells keep whatever state they had at that point.
    Stop,
}
