//! # grid_astar
//!
//! Shortest paths on a uniform square grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//! Movement is restricted to the four orthogonal directions and every move costs
//! [EDGE_COST].
//!
//! The search engine does not draw anything. Every [Cell] carries a [Role] that the engine
//! updates while it runs (frontier, visited, path) and a step callback is invoked after each
//! expansion so that a caller can render the grid however it likes, or stop the search early.
//!
//! ```
//! use grid_astar::{Grid, SearchEngine, SearchOutcome};
//! use std::ops::ControlFlow;
//!
//! let mut grid = Grid::build(5).unwrap();
//! grid.place_start(0, 0).unwrap();
//! grid.place_end(4, 4).unwrap();
//! grid.refresh_adjacency();
//! let start = grid.start().unwrap();
//! let end = grid.end().unwrap();
//! let outcome = SearchEngine::new()
//!     .run(&mut grid, start, end, |_| ControlFlow::Continue(()))
//!     .unwrap();
//! assert_eq!(outcome.path().map(|p| p.len()), Some(8));
//! ```
pub mod cell;
pub mod error;
pub mod grid;
pub mod search;

pub use cell::{Cell, Role};
pub use error::{GridError, Result};
pub use grid::Grid;
pub use grid_util::point::Point;
pub use search::{heuristic, is_contiguous, RunReport, SearchEngine, SearchOutcome, SearchStats};

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Cost of moving between two orthogonally adjacent cells.
pub const EDGE_COST: u32 = 1;
/// Score of a cell that has not been reached yet. Larger than any finite score.
pub const UNREACHED: u32 = u32::MAX;
/// Maximum number of neighbours of a cell on a 4-connected grid.
pub const N_NEIGHBOURS: usize = 4;
/// (row, col) offsets in the order neighbours are generated: down, up, right, left.
/// Search tie-breaking depends on this order.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); N_NEIGHBOURS] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
