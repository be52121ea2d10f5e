//! Random maze carving over a disjoint-set forest.
//!
//! A maze is built on an n×n grid of cells drawn into a (10n+1)×(10n+1)
//! pixel bitmap. Carving runs in two phases: walls are removed at random
//! (biased toward component frontiers) until the top-left and bottom-right
//! cells are connected, then stranded cells are joined one component at a
//! time until the whole grid is reachable. Pixel changes can be streamed
//! over a channel for live terminal rendering.

pub mod builder;
pub mod error;
pub mod maze;
pub mod render;

pub use builder::{MazeBuilder, MazeResult, build_maze, build_maze_with_events};
pub use error::BuildError;
