//! Grid helpers and graph searches shared by the puzzle solutions.
//!
//! - [`Point`], [`Point3`] and [`Heading`] for positions and facing
//! - [`Grid`] for rectangles parsed from puzzle text
//! - [`bfs`] / [`bfs_to`] for uniform move costs
//! - [`dijkstra`] / [`dijkstra_to`] / [`dijkstra_paths`] for weighted moves
//! - [`flood_fill`] and [`components`] for reachability
//!
//! The searches never look at a grid themselves: the caller picks the state
//! type (a position, or a position plus heading, elapsed time, …) and passes
//! a successor function. Unreachable states are simply missing from the
//! result.

mod coord;
mod error;
mod grid;
mod search;

pub use coord::{Heading, Point, Point3};
pub use error::{Error, Result};
pub use grid::Grid;
pub use search::{
    bfs, bfs_to, components, dijkstra, dijkstra_paths, dijkstra_to, flood_fill, Cost, DistanceMap, ShortestPaths,
};
