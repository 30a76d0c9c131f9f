use thiserror::Error;

use crate::Point;

/// Failures while turning puzzle text into a [`Grid`](crate::Grid).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("grid text is empty")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unexpected cell {cell:?} at {at}")]
    UnexpectedCell { cell: char, at: Point },
    #[error("no {0:?} tile in grid")]
    MissingTile(char),
    #[error("tile {tile:?} appears more than once ({first} and {second})")]
    DuplicateTile {
        tile: char,
        first: Point,
        second: Point,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
