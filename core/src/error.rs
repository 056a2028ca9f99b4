use thiserror::Error;

use crate::*;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates {0:?}")]
    InvalidCoords(Coord2),
    #[error("Grid of {cells} cells cannot be split into pairs")]
    OddCellCount { cells: u16 },
}

pub type Result<T> = core::result::Result<T, GameError>;
