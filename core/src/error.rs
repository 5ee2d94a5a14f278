use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be square with rows of equal length")]
    InvalidBoardShape,
    #[error("Invalid panel, expected 'O' or 'X'")]
    InvalidPanel,
    #[error("Levels start at 1")]
    InvalidLevel,
    #[error("Stage table must be non-empty with positive size, taps and level count")]
    InvalidStageTable,
    #[error("Event not accepted in the current session state")]
    UnexpectedEvent,
}

pub type Result<T> = core::result::Result<T, GameError>;
