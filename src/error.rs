use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid grid size {0:?}, expected a number from 3 to 10")]
    InvalidConfiguration(String),
    #[error("Cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfRangeAccess { row: usize, col: usize, size: usize },
    #[error("Leaderboard storage failed: {0}")]
    Persistence(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
