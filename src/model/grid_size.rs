use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

pub const MIN_GRID_SIZE: usize = 3;
pub const MAX_GRID_SIZE: usize = 10;

/// Side length of a square grid, always within `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct GridSize(usize);

impl GridSize {
    pub fn new(size: usize) -> Result<Self> {
        if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            Ok(Self(size))
        } else {
            Err(GameError::InvalidConfiguration(size.to_string()))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }
}

impl TryFrom<usize> for GridSize {
    type Error = GameError;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> usize {
        size.0
    }
}

impl FromStr for GridSize {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        trimmed
            .parse::<usize>()
            .map_err(|_| GameError::InvalidConfiguration(trimmed.to_string()))
            .and_then(Self::new)
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
