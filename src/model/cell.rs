use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub has_bomb: bool,
    revealed: bool,
}

impl Cell {
    pub fn new(row: usize, col: usize, has_bomb: bool) -> Self {
        Self {
            row,
            col,
            has_bomb,
            revealed: false,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Marks the cell revealed. Returns false when it already was.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn to_char(&self) -> char {
        match (self.revealed, self.has_bomb) {
            (false, false) => '.',
            (false, true) => 'B',
            (true, false) => 'o',
            (true, true) => 'X',
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
