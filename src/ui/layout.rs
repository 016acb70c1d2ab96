use itertools::Itertools;

// Terminal cell units
pub const CELL_WIDTH: u16 = 4;
pub const CELL_HEIGHT: u16 = 2;
pub const CELL_SPACING: u16 = 1;

// Board placement
pub const GRID_ORIGIN_X: u16 = 2;
pub const GRID_ORIGIN_Y: u16 = 3;
pub const TIMER_ROW: u16 = 1;

// Text screens
pub const MARGIN_X: u16 = 2;
pub const LEADERBOARD_FIRST_ROW: u16 = 3;
pub const BACK_BUTTON_LABEL: &str = "[ Back to Main Menu ]";

/// Screen rectangle of one grid cell, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBox {
    pub row: usize,
    pub col: usize,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellBox {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Clickable text label, half-open like `CellBox`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBox {
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

impl ButtonBox {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        y == self.y && x >= self.x && x < self.x + self.width
    }
}

/// The back button sits one blank line below the last leaderboard entry.
pub fn back_button(record_count: usize) -> ButtonBox {
    ButtonBox {
        x: MARGIN_X,
        y: LEADERBOARD_FIRST_ROW + 1 + record_count.max(1) as u16,
        width: BACK_BUTTON_LABEL.chars().count() as u16,
    }
}

/// Where each cell of an N×N board is drawn, and which cell a point lands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxLayout {
    size: usize,
    boxes: Vec<CellBox>,
}

impl BoxLayout {
    pub fn new(size: usize) -> Self {
        let boxes = (0..size)
            .cartesian_product(0..size)
            .map(|(row, col)| CellBox {
                row,
                col,
                x: GRID_ORIGIN_X + col as u16 * CELL_WIDTH,
                y: GRID_ORIGIN_Y + row as u16 * CELL_HEIGHT,
                width: CELL_WIDTH - CELL_SPACING,
                height: CELL_HEIGHT - CELL_SPACING,
            })
            .collect();
        Self { size, boxes }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_box(&self, row: usize, col: usize) -> Option<&CellBox> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.boxes.get(row * self.size + col)
    }

    /// Boxes are scanned in row-major order; the first one containing the point wins.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        self.boxes
            .iter()
            .find(|cell_box| cell_box.contains(x, y))
            .map(|cell_box| (cell_box.row, cell_box.col))
    }

    /// First screen row below the board.
    pub fn bottom(&self) -> u16 {
        GRID_ORIGIN_Y + self.size as u16 * CELL_HEIGHT
    }
}
