use super::{GridSize, ResultRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEngineEvent {
    RoundStarted {
        player_name: String,
        grid_size: GridSize,
    },
    CellUpdated {
        row: usize,
        col: usize,
        revealed: bool,
        has_bomb: bool,
    },
    TimeLeftChanged(f64), // seconds
    RoundFinished {
        record: ResultRecord,
        message: String,
    },
}
