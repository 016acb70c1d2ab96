use super::GridSize;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEngineCommand {
    NewRound {
        player_name: String,
        grid_size: GridSize,
        seed: Option<u64>,
    },
    Tick(u64), // elapsed ms since the round started
    RevealCell(usize, usize), // row, col
    Quit,
}
