mod cell;
mod game_engine_command;
mod game_engine_event;
mod grid;
mod grid_size;
mod input_event;
mod result_record;
mod round_status;
mod timer_state;

pub use cell::Cell;
pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::GameEngineEvent;
pub use grid::{CellReveal, Grid};
pub use grid_size::{GridSize, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use input_event::{InputEvent, MenuChoice};
pub use result_record::ResultRecord;
pub use round_status::{RoundStatus, OUTCOME_BOMB_FOUND, OUTCOME_TIME_UP};
pub use timer_state::TimerState;
