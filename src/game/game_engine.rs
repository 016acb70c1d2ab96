use std::rc::Rc;

use log::{debug, info, trace, warn};

use super::leaderboard::LeaderboardStore;
use super::round::{RevealOutcome, Round};
use super::settings::Settings;
use crate::events::EventEmitter;
use crate::model::{GameEngineCommand, GameEngineEvent, Grid, GridSize, ResultRecord};

/// Owns the active round, feeds it commands and publishes what changed.
pub struct GameEngine {
    round: Option<Round>,
    leaderboard: Rc<dyn LeaderboardStore>,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
    debug_mode: bool,
}

impl GameEngine {
    pub fn new(
        leaderboard: Rc<dyn LeaderboardStore>,
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
    ) -> Self {
        Self {
            round: None,
            leaderboard,
            game_engine_event_emitter,
            debug_mode: Settings::is_debug_mode(),
        }
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// True when there is no round still being played.
    pub fn is_idle(&self) -> bool {
        self.round.as_ref().map_or(true, Round::is_finished)
    }

    pub fn handle_command(&mut self, command: GameEngineCommand) {
        trace!(target: "game_engine", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::NewRound {
                player_name,
                grid_size,
                seed,
            } => self.new_round(&player_name, grid_size, seed),
            GameEngineCommand::Tick(elapsed_ms) => self.tick(elapsed_ms),
            GameEngineCommand::RevealCell(row, col) => self.reveal_cell(row, col),
            GameEngineCommand::Quit => self.quit(),
        }
    }

    fn new_round(&mut self, player_name: &str, grid_size: GridSize, seed: Option<u64>) {
        if let Some(round) = self.round.as_ref().filter(|round| !round.is_finished()) {
            warn!(target: "game_engine", "Abandoning unfinished round {}", round.id());
        }

        // The table may have been removed since startup.
        self.leaderboard.ensure_schema();

        let round = Round::new(player_name, Grid::new(grid_size, seed));
        info!(
            target: "game_engine",
            "New round {} for {:?}; size: {}; seed: {:?}",
            round.id(),
            round.player_name(),
            grid_size,
            round.grid().seed()
        );
        if self.debug_mode {
            debug!(target: "game_engine", "Bomb at {:?}; grid: {:?}", round.grid().bomb_position(), round.grid());
        }

        self.game_engine_event_emitter
            .emit(GameEngineEvent::RoundStarted {
                player_name: round.player_name().to_string(),
                grid_size,
            });
        for cell in round.grid().cells() {
            self.game_engine_event_emitter
                .emit(GameEngineEvent::CellUpdated {
                    row: cell.row,
                    col: cell.col,
                    revealed: cell.is_revealed(),
                    has_bomb: cell.has_bomb,
                });
        }
        self.game_engine_event_emitter
            .emit(GameEngineEvent::TimeLeftChanged(round.time_left_seconds()));
        self.round = Some(round);
    }

    fn tick(&mut self, elapsed_ms: u64) {
        let Some(round) = self.round.as_mut() else {
            warn!(target: "game_engine", "Tick with no round in play");
            return;
        };
        if round.is_finished() {
            return;
        }

        let record = round.tick(elapsed_ms);
        let time_left = round.time_left_seconds();
        self.game_engine_event_emitter
            .emit(GameEngineEvent::TimeLeftChanged(time_left));
        if let Some(record) = record {
            self.finish_round(record);
        }
    }

    fn reveal_cell(&mut self, row: usize, col: usize) {
        let Some(round) = self.round.as_mut() else {
            warn!(target: "game_engine", "Reveal of ({}, {}) with no round in play", row, col);
            return;
        };

        let outcome = match round.reveal_cell(row, col) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(target: "game_engine", "Rejected reveal: {}", err);
                return;
            }
        };

        match outcome {
            RevealOutcome::Ignored | RevealOutcome::AlreadyRevealed => {}
            RevealOutcome::Safe => {
                self.game_engine_event_emitter
                    .emit(GameEngineEvent::CellUpdated {
                        row,
                        col,
                        revealed: true,
                        has_bomb: false,
                    });
            }
            RevealOutcome::HitBomb(record) => {
                self.game_engine_event_emitter
                    .emit(GameEngineEvent::CellUpdated {
                        row,
                        col,
                        revealed: true,
                        has_bomb: true,
                    });
                self.finish_round(record);
            }
        }
    }

    fn quit(&mut self) {
        if let Some(round) = self.round.take() {
            if !round.is_finished() {
                info!(
                    target: "game_engine",
                    "Round {} abandoned after {} ms; nothing recorded",
                    round.id(),
                    round.elapsed_ms()
                );
            }
        }
    }

    fn finish_round(&mut self, record: ResultRecord) {
        let message = self
            .round
            .as_ref()
            .and_then(Round::game_over_message)
            .unwrap_or_default();
        if let Some(round) = &self.round {
            info!(
                target: "game_engine",
                "Round {} finished with {} of {} cells revealed: {}",
                round.id(),
                round.grid().revealed_count(),
                round.grid().size().cell_count(),
                record
            );
        }

        if self.leaderboard.append(&record).is_none() {
            warn!(target: "game_engine", "Result was not saved; continuing");
        }

        self.game_engine_event_emitter
            .emit(GameEngineEvent::RoundFinished { record, message });
    }
}
