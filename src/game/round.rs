use log::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{CellReveal, Grid, ResultRecord, RoundStatus};

/// Time allowed for a single round.
pub const ROUND_DEADLINE_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq)]
pub enum RevealOutcome {
    /// The round was already over; nothing happened.
    Ignored,
    AlreadyRevealed,
    Safe,
    HitBomb(ResultRecord),
}

/// One playthrough: a grid, a deadline, and the status those two decide.
#[derive(Debug, Clone)]
pub struct Round {
    id: Uuid,
    player_name: String,
    grid: Grid,
    deadline_ms: u64,
    elapsed_ms: u64,
    status: RoundStatus,
}

impl Round {
    pub fn new(player_name: &str, grid: Grid) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_name: player_name.trim().to_string(),
            grid,
            deadline_ms: ROUND_DEADLINE_MS,
            elapsed_ms: 0,
            status: RoundStatus::Ongoing,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    pub fn time_left_seconds(&self) -> f64 {
        self.deadline_ms.saturating_sub(self.elapsed_ms) as f64 / 1000.0
    }

    /// Advances the clock. Returns the record when this tick runs the round out of time.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<ResultRecord> {
        if self.is_finished() {
            return None;
        }
        self.elapsed_ms = self.elapsed_ms.max(elapsed_ms);
        if self.elapsed_ms < self.deadline_ms {
            return None;
        }

        self.status = RoundStatus::LostTimeout;
        info!(
            target: "round",
            "Round {} ran out of time after {} ms",
            self.id,
            self.elapsed_ms
        );
        Some(self.result_record(self.deadline_ms))
    }

    pub fn reveal_cell(&mut self, row: usize, col: usize) -> Result<RevealOutcome> {
        if self.is_finished() {
            debug!(target: "round", "Ignoring reveal of ({}, {}) after round end", row, col);
            return Ok(RevealOutcome::Ignored);
        }

        let CellReveal {
            already_revealed,
            has_bomb,
        } = self.grid.reveal(row, col)?;

        if already_revealed {
            return Ok(RevealOutcome::AlreadyRevealed);
        }
        if !has_bomb {
            return Ok(RevealOutcome::Safe);
        }

        self.status = RoundStatus::LostBomb;
        info!(
            target: "round",
            "Round {} hit the bomb at ({}, {}) after {} ms",
            self.id,
            row,
            col,
            self.elapsed_ms
        );
        Ok(RevealOutcome::HitBomb(self.result_record(self.elapsed_ms)))
    }

    /// Text shown to the player once the round is over.
    pub fn game_over_message(&self) -> Option<String> {
        let seconds = self.elapsed_ms as f64 / 1000.0;
        match self.status {
            RoundStatus::Ongoing => None,
            RoundStatus::LostBomb => Some(format!(
                "Bomb Found! Game Over! Time Taken: {:.2} seconds",
                seconds
            )),
            RoundStatus::LostTimeout => Some(format!(
                "Time's Up! Game Over!\nTime Taken: {:.2} seconds",
                seconds
            )),
        }
    }

    fn result_record(&self, time_taken_ms: u64) -> ResultRecord {
        let outcome = self.status.outcome_label().unwrap_or_default();
        ResultRecord::new(
            self.player_name.clone(),
            self.grid.size().get(),
            time_taken_ms as f64 / 1000.0,
            outcome,
        )
    }
}

#[cfg(test)]
mod tests {
    use test_context::test_context;

    use super::*;
    use crate::error::GameError;
    use crate::model::{GridSize, OUTCOME_BOMB_FOUND, OUTCOME_TIME_UP};
    use crate::tests::UsingLogger;

    fn round_with_bomb_at(size: usize, bomb: (usize, usize)) -> Round {
        let grid = Grid::with_bomb_at(GridSize::new(size).unwrap(), bomb).unwrap();
        Round::new("  tester ", grid)
    }

    #[test]
    fn test_new_round_trims_name_and_starts_ongoing() {
        let round = round_with_bomb_at(3, (0, 0));
        assert_eq!(round.player_name(), "tester");
        assert_eq!(round.status(), RoundStatus::Ongoing);
        assert_eq!(round.elapsed_ms(), 0);
        assert_eq!(round.time_left_seconds(), 30.0);
        assert_eq!(round.game_over_message(), None);
    }

    #[test]
    fn test_tick_before_deadline_stays_ongoing() {
        let mut round = round_with_bomb_at(3, (0, 0));
        assert_eq!(round.tick(29_999), None);
        assert_eq!(round.status(), RoundStatus::Ongoing);
        assert_eq!(round.time_left_seconds(), 0.001);
    }

    #[test]
    fn test_elapsed_never_goes_backwards() {
        let mut round = round_with_bomb_at(3, (0, 0));
        round.tick(10_000);
        round.tick(4_000);
        assert_eq!(round.elapsed_ms(), 10_000);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_timeout_scenario(_: &mut UsingLogger) {
        let mut round = round_with_bomb_at(5, (4, 4));

        let record = round.tick(30_000).expect("deadline reached");

        assert_eq!(round.status(), RoundStatus::LostTimeout);
        assert_eq!(record, ResultRecord::new("tester", 5, 30.0, OUTCOME_TIME_UP));
        assert_eq!(round.time_left_seconds(), 0.0);
    }

    #[test]
    fn test_late_tick_still_records_deadline() {
        let mut round = round_with_bomb_at(4, (0, 0));
        let record = round.tick(31_250).unwrap();

        assert_eq!(record.time_taken_seconds, 30.0);
        assert_eq!(
            round.game_over_message().unwrap(),
            "Time's Up! Game Over!\nTime Taken: 31.25 seconds"
        );
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_bomb_scenario(_: &mut UsingLogger) {
        let mut round = round_with_bomb_at(3, (1, 1));

        assert_eq!(round.reveal_cell(0, 0).unwrap(), RevealOutcome::Safe);
        assert_eq!(round.status(), RoundStatus::Ongoing);
        let cell = round.grid().cell(0, 0).unwrap();
        assert!(cell.is_revealed());
        assert!(!cell.has_bomb);

        round.tick(5_000);
        let outcome = round.reveal_cell(1, 1).unwrap();

        assert_eq!(
            outcome,
            RevealOutcome::HitBomb(ResultRecord::new("tester", 3, 5.0, OUTCOME_BOMB_FOUND))
        );
        assert_eq!(round.status(), RoundStatus::LostBomb);
        assert_eq!(
            round.game_over_message().unwrap(),
            "Bomb Found! Game Over! Time Taken: 5.00 seconds"
        );
    }

    #[test]
    fn test_revealing_twice_is_a_no_op() {
        let mut round = round_with_bomb_at(3, (2, 2));
        round.reveal_cell(0, 1).unwrap();

        assert_eq!(
            round.reveal_cell(0, 1).unwrap(),
            RevealOutcome::AlreadyRevealed
        );
        assert_eq!(round.status(), RoundStatus::Ongoing);
        assert_eq!(round.grid().revealed_count(), 1);
    }

    #[test]
    fn test_clearing_every_safe_cell_does_not_end_the_round() {
        let mut round = round_with_bomb_at(3, (2, 2));
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (2, 2) {
                    assert_eq!(round.reveal_cell(row, col).unwrap(), RevealOutcome::Safe);
                }
            }
        }
        assert_eq!(round.status(), RoundStatus::Ongoing);
        assert_eq!(round.grid().revealed_count(), 8);
    }

    #[test]
    fn test_terminal_round_ignores_everything() {
        let mut round = round_with_bomb_at(3, (0, 0));
        round.tick(2_000);
        assert!(matches!(
            round.reveal_cell(0, 0).unwrap(),
            RevealOutcome::HitBomb(_)
        ));

        assert_eq!(round.reveal_cell(0, 1).unwrap(), RevealOutcome::Ignored);
        assert_eq!(round.reveal_cell(0, 0).unwrap(), RevealOutcome::Ignored);
        assert_eq!(round.reveal_cell(9, 9).unwrap(), RevealOutcome::Ignored);
        assert_eq!(round.tick(60_000), None);
        assert_eq!(round.status(), RoundStatus::LostBomb);
        assert_eq!(round.elapsed_ms(), 2_000);
        assert!(!round.grid().cell(0, 1).unwrap().is_revealed());
    }

    #[test]
    fn test_timed_out_round_ignores_reveals() {
        let mut round = round_with_bomb_at(3, (0, 0));
        round.tick(30_000);

        assert_eq!(round.reveal_cell(0, 0).unwrap(), RevealOutcome::Ignored);
        assert_eq!(round.status(), RoundStatus::LostTimeout);
    }

    #[test]
    fn test_out_of_range_reveal_is_an_error() {
        let mut round = round_with_bomb_at(3, (0, 0));
        assert!(matches!(
            round.reveal_cell(3, 3),
            Err(GameError::OutOfRangeAccess { .. })
        ));
        assert_eq!(round.status(), RoundStatus::Ongoing);
    }
}
