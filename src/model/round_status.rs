use serde::{Deserialize, Serialize};

pub const OUTCOME_BOMB_FOUND: &str = "Loss (Bomb Found)";
pub const OUTCOME_TIME_UP: &str = "Loss (Time Up)";

/// Lifecycle of a round. Both losses are terminal; there is no winning state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundStatus {
    #[default]
    Ongoing,
    LostBomb,
    LostTimeout,
}

impl RoundStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, RoundStatus::LostBomb | RoundStatus::LostTimeout)
    }

    /// Leaderboard label for a terminal status.
    pub fn outcome_label(self) -> Option<&'static str> {
        match self {
            RoundStatus::Ongoing => None,
            RoundStatus::LostBomb => Some(OUTCOME_BOMB_FOUND),
            RoundStatus::LostTimeout => Some(OUTCOME_TIME_UP),
        }
    }
}
