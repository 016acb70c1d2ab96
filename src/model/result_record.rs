use serde::{Deserialize, Serialize};

/// Outcome of a finished round as it is stored on the leaderboard.
#[readonly::make]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub player_name: String,
    pub grid_size: usize,
    /// Seconds, unrounded.
    pub time_taken_seconds: f64,
    pub outcome: String,
}

impl ResultRecord {
    pub fn new(
        player_name: impl Into<String>,
        grid_size: usize,
        time_taken_seconds: f64,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            player_name: player_name.into(),
            grid_size,
            time_taken_seconds,
            outcome: outcome.into(),
        }
    }
}

impl std::fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | Grid: {} | Time: {:.2}s | {}",
            self.player_name, self.grid_size, self.time_taken_seconds, self.outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_time_to_two_places() {
        let record = ResultRecord::new("alice", 4, 12.3456, "Loss (Bomb Found)");
        assert_eq!(
            record.to_string(),
            "alice | Grid: 4 | Time: 12.35s | Loss (Bomb Found)"
        );
        assert_eq!(record.time_taken_seconds, 12.3456);
    }
}
