pub mod game_engine;
pub mod leaderboard;
pub mod round;
pub mod session;
pub mod settings;

pub use game_engine::GameEngine;
pub use leaderboard::{LeaderboardStore, SqliteLeaderboard, DEFAULT_TOP_N};
pub use round::{RevealOutcome, Round, ROUND_DEADLINE_MS};
pub use session::{Clock, Session, SystemClock};
pub use settings::Settings;

#[cfg(test)]
pub mod tests {
    use std::rc::Rc;

    use test_context::TestContext;

    use super::{LeaderboardStore, SqliteLeaderboard};

    /// A leaderboard file in the temp dir, removed again on teardown.
    pub struct TempLeaderboard {
        pub store: SqliteLeaderboard,
    }

    impl TempLeaderboard {
        pub fn shared(&self) -> Rc<dyn LeaderboardStore> {
            Rc::new(self.store.clone())
        }
    }

    impl TestContext for TempLeaderboard {
        fn setup() -> TempLeaderboard {
            let path = std::env::temp_dir()
                .join(format!("bombgrid-leaderboard-{}.db", uuid::Uuid::new_v4()));
            TempLeaderboard {
                store: SqliteLeaderboard::new(path),
            }
        }

        fn teardown(self) {
            let _ = std::fs::remove_file(self.store.path());
        }
    }
}
