use std::io;
use std::rc::Rc;

use bombgrid::game::{LeaderboardStore, Session, Settings, SqliteLeaderboard, SystemClock};
use bombgrid::ui::TerminalUi;
use log::info;

fn init_logging() {
    env_logger::init();
}

fn main() -> io::Result<()> {
    init_logging();

    let settings = Settings::load();
    let leaderboard = SqliteLeaderboard::new(settings.database_path());
    info!("Using leaderboard at {:?}", leaderboard.path());
    leaderboard.ensure_schema();

    let ui = TerminalUi::new()?;
    let mut session = Session::new(ui, Rc::new(leaderboard), settings, SystemClock);
    let result = session.run();

    // Restores the terminal before printing.
    drop(session);
    println!("Goodbye!");
    result
}
