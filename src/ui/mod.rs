pub mod layout;
pub mod terminal_ui;

use std::io;
use std::time::Duration;

use crate::model::{GridSize, InputEvent, MenuChoice, ResultRecord};

pub use terminal_ui::TerminalUi;

/// Everything the session needs from a front end.
///
/// Reads return `io::Result` so a broken terminal ends the session; render
/// calls are fire-and-forget and report their own failures.
pub trait Presenter {
    fn read_menu_choice(&mut self, player_name: Option<&str>) -> io::Result<MenuChoice>;

    /// Line entry limited to `max_len` characters. `None` when the user backs out.
    fn read_text(
        &mut self,
        prompt: &str,
        initial: &str,
        max_len: usize,
    ) -> io::Result<Option<String>>;

    /// Waits up to `timeout` for one resolved input.
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;

    fn begin_round(&mut self, player_name: &str, grid_size: GridSize);
    fn render_cell(&mut self, row: usize, col: usize, revealed: bool, has_bomb: bool);
    fn render_time_left(&mut self, seconds: f64);
    fn render_game_over(&mut self, message: &str);
    fn render_notice(&mut self, message: &str);
    fn render_leaderboard(&mut self, records: &[ResultRecord]);

    /// Blocks until the user leaves the current screen.
    fn wait_for_dismiss(&mut self) -> io::Result<()>;

    /// Blanks the screen between rounds.
    fn clear_screen(&mut self);

    fn pause(&mut self, duration: Duration);
}
