use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{self, Attribute, Color},
    terminal::{self, ClearType},
};
use log::{trace, warn};

use super::layout::{
    back_button, BoxLayout, ButtonBox, BACK_BUTTON_LABEL, GRID_ORIGIN_X, LEADERBOARD_FIRST_ROW,
    MARGIN_X, TIMER_ROW,
};
use super::Presenter;
use crate::model::{GridSize, InputEvent, MenuChoice, ResultRecord};

const NOTICE_ROW: u16 = 10;

#[derive(Debug, Clone, Copy, Default)]
struct CellView {
    revealed: bool,
    has_bomb: bool,
}

/// Full-screen crossterm front end. Owns the terminal until dropped.
pub struct TerminalUi {
    out: Stdout,
    layout: Option<BoxLayout>,
    cells: Vec<CellView>,
    cursor: (usize, usize),
    back_button: Option<ButtonBox>,
}

impl TerminalUi {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;
        Ok(Self {
            out,
            layout: None,
            cells: Vec::new(),
            cursor: (0, 0),
            back_button: None,
        })
    }

    fn report(result: io::Result<()>) {
        if let Err(err) = result {
            warn!(target: "terminal_ui", "Render failed: {}", err);
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            style::ResetColor,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    fn print_at(&mut self, x: u16, y: u16, text: &str) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(x, y), style::Print(text))
    }

    fn print_colored_at(&mut self, x: u16, y: u16, color: Color, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            style::SetForegroundColor(color),
            style::Print(text),
            style::ResetColor
        )
    }

    fn draw_cell(&mut self, row: usize, col: usize) -> io::Result<()> {
        let Some(cell_box) = self.layout.as_ref().and_then(|l| l.cell_box(row, col)).copied()
        else {
            return Ok(());
        };
        let size = self.layout.as_ref().map_or(0, BoxLayout::size);
        let view = self.cells.get(row * size + col).copied().unwrap_or_default();
        let (background, glyph) = match (view.revealed, view.has_bomb) {
            (false, _) => (Color::DarkGrey, "   "),
            (true, false) => (Color::DarkGreen, " o "),
            (true, true) => (Color::DarkRed, " X "),
        };

        queue!(self.out, cursor::MoveTo(cell_box.x, cell_box.y))?;
        if self.cursor == (row, col) {
            queue!(self.out, style::SetAttribute(Attribute::Reverse))?;
        }
        queue!(
            self.out,
            style::SetBackgroundColor(background),
            style::Print(glyph),
            style::SetAttribute(Attribute::Reset),
            style::ResetColor
        )
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) -> io::Result<()> {
        let Some(size) = self.layout.as_ref().map(BoxLayout::size) else {
            return Ok(());
        };
        let previous = self.cursor;
        let clamp = |value: usize, delta: isize| {
            value.saturating_add_signed(delta).min(size.saturating_sub(1))
        };
        self.cursor = (clamp(previous.0, d_row), clamp(previous.1, d_col));
        self.draw_cell(previous.0, previous.1)?;
        self.draw_cell(self.cursor.0, self.cursor.1)?;
        self.out.flush()
    }

    fn next_key_press() -> io::Result<Option<KeyEvent>> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }

    fn draw_text_entry(&mut self, prompt: &str, input: &str) -> io::Result<()> {
        self.clear()?;
        self.print_at(MARGIN_X, 1, prompt)?;
        self.print_colored_at(MARGIN_X, 3, Color::Blue, &format!("{}_", input))?;
        self.print_at(MARGIN_X, 5, "Enter to confirm, Esc to go back")?;
        self.out.flush()
    }
}

impl Presenter for TerminalUi {
    fn read_menu_choice(&mut self, player_name: Option<&str>) -> io::Result<MenuChoice> {
        self.clear()?;
        self.print_at(MARGIN_X, 1, "Main Menu")?;
        self.print_at(MARGIN_X, 3, "Press 'P' to Play Game")?;
        self.print_at(MARGIN_X, 4, "Press 'L' to View Leaderboard")?;
        self.print_at(MARGIN_X, 5, "Press 'Q' to Quit")?;
        if let Some(name) = player_name.filter(|name| !name.is_empty()) {
            self.print_at(MARGIN_X, 7, &format!("Last player: {}", name))?;
        }
        self.out.flush()?;

        loop {
            let Some(key) = Self::next_key_press()? else {
                continue;
            };
            let choice = match key.code {
                KeyCode::Char(c) => MenuChoice::from_key(c),
                KeyCode::Esc => Some(MenuChoice::Quit),
                _ => None,
            };
            if let Some(choice) = choice {
                trace!(target: "terminal_ui", "Menu choice: {:?}", choice);
                return Ok(choice);
            }
        }
    }

    fn read_text(
        &mut self,
        prompt: &str,
        initial: &str,
        max_len: usize,
    ) -> io::Result<Option<String>> {
        let mut input: String = initial.chars().take(max_len).collect();
        self.draw_text_entry(prompt, &input)?;

        loop {
            let Some(key) = Self::next_key_press()? else {
                continue;
            };
            match key.code {
                KeyCode::Enter => return Ok(Some(input.trim().to_string())),
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c)
                    if (c.is_ascii_alphanumeric() || c == ' ')
                        && input.chars().count() < max_len =>
                {
                    input.push(c);
                }
                _ => continue,
            }
            self.draw_text_entry(prompt, &input)?;
        }
    }

    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(Some(InputEvent::Quit)),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let (row, col) = self.cursor;
                    Ok(Some(InputEvent::CellClicked(row, col)))
                }
                KeyCode::Up => self.move_cursor(-1, 0).map(|_| None),
                KeyCode::Down => self.move_cursor(1, 0).map(|_| None),
                KeyCode::Left => self.move_cursor(0, -1).map(|_| None),
                KeyCode::Right => self.move_cursor(0, 1).map(|_| None),
                _ => Ok(None),
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => Ok(self
                .layout
                .as_ref()
                .and_then(|layout| layout.cell_at(mouse.column, mouse.row))
                .map(|(row, col)| InputEvent::CellClicked(row, col))),
            _ => Ok(None),
        }
    }

    fn begin_round(&mut self, player_name: &str, grid_size: GridSize) {
        let layout = BoxLayout::new(grid_size.get());
        let hint_row = layout.bottom() + 1;
        self.cells = vec![CellView::default(); grid_size.cell_count()];
        self.cursor = (0, 0);
        self.layout = Some(layout);

        let title = format!("Guess the Bomb - Player: {}", player_name);
        Self::report((|| {
            self.clear()?;
            queue!(self.out, terminal::SetTitle(&title))?;
            self.print_at(GRID_ORIGIN_X, 0, &title)?;
            self.print_at(
                GRID_ORIGIN_X,
                hint_row,
                "Click or use arrows + Enter to reveal. Q returns to the menu.",
            )?;
            self.out.flush()
        })());
    }

    fn render_cell(&mut self, row: usize, col: usize, revealed: bool, has_bomb: bool) {
        let size = self.layout.as_ref().map_or(0, BoxLayout::size);
        if let Some(view) = self.cells.get_mut(row * size + col) {
            *view = CellView { revealed, has_bomb };
        }
        Self::report(self.draw_cell(row, col).and_then(|_| self.out.flush()));
    }

    fn render_time_left(&mut self, seconds: f64) {
        Self::report((|| {
            queue!(
                self.out,
                cursor::MoveTo(GRID_ORIGIN_X, TIMER_ROW),
                terminal::Clear(ClearType::UntilNewLine),
                style::Print(format!("Time Left: {:.2}s", seconds))
            )?;
            self.out.flush()
        })());
    }

    fn render_game_over(&mut self, message: &str) {
        self.layout = None;
        Self::report((|| {
            self.clear()?;
            for (i, line) in message.lines().enumerate() {
                self.print_colored_at(MARGIN_X, 2 + i as u16, Color::Red, line)?;
            }
            self.out.flush()
        })());
    }

    fn render_notice(&mut self, message: &str) {
        Self::report(
            self.print_colored_at(MARGIN_X, NOTICE_ROW, Color::Red, message)
                .and_then(|_| self.out.flush()),
        );
    }

    fn render_leaderboard(&mut self, records: &[ResultRecord]) {
        let button = back_button(records.len());
        self.back_button = Some(button);
        Self::report((|| {
            self.clear()?;
            self.print_at(MARGIN_X, 1, "Leaderboard")?;
            if records.is_empty() {
                self.print_at(MARGIN_X, LEADERBOARD_FIRST_ROW, "No results yet.")?;
            }
            for (i, record) in records.iter().enumerate() {
                self.print_at(
                    MARGIN_X,
                    LEADERBOARD_FIRST_ROW + i as u16,
                    &format!("{}. {}", i + 1, record),
                )?;
            }
            self.print_colored_at(button.x, button.y, Color::DarkGrey, BACK_BUTTON_LABEL)?;
            self.print_at(button.x + button.width + 2, button.y, "or press Enter/Esc")?;
            self.out.flush()
        })());
    }

    fn wait_for_dismiss(&mut self) -> io::Result<()> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Enter
                    | KeyCode::Esc
                    | KeyCode::Backspace
                    | KeyCode::Char('b')
                    | KeyCode::Char('q') => return Ok(()),
                    _ => {}
                },
                Event::Mouse(mouse)
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                        && self
                            .back_button
                            .is_some_and(|button| button.contains(mouse.column, mouse.row)) =>
                {
                    self.back_button = None;
                    return Ok(());
                }
                _ => {}
            }
        }
    }

    fn clear_screen(&mut self) {
        self.layout = None;
        Self::report(self.clear().and_then(|_| self.out.flush()));
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        let restored = execute!(
            self.out,
            DisableMouseCapture,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        )
        .and_then(|_| terminal::disable_raw_mode());
        Self::report(restored);
    }
}
