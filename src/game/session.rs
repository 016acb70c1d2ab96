use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{info, warn};

use super::game_engine::GameEngine;
use super::leaderboard::LeaderboardStore;
use super::settings::Settings;
use crate::events::{Channel, EventObserver, SubscriptionId};
use crate::model::{
    GameEngineCommand, GameEngineEvent, GridSize, InputEvent, MenuChoice, TimerState,
};
use crate::ui::Presenter;

pub const MAX_PLAYER_NAME_LEN: usize = 20;
pub const MAX_GRID_SIZE_DIGITS: usize = 2;
pub const INVALID_GRID_SIZE_NOTICE: &str = "Invalid Grid Size. Try Again.";

const NOTICE_PAUSE: Duration = Duration::from_secs(2);
const GAME_OVER_PAUSE: Duration = Duration::from_secs(3);
const CLEANUP_PAUSE: Duration = Duration::from_millis(500);

pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu loop tying a front end to the game engine and the leaderboard.
pub struct Session<P: Presenter + 'static, C: Clock = SystemClock> {
    presenter: Rc<RefCell<P>>,
    engine: GameEngine,
    leaderboard: Rc<dyn LeaderboardStore>,
    settings: Settings,
    settings_path: Option<PathBuf>,
    clock: C,
    seed: Option<u64>,
    event_observer: EventObserver<GameEngineEvent>,
    subscription: SubscriptionId,
}

impl<P: Presenter + 'static, C: Clock> Session<P, C> {
    pub fn new(
        presenter: P,
        leaderboard: Rc<dyn LeaderboardStore>,
        settings: Settings,
        clock: C,
    ) -> Self {
        let presenter = Rc::new(RefCell::new(presenter));
        let (emitter, event_observer) = Channel::new();
        let subscription = {
            let presenter = Rc::clone(&presenter);
            event_observer.subscribe(move |event: &GameEngineEvent| {
                present(&mut *presenter.borrow_mut(), event);
            })
        };

        Self {
            presenter,
            engine: GameEngine::new(Rc::clone(&leaderboard), emitter),
            leaderboard,
            settings,
            settings_path: None,
            clock,
            seed: Settings::seed_from_env(),
            event_observer,
            subscription,
        }
    }

    /// Saves settings somewhere other than the data directory.
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Fixes the bomb placement of every round.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn presenter(&self) -> Rc<RefCell<P>> {
        Rc::clone(&self.presenter)
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let last_player = self.settings.last_player_name.clone();
            let choice = self
                .presenter
                .borrow_mut()
                .read_menu_choice(last_player.as_deref())?;

            let flow = match choice {
                MenuChoice::Play => self.play()?,
                MenuChoice::Leaderboard => self.show_leaderboard()?,
                MenuChoice::Quit => Flow::Exit,
            };
            if flow == Flow::Exit {
                info!(target: "session", "Leaving session");
                return Ok(());
            }
        }
    }

    fn play(&mut self) -> io::Result<Flow> {
        let initial_name = self.settings.last_player_name.clone().unwrap_or_default();
        let player_name = self.presenter.borrow_mut().read_text(
            "Enter Player Name:",
            &initial_name,
            MAX_PLAYER_NAME_LEN,
        )?;
        let Some(player_name) = player_name.map(|name| name.trim().to_string()) else {
            return Ok(Flow::Continue);
        };

        let initial_size = self
            .settings
            .last_grid_size
            .map(|size| size.to_string())
            .unwrap_or_default();
        let size_text = self.presenter.borrow_mut().read_text(
            "Enter Grid Size (3-10):",
            &initial_size,
            MAX_GRID_SIZE_DIGITS,
        )?;
        let Some(size_text) = size_text else {
            return Ok(Flow::Continue);
        };

        let grid_size = match size_text.parse::<GridSize>() {
            Ok(grid_size) => grid_size,
            Err(err) => {
                warn!(target: "session", "Rejected grid size {:?}: {}", size_text, err);
                let mut presenter = self.presenter.borrow_mut();
                presenter.render_notice(INVALID_GRID_SIZE_NOTICE);
                presenter.pause(NOTICE_PAUSE);
                return Ok(Flow::Continue);
            }
        };

        self.remember(&player_name, grid_size);
        self.play_round(player_name, grid_size)
    }

    fn remember(&mut self, player_name: &str, grid_size: GridSize) {
        self.settings.last_player_name = Some(player_name.to_string());
        self.settings.last_grid_size = Some(grid_size);
        let saved = match &self.settings_path {
            Some(path) => self.settings.save_to(path),
            None => self.settings.save(),
        };
        if let Err(err) = saved {
            warn!(target: "session", "Could not save settings: {}", err);
        }
    }

    fn play_round(&mut self, player_name: String, grid_size: GridSize) -> io::Result<Flow> {
        let mut timer = TimerState::started_at(self.clock.now());
        self.engine.handle_command(GameEngineCommand::NewRound {
            player_name,
            grid_size,
            seed: self.seed,
        });
        let frame_interval = self.settings.frame_interval();

        loop {
            let now = self.clock.now();
            self.engine
                .handle_command(GameEngineCommand::Tick(timer.elapsed_ms(now)));
            if self.engine.is_idle() {
                timer = timer.ended(now);
                break;
            }

            let input = self.presenter.borrow_mut().poll_input(frame_interval)?;
            match input {
                Some(InputEvent::CellClicked(row, col)) => {
                    self.engine
                        .handle_command(GameEngineCommand::RevealCell(row, col));
                }
                Some(InputEvent::Quit) => {
                    self.engine.handle_command(GameEngineCommand::Quit);
                    self.clean_up();
                    return Ok(Flow::Continue);
                }
                None => {}
            }
        }

        info!(
            target: "session",
            "Round over after {:?}",
            timer.elapsed(self.clock.now())
        );
        self.presenter.borrow_mut().pause(GAME_OVER_PAUSE);
        self.clean_up();
        Ok(Flow::Continue)
    }

    fn clean_up(&mut self) {
        let mut presenter = self.presenter.borrow_mut();
        presenter.clear_screen();
        presenter.pause(CLEANUP_PAUSE);
    }

    fn show_leaderboard(&mut self) -> io::Result<Flow> {
        let records = self.leaderboard.top();
        let mut presenter = self.presenter.borrow_mut();
        presenter.render_leaderboard(&records);
        presenter.wait_for_dismiss()?;
        Ok(Flow::Continue)
    }
}

impl<P: Presenter + 'static, C: Clock> Drop for Session<P, C> {
    fn drop(&mut self) {
        // Releases the listener's handle on the presenter.
        self.event_observer.unsubscribe(self.subscription);
    }
}

fn present<P: Presenter>(presenter: &mut P, event: &GameEngineEvent) {
    match event {
        GameEngineEvent::RoundStarted {
            player_name,
            grid_size,
        } => presenter.begin_round(player_name, *grid_size),
        GameEngineEvent::CellUpdated {
            row,
            col,
            revealed,
            has_bomb,
        } => presenter.render_cell(*row, *col, *revealed, *has_bomb),
        GameEngineEvent::TimeLeftChanged(seconds) => presenter.render_time_left(*seconds),
        GameEngineEvent::RoundFinished { message, .. } => presenter.render_game_over(message),
    }
}
