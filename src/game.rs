//! Game facade
//!
//! `Game` is the one object a driver holds. Input goes in through four verbs
//! (or `apply` with a `Command`); the presentation reads a `Snapshot` and
//! never sees mutable state.

use serde::Serialize;

use crate::platform::input::Command;
use crate::platform::storage::{MemoryStore, RecordStore};
use crate::session::Session;
use crate::sim::{
    Cell, Direction, GameOverCause, GamePhase, GameState, Grid, Item, TickOutcome, tick,
};
use crate::tuning::{ScoringMode, Tuning, TuningError};

/// Read-only view for renderers and HUDs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub grid: Grid,
    /// Tail to head
    pub snake: Vec<Cell>,
    pub items: Vec<Item>,
    pub direction: Direction,
    pub tick_interval_ms: f64,
    pub speed: f64,
    pub scoring: ScoringMode,
    /// Seconds survived or points, depending on `scoring`
    pub metric: f64,
    pub best: f64,
    pub phase: GamePhase,
    pub running: bool,
    pub over: bool,
    pub cause: Option<GameOverCause>,
    /// Headline to overlay once the game has ended
    pub message: Option<String>,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.last().copied()
    }

    pub fn length(&self) -> usize {
        self.snake.len()
    }
}

pub struct Game<S: RecordStore = MemoryStore> {
    state: GameState,
    session: Session,
    store: S,
}

impl<S: RecordStore> Game<S> {
    /// Build an idle game, reading the best record from `store`
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Result<Self, TuningError> {
        let best = store.load(&tuning.record_key);
        let session = Session::new(tuning.scoring, tuning.base_rate, best);
        let state = GameState::new(tuning, seed)?;
        log::info!(
            "Game ready: profile={} seed={} best={}",
            state.tuning().name,
            seed,
            session.format_metric(best)
        );
        Ok(Self {
            state,
            session,
            store,
        })
    }

    pub fn set_queued_direction(&mut self, direction: Direction) {
        self.state.set_queued_direction(direction);
    }

    /// Idle -> Playing, Playing <-> Paused. No effect after game over.
    pub fn toggle_running(&mut self) -> GamePhase {
        let phase = self.state.toggle_running();
        if phase != GamePhase::Playing {
            self.session.suspend();
        }
        log::info!("Phase: {:?}", phase);
        phase
    }

    /// `toggle_running` for a driver that knows the time of the input event.
    /// Playing time starts at `now_ms` rather than at the next frame.
    pub fn toggle_running_at(&mut self, now_ms: f64) -> GamePhase {
        let phase = self.toggle_running();
        if phase == GamePhase::Playing {
            self.session.resume_at(now_ms);
        }
        phase
    }

    /// Fresh idle board; the best record is kept
    pub fn reset(&mut self) {
        self.state.reset();
        self.session.reset();
    }

    pub fn adjust_speed(&mut self, delta: f64) -> f64 {
        let speed = self.session.adjust_speed(delta);
        log::debug!("Speed x{}", self.session.format_speed());
        speed
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Steer(direction) => self.set_queued_direction(direction),
            Command::ToggleRunning => {
                self.toggle_running();
            }
            Command::Reset => self.reset(),
            Command::Restart => {
                self.reset();
                self.toggle_running();
            }
            Command::AdjustSpeed(delta) => {
                self.adjust_speed(delta);
            }
        }
    }

    /// `apply` with the event time, so starts and resumes are timed from the
    /// input rather than the following frame
    pub fn apply_at(&mut self, command: Command, now_ms: f64) {
        match command {
            Command::ToggleRunning => {
                self.toggle_running_at(now_ms);
            }
            Command::Restart => {
                self.reset();
                self.toggle_running_at(now_ms);
            }
            other => self.apply(other),
        }
    }

    /// Drive one display frame at `now_ms`. Returns the tick outcome if a
    /// tick fired this frame.
    pub fn frame(&mut self, now_ms: f64) -> Option<TickOutcome> {
        if self.state.phase() != GamePhase::Playing {
            return None;
        }
        if !self.session.frame(now_ms) {
            return None;
        }

        let outcome = tick(&mut self.state);
        if let Some(cause) = outcome.game_over {
            self.finish(cause);
        }
        Some(outcome)
    }

    fn finish(&mut self, cause: GameOverCause) {
        self.session.suspend();
        let metric = self.session.metric(self.state.score());
        if self.session.record(metric) {
            self.store.save(&self.state.tuning().record_key, metric);
            log::info!(
                "New best {}: {} ({})",
                self.session.mode.as_str(),
                self.session.format_metric(metric),
                cause.as_str()
            );
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let over = state.is_over();
        Snapshot {
            grid: *state.grid(),
            snake: state.snake().cells().copied().collect(),
            items: state.items().items().to_vec(),
            direction: state.direction(),
            tick_interval_ms: self.session.tick_interval_ms(),
            speed: self.session.speed(),
            scoring: self.session.mode,
            metric: self.session.metric(state.score()),
            best: self.session.best(),
            phase: state.phase(),
            running: state.phase() == GamePhase::Playing,
            over,
            cause: state.game_over_cause(),
            message: over.then(|| state.tuning().game_over_message.clone()),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
