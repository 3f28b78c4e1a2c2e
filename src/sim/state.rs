//! Game state and core simulation types
//!
//! `GameState` owns everything a tick mutates. Drivers never touch its fields
//! directly; they go through `Game` and read a `Snapshot`.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, Grid};
use super::items::{ItemKind, ItemManager};
use super::snake::Snake;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board laid out, clock stopped
    Idle,
    /// Ticks are running
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; only a reset leaves this phase
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Head moved onto the body
    SelfCollision,
    /// Snake covers every cell
    BoardFilled,
}

impl GameOverCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverCause::SelfCollision => "self-collision",
            GameOverCause::BoardFilled => "board-filled",
        }
    }
}

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) tuning: Tuning,
    pub(crate) snake: Snake,
    pub(crate) items: ItemManager,
    /// Direction applied on the last tick
    pub(crate) direction: Direction,
    /// Direction requested by input, latched at the next tick
    pub(crate) queued_direction: Direction,
    /// Segments still owed from burgers
    pub(crate) growth_pending: usize,
    /// Points (score mode)
    pub(crate) score: u64,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    pub(crate) phase: GamePhase,
    pub(crate) game_over_cause: Option<GameOverCause>,
}

impl GameState {
    /// Create a new game state with the given tuning and seed
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    /// Lay out a fresh board. Tuning must already be validated.
    fn build(tuning: Tuning, seed: u64) -> Self {
        let grid = tuning.grid;
        let snake = Snake::horizontal(grid.center(), tuning.initial_length, &grid);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            snake,
            items: ItemManager::new(),
            direction: Direction::Right,
            queued_direction: Direction::Right,
            growth_pending: 0,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Idle,
            game_over_cause: None,
        };

        // Pre-seed the board
        for kind in ItemKind::ALL {
            for _ in 0..state.tuning.initial_items.get(kind) {
                let occupied = state.occupied();
                if !state
                    .items
                    .try_spawn(kind, &grid, &occupied, &mut state.rng)
                {
                    break;
                }
            }
        }
        state
    }

    /// Reinitialize everything except the tuning. The RNG continues from its
    /// current stream so consecutive runs differ.
    pub fn reset(&mut self) {
        let seed: u64 = self.rng.random();
        *self = Self::build(self.tuning.clone(), seed);
        log::info!(
            "Board reset ({}x{}, seed {})",
            self.tuning.grid.width,
            self.tuning.grid.height,
            seed
        );
    }

    /// Queue a direction for the next tick (reversals are filtered at the tick)
    pub fn set_queued_direction(&mut self, direction: Direction) {
        self.queued_direction = direction;
    }

    /// Idle -> Playing, Playing <-> Paused. GameOver stays put.
    pub fn toggle_running(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Idle | GamePhase::Paused => GamePhase::Playing,
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        self.phase
    }

    pub(crate) fn end(&mut self, cause: GameOverCause) {
        self.phase = GamePhase::GameOver;
        self.game_over_cause = Some(cause);
        log::info!(
            "Game over ({}) after {} ticks, length {}",
            cause.as_str(),
            self.time_ticks,
            self.snake.len()
        );
    }

    /// Cells a new item may not land on
    pub(crate) fn occupied(&self) -> HashSet<Cell> {
        Grid::occupied(
            self.snake.cells(),
            self.items.items().iter().map(|it| &it.pos),
        )
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn grid(&self) -> &Grid {
        &self.tuning.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn items(&self) -> &ItemManager {
        &self.items
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn queued_direction(&self) -> Direction {
        self.queued_direction
    }

    pub fn growth_pending(&self) -> usize {
        self.growth_pending
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over_cause
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
