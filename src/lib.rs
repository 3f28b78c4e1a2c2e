//! Pac Snake - A wrap-around grid snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, items, snake, tick)
//! - `session`: Scoring, speed and frame pacing
//! - `game`: The single facade a driver owns (input verbs + snapshot)
//! - `platform`: Browser/native platform abstraction (input mapping, storage)
//! - `renderer`: Canvas 2D drawing for the browser build
//! - `autopilot`: Demo bot used by the headless runner
//! - `tuning`: Data-driven game balance and named profiles

pub mod autopilot;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use game::{Game, Snapshot};
pub use platform::input::Command;
pub use tuning::{FoodEffect, ScoringMode, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Default grid dimensions (cells)
    pub const GRID_W: i32 = 32;
    pub const GRID_H: i32 = 18;

    /// Base simulation rate (ticks per second at 1x speed)
    pub const BASE_RATE: f64 = 6.0;

    /// Speed multiplier bounds and the step used by the +/- controls
    pub const MIN_SPEED: f64 = 0.5;
    pub const MAX_SPEED: f64 = 3.0;
    pub const SPEED_STEP: f64 = 0.1;

    /// Snake length at reset
    pub const INITIAL_LENGTH: usize = 5;
}

/// Wrap a coordinate onto `[0, dimension)`
#[inline]
pub fn wrap(coord: i32, dimension: i32) -> i32 {
    coord.rem_euclid(dimension)
}
