//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell per tick, no wall-clock inputs
//! - Seeded RNG only
//! - Stable iteration order (Book, Weight, Food)
//! - No rendering or platform dependencies

pub mod grid;
pub mod items;
pub mod snake;
pub mod state;
pub mod tick;

pub use grid::{Cell, Direction, Grid};
pub use items::{Item, ItemKind, ItemManager, PerKind};
pub use snake::Snake;
pub use state::{GameOverCause, GamePhase, GameState};
pub use tick::{TickOutcome, tick};
