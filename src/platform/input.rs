//! Input commands
//!
//! Everything a player can ask of the game. Drivers translate raw events into
//! these and hand them to `Game::apply`.

use crate::consts::SPEED_STEP;
use crate::sim::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Queue a direction for the next tick
    Steer(Direction),
    /// Start / pause / resume
    ToggleRunning,
    /// Back to a fresh idle board
    Reset,
    /// Reset and start playing immediately
    Restart,
    /// Change the speed multiplier by a delta
    AdjustSpeed(f64),
}

impl Command {
    /// Map a `KeyboardEvent.key` value. Unknown keys map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key.to_lowercase().as_str() {
            "arrowup" | "w" => Command::Steer(Direction::Up),
            "arrowdown" | "s" => Command::Steer(Direction::Down),
            "arrowleft" | "a" => Command::Steer(Direction::Left),
            "arrowright" | "d" => Command::Steer(Direction::Right),
            " " => Command::ToggleRunning,
            "r" => Command::Restart,
            "-" | "_" => Command::AdjustSpeed(-SPEED_STEP),
            "=" | "+" => Command::AdjustSpeed(SPEED_STEP),
            _ => return None,
        };
        Some(command)
    }

    /// Map an on-screen button id
    pub fn from_button(id: &str) -> Option<Self> {
        let command = match id {
            "btnStart" => Command::ToggleRunning,
            "btnRestart" => Command::Restart,
            "btnSlow" => Command::AdjustSpeed(-SPEED_STEP),
            "btnFast" => Command::AdjustSpeed(SPEED_STEP),
            _ => return None,
        };
        Some(command)
    }
}
