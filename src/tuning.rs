//! Data-driven game balance
//!
//! Every rule that differs between game variants lives here, so variants are
//! profiles rather than forks of the simulation. Profiles can be picked by
//! name or loaded from JSON (missing fields fall back to `survival`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Grid, ItemKind, PerKind};

/// Largest accepted board side
pub const MAX_GRID_SIDE: i32 = 1024;

/// What the session measures and records as "best"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScoringMode {
    /// Seconds survived while playing
    #[default]
    Survival,
    /// Points from per-kind pickup rewards
    Score,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Survival => "Time",
            ScoringMode::Score => "Score",
        }
    }
}

/// What eating a burger does to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FoodEffect {
    /// Schedule `min(len, free cells)` extra segments
    #[default]
    Grow,
    /// Only the configured reward applies
    PointsOnly,
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown profile `{0}` (expected one of: survival, score_attack, zen)")]
    UnknownProfile(String),
    #[error("grid must be between 1x1 and {max}x{max} (got {width}x{height})", max = MAX_GRID_SIDE)]
    InvalidGrid { width: i32, height: i32 },
    #[error("initial length {length} must be between 1 and the grid width {width}")]
    InitialLength { length: usize, width: i32 },
    #[error("spawn chance for {kind} must be within [0, 1] (got {chance})")]
    SpawnChance { kind: &'static str, chance: f64 },
    #[error("base rate must be a positive number of ticks per second (got {0})")]
    BaseRate(f64),
    #[error("record key must not be empty")]
    EmptyRecordKey,
}

/// Complete rule set for one game variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Profile name (display only)
    pub name: String,
    pub grid: Grid,
    /// Ticks per second at 1x speed
    pub base_rate: f64,
    pub initial_length: usize,
    /// Items pre-spawned on reset
    pub initial_items: PerKind<usize>,
    /// Population caps
    pub item_limits: PerKind<usize>,
    /// Per-tick spawn probability for each kind
    pub spawn_chances: PerKind<f64>,
    /// Points per pickup (score mode only)
    pub rewards: PerKind<u64>,
    /// Tail cells removed by a weight
    pub weight_shrink: usize,
    /// Burgers removed by a book
    pub book_removals: usize,
    /// Whether running into yourself ends the game
    pub self_collision: bool,
    pub food_effect: FoodEffect,
    pub scoring: ScoringMode,
    /// Storage key for the best record
    pub record_key: String,
    /// Headline shown when the game ends
    pub game_over_message: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::survival()
    }
}

impl Tuning {
    pub const PROFILES: [&'static str; 3] = ["survival", "score_attack", "zen"];

    /// Burgers swarm the board; survive as long as you can
    pub fn survival() -> Self {
        Self {
            name: "survival".to_string(),
            grid: Grid::new(GRID_W, GRID_H),
            base_rate: BASE_RATE,
            initial_length: INITIAL_LENGTH,
            initial_items: PerKind::new(1, 1, 10),
            item_limits: PerKind::new(2, 2, 18),
            spawn_chances: PerKind::new(0.010, 0.010, 0.120),
            rewards: PerKind::new(0, 0, 0),
            weight_shrink: 3,
            book_removals: 5,
            self_collision: true,
            food_effect: FoodEffect::Grow,
            scoring: ScoringMode::Survival,
            record_key: "pacsnake.bestTime".to_string(),
            game_over_message: "Burgers win!".to_string(),
        }
    }

    /// Chase points; books and weights are worth more than burgers
    pub fn score_attack() -> Self {
        Self {
            name: "score_attack".to_string(),
            base_rate: 8.0,
            initial_items: PerKind::new(1, 2, 6),
            item_limits: PerKind::new(2, 3, 12),
            spawn_chances: PerKind::new(0.020, 0.020, 0.100),
            rewards: PerKind::new(25, 15, 10),
            book_removals: 3,
            scoring: ScoringMode::Score,
            record_key: "pacsnake.bestScore".to_string(),
            game_over_message: "Game over!".to_string(),
            ..Self::survival()
        }
    }

    /// No self-collision: the only way out is filling the board
    pub fn zen() -> Self {
        Self {
            name: "zen".to_string(),
            base_rate: 5.0,
            self_collision: false,
            record_key: "pacsnake.zen.bestTime".to_string(),
            game_over_message: "The board is full!".to_string(),
            ..Self::survival()
        }
    }

    /// Look up a built-in profile by name
    pub fn profile(name: &str) -> Result<Self, TuningError> {
        let tuning = match name.to_lowercase().as_str() {
            "survival" | "classic" => Self::survival(),
            "score_attack" | "score" => Self::score_attack(),
            "zen" => Self::zen(),
            _ => return Err(TuningError::UnknownProfile(name.to_string())),
        };
        Ok(tuning)
    }

    /// Parse and validate a JSON tuning
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a JSON tuning file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let Grid { width, height } = self.grid;
        if !(1..=MAX_GRID_SIDE).contains(&width) || !(1..=MAX_GRID_SIDE).contains(&height) {
            return Err(TuningError::InvalidGrid { width, height });
        }
        if self.initial_length == 0 || self.initial_length > width as usize {
            return Err(TuningError::InitialLength {
                length: self.initial_length,
                width,
            });
        }
        if !(self.base_rate.is_finite() && self.base_rate > 0.0) {
            return Err(TuningError::BaseRate(self.base_rate));
        }
        for kind in ItemKind::ALL {
            let chance = self.spawn_chances.get(kind);
            if !(0.0..=1.0).contains(&chance) {
                return Err(TuningError::SpawnChance {
                    kind: kind.as_str(),
                    chance,
                });
            }
        }
        if self.record_key.trim().is_empty() {
            return Err(TuningError::EmptyRecordKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_validate() {
        for name in Tuning::PROFILES {
            let tuning = Tuning::profile(name).unwrap();
            assert_eq!(tuning.name, name);
            tuning.validate().unwrap();
        }
    }

    #[test]
    fn test_profiles_differ_where_expected() {
        let survival = Tuning::survival();
        let score = Tuning::score_attack();
        let zen = Tuning::zen();

        assert!(survival.self_collision);
        assert!(!zen.self_collision);
        assert_eq!(score.scoring, ScoringMode::Score);
        assert_ne!(survival.record_key, score.record_key);
        assert_ne!(survival.record_key, zen.record_key);
    }

    #[test]
    fn test_unknown_profile() {
        let err = Tuning::profile("arcade").unwrap_err();
        assert!(matches!(err, TuningError::UnknownProfile(ref n) if n == "arcade"));
    }

    #[test]
    fn test_partial_json_falls_back_to_survival() {
        let tuning = Tuning::from_json(
            r#"{ "grid": { "width": 10, "height": 8 }, "self_collision": false }"#,
        )
        .unwrap();
        assert_eq!(tuning.grid, Grid::new(10, 8));
        assert!(!tuning.self_collision);
        assert_eq!(tuning.weight_shrink, 3);
        assert_eq!(tuning.record_key, "pacsnake.bestTime");
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::score_attack();
        let json = serde_json::to_string(&tuning).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_validation_failures() {
        let mut t = Tuning::survival();
        t.grid = Grid::new(0, 5);
        assert!(matches!(t.validate(), Err(TuningError::InvalidGrid { .. })));

        let mut t = Tuning::survival();
        t.initial_length = 40;
        assert!(matches!(t.validate(), Err(TuningError::InitialLength { .. })));

        let mut t = Tuning::survival();
        t.spawn_chances.food = 1.5;
        assert!(matches!(
            t.validate(),
            Err(TuningError::SpawnChance { kind: "food", .. })
        ));

        let mut t = Tuning::survival();
        t.base_rate = 0.0;
        assert!(matches!(t.validate(), Err(TuningError::BaseRate(_))));

        let mut t = Tuning::survival();
        t.record_key = "  ".to_string();
        assert!(matches!(t.validate(), Err(TuningError::EmptyRecordKey)));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
