//! Discrete simulation tick
//!
//! One tick moves the snake exactly one cell. The step order below is part of
//! the game rules: pickups resolve before the tail moves, and the collision
//! check runs before any new items are rolled.

use super::items::ItemKind;
use super::state::{GameOverCause, GamePhase, GameState};
use crate::tuning::{FoodEffect, ScoringMode};

/// What happened during a tick (for logging, HUD flashes and tests)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Item eaten this tick
    pub pickup: Option<ItemKind>,
    /// Segments scheduled by a burger
    pub growth_scheduled: usize,
    /// Tail cells removed by a weight
    pub shrunk: usize,
    /// Burgers removed by a book
    pub food_removed: usize,
    /// Kinds placed by the spawn rolls
    pub spawned: Vec<ItemKind>,
    pub game_over: Option<GameOverCause>,
}

/// Advance the game state by one step. Does nothing unless playing.
pub fn tick(state: &mut GameState) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.phase != GamePhase::Playing {
        return outcome;
    }
    state.time_ticks += 1;

    let grid = state.tuning.grid;
    let total_cells = grid.total_cells();

    // Latch queued direction; reversing into the neck is ignored
    if !state.queued_direction.is_reverse_of(state.direction) {
        state.direction = state.queued_direction;
    }

    // Move: the snake is one cell longer until the tail is settled below
    let new_head = state.snake.peek_move(state.direction, &grid);
    state.snake.push_head(new_head);

    if let Some(item) = state.items.consume_at(new_head) {
        outcome.pickup = Some(item.kind);
        match item.kind {
            ItemKind::Food => {
                if state.tuning.food_effect == FoodEffect::Grow {
                    let len = state.snake.len();
                    let growth = len.min(total_cells.saturating_sub(len));
                    state.growth_pending += growth;
                    outcome.growth_scheduled = growth;
                }
            }
            ItemKind::Weight => {
                outcome.shrunk = state.snake.shrink_from_tail(state.tuning.weight_shrink);
            }
            ItemKind::Book => {
                outcome.food_removed = state.items.remove_random(
                    ItemKind::Food,
                    state.tuning.book_removals,
                    &mut state.rng,
                );
            }
        }
        if state.tuning.scoring == ScoringMode::Score {
            state.score += state.tuning.rewards.get(item.kind);
        }
        log::debug!(
            "Picked up {} at ({}, {}): len={} pending={} score={}",
            item.kind.as_str(),
            new_head.x,
            new_head.y,
            state.snake.len(),
            state.growth_pending,
            state.score
        );
    }

    if state.growth_pending > 0 {
        state.growth_pending -= 1;
    } else {
        state.snake.pop_tail();
    }

    if state.tuning.self_collision && state.snake.contains_excluding_head(new_head) {
        state.end(GameOverCause::SelfCollision);
        outcome.game_over = Some(GameOverCause::SelfCollision);
        return outcome;
    }

    let occupied = state.occupied();
    outcome.spawned = state.items.roll_spawns(
        &state.tuning.item_limits,
        &state.tuning.spawn_chances,
        &grid,
        &occupied,
        &mut state.rng,
    );

    if state.snake.len() >= total_cells {
        state.end(GameOverCause::BoardFilled);
        outcome.game_over = Some(GameOverCause::BoardFilled);
    }

    outcome
}
