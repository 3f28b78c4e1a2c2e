//! Idle/demo mode - a simple bot that plays from the snapshot
//!
//! Greedy: steer toward the nearest wanted item, never into the body, and
//! step around unwanted items when there is a choice.

use crate::game::Snapshot;
use crate::sim::{Cell, Direction, Grid, ItemKind};
use crate::tuning::ScoringMode;

/// Shortest wrap-around Manhattan distance
pub fn torus_distance(grid: &Grid, a: Cell, b: Cell) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx.min(grid.width - dx) + dy.min(grid.height - dy)
}

/// Whether the bot goes for `kind`. Surviving means staying short, so
/// burgers are dodged; scoring means eating everything.
fn wanted(kind: ItemKind, scoring: ScoringMode) -> bool {
    match scoring {
        ScoringMode::Survival => kind != ItemKind::Food,
        ScoringMode::Score => true,
    }
}

/// Pick the next direction for the current snapshot
pub fn choose_direction(snap: &Snapshot) -> Direction {
    let Some(head) = snap.head() else {
        return snap.direction;
    };
    let grid = snap.grid;
    // The tail moves out of the way unless the snake is growing; treat it as free
    let body = &snap.snake[1.min(snap.snake.len() - 1)..snap.snake.len() - 1];

    let target = snap
        .items
        .iter()
        .filter(|it| wanted(it.kind, snap.scoring))
        .min_by_key(|it| torus_distance(&grid, head, it.pos))
        .map(|it| it.pos);

    Direction::ALL
        .into_iter()
        .filter(|d| !d.is_reverse_of(snap.direction))
        .map(|d| {
            let next = grid.step(head, d);
            let blocked = body.contains(&next);
            let unwanted = snap
                .items
                .iter()
                .any(|it| it.pos == next && !wanted(it.kind, snap.scoring));
            let distance = target.map_or(0, |t| torus_distance(&grid, next, t));
            (d, (blocked, unwanted, distance))
        })
        .min_by_key(|(_, key)| *key)
        .map(|(d, _)| d)
        .unwrap_or(snap.direction)
}
