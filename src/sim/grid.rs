//! Toroidal grid geometry
//!
//! The board has no walls: stepping off one edge lands on the opposite edge.
//! Cells use screen coordinates, so `Up` decreases `y`.

use std::collections::HashSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::wrap;

/// A grid cell `(x, y)` with `0 <= x < width`, `0 <= y < height`
pub type Cell = IVec2;

/// Movement direction (unit delta)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit delta for one step
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if `other` would reverse straight back into the neck
    #[inline]
    pub fn is_reverse_of(self, other: Direction) -> bool {
        self == other.opposite()
    }
}

/// Fixed-size wrap-around board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Total number of cells on the board
    #[inline]
    pub fn total_cells(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Center cell (floor division, matching the initial snake placement)
    pub fn center(&self) -> Cell {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Wrap both axes independently onto the board
    #[inline]
    pub fn wrap(&self, cell: IVec2) -> Cell {
        IVec2::new(wrap(cell.x, self.width), wrap(cell.y, self.height))
    }

    /// Neighbouring cell one step in `direction`, wrapping at the edges
    #[inline]
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        self.wrap(cell + direction.delta())
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
    }

    /// Union of snake and item cells, used to filter spawn candidates
    pub fn occupied<'a>(
        snake_cells: impl IntoIterator<Item = &'a Cell>,
        item_cells: impl IntoIterator<Item = &'a Cell>,
    ) -> HashSet<Cell> {
        snake_cells
            .into_iter()
            .chain(item_cells)
            .copied()
            .collect()
    }
}
