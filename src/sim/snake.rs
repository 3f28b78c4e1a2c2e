//! Snake body
//!
//! Stored tail-first: the front of the deque is the tail, the back is the head.

use std::collections::VecDeque;

use super::grid::{Cell, Direction, Grid};

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Build a snake from tail-first cells. Empty input yields a one-cell
    /// snake at the origin so the length invariant always holds.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            body.push_back(Cell::ZERO);
        }
        Self { body }
    }

    /// Horizontal segment of `length` cells with the head on `head` and the
    /// tail extending to the left (wrapping if the board is narrow).
    pub fn horizontal(head: Cell, length: usize, grid: &Grid) -> Self {
        let length = length.max(1) as i32;
        Self::from_cells(
            (0..length)
                .rev()
                .map(|i| grid.wrap(Cell::new(head.x - i, head.y))),
        )
    }

    #[inline]
    pub fn head(&self) -> Cell {
        // Never empty: every mutation keeps at least one cell
        self.body[self.body.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; provided for API symmetry with `len`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Cells from tail to head
    pub fn cells(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator + '_ {
        self.body.iter()
    }

    /// Where the head would land after one step
    pub fn peek_move(&self, direction: Direction, grid: &Grid) -> Cell {
        grid.step(self.head(), direction)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_back(cell);
    }

    /// Drop the tail cell unless it is the last one
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_front();
        }
    }

    /// Drop up to `n` tail cells, stopping at length 1. Returns how many went.
    pub fn shrink_from_tail(&mut self, n: usize) -> usize {
        let removed = n.min(self.body.len() - 1);
        self.body.drain(..removed);
        removed
    }

    /// True if any cell other than the head equals `cell`
    pub fn contains_excluding_head(&self, cell: Cell) -> bool {
        self.body.iter().rev().skip(1).any(|&c| c == cell)
    }
}
