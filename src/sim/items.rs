//! Collectible items and the manager that places them
//!
//! Placement is uniform over free cells. A full board is a normal outcome:
//! `try_spawn` simply reports that nothing was placed.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::{IndexedRandom, index};
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Removes some burgers from the board
    Book,
    /// Shrinks the snake from the tail
    Weight,
    /// Burger: schedules growth
    Food,
}

impl ItemKind {
    /// Evaluation order for spawn rolls and pre-seeding
    pub const ALL: [ItemKind; 3] = [ItemKind::Book, ItemKind::Weight, ItemKind::Food];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Book => "book",
            ItemKind::Weight => "weight",
            ItemKind::Food => "food",
        }
    }

    /// Emoji used by the canvas renderer
    pub fn glyph(&self) -> &'static str {
        match self {
            ItemKind::Book => "📚",
            ItemKind::Weight => "🏋️",
            ItemKind::Food => "🍔",
        }
    }
}

/// One value per item kind
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerKind<T> {
    pub book: T,
    pub weight: T,
    pub food: T,
}

impl<T: Copy> PerKind<T> {
    pub const fn new(book: T, weight: T, food: T) -> Self {
        Self { book, weight, food }
    }

    #[inline]
    pub fn get(&self, kind: ItemKind) -> T {
        match kind {
            ItemKind::Book => self.book,
            ItemKind::Weight => self.weight,
            ItemKind::Food => self.food,
        }
    }
}

/// An item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Cell,
    pub kind: ItemKind,
}

/// Active items, in spawn order
#[derive(Debug, Clone, Default)]
pub struct ItemManager {
    items: Vec<Item>,
}

impl ItemManager {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_of_kind(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|it| it.kind == kind).count()
    }

    /// Place `kind` on a uniformly chosen cell that is neither in `occupied`
    /// nor already holding an item. Returns false when no such cell exists.
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        kind: ItemKind,
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> bool {
        let taken: HashSet<Cell> = self.items.iter().map(|it| it.pos).collect();
        let candidates: Vec<Cell> = grid
            .cells()
            .filter(|c| !occupied.contains(c) && !taken.contains(c))
            .collect();

        match candidates.choose(rng) {
            Some(&pos) => {
                log::trace!("Spawned {} at ({}, {})", kind.as_str(), pos.x, pos.y);
                self.items.push(Item { pos, kind });
                true
            }
            None => false,
        }
    }

    /// Remove up to `count` items of `kind`, chosen uniformly without
    /// replacement. Returns how many were removed.
    pub fn remove_random<R: Rng + ?Sized>(
        &mut self,
        kind: ItemKind,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let matching: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, it)| it.kind == kind)
            .map(|(i, _)| i)
            .collect();

        let amount = count.min(matching.len());
        if amount == 0 {
            return 0;
        }

        let mut picked: Vec<usize> = index::sample(rng, matching.len(), amount)
            .into_iter()
            .map(|i| matching[i])
            .collect();
        // Remove back to front so earlier indices stay valid
        picked.sort_unstable_by(|a, b| b.cmp(a));
        for i in picked {
            self.items.remove(i);
        }
        amount
    }

    /// Remove and return the item on `cell`, if any
    pub fn consume_at(&mut self, cell: Cell) -> Option<Item> {
        let idx = self.items.iter().position(|it| it.pos == cell)?;
        Some(self.items.remove(idx))
    }

    /// Drop an item on a fixed cell (test setup only)
    #[cfg(test)]
    pub(crate) fn place(&mut self, kind: ItemKind, pos: Cell) {
        debug_assert!(self.items.iter().all(|it| it.pos != pos));
        self.items.push(Item { pos, kind });
    }

    /// Per-tick spawn policy: for each kind in order, if under its cap and the
    /// Bernoulli roll succeeds, try to place one. Returns the kinds placed.
    pub fn roll_spawns<R: Rng + ?Sized>(
        &mut self,
        limits: &PerKind<usize>,
        chances: &PerKind<f64>,
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Vec<ItemKind> {
        let mut spawned = Vec::new();
        for kind in ItemKind::ALL {
            if self.count_of_kind(kind) < limits.get(kind)
                && rng.random_bool(chances.get(kind))
                && self.try_spawn(kind, grid, occupied, rng)
            {
                spawned.push(kind);
            }
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_try_spawn_avoids_occupied_and_items() {
        let grid = Grid::new(3, 1);
        let mut items = ItemManager::new();
        let mut rng = rng();
        let occupied: HashSet<Cell> = [IVec2::new(0, 0)].into_iter().collect();

        assert!(items.try_spawn(ItemKind::Food, &grid, &occupied, &mut rng));
        assert!(items.try_spawn(ItemKind::Book, &grid, &occupied, &mut rng));
        // Only (0,0) is left and the snake is on it
        assert!(!items.try_spawn(ItemKind::Weight, &grid, &occupied, &mut rng));

        assert_eq!(items.len(), 2);
        assert!(items.items().iter().all(|it| it.pos != IVec2::new(0, 0)));
        assert_ne!(items.items()[0].pos, items.items()[1].pos);
    }

    #[test]
    fn test_remove_random_clamps_to_available() {
        let grid = Grid::new(8, 8);
        let mut items = ItemManager::new();
        let mut rng = rng();
        let occupied = HashSet::new();
        for _ in 0..3 {
            items.try_spawn(ItemKind::Food, &grid, &occupied, &mut rng);
        }
        items.try_spawn(ItemKind::Book, &grid, &occupied, &mut rng);

        assert_eq!(items.remove_random(ItemKind::Food, 5, &mut rng), 3);
        assert_eq!(items.count_of_kind(ItemKind::Food), 0);
        assert_eq!(items.count_of_kind(ItemKind::Book), 1);

        // Nothing left to remove is a no-op
        assert_eq!(items.remove_random(ItemKind::Food, 5, &mut rng), 0);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_remove_random_partial() {
        let grid = Grid::new(8, 8);
        let mut items = ItemManager::new();
        let mut rng = rng();
        let occupied = HashSet::new();
        for _ in 0..10 {
            items.try_spawn(ItemKind::Food, &grid, &occupied, &mut rng);
        }
        items.try_spawn(ItemKind::Weight, &grid, &occupied, &mut rng);

        assert_eq!(items.remove_random(ItemKind::Food, 4, &mut rng), 4);
        assert_eq!(items.count_of_kind(ItemKind::Food), 6);
        assert_eq!(items.count_of_kind(ItemKind::Weight), 1);
    }

    #[test]
    fn test_consume_at() {
        let grid = Grid::new(1, 1);
        let mut items = ItemManager::new();
        let mut rng = rng();
        assert!(items.try_spawn(ItemKind::Weight, &grid, &HashSet::new(), &mut rng));

        assert!(items.consume_at(IVec2::new(5, 5)).is_none());
        let item = items.consume_at(IVec2::new(0, 0)).unwrap();
        assert_eq!(item.kind, ItemKind::Weight);
        assert!(items.is_empty());
    }

    #[test]
    fn test_roll_spawns_respects_caps() {
        let grid = Grid::new(16, 16);
        let mut items = ItemManager::new();
        let mut rng = rng();
        let limits = PerKind::new(1, 0, 4);
        let chances = PerKind::new(1.0, 1.0, 1.0);
        let occupied = HashSet::new();

        for _ in 0..20 {
            items.roll_spawns(&limits, &chances, &grid, &occupied, &mut rng);
        }
        assert_eq!(items.count_of_kind(ItemKind::Book), 1);
        assert_eq!(items.count_of_kind(ItemKind::Weight), 0);
        assert_eq!(items.count_of_kind(ItemKind::Food), 4);
    }

    #[test]
    fn test_roll_spawns_order_is_book_weight_food() {
        let grid = Grid::new(16, 16);
        let mut items = ItemManager::new();
        let mut rng = rng();
        let spawned = items.roll_spawns(
            &PerKind::new(1, 1, 1),
            &PerKind::new(1.0, 1.0, 1.0),
            &grid,
            &HashSet::new(),
            &mut rng,
        );
        assert_eq!(spawned, vec![ItemKind::Book, ItemKind::Weight, ItemKind::Food]);
    }

    #[test]
    fn test_roll_spawns_zero_chance() {
        let grid = Grid::new(4, 4);
        let mut items = ItemManager::new();
        let mut rng = rng();
        let spawned = items.roll_spawns(
            &PerKind::new(5, 5, 5),
            &PerKind::new(0.0, 0.0, 0.0),
            &grid,
            &HashSet::new(),
            &mut rng,
        );
        assert!(spawned.is_empty());
        assert!(items.is_empty());
    }
}
