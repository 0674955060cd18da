//! Interior position pool and its non-repeating sampler.

use rand::Rng;
use rogue_board_core::{BoardDimensions, GridCoord};
use thiserror::Error;

/// Signals that a draw was attempted after every interior cell was handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("position pool is empty")]
pub struct EmptyPool;

/// Working set of interior cells not yet used by the current level.
#[derive(Clone, Debug, Default)]
pub struct PositionPool {
    positions: Vec<GridCoord>,
}

impl PositionPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents with every interior cell of the board.
    ///
    /// Boards narrower or shorter than three cells leave the pool empty.
    pub fn reset(&mut self, dimensions: BoardDimensions) {
        self.positions.clear();
        if !dimensions.has_interior() {
            return;
        }

        self.positions.reserve(dimensions.interior_capacity());
        for x in 1..dimensions.width() - 1 {
            for y in 1..dimensions.height() - 1 {
                self.positions.push(GridCoord::new(x, y));
            }
        }
    }

    /// Number of cells still available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Reports whether every cell has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Reports whether the cell is still available.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.positions.contains(&coord)
    }

    /// Iterator over the remaining cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.positions.iter().copied()
    }

    /// Removes and returns a uniformly chosen cell.
    pub fn draw<R>(&mut self, rng: &mut R) -> Result<GridCoord, EmptyPool>
    where
        R: Rng + ?Sized,
    {
        if self.positions.is_empty() {
            return Err(EmptyPool);
        }

        let index = rng.gen_range(0..self.positions.len());
        Ok(self.positions.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn dimensions(columns: u32, rows: u32) -> BoardDimensions {
        BoardDimensions::new(columns, rows).expect("valid dimensions")
    }

    #[test]
    fn reset_fills_interior_in_column_order() {
        let mut pool = PositionPool::new();
        pool.reset(dimensions(4, 5));

        let cells: Vec<_> = pool.iter().collect();
        assert_eq!(
            cells,
            vec![
                GridCoord::new(1, 1),
                GridCoord::new(1, 2),
                GridCoord::new(1, 3),
                GridCoord::new(2, 1),
                GridCoord::new(2, 2),
                GridCoord::new(2, 3),
            ]
        );
    }

    #[test]
    fn reset_replaces_previous_contents() {
        let mut pool = PositionPool::new();
        pool.reset(dimensions(8, 8));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10 {
            let _ = pool.draw(&mut rng).expect("pool has cells");
        }
        assert_eq!(pool.len(), 26);

        pool.reset(dimensions(8, 8));
        assert_eq!(pool.len(), 36);

        pool.reset(dimensions(5, 3));
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn degenerate_board_leaves_pool_empty() {
        let mut pool = PositionPool::new();
        pool.reset(dimensions(8, 8));
        pool.reset(dimensions(2, 8));
        assert!(pool.is_empty());
    }

    #[test]
    fn draw_never_repeats_and_reports_exhaustion() {
        let mut pool = PositionPool::new();
        pool.reset(dimensions(5, 5));
        let mut rng = ChaCha8Rng::seed_from_u64(0xfeed);

        let mut seen = HashSet::new();
        while !pool.is_empty() {
            let before = pool.len();
            let coord = pool.draw(&mut rng).expect("pool has cells");
            assert_eq!(pool.len(), before - 1);
            assert!(!pool.contains(coord));
            assert!(seen.insert(coord), "{coord} drawn twice");
        }

        assert_eq!(seen.len(), 9);
        assert_eq!(pool.draw(&mut rng), Err(EmptyPool));
    }
}
