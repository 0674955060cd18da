#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Board layout system that places tiles, walls, pickups, enemies and the exit.
//!
//! A level is produced by a strict linear sequence: paint the bordered floor,
//! rebuild the interior [`PositionPool`], lay out inner walls, food and
//! enemies on freshly drawn cells, then drop the exit in its fixed corner.
//! Every decision is announced through the [`Instantiator`] collaborator and
//! randomness is always supplied by the caller or derived from an explicit
//! seed.

mod perimeter;
mod pool;
mod seed;

use log::{debug, info, trace};
use rand::Rng;
use rogue_board_core::{
    BoardConfig, BoardDimensions, Category, ConfigError, CountRange, GridCoord, Instantiator,
    VariantIndex, BOARD_CONTAINER_NAME,
};
use thiserror::Error;

pub use perimeter::{paint_perimeter, PerimeterSummary};
pub use pool::{EmptyPool, PositionPool};
pub use seed::{derive_level_seed, level_rng};

/// Number of enemies placed on a level: `floor(log2(level))`.
///
/// Returns `None` for level zero, where the logarithm is undefined.
#[must_use]
pub const fn enemy_count(level: u32) -> Option<u32> {
    level.checked_ilog2()
}

/// Reasons a level could not be generated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Levels are numbered from one.
    #[error("level {level} is not a positive level number")]
    InvalidLevel {
        /// Rejected level number.
        level: u32,
    },
    /// A single category can ask for more cells than the interior holds.
    #[error("level {level} may place {demand} {category} objects but the interior holds {capacity}")]
    CapacityExceeded {
        /// Level being generated.
        level: u32,
        /// Category whose count cannot fit.
        category: Category,
        /// Largest count the category can draw.
        demand: u32,
        /// Number of interior cells.
        capacity: usize,
    },
    /// The sampler ran dry while placing a category.
    #[error("ran out of interior cells while placing {category}")]
    PoolExhausted {
        /// Category being placed when the pool emptied.
        category: Category,
        /// Sampler failure.
        #[source]
        source: EmptyPool,
    },
}

/// Outcome of a single level generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSummary {
    /// Level that was generated.
    pub level: u32,
    /// Number of interior cells the pool held right after it was rebuilt.
    pub pool_size: usize,
    /// Floor and outer-wall tiles painted.
    pub perimeter: PerimeterSummary,
    /// Inner walls placed.
    pub walls: u32,
    /// Food pickups placed.
    pub food: u32,
    /// Enemies placed.
    pub enemies: u32,
    /// Cell hosting the exit.
    pub exit: GridCoord,
}

/// Lays out complete levels for a fixed board configuration.
#[derive(Clone, Debug)]
pub struct BoardGenerator {
    config: BoardConfig,
    dimensions: BoardDimensions,
    pool: PositionPool,
}

impl BoardGenerator {
    /// Creates a generator after validating the configuration.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        let dimensions = config.validate()?;
        Ok(Self {
            config,
            dimensions,
            pool: PositionPool::new(),
        })
    }

    /// Configuration the generator was built with.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Validated board dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Interior cells left over from the most recent pass.
    #[must_use]
    pub fn pool(&self) -> &PositionPool {
        &self.pool
    }

    /// Generates a level using a random stream derived from `global_seed` and `level`.
    pub fn generate_seeded<I>(
        &mut self,
        level: u32,
        global_seed: u64,
        scene: &mut I,
    ) -> Result<LevelSummary, GenerationError>
    where
        I: Instantiator + ?Sized,
    {
        let mut rng = level_rng(global_seed, level);
        self.generate(level, &mut rng, scene)
    }

    /// Generates a level, emitting every placement through `scene`.
    ///
    /// The level number and each category's count are checked against the
    /// interior before the first placement, so those rejections leave `scene`
    /// untouched. Counts that fit one by one but not together surface as
    /// [`GenerationError::PoolExhausted`] once the pool runs dry, after the
    /// placements made so far.
    pub fn generate<R, I>(
        &mut self,
        level: u32,
        rng: &mut R,
        scene: &mut I,
    ) -> Result<LevelSummary, GenerationError>
    where
        R: Rng + ?Sized,
        I: Instantiator + ?Sized,
    {
        let enemies = enemy_count(level).ok_or(GenerationError::InvalidLevel { level })?;
        self.check_capacity(level, enemies)?;

        debug!(
            "generating level {level} on a {}x{} board",
            self.dimensions.columns(),
            self.dimensions.rows()
        );
        let container = scene.create_container(BOARD_CONTAINER_NAME);
        let perimeter = paint_perimeter(
            self.dimensions,
            &self.config.variants,
            container,
            rng,
            scene,
        );

        self.pool.reset(self.dimensions);
        let pool_size = self.pool.len();
        let exit = self.dimensions.exit();
        debug!("pool rebuilt with {pool_size} interior cells");

        let walls =
            self.layout_at_random(Category::InnerWall, self.config.wall_count, rng, scene)?;
        let food = self.layout_at_random(Category::Food, self.config.food_count, rng, scene)?;
        let enemies =
            self.layout_at_random(Category::Enemy, CountRange::fixed(enemies), rng, scene)?;

        let _ = scene.place(Category::Exit, exit, VariantIndex::new(0));

        info!("level {level}: {walls} walls, {food} food, {enemies} enemies, exit at {exit}");
        Ok(LevelSummary {
            level,
            pool_size,
            perimeter,
            walls,
            food,
            enemies,
            exit,
        })
    }

    fn check_capacity(&self, level: u32, enemies: u32) -> Result<(), GenerationError> {
        if !self.dimensions.has_interior() {
            return Ok(());
        }

        let capacity = self.dimensions.interior_capacity();
        for (category, demand) in [
            (Category::InnerWall, self.config.wall_count.maximum),
            (Category::Food, self.config.food_count.maximum),
            (Category::Enemy, enemies),
        ] {
            if u64::from(demand) > capacity as u64 {
                return Err(GenerationError::CapacityExceeded {
                    level,
                    category,
                    demand,
                    capacity,
                });
            }
        }

        Ok(())
    }

    fn layout_at_random<R, I>(
        &mut self,
        category: Category,
        range: CountRange,
        rng: &mut R,
        scene: &mut I,
    ) -> Result<u32, GenerationError>
    where
        R: Rng + ?Sized,
        I: Instantiator + ?Sized,
    {
        if !self.dimensions.has_interior() {
            return Ok(0);
        }

        let count = rng.gen_range(range.minimum..=range.maximum);
        let variants = self.config.variants.variant_count(category);
        for _ in 0..count {
            let coord = self
                .pool
                .draw(rng)
                .map_err(|source| GenerationError::PoolExhausted { category, source })?;
            let variant = pick_variant(rng, variants);
            let _ = scene.place(category, coord, variant);
            trace!("placed {category} variant {} at {coord}", variant.get());
        }

        Ok(count)
    }
}

/// Picks a uniformly random variant out of `count`.
pub(crate) fn pick_variant<R>(rng: &mut R, count: usize) -> VariantIndex
where
    R: Rng + ?Sized,
{
    debug_assert!(count > 0, "variant sets are validated as non-empty");
    let count = u32::try_from(count).unwrap_or(u32::MAX).max(1);
    VariantIndex::new(rng.gen_range(0..count))
}
