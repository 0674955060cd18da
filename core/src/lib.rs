#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rogue Board generator.
//!
//! This crate defines the vocabulary that connects the layout system, the
//! headless board and the adapters. The layout system decides *what* goes
//! *where* and announces every decision through the [`Instantiator`]
//! collaborator; whoever implements that trait (the headless board, a game
//! engine bridge, a test double) owns the resulting entities. Board
//! configuration lives here as well so adapters can load it without pulling
//! in the generation logic.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the container that groups floor and outer-wall tiles.
pub const BOARD_CONTAINER_NAME: &str = "Board";

/// Largest accepted board extent along either axis.
pub const MAX_BOARD_EXTENT: u32 = 4_096;

/// Location of a single grid cell expressed as signed column and row coordinates.
///
/// Coordinates are signed because the painted border sits one cell outside
/// the board on every side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    x: i32,
    y: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Validated board size measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardDimensions {
    columns: u32,
    rows: u32,
}

impl BoardDimensions {
    /// Creates a new board size.
    ///
    /// Both axes must lie within `1..=MAX_BOARD_EXTENT`.
    pub fn new(columns: u32, rows: u32) -> Result<Self, ConfigError> {
        let valid = |extent: u32| (1..=MAX_BOARD_EXTENT).contains(&extent);
        if !valid(columns) || !valid(rows) {
            return Err(ConfigError::InvalidDimensions { columns, rows });
        }

        Ok(Self { columns, rows })
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Board width as a signed coordinate bound.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.columns as i32
    }

    /// Board height as a signed coordinate bound.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.rows as i32
    }

    /// Reports whether at least one interior cell exists.
    #[must_use]
    pub const fn has_interior(&self) -> bool {
        self.columns >= 3 && self.rows >= 3
    }

    /// Number of interior cells eligible for wall, food and enemy placement.
    #[must_use]
    pub const fn interior_capacity(&self) -> usize {
        if !self.has_interior() {
            return 0;
        }
        (self.columns as usize - 2) * (self.rows as usize - 2)
    }

    /// Number of cells covered by the painted floor, border included.
    #[must_use]
    pub const fn painted_extent(&self) -> usize {
        (self.columns as usize + 2) * (self.rows as usize + 2)
    }

    /// Reports whether the coordinate lies on the painted outer boundary.
    #[must_use]
    pub const fn is_boundary(&self, coord: GridCoord) -> bool {
        coord.x == -1 || coord.x == self.width() || coord.y == -1 || coord.y == self.height()
    }

    /// Reports whether the coordinate lies within the painted rectangle.
    #[must_use]
    pub const fn is_painted(&self, coord: GridCoord) -> bool {
        coord.x >= -1 && coord.x <= self.width() && coord.y >= -1 && coord.y <= self.height()
    }

    /// Reports whether the coordinate is an interior cell.
    #[must_use]
    pub const fn is_interior(&self, coord: GridCoord) -> bool {
        coord.x >= 1 && coord.x <= self.width() - 2 && coord.y >= 1 && coord.y <= self.height() - 2
    }

    /// Fixed cell that hosts the level exit.
    #[must_use]
    pub const fn exit(&self) -> GridCoord {
        GridCoord::new(self.width() - 2, self.height() - 2)
    }
}

/// Inclusive range describing how many objects of a category to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountRange {
    /// Smallest number of objects placed.
    pub minimum: u32,
    /// Largest number of objects placed.
    pub maximum: u32,
}

impl CountRange {
    /// Creates a new count range.
    #[must_use]
    pub const fn new(minimum: u32, maximum: u32) -> Self {
        Self { minimum, maximum }
    }

    /// Creates a range that always resolves to exactly `count`.
    #[must_use]
    pub const fn fixed(count: u32) -> Self {
        Self::new(count, count)
    }

    /// Reports whether `minimum <= maximum`.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.minimum <= self.maximum
    }

    /// Reports whether the provided count lies within the range.
    #[must_use]
    pub const fn contains(&self, count: u32) -> bool {
        count >= self.minimum && count <= self.maximum
    }
}

/// Semantic class of a placed entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Background tile covering the board.
    Floor,
    /// Impassable tile on the painted border.
    OuterWall,
    /// Destructible wall placed on an interior cell.
    InnerWall,
    /// Pickup restoring the player's food.
    Food,
    /// Hostile unit.
    Enemy,
    /// Stairway leading to the next level.
    Exit,
}

impl Category {
    /// Every category in painting order.
    pub const ALL: [Self; 6] = [
        Self::Floor,
        Self::OuterWall,
        Self::InnerWall,
        Self::Food,
        Self::Enemy,
        Self::Exit,
    ];

    /// Human readable label used in logs and error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::OuterWall => "outer-wall",
            Self::InnerWall => "inner-wall",
            Self::Food => "food",
            Self::Enemy => "enemy",
            Self::Exit => "exit",
        }
    }

    /// Reports whether entities of this category occupy an interior pool cell.
    #[must_use]
    pub const fn is_pooled(self) -> bool {
        matches!(self, Self::InnerWall | Self::Food | Self::Enemy)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Index selecting one variant within a category's variant set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantIndex(u32);

impl VariantIndex {
    /// Creates a new variant index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Ordered list of interchangeable variant names for a category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSet {
    names: Vec<String>,
}

impl VariantSet {
    /// Creates a variant set from the provided names.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    fn numbered(prefix: &str, count: u32) -> Self {
        Self::new((1..=count).map(|index| format!("{prefix}{index}")))
    }

    /// Number of variants in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Reports whether the set holds no variants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the variant at the provided index.
    #[must_use]
    pub fn name(&self, index: VariantIndex) -> Option<&str> {
        let index = usize::try_from(index.get()).ok()?;
        self.names.get(index).map(String::as_str)
    }

    /// Iterator over variant names in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Variant sets for every category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantCatalog {
    /// Floor tile variants.
    pub floor: VariantSet,
    /// Outer wall tile variants.
    pub outer_wall: VariantSet,
    /// Interior wall variants.
    pub inner_wall: VariantSet,
    /// Food pickup variants.
    pub food: VariantSet,
    /// Enemy variants.
    pub enemy: VariantSet,
    /// Single exit representation.
    pub exit: String,
}

impl Default for VariantCatalog {
    fn default() -> Self {
        Self {
            floor: VariantSet::numbered("Floor", 8),
            outer_wall: VariantSet::numbered("OuterWall", 3),
            inner_wall: VariantSet::numbered("Wall", 8),
            food: VariantSet::new(["Food", "Soda"]),
            enemy: VariantSet::numbered("Enemy", 2),
            exit: "Exit".to_owned(),
        }
    }
}

impl VariantCatalog {
    /// Number of variants available for the category. The exit always has one.
    #[must_use]
    pub fn variant_count(&self, category: Category) -> usize {
        match self.set(category) {
            Some(set) => set.len(),
            None => 1,
        }
    }

    /// Resolves the configured name of a placed variant.
    #[must_use]
    pub fn variant_name(&self, category: Category, variant: VariantIndex) -> Option<&str> {
        match self.set(category) {
            Some(set) => set.name(variant),
            None if variant.get() == 0 => Some(self.exit.as_str()),
            None => None,
        }
    }

    fn set(&self, category: Category) -> Option<&VariantSet> {
        match category {
            Category::Floor => Some(&self.floor),
            Category::OuterWall => Some(&self.outer_wall),
            Category::InnerWall => Some(&self.inner_wall),
            Category::Food => Some(&self.food),
            Category::Enemy => Some(&self.enemy),
            Category::Exit => None,
        }
    }
}

/// Externally supplied board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of board columns.
    pub columns: u32,
    /// Number of board rows.
    pub rows: u32,
    /// Range of interior walls placed per level.
    pub wall_count: CountRange,
    /// Range of food pickups placed per level.
    pub food_count: CountRange,
    /// Variant sets for every category.
    pub variants: VariantCatalog,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 8,
            wall_count: CountRange::new(5, 9),
            food_count: CountRange::new(1, 5),
            variants: VariantCatalog::default(),
        }
    }
}

impl BoardConfig {
    /// Checks the configuration and returns the validated board dimensions.
    pub fn validate(&self) -> Result<BoardDimensions, ConfigError> {
        let dimensions = BoardDimensions::new(self.columns, self.rows)?;

        for (category, range) in [
            (Category::InnerWall, self.wall_count),
            (Category::Food, self.food_count),
        ] {
            if !range.is_ordered() {
                return Err(ConfigError::InvertedRange {
                    category,
                    minimum: range.minimum,
                    maximum: range.maximum,
                });
            }
        }

        for category in Category::ALL {
            if self.variants.variant_count(category) == 0 {
                return Err(ConfigError::EmptyVariants { category });
            }
        }

        if self.variants.exit.trim().is_empty() {
            return Err(ConfigError::MissingExit);
        }

        Ok(dimensions)
    }
}

/// Reasons a board configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Columns or rows fall outside `1..=MAX_BOARD_EXTENT`.
    #[error("board dimensions {columns}x{rows} are outside 1..={max}", max = MAX_BOARD_EXTENT)]
    InvalidDimensions {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// A count range has `minimum > maximum`.
    #[error("{category} count range {minimum}..={maximum} is inverted")]
    InvertedRange {
        /// Category the range belongs to.
        category: Category,
        /// Configured minimum.
        minimum: u32,
        /// Configured maximum.
        maximum: u32,
    },
    /// A category has no variants to choose from.
    #[error("no {category} variants configured")]
    EmptyVariants {
        /// Category with an empty variant set.
        category: Category,
    },
    /// The exit variant name is blank.
    #[error("exit variant name is empty")]
    MissingExit,
}

/// Placement decision emitted by the layout system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Semantic class of the entity.
    pub category: Category,
    /// Cell the entity occupies.
    pub coord: GridCoord,
    /// Variant chosen from the category's variant set.
    pub variant: VariantIndex,
}

impl Placement {
    /// Creates a new placement descriptor.
    #[must_use]
    pub const fn new(category: Category, coord: GridCoord, variant: VariantIndex) -> Self {
        Self {
            category,
            coord,
            variant,
        }
    }
}

/// Opaque handle of an entity created by an [`Instantiator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(u32);

impl EntityHandle {
    /// Creates a new entity handle with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Opaque handle of a grouping container created by an [`Instantiator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerHandle(u32);

impl ContainerHandle {
    /// Creates a new container handle with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Collaborator that turns placement decisions into entities.
///
/// Parenting is organisational only and never influences generation.
pub trait Instantiator {
    /// Creates a named container used to group related entities.
    fn create_container(&mut self, name: &str) -> ContainerHandle;

    /// Requests that an entity of the given category and variant appear at `coord`.
    fn place(&mut self, category: Category, coord: GridCoord, variant: VariantIndex)
        -> EntityHandle;

    /// Groups a previously placed entity under the provided container.
    fn parent(&mut self, entity: EntityHandle, container: ContainerHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_capacity_excludes_single_cell_border() {
        let dimensions = BoardDimensions::new(8, 8).expect("valid dimensions");
        assert_eq!(dimensions.interior_capacity(), 36);
        assert_eq!(dimensions.painted_extent(), 100);
        assert_eq!(dimensions.exit(), GridCoord::new(6, 6));
    }

    #[test]
    fn degenerate_board_has_no_interior() {
        let narrow = BoardDimensions::new(2, 9).expect("valid dimensions");
        assert!(!narrow.has_interior());
        assert_eq!(narrow.interior_capacity(), 0);

        let flat = BoardDimensions::new(9, 1).expect("valid dimensions");
        assert_eq!(flat.interior_capacity(), 0);
        assert_eq!(flat.painted_extent(), 33);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            BoardDimensions::new(0, 4),
            Err(ConfigError::InvalidDimensions {
                columns: 0,
                rows: 4
            })
        );
        assert!(BoardDimensions::new(4, MAX_BOARD_EXTENT + 1).is_err());
    }

    #[test]
    fn boundary_matches_painted_border() {
        let dimensions = BoardDimensions::new(5, 4).expect("valid dimensions");
        assert!(dimensions.is_boundary(GridCoord::new(-1, 2)));
        assert!(dimensions.is_boundary(GridCoord::new(5, 0)));
        assert!(dimensions.is_boundary(GridCoord::new(3, 4)));
        assert!(dimensions.is_boundary(GridCoord::new(2, -1)));
        assert!(!dimensions.is_boundary(GridCoord::new(0, 0)));
        assert!(!dimensions.is_boundary(GridCoord::new(4, 3)));
        assert!(dimensions.is_interior(GridCoord::new(3, 2)));
        assert!(!dimensions.is_interior(GridCoord::new(4, 2)));
    }

    #[test]
    fn default_config_describes_classic_board() {
        let config = BoardConfig::default();
        let dimensions = config.validate().expect("default config is valid");

        assert_eq!(dimensions.columns(), 8);
        assert_eq!(dimensions.rows(), 8);
        assert_eq!(config.wall_count, CountRange::new(5, 9));
        assert_eq!(config.food_count, CountRange::new(1, 5));
        assert_eq!(config.variants.variant_count(Category::Exit), 1);
        assert_eq!(
            config
                .variants
                .variant_name(Category::Floor, VariantIndex::new(7)),
            Some("Floor8")
        );
        assert_eq!(
            config
                .variants
                .variant_name(Category::Exit, VariantIndex::new(1)),
            None
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = BoardConfig {
            food_count: CountRange::new(4, 2),
            ..BoardConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                category: Category::Food,
                minimum: 4,
                maximum: 2,
            })
        );
    }

    #[test]
    fn empty_variant_set_is_rejected() {
        let mut config = BoardConfig::default();
        config.variants.enemy = VariantSet::default();

        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyVariants {
                category: Category::Enemy
            })
        );
    }

    #[test]
    fn blank_exit_is_rejected() {
        let mut config = BoardConfig::default();
        config.variants.exit = "  ".to_owned();

        assert_eq!(config.validate(), Err(ConfigError::MissingExit));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: BoardConfig = toml::from_str(
            r#"
            columns = 12
            wall_count = { minimum = 2, maximum = 3 }

            [variants]
            food = ["Apple"]
            "#,
        )
        .expect("toml parses");

        assert_eq!(config.columns, 12);
        assert_eq!(config.rows, 8);
        assert_eq!(config.wall_count, CountRange::new(2, 3));
        assert_eq!(config.variants.food, VariantSet::new(["Apple"]));
        assert_eq!(config.variants.exit, "Exit");
    }

    #[test]
    fn placement_round_trips_through_bincode() {
        let placement = Placement::new(
            Category::OuterWall,
            GridCoord::new(-1, 7),
            VariantIndex::new(2),
        );
        let bytes = bincode::serialize(&placement).expect("serialize");
        let restored: Placement = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, placement);
    }
}
