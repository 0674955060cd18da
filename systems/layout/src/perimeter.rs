//! Floor and outer-wall painting across the bordered board rectangle.

use log::trace;
use rand::Rng;
use rogue_board_core::{
    BoardDimensions, Category, ContainerHandle, GridCoord, Instantiator, VariantCatalog,
};

use crate::pick_variant;

/// Number of tiles emitted by a perimeter pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerimeterSummary {
    /// Floor tiles painted inside the border.
    pub floor: usize,
    /// Outer-wall tiles painted on the border.
    pub outer_wall: usize,
}

impl PerimeterSummary {
    /// Total number of painted tiles.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.floor + self.outer_wall
    }
}

/// Paints one tile on every cell from `(-1, -1)` to `(columns, rows)` inclusive.
///
/// Border cells receive an outer-wall variant, all other cells a floor
/// variant. Every tile is grouped under `container`. The position pool is not
/// consulted.
pub fn paint_perimeter<R, I>(
    dimensions: BoardDimensions,
    variants: &VariantCatalog,
    container: ContainerHandle,
    rng: &mut R,
    scene: &mut I,
) -> PerimeterSummary
where
    R: Rng + ?Sized,
    I: Instantiator + ?Sized,
{
    let floor_variants = variants.variant_count(Category::Floor);
    let wall_variants = variants.variant_count(Category::OuterWall);
    let mut summary = PerimeterSummary::default();

    for x in -1..=dimensions.width() {
        for y in -1..=dimensions.height() {
            let coord = GridCoord::new(x, y);
            // A floor variant is drawn for every cell, border included.
            let floor = pick_variant(rng, floor_variants);
            let (category, variant) = if dimensions.is_boundary(coord) {
                summary.outer_wall += 1;
                (Category::OuterWall, pick_variant(rng, wall_variants))
            } else {
                summary.floor += 1;
                (Category::Floor, floor)
            };

            let entity = scene.place(category, coord, variant);
            scene.parent(entity, container);
            trace!("painted {category} variant {} at {coord}", variant.get());
        }
    }

    summary
}
