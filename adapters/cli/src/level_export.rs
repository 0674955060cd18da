use rogue_board_core::{BoardDimensions, Category, GridCoord, VariantCatalog};
use rogue_board_system_layout::LevelSummary;
use rogue_board_world::{query, Board};
use serde::{Deserialize, Serialize};

/// Snapshot of a generated level suitable for JSON export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LevelExport {
    /// Level number that was generated.
    pub(crate) level: u32,
    /// Global seed the level stream was derived from.
    pub(crate) seed: u64,
    /// Number of board columns.
    pub(crate) columns: u32,
    /// Number of board rows.
    pub(crate) rows: u32,
    /// Interior cells available when the pool was rebuilt.
    pub(crate) pool_size: usize,
    /// Cell hosting the exit.
    pub(crate) exit: GridCoord,
    /// Every placement in the order it was emitted.
    pub(crate) placements: Vec<ExportedPlacement>,
}

impl LevelExport {
    /// Captures the board produced for `summary`.
    #[must_use]
    pub(crate) fn capture(
        summary: &LevelSummary,
        seed: u64,
        dimensions: BoardDimensions,
        board: &Board,
        variants: &VariantCatalog,
    ) -> Self {
        let placements = query::placements(board)
            .map(|placement| ExportedPlacement {
                category: placement.category,
                x: placement.coord.x(),
                y: placement.coord.y(),
                variant: variants
                    .variant_name(placement.category, placement.variant)
                    .map(str::to_owned)
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            level: summary.level,
            seed,
            columns: dimensions.columns(),
            rows: dimensions.rows(),
            pool_size: summary.pool_size,
            exit: summary.exit,
            placements,
        }
    }
}

/// Placement entry captured within a level export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ExportedPlacement {
    /// Category of the placed entity.
    pub(crate) category: Category,
    /// Column of the cell.
    pub(crate) x: i32,
    /// Row of the cell.
    pub(crate) y: i32,
    /// Configured name of the chosen variant.
    pub(crate) variant: String,
}
