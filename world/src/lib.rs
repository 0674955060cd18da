#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative headless board state for Rogue Board.
//!
//! [`Board`] implements the [`Instantiator`] collaborator by recording every
//! placement, container and parent link it is asked to create. Read access
//! goes through the [`query`] module so adapters never mutate the record.

use log::warn;
use rogue_board_core::{
    Category, ContainerHandle, EntityHandle, GridCoord, Instantiator, Placement, VariantIndex,
};

/// Entity recorded by the board together with its grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedEntity {
    handle: EntityHandle,
    placement: Placement,
    parent: Option<ContainerHandle>,
}

impl PlacedEntity {
    /// Handle assigned to the entity when it was placed.
    #[must_use]
    pub const fn handle(&self) -> EntityHandle {
        self.handle
    }

    /// Placement decision that created the entity.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Container the entity is grouped under, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<ContainerHandle> {
        self.parent
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Container {
    handle: ContainerHandle,
    name: String,
}

/// Headless record of a generated level.
#[derive(Clone, Debug, Default)]
pub struct Board {
    containers: Vec<Container>,
    entities: Vec<PlacedEntity>,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every recorded entity and container.
    pub fn clear(&mut self) {
        self.containers.clear();
        self.entities.clear();
    }

    fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut PlacedEntity> {
        let index = usize::try_from(handle.get()).ok()?;
        self.entities.get_mut(index)
    }

    fn has_container(&self, handle: ContainerHandle) -> bool {
        self.containers
            .iter()
            .any(|container| container.handle == handle)
    }
}

impl Instantiator for Board {
    fn create_container(&mut self, name: &str) -> ContainerHandle {
        let handle = ContainerHandle::new(next_id(self.containers.len()));
        self.containers.push(Container {
            handle,
            name: name.to_owned(),
        });
        handle
    }

    fn place(
        &mut self,
        category: Category,
        coord: GridCoord,
        variant: VariantIndex,
    ) -> EntityHandle {
        let handle = EntityHandle::new(next_id(self.entities.len()));
        self.entities.push(PlacedEntity {
            handle,
            placement: Placement::new(category, coord, variant),
            parent: None,
        });
        handle
    }

    fn parent(&mut self, entity: EntityHandle, container: ContainerHandle) {
        if !self.has_container(container) {
            warn!("ignoring parent request for unknown container {container:?}");
            return;
        }

        match self.entity_mut(entity) {
            Some(placed) => placed.parent = Some(container),
            None => warn!("ignoring parent request for unknown entity {entity:?}"),
        }
    }
}

fn next_id(len: usize) -> u32 {
    debug_assert!(u32::try_from(len).is_ok(), "board holds at most u32::MAX records");
    len as u32
}

/// Query functions that provide read-only access to the board.
pub mod query {
    use rogue_board_core::{Category, ContainerHandle, EntityHandle, GridCoord, Placement};

    use super::{Board, PlacedEntity};

    /// Every recorded entity in placement order.
    #[must_use]
    pub fn entities(board: &Board) -> &[PlacedEntity] {
        &board.entities
    }

    /// Every placement in the order it was requested.
    pub fn placements(board: &Board) -> impl Iterator<Item = Placement> + '_ {
        board.entities.iter().map(PlacedEntity::placement)
    }

    /// Placements of a single category in placement order.
    #[must_use]
    pub fn placements_of(board: &Board, category: Category) -> Vec<Placement> {
        placements(board)
            .filter(|placement| placement.category == category)
            .collect()
    }

    /// Number of entities recorded for the category.
    #[must_use]
    pub fn count(board: &Board, category: Category) -> usize {
        placements(board)
            .filter(|placement| placement.category == category)
            .count()
    }

    /// Looks up an entity by handle.
    #[must_use]
    pub fn entity(board: &Board, handle: EntityHandle) -> Option<&PlacedEntity> {
        let index = usize::try_from(handle.get()).ok()?;
        board.entities.get(index)
    }

    /// Container a placed entity is grouped under.
    #[must_use]
    pub fn parent_of(board: &Board, handle: EntityHandle) -> Option<ContainerHandle> {
        entity(board, handle).and_then(PlacedEntity::parent)
    }

    /// Name of a container created on the board.
    #[must_use]
    pub fn container_name(board: &Board, handle: ContainerHandle) -> Option<&str> {
        board
            .containers
            .iter()
            .find(|container| container.handle == handle)
            .map(|container| container.name.as_str())
    }

    /// Entities grouped under the provided container.
    #[must_use]
    pub fn children(board: &Board, container: ContainerHandle) -> Vec<EntityHandle> {
        board
            .entities
            .iter()
            .filter(|placed| placed.parent == Some(container))
            .map(PlacedEntity::handle)
            .collect()
    }

    /// Placements stacked on the cell, bottom first.
    #[must_use]
    pub fn placements_at(board: &Board, coord: GridCoord) -> Vec<Placement> {
        placements(board)
            .filter(|placement| placement.coord == coord)
            .collect()
    }

    /// Cells occupied by pooled categories (walls, food and enemies) in placement order.
    #[must_use]
    pub fn occupied_interior_cells(board: &Board) -> Vec<GridCoord> {
        placements(board)
            .filter(|placement| placement.category.is_pooled())
            .map(|placement| placement.coord)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_assigns_sequential_handles() {
        let mut board = Board::new();
        let first = board.place(Category::Floor, GridCoord::new(0, 0), VariantIndex::new(1));
        let second = board.place(Category::Food, GridCoord::new(2, 3), VariantIndex::new(0));

        assert_eq!(first, EntityHandle::new(0));
        assert_eq!(second, EntityHandle::new(1));
        assert_eq!(
            query::entity(&board, second).map(PlacedEntity::placement),
            Some(Placement::new(
                Category::Food,
                GridCoord::new(2, 3),
                VariantIndex::new(0)
            ))
        );
    }

    #[test]
    fn parent_groups_entities_under_container() {
        let mut board = Board::new();
        let holder = board.create_container("Board");
        let tile = board.place(
            Category::OuterWall,
            GridCoord::new(-1, -1),
            VariantIndex::new(0),
        );
        let enemy = board.place(Category::Enemy, GridCoord::new(3, 3), VariantIndex::new(1));
        board.parent(tile, holder);

        assert_eq!(query::container_name(&board, holder), Some("Board"));
        assert_eq!(query::parent_of(&board, tile), Some(holder));
        assert_eq!(query::parent_of(&board, enemy), None);
        assert_eq!(query::children(&board, holder), vec![tile]);
    }

    #[test]
    fn parent_ignores_unknown_handles() {
        let mut board = Board::new();
        let holder = board.create_container("Board");
        let tile = board.place(Category::Floor, GridCoord::new(1, 1), VariantIndex::new(0));

        board.parent(EntityHandle::new(42), holder);
        board.parent(tile, ContainerHandle::new(7));

        assert_eq!(query::parent_of(&board, tile), None);
        assert!(query::children(&board, holder).is_empty());
    }

    #[test]
    fn queries_filter_by_category_and_cell() {
        let mut board = Board::new();
        let cell = GridCoord::new(2, 2);
        let _ = board.place(Category::Floor, cell, VariantIndex::new(0));
        let _ = board.place(Category::InnerWall, cell, VariantIndex::new(3));
        let _ = board.place(Category::Food, GridCoord::new(4, 1), VariantIndex::new(1));

        assert_eq!(query::count(&board, Category::Floor), 1);
        assert_eq!(query::placements_of(&board, Category::Food).len(), 1);
        assert_eq!(query::placements_at(&board, cell).len(), 2);
        assert_eq!(
            query::occupied_interior_cells(&board),
            vec![cell, GridCoord::new(4, 1)]
        );
    }

    #[test]
    fn clear_discards_previous_level() {
        let mut board = Board::new();
        let holder = board.create_container("Board");
        let tile = board.place(Category::Floor, GridCoord::new(0, 0), VariantIndex::new(0));
        board.parent(tile, holder);

        board.clear();

        assert!(query::entities(&board).is_empty());
        assert_eq!(query::container_name(&board, holder), None);
        assert_eq!(
            board.place(Category::Exit, GridCoord::new(6, 6), VariantIndex::new(0)),
            EntityHandle::new(0)
        );
    }
}
