//! Shared entity contract
//!
//! Obstacles, the avatar and collectibles all answer the same two questions: where am I,
//! and do I cover a given cell. Each variant implements [`Entity`] with static dispatch;
//! [`EntityKind`] tags them for renderers and logs.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::tuning::Tuning;

/// Which variant an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Avatar,
    Collectible,
}

/// An integer grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Read-only view of the cells other entities hold, handed to anything that needs to
/// pick a free spot. Built fresh by the round so no entity keeps a reference to it.
#[derive(Debug, Clone, Default)]
pub struct OccupancyView {
    cells: Vec<Cell>,
}

impl OccupancyView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a view from any set of occupants
    pub fn from_occupants<'a, E: Entity + 'a>(occupants: impl IntoIterator<Item = &'a E>) -> Self {
        let mut view = Self::new();
        for entity in occupants {
            view.extend_from(entity);
        }
        view
    }

    /// Record the cell an entity currently occupies (nothing if it is inactive)
    pub fn extend_from<E: Entity + ?Sized>(&mut self, entity: &E) {
        if let Some(cell) = entity.cell() {
            self.cells.push(cell);
        }
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn is_taken(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Per-tick collaborators an entity may need while updating
pub struct TickContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub tuning: &'a Tuning,
    /// Cells held by everything except the entity being updated
    pub view: &'a OccupancyView,
}

/// Common contract for everything on the grid
pub trait Entity {
    fn kind(&self) -> EntityKind;

    /// Current cell, or `None` while the entity is inactive (e.g. a hidden gem)
    fn cell(&self) -> Option<Cell>;

    /// Advance internal state by `dt` seconds
    fn update(&mut self, _dt: f32, _ctx: &mut TickContext<'_>) {}

    /// Whether this entity's footprint covers `(col, row)`
    fn occupies(&self, col: i32, row: i32) -> bool {
        self.cell() == Some(Cell::new(row, col))
    }

    /// Whether this entity's footprint covers the given cell
    #[inline]
    fn covers(&self, cell: Cell) -> bool {
        self.occupies(cell.col, cell.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rock(Option<Cell>);

    impl Entity for Rock {
        fn kind(&self) -> EntityKind {
            EntityKind::Obstacle
        }

        fn cell(&self) -> Option<Cell> {
            self.0
        }
    }

    #[test]
    fn test_default_occupies_is_exact_cell() {
        let rock = Rock(Some(Cell::new(2, 3)));
        assert!(rock.occupies(3, 2));
        assert!(!rock.occupies(2, 3));
        assert!(!rock.occupies(3, 1));
        assert!(rock.covers(Cell::new(2, 3)));
    }

    #[test]
    fn test_inactive_occupies_nothing() {
        let rock = Rock(None);
        assert!(!rock.occupies(0, 0));
    }

    #[test]
    fn test_view_skips_inactive() {
        let rocks = [Rock(Some(Cell::new(1, 1))), Rock(None), Rock(Some(Cell::new(2, 0)))];
        let view = OccupancyView::from_occupants(&rocks);
        assert_eq!(view.len(), 2);
        assert!(view.is_taken(Cell::new(1, 1)));
        assert!(!view.is_taken(Cell::new(0, 0)));
    }
}
