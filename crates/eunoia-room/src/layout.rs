//! The validated room: grid extent, walkable bounds, start tile, furniture.
//!
//! [`RoomLayout`] is the only way to obtain a furniture list the rest of the
//! engine will accept. Construction checks every structural rule once, so
//! movement and interaction code can trust the layout without re-checking:
//!
//! - bounds are non-empty and fit inside the grid;
//! - furniture ids are unique and footprints non-empty;
//! - interaction actions are poses;
//! - interaction points are inside the bounds and outside every solid
//!   footprint;
//! - no two interactive items share a category;
//! - the start tile is walkable.

use std::collections::{BTreeMap, BTreeSet};

use eunoia_types::{FurnitureCategory, FurnitureItem, GridBounds, Position, TargetObject, Tile};
use tracing::debug;

use crate::collision;
use crate::error::RoomError;
use crate::interaction;

/// A validated, immutable room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomLayout {
    /// Grid extent in tiles (the grid is square).
    grid_size: i32,
    /// Inclusive walkable range.
    bounds: GridBounds,
    /// Where the character appears at session start.
    start: Tile,
    /// All placed furniture.
    furniture: Vec<FurnitureItem>,
}

impl RoomLayout {
    /// Validate and build a room.
    ///
    /// # Errors
    ///
    /// Returns the first [`RoomError`] found; see the module docs for the
    /// rules checked.
    pub fn new(
        grid_size: i32,
        bounds: GridBounds,
        start: Tile,
        furniture: Vec<FurnitureItem>,
    ) -> Result<Self, RoomError> {
        if bounds.min < 0 || bounds.min > bounds.max || bounds.max >= grid_size {
            return Err(RoomError::InvalidBounds { bounds, grid_size });
        }

        let mut ids = BTreeSet::new();
        let mut interactive: BTreeMap<FurnitureCategory, &str> = BTreeMap::new();

        for item in &furniture {
            if !ids.insert(item.id.as_str()) {
                return Err(RoomError::DuplicateFurniture(item.id.clone()));
            }
            if item.footprint.width == 0 || item.footprint.depth == 0 {
                return Err(RoomError::EmptyFootprint(item.id.clone()));
            }
            if let Some(action) = item.interaction_action
                && !action.is_pose()
            {
                return Err(RoomError::NotAPose {
                    item: item.id.clone(),
                    action,
                });
            }

            let Some((point, _)) = item.interaction() else {
                continue;
            };
            if !bounds.contains_tile(point) {
                return Err(RoomError::InteractionPointOutOfBounds {
                    item: item.id.clone(),
                    point,
                });
            }
            if let Some(blocker) = furniture
                .iter()
                .find(|other| other.solid && other.covers_tile(point))
            {
                return Err(RoomError::InteractionPointBlocked {
                    item: item.id.clone(),
                    point,
                    blocker: blocker.id.clone(),
                });
            }
            if let Some(first) = interactive.insert(item.category, item.id.as_str()) {
                return Err(RoomError::CategoryCollision {
                    category: item.category,
                    first: first.to_owned(),
                    second: item.id.clone(),
                });
            }
        }

        let start_pos = Position::from(start);
        if !collision::is_walkable(bounds, &furniture, start_pos.x, start_pos.y) {
            return Err(RoomError::StartNotWalkable(start));
        }

        debug!(
            grid_size,
            furniture_count = furniture.len(),
            interactive_count = interactive.len(),
            "Room layout validated"
        );

        Ok(Self {
            grid_size,
            bounds,
            start,
            furniture,
        })
    }

    /// All placed furniture.
    pub fn furniture_list(&self) -> &[FurnitureItem] {
        &self.furniture
    }

    /// Inclusive walkable range.
    pub const fn grid_bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Grid extent in tiles.
    pub const fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// The character's start tile.
    pub const fn start(&self) -> Tile {
        self.start
    }

    /// Look up a furniture item by id.
    pub fn get(&self, id: &str) -> Option<&FurnitureItem> {
        self.furniture.iter().find(|item| item.id == id)
    }

    // -------------------------------------------------------------------
    // Collision
    // -------------------------------------------------------------------

    /// Whether the character may occupy `(x, y)`.
    pub fn is_walkable(&self, x: f64, y: f64) -> bool {
        collision::is_walkable(self.bounds, &self.furniture, x, y)
    }

    /// Whether every tile a continuous position overlaps is walkable.
    pub fn is_clear(&self, position: Position) -> bool {
        collision::is_clear(self.bounds, &self.furniture, position)
    }

    // -------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------

    /// The item whose interaction point matches `position`.
    pub fn find_interaction_at(
        &self,
        position: Position,
        tolerance: f64,
    ) -> Option<&FurnitureItem> {
        interaction::find_interaction_at(&self.furniture, position, tolerance)
    }

    /// The interaction point of the interactive item in `category`.
    pub fn resolve_target_for(&self, category: FurnitureCategory) -> Option<Tile> {
        interaction::resolve_target_for(&self.furniture, category)
    }

    /// Resolve a backend target label to a tile.
    pub fn resolve_target_object(&self, target: &TargetObject) -> Option<Tile> {
        interaction::resolve_target_object(&self.furniture, target)
    }
}
