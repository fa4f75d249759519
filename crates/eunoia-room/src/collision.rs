//! Walkability checks against grid bounds and solid furniture.
//!
//! All checks are pure functions of the furniture list and the walkable
//! bounds. A tile is walkable when it lies inside the bounds and outside
//! every solid footprint (half-open per axis).

use eunoia_types::{FurnitureItem, GridBounds, Position};

/// Whether the character may occupy `(x, y)`.
///
/// The evaluation order is:
/// 1. Outside the walkable bounds: not walkable.
/// 2. Inside the footprint of any solid item: not walkable.
/// 3. Otherwise walkable.
pub fn is_walkable(bounds: GridBounds, furniture: &[FurnitureItem], x: f64, y: f64) -> bool {
    if !bounds.contains(x, y) {
        return false;
    }
    blocker_at(furniture, x, y).is_none()
}

/// The first solid item whose footprint covers `(x, y)`, if any.
pub fn blocker_at(furniture: &[FurnitureItem], x: f64, y: f64) -> Option<&FurnitureItem> {
    furniture.iter().find(|item| item.solid && item.covers(x, y))
}

/// Whether every tile overlapped by a continuous position is walkable.
///
/// Used for each increment of continuous travel: a character halfway
/// between two tiles must have both of them clear.
pub fn is_clear(bounds: GridBounds, furniture: &[FurnitureItem], position: Position) -> bool {
    position
        .covered_tiles()
        .all(|tile| is_walkable(bounds, furniture, tile.x, tile.y))
}
