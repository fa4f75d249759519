//! Default room for the Eunoia companion.
//!
//! A 20x20 grid with a two-tile wall margin, furnished with a rug for
//! breathing exercises, a desk with a drink, a chair, a bed, and a plant.
//! The character starts in the middle of the room.

use eunoia_types::{Action, Footprint, FurnitureCategory, FurnitureItem, GridBounds, Tile};

use crate::error::RoomError;
use crate::layout::RoomLayout;

/// Grid extent of the default room.
pub const GRID_SIZE: i32 = 20;

/// Where the character appears at session start.
pub const START_TILE: Tile = Tile::new(10, 10);

/// Helper to build a furniture item.
fn item(
    id: &str,
    category: FurnitureCategory,
    origin: Tile,
    footprint: Footprint,
    solid: bool,
) -> FurnitureItem {
    FurnitureItem {
        id: id.to_owned(),
        category,
        origin,
        footprint,
        solid,
        interaction_point: None,
        interaction_action: None,
        pose_anchor: None,
    }
}

/// Helper to attach an interaction to an item.
fn with_interaction(
    mut item: FurnitureItem,
    point: Tile,
    action: Action,
    anchor: Option<Tile>,
) -> FurnitureItem {
    item.interaction_point = Some(point);
    item.interaction_action = Some(action);
    item.pose_anchor = anchor;
    item
}

/// The default furniture list.
pub fn default_furniture() -> Vec<FurnitureItem> {
    vec![
        // Walkable rug; the breathing mat.
        with_interaction(
            item("rug", FurnitureCategory::Rug, Tile::new(7, 7), Footprint::new(6, 5), false),
            Tile::new(11, 11),
            Action::Breathing,
            None,
        ),
        // Desk with a drink; stand just below it.
        with_interaction(
            item("desk", FurnitureCategory::Desk, Tile::new(7, 6), Footprint::new(4, 2), true),
            Tile::new(8, 8),
            Action::Drinking,
            None,
        ),
        // Chair; stand beside it, drawn on the seat while sitting.
        with_interaction(
            item("chair", FurnitureCategory::Chair, Tile::new(11, 8), Footprint::new(1, 1), true),
            Tile::new(11, 9),
            Action::Sitting,
            Some(Tile::new(11, 8)),
        ),
        // Bed; stand at its side, drawn on the middle of the mattress.
        with_interaction(
            item("bed", FurnitureCategory::Bed, Tile::new(14, 5), Footprint::new(3, 5), true),
            Tile::new(13, 7),
            Action::Sleeping,
            Some(Tile::new(15, 7)),
        ),
        item("plant1", FurnitureCategory::Plant, Tile::new(5, 12), Footprint::new(1, 1), true),
    ]
}

/// Build and validate the default room.
///
/// # Errors
///
/// Returns [`RoomError`] if the default furniture fails validation, which
/// would indicate a bug in this module.
pub fn create_starting_room() -> Result<RoomLayout, RoomError> {
    RoomLayout::new(GRID_SIZE, GridBounds::default(), START_TILE, default_furniture())
}
