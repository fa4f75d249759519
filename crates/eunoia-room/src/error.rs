//! Error types for the `eunoia-room` crate.
//!
//! Every variant is a configuration error detected while building a
//! [`RoomLayout`]. Once a layout exists, queries against it are infallible.
//!
//! [`RoomLayout`]: crate::layout::RoomLayout

use eunoia_types::{Action, FurnitureCategory, GridBounds, Tile};

/// Errors that can occur while validating a room layout.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The walkable bounds are empty, negative, or exceed the grid.
    #[error("walkable bounds {}..={} do not fit a {grid_size}-tile grid", .bounds.min, .bounds.max)]
    InvalidBounds {
        /// The configured bounds.
        bounds: GridBounds,
        /// The configured grid extent.
        grid_size: i32,
    },

    /// Two furniture items share an identifier.
    #[error("duplicate furniture id: {0}")]
    DuplicateFurniture(String),

    /// A furniture item has a zero-sized footprint.
    #[error("furniture {0} has an empty footprint")]
    EmptyFootprint(String),

    /// A furniture interaction names an action that is not a pose.
    #[error("furniture {item} interaction action {action} is not a pose")]
    NotAPose {
        /// The furniture item.
        item: String,
        /// The offending action.
        action: Action,
    },

    /// An interaction point lies inside a solid footprint.
    #[error("interaction point {point} of {item} lies inside solid furniture {blocker}")]
    InteractionPointBlocked {
        /// The furniture item owning the interaction point.
        item: String,
        /// The interaction point.
        point: Tile,
        /// The solid item covering it.
        blocker: String,
    },

    /// An interaction point lies outside the walkable bounds.
    #[error("interaction point {point} of {item} is outside the walkable bounds")]
    InteractionPointOutOfBounds {
        /// The furniture item owning the interaction point.
        item: String,
        /// The interaction point.
        point: Tile,
    },

    /// Two interactive items share a category, making category targets
    /// ambiguous.
    #[error("category {category} is interactive on both {first} and {second}")]
    CategoryCollision {
        /// The shared category.
        category: FurnitureCategory,
        /// First item with the category.
        first: String,
        /// Second item with the category.
        second: String,
    },

    /// The character's start tile is not walkable.
    #[error("start tile {0} is not walkable")]
    StartNotWalkable(Tile),
}
