//! Tile grid, furniture, collision, and interaction resolution for the
//! Eunoia room.
//!
//! This crate models the static room: a square grid with walkable bounds,
//! furniture footprints that may block movement, and interaction points
//! where the character can use an item.
//!
//! # Modules
//!
//! - [`collision`] -- Walkability predicate and swept-position check.
//! - [`error`] -- Layout validation errors.
//! - [`interaction`] -- Interaction-point lookup, category targets, prompts.
//! - [`layout`] -- [`RoomLayout`], the validated room.
//! - [`starting_room`] -- Default furnished room.

pub mod collision;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod starting_room;

// Re-export primary types at crate root.
pub use error::RoomError;
pub use interaction::{TILE_TOLERANCE, interaction_prompt};
pub use layout::RoomLayout;
pub use starting_room::{GRID_SIZE, START_TILE, create_starting_room, default_furniture};
