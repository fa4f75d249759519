//! Shared type definitions for the Eunoia room engine.
//!
//! This crate is the single source of truth for types used across the
//! workspace. Types defined here flow downstream to `TypeScript` via `ts-rs`
//! for the web front-end that renders the room.
//!
//! # Modules
//!
//! - [`geometry`] -- Positions, tiles, footprints, bounds, directions
//! - [`enums`] -- Character actions, furniture categories, exercise filters
//! - [`structs`] -- Furniture items, character views, engine events
//! - [`instruction`] -- Backend instructions and their label vocabularies

pub mod enums;
pub mod geometry;
pub mod instruction;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, ExerciseCategory, FurnitureCategory};
pub use geometry::{Direction, Footprint, GridBounds, Position, Tile};
pub use instruction::{
    ActionLabel, EmotionLabel, FALLBACK_REPLY, Instruction, NO_TARGET_LABEL, TargetObject,
};
pub use structs::{CharacterView, CopingRequest, FurnitureItem, RoomEvent};

#[cfg(test)]
mod tests {
    //! Binding generation for the front-end.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are exported. Files land in `bindings/`
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::geometry::Position::export_all();
        let _ = crate::geometry::Tile::export_all();
        let _ = crate::geometry::Footprint::export_all();
        let _ = crate::geometry::GridBounds::export_all();
        let _ = crate::geometry::Direction::export_all();

        let _ = crate::enums::Action::export_all();
        let _ = crate::enums::FurnitureCategory::export_all();
        let _ = crate::enums::ExerciseCategory::export_all();

        let _ = crate::structs::FurnitureItem::export_all();
        let _ = crate::structs::CharacterView::export_all();
        let _ = crate::structs::CopingRequest::export_all();
        let _ = crate::structs::RoomEvent::export_all();

        let _ = crate::instruction::Instruction::export_all();
    }
}
