//! Interaction-point lookup and category target resolution.
//!
//! Each interactive furniture item has one interaction point: the tile the
//! character must stand on to use it. This module answers two questions:
//! which item's point is the character standing on, and where should the
//! character walk when the backend names an item by category.

use eunoia_types::{Action, FurnitureCategory, FurnitureItem, Position, TargetObject, Tile};

/// Tolerance, in tiles, for matching a continuous position to a tile.
pub const TILE_TOLERANCE: f64 = 0.1;

/// The item whose interaction point matches `position` within `tolerance`.
///
/// Items without an interaction action are ignored. Callers are expected to
/// skip this lookup while a pose is held.
pub fn find_interaction_at(
    furniture: &[FurnitureItem],
    position: Position,
    tolerance: f64,
) -> Option<&FurnitureItem> {
    furniture.iter().find(|item| {
        item.interaction()
            .is_some_and(|(point, _)| position.is_near(Position::from(point), tolerance))
    })
}

/// The interaction point of the first interactive item in `category`.
///
/// Layout validation guarantees at most one interactive item per category.
pub fn resolve_target_for(
    furniture: &[FurnitureItem],
    category: FurnitureCategory,
) -> Option<Tile> {
    furniture
        .iter()
        .filter(|item| item.category == category)
        .find_map(|item| item.interaction().map(|(point, _)| point))
}

/// Resolve a backend target label to a tile.
///
/// `NONE` and unrecognized labels resolve to `None`, as do categories with
/// no interactive item in this room.
pub fn resolve_target_object(furniture: &[FurnitureItem], target: &TargetObject) -> Option<Tile> {
    target
        .category()
        .and_then(|category| resolve_target_for(furniture, category))
}

/// The prompt shown while the character stands on `item`'s interaction
/// point, e.g. `"Press SPACE to sleep"`.
pub fn interaction_prompt(item: &FurnitureItem) -> Option<String> {
    let (_, action) = item.interaction()?;
    Some(format!("Press SPACE to {}", verb(action)))
}

/// Imperative verb for a pose, used in prompts.
const fn verb(action: Action) -> &'static str {
    match action {
        Action::Sitting => "sit",
        Action::Sleeping => "sleep",
        Action::Drinking => "drink",
        Action::Breathing => "breathe",
        other => other.name(),
    }
}

#[cfg(test)]
mod tests {
    use eunoia_types::Footprint;

    use super::*;

    fn chair() -> FurnitureItem {
        FurnitureItem {
            id: "chair".to_owned(),
            category: FurnitureCategory::Chair,
            origin: Tile::new(11, 8),
            footprint: Footprint::new(1, 1),
            solid: true,
            interaction_point: Some(Tile::new(11, 9)),
            interaction_action: Some(Action::Sitting),
            pose_anchor: Some(Tile::new(11, 8)),
        }
    }

    fn plant() -> FurnitureItem {
        FurnitureItem {
            id: "plant1".to_owned(),
            category: FurnitureCategory::Plant,
            origin: Tile::new(5, 12),
            footprint: Footprint::new(1, 1),
            solid: true,
            interaction_point: None,
            interaction_action: None,
            pose_anchor: None,
        }
    }

    #[test]
    fn finds_item_within_tolerance() {
        let furniture = vec![plant(), chair()];
        let found = find_interaction_at(&furniture, Position::new(11.04, 8.97), TILE_TOLERANCE);
        assert_eq!(found.map(|i| i.id.as_str()), Some("chair"));
        let near_miss = find_interaction_at(&furniture, Position::new(11.2, 9.0), TILE_TOLERANCE);
        assert!(near_miss.is_none());
    }

    #[test]
    fn resolves_category_to_interaction_point() {
        let furniture = vec![plant(), chair()];
        assert_eq!(
            resolve_target_for(&furniture, FurnitureCategory::Chair),
            Some(Tile::new(11, 9))
        );
        assert_eq!(resolve_target_for(&furniture, FurnitureCategory::Plant), None);
        assert_eq!(resolve_target_for(&furniture, FurnitureCategory::Bed), None);
    }

    #[test]
    fn resolves_labels() {
        let furniture = vec![chair()];
        assert_eq!(
            resolve_target_object(&furniture, &TargetObject::parse("chair")),
            Some(Tile::new(11, 9))
        );
        assert_eq!(resolve_target_object(&furniture, &TargetObject::None), None);
        assert_eq!(
            resolve_target_object(&furniture, &TargetObject::parse("SPACESHIP")),
            None
        );
    }

    #[test]
    fn prompt_uses_verb() {
        assert_eq!(interaction_prompt(&chair()).as_deref(), Some("Press SPACE to sit"));
        assert_eq!(interaction_prompt(&plant()), None);
    }
}
