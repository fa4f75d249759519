//! Core entity structs: furniture, character views, and engine events.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Action, ExerciseCategory, FurnitureCategory};
use crate::geometry::{Direction, Footprint, Position, Tile};

// ---------------------------------------------------------------------------
// Furniture
// ---------------------------------------------------------------------------

/// One placed object in the room.
///
/// Furniture is static configuration: built once at startup and never
/// mutated for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FurnitureItem {
    /// Unique identifier within the room (e.g. `"bed"`, `"plant1"`).
    pub id: String,
    /// What kind of object this is.
    pub category: FurnitureCategory,
    /// Top-left tile of the footprint.
    pub origin: Tile,
    /// Size of the footprint in tiles.
    pub footprint: Footprint,
    /// Whether the footprint blocks movement.
    #[serde(default)]
    pub solid: bool,
    /// Tile the character must stand on to interact with this item.
    #[serde(default)]
    pub interaction_point: Option<Tile>,
    /// Pose triggered by interacting at [`interaction_point`].
    ///
    /// [`interaction_point`]: FurnitureItem::interaction_point
    #[serde(default)]
    pub interaction_action: Option<Action>,
    /// Tile the character is drawn at while holding the interaction pose
    /// (the chair seat, the middle of the mattress). The logical position
    /// stays on the interaction point.
    #[serde(default)]
    pub pose_anchor: Option<Tile>,
}

impl FurnitureItem {
    /// Whether `(x, y)` falls inside this item's footprint.
    ///
    /// Half-open on each axis: the origin is inside, `origin + size` is not.
    pub fn covers(&self, x: f64, y: f64) -> bool {
        let ox = f64::from(self.origin.x);
        let oy = f64::from(self.origin.y);
        let w = f64::from(self.footprint.width);
        let d = f64::from(self.footprint.depth);
        x >= ox && x < ox + w && y >= oy && y < oy + d
    }

    /// Whether a whole tile falls inside this item's footprint.
    pub fn covers_tile(&self, tile: Tile) -> bool {
        self.covers(f64::from(tile.x), f64::from(tile.y))
    }

    /// The interaction point and its action, when both are configured.
    pub fn interaction(&self) -> Option<(Tile, Action)> {
        self.interaction_point.zip(self.interaction_action)
    }
}

// ---------------------------------------------------------------------------
// Character view
// ---------------------------------------------------------------------------

/// Render-ready snapshot of the character for the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CharacterView {
    /// Logical position used for collision and interaction.
    pub position: Position,
    /// Where to draw the character (differs from `position` while holding a
    /// furniture pose with an anchor).
    pub display_position: Position,
    /// Facing direction.
    pub direction: Direction,
    /// Draw the sprite mirrored (facing left or up).
    pub mirrored: bool,
    /// Current action.
    pub action: Action,
    /// Active travel target, if walking toward one.
    pub target: Option<Position>,
}

// ---------------------------------------------------------------------------
// Engine events
// ---------------------------------------------------------------------------

/// Request to open the coping-exercise browser with an optional filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CopingRequest {
    /// Category to preselect.
    pub category: Option<ExerciseCategory>,
    /// Search query to prefill.
    pub query: Option<String>,
}

/// Something the host must react to after feeding input or advancing a
/// frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    /// Show `text` in the speech bubble.
    Speak {
        /// Line to display.
        text: String,
    },
    /// Switch the host UI to the coping-exercise view.
    NavigateToExercises {
        /// Filter to apply on arrival.
        request: CopingRequest,
    },
    /// The character reached its travel target.
    Arrived {
        /// Tile the character settled on.
        position: Position,
    },
    /// Travel stopped because the next increment entered a blocked tile.
    Blocked {
        /// Tile the character settled on.
        position: Position,
        /// Target that could not be reached.
        target: Position,
    },
    /// The character's action changed.
    ActionChanged {
        /// Previous action.
        from: Action,
        /// New action.
        to: Action,
    },
    /// The interaction prompt appeared, changed, or disappeared.
    PromptChanged {
        /// New prompt text, or `None` to hide it.
        prompt: Option<String>,
    },
}
