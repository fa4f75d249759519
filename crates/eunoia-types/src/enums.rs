//! Enumeration types for the Eunoia room engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Character actions
// ---------------------------------------------------------------------------

/// What the character is currently doing.
///
/// `Idle` and `Walking` are engine-controlled. Everything else is a *pose*
/// set explicitly by a trigger: a furniture interaction, a remote reply,
/// or a key press.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum Action {
    // --- Engine-controlled ---
    /// Standing still.
    #[default]
    Idle,
    /// Moving between tiles.
    Walking,

    // --- Furniture poses ---
    /// Seated on a chair.
    Sitting,
    /// Lying on the bed.
    Sleeping,
    /// Holding a cup at the desk.
    Drinking,
    /// Slow breathing exercise.
    Breathing,

    // --- Emotion poses ---
    /// Smiling.
    Happy,
    /// Downcast.
    Sad,
    /// Bouncing with joy.
    Joyous,
    /// Tears.
    Crying,
    /// Shaking.
    Anxious,
    /// Uneven brow.
    Worried,
    /// Relaxed.
    Calm,
    /// Attentive and serious.
    Concerned,
    /// Energetic.
    Excited,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Idle,
        Self::Walking,
        Self::Sitting,
        Self::Sleeping,
        Self::Drinking,
        Self::Breathing,
        Self::Happy,
        Self::Sad,
        Self::Joyous,
        Self::Crying,
        Self::Anxious,
        Self::Worried,
        Self::Calm,
        Self::Concerned,
        Self::Excited,
    ];

    /// Whether this is a sustained pose rather than idle/walking.
    pub const fn is_pose(self) -> bool {
        !matches!(self, Self::Idle | Self::Walking)
    }

    /// Whether this is one of the emotion overlays.
    pub const fn is_emotion(self) -> bool {
        matches!(
            self,
            Self::Happy
                | Self::Sad
                | Self::Joyous
                | Self::Crying
                | Self::Anxious
                | Self::Worried
                | Self::Calm
                | Self::Concerned
                | Self::Excited
        )
    }

    /// Lowercase name, matching the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Sitting => "sitting",
            Self::Sleeping => "sleeping",
            Self::Drinking => "drinking",
            Self::Breathing => "breathing",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Joyous => "joyous",
            Self::Crying => "crying",
            Self::Anxious => "anxious",
            Self::Worried => "worried",
            Self::Calm => "calm",
            Self::Concerned => "concerned",
            Self::Excited => "excited",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Furniture
// ---------------------------------------------------------------------------

/// The kind of a placed furniture item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum FurnitureCategory {
    /// Potted plant; usually a solid obstacle.
    Plant,
    /// Floor rug; walkable.
    Rug,
    /// Desk with a drink on it.
    Desk,
    /// Chair.
    Chair,
    /// Bed.
    Bed,
    /// Small item standing on a table.
    TableItem,
}

impl FurnitureCategory {
    /// Uppercase label used by the chat backend for this category.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Plant => "PLANT",
            Self::Rug => "RUG",
            Self::Desk => "DESK",
            Self::Chair => "CHAIR",
            Self::Bed => "BED",
            Self::TableItem => "TABLE_ITEM",
        }
    }
}

impl core::fmt::Display for FurnitureCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Coping exercises
// ---------------------------------------------------------------------------

/// Filter category in the coping-exercise browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    /// No filter.
    All,
    /// Relaxation exercises.
    Relaxation,
    /// Breathing exercises.
    Breathing,
    /// Grounding exercises.
    Grounding,
    /// Mindfulness exercises.
    Mindfulness,
}
