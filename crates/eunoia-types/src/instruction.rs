//! Instructions received from the conversational backend.
//!
//! The backend answers every chat message with a flat JSON object:
//!
//! ```json
//! { "reply": "...", "emotion": "CALM", "action": "SLEEP", "targetObject": "BED" }
//! ```
//!
//! All four fields are free text. [`Instruction`] keeps them verbatim; the
//! label enums in this module turn them into closed vocabularies with an
//! explicit `Unrecognized` arm, so lenient handling of unknown labels is a
//! visible branch rather than a silent default.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Action, FurnitureCategory};

/// Label the backend uses for "no target".
pub const NO_TARGET_LABEL: &str = "NONE";

/// Line spoken when the backend cannot be reached.
pub const FALLBACK_REPLY: &str = "I'm feeling a bit quiet right now, but I'm here.";

/// A raw instruction as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    /// Text for the speech bubble.
    #[serde(default)]
    pub reply: String,
    /// Emotion label (e.g. `"HAPPY"`).
    #[serde(default)]
    pub emotion: String,
    /// Action label (e.g. `"SLEEP"`).
    #[serde(default)]
    pub action: String,
    /// Furniture label (e.g. `"BED"`) or `"NONE"`.
    #[serde(default = "default_target_object")]
    pub target_object: String,
}

fn default_target_object() -> String {
    NO_TARGET_LABEL.to_owned()
}

impl Instruction {
    /// Build an instruction from its four labels.
    pub fn new(
        reply: impl Into<String>,
        emotion: impl Into<String>,
        action: impl Into<String>,
        target_object: impl Into<String>,
    ) -> Self {
        Self {
            reply: reply.into(),
            emotion: emotion.into(),
            action: action.into(),
            target_object: target_object.into(),
        }
    }

    /// The instruction applied when the backend is unreachable: a reassuring
    /// line, an anxious pose, no movement.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_REPLY, "ANXIOUS", "IDLE", NO_TARGET_LABEL)
    }

    /// Parsed action label.
    pub fn action_label(&self) -> ActionLabel {
        ActionLabel::parse(&self.action)
    }

    /// Parsed emotion label.
    pub fn emotion_label(&self) -> EmotionLabel {
        EmotionLabel::parse(&self.emotion)
    }

    /// Parsed target label.
    pub fn target(&self) -> TargetObject {
        TargetObject::parse(&self.target_object)
    }
}

/// Normalize a free-text label: trim, uppercase, hyphens and spaces to
/// underscores.
fn normalize(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Action labels
// ---------------------------------------------------------------------------

/// The backend's action vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionLabel {
    /// `SLEEP` or `LIE_DOWN`.
    Sleep,
    /// `SIT`.
    Sit,
    /// `DRINK`.
    Drink,
    /// `BREATHE` or `MEDITATE`.
    Breathe,
    /// `IDLE`.
    Idle,
    /// `HAPPY`.
    Happy,
    /// `SAD`.
    Sad,
    /// Anything else, kept verbatim for logging.
    Unrecognized(String),
}

impl ActionLabel {
    /// Parse a label case-insensitively.
    pub fn parse(label: &str) -> Self {
        match normalize(label).as_str() {
            "SLEEP" | "LIE_DOWN" => Self::Sleep,
            "SIT" => Self::Sit,
            "DRINK" => Self::Drink,
            "BREATHE" | "MEDITATE" => Self::Breathe,
            "IDLE" => Self::Idle,
            "HAPPY" => Self::Happy,
            "SAD" => Self::Sad,
            _ => Self::Unrecognized(label.to_owned()),
        }
    }

    /// The engine action this label maps to. Unrecognized labels map to
    /// [`Action::Idle`].
    pub const fn action(&self) -> Action {
        match self {
            Self::Sleep => Action::Sleeping,
            Self::Sit => Action::Sitting,
            Self::Drink => Action::Drinking,
            Self::Breathe => Action::Breathing,
            Self::Happy => Action::Happy,
            Self::Sad => Action::Sad,
            Self::Idle | Self::Unrecognized(_) => Action::Idle,
        }
    }
}

// ---------------------------------------------------------------------------
// Emotion labels
// ---------------------------------------------------------------------------

/// The backend's emotion vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmotionLabel {
    /// A label naming one of the emotion poses.
    Recognized(Action),
    /// Anything else, including the empty string.
    Unrecognized(String),
}

impl EmotionLabel {
    /// Parse a label case-insensitively.
    pub fn parse(label: &str) -> Self {
        let normalized = normalize(label).to_ascii_lowercase();
        Action::ALL
            .into_iter()
            .find(|a| a.is_emotion() && a.name() == normalized)
            .map_or_else(|| Self::Unrecognized(label.to_owned()), Self::Recognized)
    }

    /// The emotion pose, if recognized.
    pub const fn pose(&self) -> Option<Action> {
        match self {
            Self::Recognized(action) => Some(*action),
            Self::Unrecognized(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Target labels
// ---------------------------------------------------------------------------

/// Where the backend wants the character to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetObject {
    /// `NONE` or empty: stay put.
    None,
    /// A furniture category.
    Furniture(FurnitureCategory),
    /// Anything else, kept verbatim for logging.
    Unrecognized(String),
}

impl TargetObject {
    /// Parse a label case-insensitively.
    ///
    /// Besides the category names, accepts the backend's room vocabulary:
    /// `WATER_STATION` is the desk and `MAT` is the rug.
    pub fn parse(label: &str) -> Self {
        match normalize(label).as_str() {
            "" | "NONE" => Self::None,
            "BED" => Self::Furniture(FurnitureCategory::Bed),
            "CHAIR" => Self::Furniture(FurnitureCategory::Chair),
            "DESK" | "WATER_STATION" => Self::Furniture(FurnitureCategory::Desk),
            "RUG" | "MAT" => Self::Furniture(FurnitureCategory::Rug),
            "PLANT" => Self::Furniture(FurnitureCategory::Plant),
            "TABLE_ITEM" | "TABLEITEM" => Self::Furniture(FurnitureCategory::TableItem),
            _ => Self::Unrecognized(label.to_owned()),
        }
    }

    /// The furniture category, if any.
    pub const fn category(&self) -> Option<FurnitureCategory> {
        match self {
            Self::Furniture(category) => Some(*category),
            Self::None | Self::Unrecognized(_) => None,
        }
    }
}
