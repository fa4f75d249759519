//! Turning a backend [`Instruction`] into a plan for the session.
//!
//! An instruction carries four free-text labels. The plan resolves them
//! against the room:
//!
//! | Label          | Resolves to                                          |
//! |----------------|------------------------------------------------------|
//! | `reply`        | a speech line, if non-empty                          |
//! | `targetObject` | the interaction tile of that furniture category      |
//! | `action`       | the pose to hold on arrival (or now, with no target) |
//! | `emotion`      | the pose to show when `action` resolves to idle      |
//!
//! A `BREATHE` action additionally requests the coping-exercise view, with
//! a filter guessed from keywords in the reply.

use eunoia_room::RoomLayout;
use eunoia_types::{
    Action, ActionLabel, CopingRequest, ExerciseCategory, Instruction, TargetObject, Tile,
};
use tracing::debug;

/// What the session should do with one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Line for the speech bubble.
    pub speech: Option<String>,
    /// Where to walk before acting.
    pub target: Option<Tile>,
    /// Action to take on arrival, or immediately without a target.
    pub action: Action,
    /// Coping-exercise navigation to schedule.
    pub navigation: Option<CopingRequest>,
}

/// Resolve `instruction` against `layout`.
///
/// Unknown labels never fail: an unrecognized action behaves as `IDLE`, an
/// unrecognized emotion shows nothing, and an unrecognized or absent target
/// means acting in place.
pub fn interpret(instruction: &Instruction, layout: &RoomLayout) -> Plan {
    let label = instruction.action_label();
    let emotion = instruction.emotion_label();
    let target_label = instruction.target();

    if let ActionLabel::Unrecognized(raw) = &label {
        debug!(label = %raw, "Unrecognized action label, treating as idle");
    }
    if let TargetObject::Unrecognized(raw) = &target_label {
        debug!(label = %raw, "Unrecognized target label, ignoring");
    }

    let action = match label.action() {
        Action::Idle => emotion.pose().unwrap_or(Action::Idle),
        pose => pose,
    };
    let target = layout.resolve_target_object(&target_label);
    let navigation =
        (label == ActionLabel::Breathe).then(|| coping_request_for(&instruction.reply));
    let speech = Some(instruction.reply.trim())
        .filter(|reply| !reply.is_empty())
        .map(str::to_owned);

    Plan {
        speech,
        target,
        action,
        navigation,
    }
}

/// Pick a coping-exercise filter from keywords in `reply`.
///
/// Case-insensitive; the first matching keyword wins. No match means no
/// filter at all.
pub fn coping_request_for(reply: &str) -> CopingRequest {
    let text = reply.to_lowercase();
    if text.contains("anx") {
        CopingRequest {
            category: Some(ExerciseCategory::All),
            query: Some("anxiety".to_owned()),
        }
    } else if text.contains("breath") {
        category_only(ExerciseCategory::Breathing)
    } else if text.contains("ground") {
        category_only(ExerciseCategory::Grounding)
    } else if text.contains("stress") {
        category_only(ExerciseCategory::Relaxation)
    } else {
        CopingRequest::default()
    }
}

const fn category_only(category: ExerciseCategory) -> CopingRequest {
    CopingRequest {
        category: Some(category),
        query: None,
    }
}
