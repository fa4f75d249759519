//! Continuous and discrete movement.
//!
//! # Continuous travel
//!
//! Used when the backend sends the character somewhere. Each frame,
//! [`advance_travel`] moves the character a fixed increment toward its
//! target: the x axis first, then the y axis (Manhattan movement, no
//! diagonals). Facing follows the axis being travelled: `Down`/`Up` on x,
//! `Right`/`Left` on y. Every increment is checked with
//! [`RoomLayout::is_clear`]; if it would enter a blocked tile the character
//! settles on the last clear tile and travel stops.
//!
//! # Discrete steps
//!
//! Used for keyboard control. [`step_discrete`] moves exactly one tile if
//! the destination is walkable and opens a short stride window during which
//! the action is `Walking`. Rejected steps change nothing.

use std::time::Duration;

use eunoia_room::RoomLayout;
use eunoia_types::{Action, Direction, Position};
use tracing::debug;

use crate::character::{CharacterState, Motion};
use crate::config::MovementConfig;

/// Errors from movement requests.
#[derive(Debug, thiserror::Error)]
pub enum MovementError {
    /// The requested target is outside the bounds or inside solid furniture.
    #[error("target {0} is not walkable")]
    TargetNotWalkable(Position),
}

/// Movement tuning, copied out of [`MovementConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementParams {
    /// Tiles per frame during continuous travel.
    pub step: f64,
    /// Arrival tolerance in tiles.
    pub tolerance: f64,
    /// Walking window after a discrete step.
    pub stride: Duration,
}

impl From<&MovementConfig> for MovementParams {
    fn from(config: &MovementConfig) -> Self {
        Self {
            step: config.step_per_frame,
            tolerance: config.arrival_tolerance,
            stride: config.stride(),
        }
    }
}

impl Default for MovementParams {
    fn default() -> Self {
        Self::from(&MovementConfig::default())
    }
}

/// Result of one continuous-travel frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TravelProgress {
    /// No travel in progress.
    Stationary,
    /// Moved one increment; not there yet.
    Moving,
    /// Reached the target and snapped onto it.
    Arrived(Position),
    /// The next increment was blocked; settled on the last clear tile.
    Blocked {
        /// Tile the character settled on.
        at: Position,
        /// Target that could not be reached.
        target: Position,
    },
}

/// Result of a discrete step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Moved onto the given tile.
    Moved(Position),
    /// The destination was not walkable; nothing changed.
    Rejected,
}

// ---------------------------------------------------------------------------
// Continuous travel
// ---------------------------------------------------------------------------

/// Start walking toward `target`.
///
/// Clears any pose and forces the action to `Walking`. The target is snapped
/// to the nearest tile.
///
/// # Errors
///
/// Returns [`MovementError::TargetNotWalkable`] if the target is outside the
/// bounds or inside solid furniture; the character is left untouched.
pub fn begin_travel(
    character: &mut CharacterState,
    layout: &RoomLayout,
    target: Position,
) -> Result<(), MovementError> {
    let target = target.rounded();
    if !layout.is_walkable(target.x, target.y) {
        return Err(MovementError::TargetNotWalkable(target));
    }
    debug!(from = %character.position, to = %target, "Travel started");
    character.motion = Some(Motion::Travel { target });
    character.action = Action::Walking;
    character.anchor = None;
    character.pose_remaining = None;
    Ok(())
}

/// Stop any movement and settle on the nearest tile.
///
/// A character mid-travel overlaps only clear tiles, so the nearest tile is
/// always walkable. The action reverts from `Walking` to `Idle`; any other
/// action is left alone.
pub fn settle(character: &mut CharacterState) {
    character.position = character.position.rounded();
    character.motion = None;
    if character.action == Action::Walking {
        character.action = Action::Idle;
    }
}

/// Advance continuous travel by one frame.
pub fn advance_travel(
    character: &mut CharacterState,
    layout: &RoomLayout,
    params: MovementParams,
) -> TravelProgress {
    let Some(Motion::Travel { target }) = character.motion else {
        return TravelProgress::Stationary;
    };

    let pos = character.position;
    if pos.is_near(target, params.tolerance) {
        character.position = target;
        character.motion = None;
        character.action = Action::Idle;
        debug!(at = %target, "Travel arrived");
        return TravelProgress::Arrived(target);
    }

    let mut next = pos;
    let dx = target.x - pos.x;
    let dy = target.y - pos.y;
    if dx.abs() >= params.tolerance {
        next.x += dx.signum() * params.step.min(dx.abs());
        character.direction = if dx > 0.0 { Direction::Down } else { Direction::Up };
    } else {
        // The x leg is done; pin x so the swept check sees one column.
        next.x = target.x;
        next.y += dy.signum() * params.step.min(dy.abs());
        character.direction = if dy > 0.0 { Direction::Right } else { Direction::Left };
    }

    if !layout.is_clear(next) {
        settle(character);
        debug!(at = %character.position, target = %target, "Travel blocked");
        return TravelProgress::Blocked {
            at: character.position,
            target,
        };
    }

    character.position = next;
    TravelProgress::Moving
}

// ---------------------------------------------------------------------------
// Discrete steps
// ---------------------------------------------------------------------------

/// Move one tile in `direction` if the destination is walkable.
///
/// On success the character faces `direction`, stands on the new tile, and
/// walks for the stride window. On rejection nothing changes.
pub fn step_discrete(
    character: &mut CharacterState,
    layout: &RoomLayout,
    direction: Direction,
    params: MovementParams,
) -> StepOutcome {
    let next = character.position.rounded().stepped(direction);
    if !layout.is_walkable(next.x, next.y) {
        debug!(from = %character.position, ?direction, "Step rejected");
        return StepOutcome::Rejected;
    }
    character.direction = direction;
    character.position = next;
    character.action = Action::Walking;
    character.motion = Some(Motion::Stride {
        remaining: params.stride,
    });
    character.anchor = None;
    character.pose_remaining = None;
    StepOutcome::Moved(next)
}

/// Count down the stride window. Returns `true` when it closes this frame.
pub fn tick_stride(character: &mut CharacterState, elapsed: Duration) -> bool {
    let Some(Motion::Stride { remaining }) = character.motion else {
        return false;
    };
    let remaining = remaining.saturating_sub(elapsed);
    if remaining.is_zero() {
        character.motion = None;
        if character.action == Action::Walking {
            character.action = Action::Idle;
        }
        true
    } else {
        character.motion = Some(Motion::Stride { remaining });
        false
    }
}
