//! Action and pose transitions.
//!
//! `Idle` and `Walking` belong to the movement engine. Every other action is
//! a pose, entered only through [`trigger`]. A pose lasts until one of:
//!
//! - another trigger overrides it,
//! - the same pose is triggered again (a cancel, see [`cancel_pose`]),
//! - movement starts,
//! - its timer runs out ([`tick_pose`]), unless the pose is persistent.

use std::collections::BTreeSet;
use std::time::Duration;

use eunoia_room::RoomLayout;
use eunoia_types::{Action, Position};
use tracing::debug;

use crate::character::CharacterState;
use crate::config::PoseConfig;
use crate::movement;

/// How long poses last and which ones never expire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosePolicy {
    /// Lifetime of an expiring pose.
    pub duration: Duration,
    /// Poses held until explicitly replaced or cancelled.
    pub persistent: BTreeSet<Action>,
}

impl PosePolicy {
    /// Whether `action` reverts to idle on its own.
    pub fn expires(&self, action: Action) -> bool {
        action.is_pose() && !self.persistent.contains(&action)
    }
}

impl From<&PoseConfig> for PosePolicy {
    fn from(config: &PoseConfig) -> Self {
        Self {
            duration: Duration::from_millis(config.duration_ms),
            persistent: config.persistent.iter().copied().collect(),
        }
    }
}

impl Default for PosePolicy {
    fn default() -> Self {
        Self::from(&PoseConfig::default())
    }
}

/// What a trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The requested action is now active.
    Started {
        /// Action that was replaced.
        from: Action,
    },
    /// The requested pose was already held, so it was cancelled.
    Cancelled {
        /// Whether the character was nudged off the furniture.
        nudged: bool,
    },
    /// `Walking` cannot be triggered directly.
    Ignored,
}

/// Explicitly set the character's action.
///
/// Overrides whatever is active, including travel, which is settled first.
/// Triggering the pose already held cancels it instead. `anchor` is the
/// display tile for furniture poses; it is ignored for non-poses.
pub fn trigger(
    character: &mut CharacterState,
    layout: &RoomLayout,
    policy: &PosePolicy,
    action: Action,
    anchor: Option<Position>,
) -> TriggerOutcome {
    if action == Action::Walking {
        return TriggerOutcome::Ignored;
    }
    if action.is_pose() && character.action == action {
        let nudged = cancel_pose(character, layout);
        return TriggerOutcome::Cancelled { nudged };
    }

    let from = character.action;
    if character.is_moving() {
        movement::settle(character);
    }
    character.action = action;
    character.anchor = if action.is_pose() { anchor } else { None };
    character.pose_remaining = policy.expires(action).then_some(policy.duration);
    debug!(%from, to = %action, "Action triggered");
    TriggerOutcome::Started { from }
}

/// Drop the current pose and step one tile away from the furniture.
///
/// The nudge goes opposite the current facing and is skipped when that tile
/// is not walkable. Facing is left unchanged. Returns whether the nudge
/// happened.
pub fn cancel_pose(character: &mut CharacterState, layout: &RoomLayout) -> bool {
    let from = character.action;
    character.action = Action::Idle;
    character.anchor = None;
    character.pose_remaining = None;

    let nudge = character.position.rounded().stepped(character.direction.opposite());
    let nudged = layout.is_walkable(nudge.x, nudge.y);
    if nudged {
        character.position = nudge;
    }
    debug!(%from, nudged, at = %character.position, "Pose cancelled");
    nudged
}

/// Count down an expiring pose. Returns `true` when it expired this frame.
pub fn tick_pose(character: &mut CharacterState, elapsed: Duration) -> bool {
    let Some(remaining) = character.pose_remaining else {
        return false;
    };
    let remaining = remaining.saturating_sub(elapsed);
    if remaining.is_zero() {
        debug!(action = %character.action, "Pose expired");
        character.action = Action::Idle;
        character.anchor = None;
        character.pose_remaining = None;
        true
    } else {
        character.pose_remaining = Some(remaining);
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eunoia_room::create_starting_room;
    use eunoia_types::{Direction, Tile};

    use super::*;
    use crate::movement::{MovementParams, begin_travel};

    fn room() -> RoomLayout {
        create_starting_room().unwrap()
    }

    #[test]
    fn default_policy_keeps_furniture_rest_poses() {
        let policy = PosePolicy::default();
        assert!(!policy.expires(Action::Sitting));
        assert!(!policy.expires(Action::Sleeping));
        assert!(!policy.expires(Action::Breathing));
        assert!(policy.expires(Action::Drinking));
        assert!(policy.expires(Action::Happy));
        assert!(!policy.expires(Action::Idle));
        assert_eq!(policy.duration, Duration::from_secs(5));
    }

    #[test]
    fn trigger_sets_pose_and_anchor() {
        let layout = room();
        let mut c = CharacterState::new(Tile::new(13, 7));
        let out = trigger(
            &mut c,
            &layout,
            &PosePolicy::default(),
            Action::Sleeping,
            Some(Position::new(15.0, 7.0)),
        );
        assert_eq!(out, TriggerOutcome::Started { from: Action::Idle });
        assert_eq!(c.action(), Action::Sleeping);
        assert_eq!(c.display_position(), Position::new(15.0, 7.0));
        assert_eq!(c.position(), Position::new(13.0, 7.0));
        assert!(c.pose_remaining().is_none());
    }

    #[test]
    fn walking_cannot_be_triggered() {
        let layout = room();
        let mut c = CharacterState::new(Tile::new(10, 10));
        let out = trigger(&mut c, &layout, &PosePolicy::default(), Action::Walking, None);
        assert_eq!(out, TriggerOutcome::Ignored);
        assert_eq!(c.action(), Action::Idle);
    }

    #[test]
    fn trigger_preempts_travel() {
        let layout = room();
        let mut c = CharacterState::new(Tile::new(10, 10));
        begin_travel(&mut c, &layout, Position::new(13.0, 10.0)).unwrap();
        for _ in 0..12 {
            movement::advance_travel(&mut c, &layout, MovementParams::default());
        }
        trigger(&mut c, &layout, &PosePolicy::default(), Action::Happy, None);
        assert_eq!(c.action(), Action::Happy);
        assert!(!c.is_moving());
        assert_eq!(c.position(), Position::new(11.0, 10.0));
    }

    #[test]
    fn same_pose_twice_cancels_with_nudge() {
        let layout = room();
        let policy = PosePolicy::default();
        let mut c = CharacterState::new(Tile::new(10, 10));
        c.direction = Direction::Right;
        trigger(&mut c, &layout, &policy, Action::Sitting, None);
        let out = trigger(&mut c, &layout, &policy, Action::Sitting, None);
        assert_eq!(out, TriggerOutcome::Cancelled { nudged: true });
        assert_eq!(c.action(), Action::Idle);
        // Facing right, so the nudge goes left: y - 1.
        assert_eq!(c.position(), Position::new(10.0, 9.0));
        assert_eq!(c.direction(), Direction::Right);
    }

    #[test]
    fn nudge_is_skipped_when_blocked() {
        let layout = room();
        let policy = PosePolicy::default();
        // Facing up at (13, 7); the nudge would go down into the bed.
        let mut c = CharacterState::new(Tile::new(13, 7));
        c.direction = Direction::Up;
        trigger(&mut c, &layout, &policy, Action::Sleeping, None);
        let out = trigger(&mut c, &layout, &policy, Action::Sleeping, None);
        assert_eq!(out, TriggerOutcome::Cancelled { nudged: false });
        assert_eq!(c.position(), Position::new(13.0, 7.0));
        assert_eq!(c.action(), Action::Idle);
    }

    #[test]
    fn different_pose_overrides_instead_of_cancelling() {
        let layout = room();
        let policy = PosePolicy::default();
        let mut c = CharacterState::new(Tile::new(10, 10));
        trigger(&mut c, &layout, &policy, Action::Sitting, None);
        let out = trigger(&mut c, &layout, &policy, Action::Happy, None);
        assert_eq!(out, TriggerOutcome::Started { from: Action::Sitting });
        assert_eq!(c.position(), Position::new(10.0, 10.0));
    }

    #[test]
    fn expiring_pose_reverts_after_duration() {
        let layout = room();
        let policy = PosePolicy::default();
        let mut c = CharacterState::new(Tile::new(10, 10));
        trigger(&mut c, &layout, &policy, Action::Drinking, None);
        assert!(!tick_pose(&mut c, Duration::from_millis(4_900)));
        assert_eq!(c.action(), Action::Drinking);
        assert!(tick_pose(&mut c, Duration::from_millis(100)));
        assert_eq!(c.action(), Action::Idle);
        assert_eq!(c.position(), Position::new(10.0, 10.0));
    }

    #[test]
    fn persistent_pose_never_expires() {
        let layout = room();
        let policy = PosePolicy::default();
        let mut c = CharacterState::new(Tile::new(10, 10));
        trigger(&mut c, &layout, &policy, Action::Breathing, None);
        assert!(!tick_pose(&mut c, Duration::from_secs(600)));
        assert_eq!(c.action(), Action::Breathing);
    }
}
