//! The character's mutable state.
//!
//! There is exactly one character per session. It is created at the room's
//! start tile, idle and facing right, and is mutated only through the
//! [`movement`] and [`state_machine`] functions, which keep the invariant
//! that `action == Walking` exactly while a [`Motion`] is in progress.
//!
//! [`movement`]: crate::movement
//! [`state_machine`]: crate::state_machine

use std::time::Duration;

use eunoia_types::{Action, CharacterView, Direction, Position, Tile};

/// An in-progress movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Continuous travel toward a target tile, one increment per frame.
    Travel {
        /// Tile being walked to.
        target: Position,
    },
    /// The walking window after a single key-press step. The position has
    /// already been committed; only the animation is still running.
    Stride {
        /// Time left before the action reverts to idle.
        remaining: Duration,
    },
}

/// Position, facing, and action of the room's character.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    /// Logical position; tile-aligned whenever no travel is in progress.
    pub(crate) position: Position,
    /// Facing direction.
    pub(crate) direction: Direction,
    /// Current action.
    pub(crate) action: Action,
    /// Movement in progress, if any.
    pub(crate) motion: Option<Motion>,
    /// Display tile while holding a furniture pose.
    pub(crate) anchor: Option<Position>,
    /// Time left before the current pose expires; `None` for persistent
    /// poses and non-poses.
    pub(crate) pose_remaining: Option<Duration>,
}

impl CharacterState {
    /// A fresh character standing on `start`, idle and facing right.
    pub fn new(start: Tile) -> Self {
        Self {
            position: Position::from(start),
            direction: Direction::Right,
            action: Action::Idle,
            motion: None,
            anchor: None,
            pose_remaining: None,
        }
    }

    /// Logical position.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Facing direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Current action.
    pub const fn action(&self) -> Action {
        self.action
    }

    /// Active travel target, if walking toward one.
    pub const fn target(&self) -> Option<Position> {
        match self.motion {
            Some(Motion::Travel { target }) => Some(target),
            _ => None,
        }
    }

    /// Whether a movement of either kind is in progress.
    pub const fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Whether interaction lookups apply (idle or walking, not posing).
    pub const fn can_interact(&self) -> bool {
        !self.action.is_pose()
    }

    /// Where to draw the character.
    pub fn display_position(&self) -> Position {
        self.anchor.unwrap_or(self.position)
    }

    /// Time left on the current pose, if it expires.
    pub const fn pose_remaining(&self) -> Option<Duration> {
        self.pose_remaining
    }

    /// Render-ready snapshot.
    pub fn view(&self) -> CharacterView {
        CharacterView {
            position: self.position,
            display_position: self.display_position(),
            direction: self.direction,
            mirrored: self.direction.is_mirrored(),
            action: self.action,
            target: self.target(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_facing_right() {
        let c = CharacterState::new(Tile::new(10, 10));
        assert_eq!(c.position(), Position::new(10.0, 10.0));
        assert_eq!(c.direction(), Direction::Right);
        assert_eq!(c.action(), Action::Idle);
        assert!(!c.is_moving());
        assert!(c.can_interact());
        assert_eq!(c.view().display_position, c.position());
        assert!(!c.view().mirrored);
    }

    #[test]
    fn facing_left_or_up_mirrors_the_sprite() {
        let mut c = CharacterState::new(Tile::new(10, 10));
        for (direction, mirrored) in [
            (Direction::Left, true),
            (Direction::Up, true),
            (Direction::Right, false),
            (Direction::Down, false),
        ] {
            c.direction = direction;
            assert_eq!(c.view().mirrored, mirrored, "{direction:?}");
        }
    }

    #[test]
    fn anchor_only_moves_the_drawing() {
        let mut c = CharacterState::new(Tile::new(13, 7));
        c.anchor = Some(Position::new(15.0, 7.0));
        assert_eq!(c.position(), Position::new(13.0, 7.0));
        assert_eq!(c.display_position(), Position::new(15.0, 7.0));
    }
}
