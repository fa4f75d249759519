//! The room session: one character in one room, advanced frame by frame.
//!
//! [`RoomSession`] owns the layout, the character, and every timer. It never
//! schedules itself. The host drives it through four entry points:
//!
//! 1. [`step`] once per display frame, with the time since the last frame.
//! 2. [`handle_input`] for key presses (discrete movement and interact).
//! 3. [`set_target`] for click-to-move (continuous travel).
//! 4. [`apply_instruction`] for backend replies.
//!
//! Each entry point returns the [`RoomEvent`]s the host must react to.
//!
//! [`step`]: RoomSession::step
//! [`handle_input`]: RoomSession::handle_input
//! [`set_target`]: RoomSession::set_target
//! [`apply_instruction`]: RoomSession::apply_instruction

use std::time::Duration;

use eunoia_room::{RoomLayout, TILE_TOLERANCE, interaction_prompt};
use eunoia_types::{
    Action, CharacterView, CopingRequest, Direction, Instruction, Position, RoomEvent,
};
use tracing::{debug, info, warn};

use crate::character::CharacterState;
use crate::clock::{ClockError, FrameClock};
use crate::config::EngineConfig;
use crate::input::InputCommand;
use crate::instruction::interpret;
use crate::movement::{self, MovementError, MovementParams, StepOutcome, TravelProgress};
use crate::state_machine::{self, PosePolicy, TriggerOutcome};

/// Events produced by one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame number just completed.
    pub frame: u64,
    /// Events raised during the frame, in order.
    pub events: Vec<RoomEvent>,
}

/// What to do when the current travel arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArrivalIntent {
    /// Action to trigger; `None` means use whatever furniture is at the
    /// arrival tile.
    action: Option<Action>,
}

/// A coping-exercise navigation waiting for its delay to pass.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingNavigation {
    remaining: Duration,
    request: CopingRequest,
}

/// A running room.
#[derive(Debug)]
pub struct RoomSession {
    layout: RoomLayout,
    character: CharacterState,
    clock: FrameClock,
    movement: MovementParams,
    poses: PosePolicy,
    navigation_delay: Duration,
    /// Only set while travelling.
    pending_arrival: Option<ArrivalIntent>,
    pending_navigation: Option<PendingNavigation>,
    prompt: Option<String>,
    events: Vec<RoomEvent>,
}

impl RoomSession {
    /// Start a session in `layout` with the character on the start tile.
    pub fn new(layout: RoomLayout, config: &EngineConfig) -> Self {
        let character = CharacterState::new(layout.start());
        info!(
            start = %layout.start(),
            furniture = layout.furniture_list().len(),
            "Room session started"
        );
        let mut session = Self {
            layout,
            character,
            clock: FrameClock::new(),
            movement: MovementParams::from(&config.movement),
            poses: PosePolicy::from(&config.poses),
            navigation_delay: config.coping.navigation_delay(),
            pending_arrival: None,
            pending_navigation: None,
            prompt: None,
            events: Vec::new(),
        };
        session.prompt = session.current_prompt();
        session
    }

    /// The room.
    pub const fn layout(&self) -> &RoomLayout {
        &self.layout
    }

    /// The character.
    pub const fn character(&self) -> &CharacterState {
        &self.character
    }

    /// Render-ready snapshot of the character.
    pub fn view(&self) -> CharacterView {
        self.character.view()
    }

    /// The interaction prompt currently shown, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Frames advanced so far.
    pub const fn frame(&self) -> u64 {
        self.clock.frame()
    }

    /// Session time accumulated across all frames.
    pub const fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Whether a coping-exercise navigation is waiting to fire.
    pub const fn has_pending_navigation(&self) -> bool {
        self.pending_navigation.is_some()
    }

    // -----------------------------------------------------------------------
    // Entry points
    // -----------------------------------------------------------------------

    /// Walk to `target`, or stop walking with `None`.
    ///
    /// On arrival, the furniture interaction at the target tile (if any) is
    /// invoked.
    ///
    /// # Errors
    ///
    /// Returns [`MovementError::TargetNotWalkable`] if the target is outside
    /// the bounds or inside solid furniture. Nothing changes in that case.
    pub fn set_target(
        &mut self,
        target: Option<Position>,
    ) -> Result<Vec<RoomEvent>, MovementError> {
        let before = self.character.action();
        match target {
            Some(target) => {
                movement::begin_travel(&mut self.character, &self.layout, target)?;
                self.pending_arrival = Some(ArrivalIntent { action: None });
            }
            None => movement::settle(&mut self.character),
        }
        Ok(self.finish(before))
    }

    /// Apply a key press.
    ///
    /// A move while holding a furniture pose gets up instead of moving. A
    /// move during travel abandons the travel first.
    pub fn handle_input(&mut self, command: InputCommand) -> Vec<RoomEvent> {
        match command {
            InputCommand::Move(direction) => self.step_towards(direction),
            InputCommand::Interact => self.interact(),
        }
    }

    /// The interact key: get up from a held pose, or use the furniture at
    /// the current tile.
    pub fn interact(&mut self) -> Vec<RoomEvent> {
        let before = self.character.action();
        if before.is_pose() {
            state_machine::cancel_pose(&mut self.character, &self.layout);
        } else if let Some((action, anchor)) = self.interaction_here() {
            state_machine::trigger(&mut self.character, &self.layout, &self.poses, action, anchor);
        } else {
            debug!(at = %self.character.position(), "Nothing to interact with");
        }
        self.finish(before)
    }

    /// Explicitly set the character's action, as a front-end button would.
    pub fn trigger(&mut self, action: Action) -> Vec<RoomEvent> {
        let before = self.character.action();
        let anchor = self.anchor_for(action);
        let outcome =
            state_machine::trigger(&mut self.character, &self.layout, &self.poses, action, anchor);
        if outcome == TriggerOutcome::Ignored {
            debug!(%action, "Ignored trigger for engine-controlled action");
        }
        self.finish(before)
    }

    /// Act on a backend instruction.
    ///
    /// Speaks the reply, walks to the target furniture if one resolves and
    /// the character is not already there, and triggers the resolved action
    /// on arrival (or immediately). `BREATHE` also schedules a navigation to
    /// the coping exercises, replacing any already pending.
    pub fn apply_instruction(&mut self, instruction: &Instruction) -> Vec<RoomEvent> {
        let before = self.character.action();
        let plan = interpret(instruction, &self.layout);
        debug!(
            action = %plan.action,
            target = ?plan.target,
            navigate = plan.navigation.is_some(),
            "Applying instruction"
        );

        if let Some(text) = plan.speech {
            self.events.push(RoomEvent::Speak { text });
        }

        if let Some(request) = plan.navigation {
            if self.pending_navigation.is_some() {
                debug!("Replacing pending coping navigation");
            }
            self.pending_navigation = Some(PendingNavigation {
                remaining: self.navigation_delay,
                request,
            });
        }

        let destination = plan
            .target
            .map(Position::from)
            .filter(|t| !self.character.position().is_near(*t, self.movement.tolerance));
        let travelling = destination.is_some_and(|target| {
            match movement::begin_travel(&mut self.character, &self.layout, target) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Instruction target unreachable, acting in place");
                    false
                }
            }
        });

        if travelling {
            self.pending_arrival = Some(ArrivalIntent {
                action: Some(plan.action),
            });
        } else {
            let anchor = self.anchor_for(plan.action);
            state_machine::trigger(
                &mut self.character,
                &self.layout,
                &self.poses,
                plan.action,
                anchor,
            );
        }
        self.finish(before)
    }

    /// Advance one frame.
    ///
    /// Order within a frame: continuous travel (and any arrival action),
    /// stride window, pose expiry, coping navigation.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::FrameOverflow`] if the frame counter is
    /// exhausted.
    pub fn step(&mut self, elapsed: Duration) -> Result<FrameReport, ClockError> {
        let frame = self.clock.advance(elapsed)?;
        let before = self.character.action();

        match movement::advance_travel(&mut self.character, &self.layout, self.movement) {
            TravelProgress::Stationary | TravelProgress::Moving => {}
            TravelProgress::Arrived(position) => {
                self.events.push(RoomEvent::Arrived { position });
                self.on_arrival();
            }
            TravelProgress::Blocked { at, target } => {
                self.events.push(RoomEvent::Blocked {
                    position: at,
                    target,
                });
            }
        }

        movement::tick_stride(&mut self.character, elapsed);
        state_machine::tick_pose(&mut self.character, elapsed);
        self.tick_navigation(elapsed);

        Ok(FrameReport {
            frame,
            events: self.finish(before),
        })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn step_towards(&mut self, direction: Direction) -> Vec<RoomEvent> {
        let before = self.character.action();
        if before.is_pose() && !before.is_emotion() {
            state_machine::cancel_pose(&mut self.character, &self.layout);
            return self.finish(before);
        }
        if self.character.target().is_some() {
            movement::settle(&mut self.character);
        }
        if movement::step_discrete(&mut self.character, &self.layout, direction, self.movement)
            == StepOutcome::Rejected
        {
            debug!(?direction, "Move rejected");
        }
        self.finish(before)
    }

    fn on_arrival(&mut self) {
        let Some(intent) = self.pending_arrival.take() else {
            return;
        };
        let resolved = match intent.action {
            Some(action) => Some((action, self.anchor_for(action))),
            None => self.interaction_here(),
        };
        if let Some((action, anchor)) = resolved {
            state_machine::trigger(&mut self.character, &self.layout, &self.poses, action, anchor);
        }
    }

    fn tick_navigation(&mut self, elapsed: Duration) {
        let Some(pending) = self.pending_navigation.as_mut() else {
            return;
        };
        pending.remaining = pending.remaining.saturating_sub(elapsed);
        if pending.remaining.is_zero()
            && let Some(pending) = self.pending_navigation.take()
        {
            info!(
                category = ?pending.request.category,
                query = ?pending.request.query,
                "Navigating to coping exercises"
            );
            self.events.push(RoomEvent::NavigateToExercises {
                request: pending.request,
            });
        }
    }

    /// The furniture interaction at the current tile, with its display
    /// anchor.
    fn interaction_here(&self) -> Option<(Action, Option<Position>)> {
        let item = self
            .layout
            .find_interaction_at(self.character.position(), TILE_TOLERANCE)?;
        let (_, action) = item.interaction()?;
        Some((action, item.pose_anchor.map(Position::from)))
    }

    /// Display anchor for `action` if the current tile is the interaction
    /// point of furniture offering it.
    fn anchor_for(&self, action: Action) -> Option<Position> {
        self.layout
            .find_interaction_at(self.character.position(), TILE_TOLERANCE)
            .filter(|item| item.interaction_action == Some(action))
            .and_then(|item| item.pose_anchor)
            .map(Position::from)
    }

    fn current_prompt(&self) -> Option<String> {
        if self.character.target().is_some() || !self.character.can_interact() {
            return None;
        }
        self.layout
            .find_interaction_at(self.character.position(), TILE_TOLERANCE)
            .and_then(interaction_prompt)
    }

    /// Close out an entry point: record the action change, refresh the
    /// prompt, and hand back the accumulated events.
    fn finish(&mut self, before: Action) -> Vec<RoomEvent> {
        if self.character.target().is_none() {
            self.pending_arrival = None;
        }
        let after = self.character.action();
        if after != before {
            self.events.push(RoomEvent::ActionChanged {
                from: before,
                to: after,
            });
        }
        let prompt = self.current_prompt();
        if prompt != self.prompt {
            self.prompt.clone_from(&prompt);
            self.events.push(RoomEvent::PromptChanged { prompt });
        }
        std::mem::take(&mut self.events)
    }
}
