//! Character movement, action state machine, and frame-driven session for
//! the Eunoia room.
//!
//! This crate owns everything that changes while the room is running. The
//! host calls into a [`RoomSession`] on key presses, clicks, and backend
//! replies, and steps it once per display frame.
//!
//! # Modules
//!
//! - [`character`] -- The character's position, facing, action, and motion.
//! - [`clock`] -- Frame counter with checked arithmetic.
//! - [`config`] -- Configuration loading from `eunoia-config.yaml` into
//!   strongly-typed structs.
//! - [`input`] -- Key name to [`InputCommand`] mapping.
//! - [`instruction`] -- Backend instruction to [`Plan`] resolution.
//! - [`movement`] -- Continuous travel and discrete steps.
//! - [`reply`] -- Lenient reply decoding, fallback, and the
//!   [`ReplySource`] trait with [`ScriptedReplies`].
//! - [`session`] -- [`RoomSession`], the frame-driven room.
//! - [`state_machine`] -- Pose triggers, cancellation, and expiry.
//!
//! [`InputCommand`]: input::InputCommand
//! [`Plan`]: instruction::Plan
//! [`ReplySource`]: reply::ReplySource
//! [`ScriptedReplies`]: reply::ScriptedReplies
//! [`RoomSession`]: session::RoomSession

pub mod character;
pub mod clock;
pub mod config;
pub mod input;
pub mod instruction;
pub mod movement;
pub mod reply;
pub mod session;
pub mod state_machine;
