//! Frame clock for the room session.
//!
//! The session never schedules itself. The host calls
//! [`RoomSession::step`] once per display frame with the real time elapsed
//! since the previous call, and the clock records both the frame count and
//! the accumulated session time.
//!
//! - The frame counter uses checked arithmetic (no silent overflow).
//! - Accumulated time saturates rather than overflowing.
//!
//! [`RoomSession::step`]: crate::session::RoomSession::step

use std::time::Duration;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Frame counter would overflow.
    #[error("frame counter overflow: cannot advance beyond u64::MAX")]
    FrameOverflow,
}

/// Counts frames and accumulated time for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameClock {
    /// Number of frames advanced so far.
    frame: u64,
    /// Total time across all frames.
    elapsed: Duration,
}

impl FrameClock {
    /// Create a clock at frame 0.
    pub const fn new() -> Self {
        Self {
            frame: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by one frame that lasted `delta`. Returns the new frame number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::FrameOverflow`] if the frame counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self, delta: Duration) -> Result<u64, ClockError> {
        self.frame = self.frame.checked_add(1).ok_or(ClockError::FrameOverflow)?;
        self.elapsed = self.elapsed.saturating_add(delta);
        Ok(self.frame)
    }

    /// Current frame number.
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Total session time.
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
