//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the frame loop.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: eunoia_core::config::ConfigError,
    },

    /// The configured room failed validation.
    #[error("room error: {source}")]
    Room {
        /// The underlying layout error.
        #[from]
        source: eunoia_room::RoomError,
    },

    /// The frame clock overflowed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: eunoia_core::clock::ClockError,
    },

    /// The HTTP client could not be built.
    #[error("chat backend error: {source}")]
    Backend {
        /// The underlying client error.
        #[from]
        source: reqwest::Error,
    },

    /// Reading console input failed.
    #[error("console error: {source}")]
    Console {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
