//! Centralized error types for the simulation.
//!
//! Errors arise at the edges (high-score persistence, host configuration)
//! or when a world invariant breaks, like the basket singleton going
//! missing. Systems report failures on the `GameError` event channel
//! rather than unwinding.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised by the high-score store.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed score data: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
