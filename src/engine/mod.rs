//! Engine handle for driving positions and background searches.
//!
//! [`Engine`] replaces a process-wide singleton: callers create as many
//! handles as they need and each owns its position, search thread and
//! optional worker pool.

mod config;
mod controller;

use std::io;

use thiserror::Error;

pub use config::{ConfigError, EngineConfig, MAX_SEARCH_DEPTH};
pub use controller::{Engine, SearchInfo};

use crate::board::{MagicError, MoveError, PositionError};

/// Errors raised by the engine handle
#[derive(Debug, Error)]
pub enum EngineError {
    /// Attack table construction failed
    #[error("attack tables: {0}")]
    Tables(#[from] MagicError),
    /// The operation needs the search to be finished
    #[error("a search is still running")]
    SearchRunning,
    /// The finished search produced no move (no legal moves, or no search yet)
    #[error("no best move available")]
    NoBestMove,
    #[error("failed to spawn thread: {0}")]
    ThreadSpawn(#[source] io::Error),
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
