//! Bitboard chess engine built on magic attack tables.
//!
//! The [`board`] module holds the position, move generation and search. The
//! [`Engine`] handle wraps them with a background search thread, a time budget
//! and an optional worker pool for splitting the root across threads.

pub mod board;
pub mod engine;
pub mod pool;
pub mod sync;
pub mod timer;

pub use board::{BitBoard, Color, Move, MoveList, Piece, PieceKind, Position, SearchResult, Square};
pub use engine::{ConfigError, Engine, EngineConfig, EngineError, SearchInfo};
