//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `BitBoard` - 64-bit square sets
//! - `Piece`, `PieceKind` and `Color` - the 13 board occupants
//! - `Square` - compact board square index (u8)
//! - `Move`, `MoveList` and `ScoredMoveList` - packed moves and containers
//! - `Castle` and `CastleRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{BitBoard, BitBoardIter};
pub use castling::{Castle, CastleRights};
pub use moves::{CaptureList, Move, MoveList, ScoredMove, ScoredMoveList};
pub use piece::{Color, Piece, PieceKind, PIECE_COUNT};
pub use square::Square;

pub(crate) use moves::MAX_PLY;
pub(crate) use piece::PROMOTION_KINDS;
