//! Chess board representation and game logic.
//!
//! Positions are bitboard value types: the search copies a position, applies
//! one move to the copy and discards it on backtrack. Sliding attacks come from
//! magic bitboards built once per process.
//!
//! # Example
//! ```
//! use magic_chess::board::{Color, Position};
//!
//! let pos = Position::start();
//! let moves = pos.legal_moves(Color::White);
//! println!("Starting position has {} legal moves", moves.len());
//! ```

pub mod attack_tables;
mod error;
mod eval;
mod fen;
mod movegen;
mod position;
pub mod search;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use attack_tables::{AttackTables, DEFAULT_MAGIC_SEED};
pub use error::{MagicError, MoveError, PositionError};
pub use eval::MOBILITY_WEIGHT;
pub use fen::{parse_fen, START_FEN};
pub use position::Position;
pub use types::{
    BitBoard, BitBoardIter, CaptureList, Castle, CastleRights, Color, Move, MoveList, Piece,
    PieceKind, ScoredMove, ScoredMoveList, Square, PIECE_COUNT,
};

// Search entry points
pub use search::{
    DepthOutcome, KillerMoveHistory, SearchOptions, SearchResult, Searcher, CHECKMATE, INFINITY,
};
