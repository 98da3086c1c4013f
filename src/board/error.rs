//! Error types for board operations.

use thiserror::Error;

use super::types::Square;

/// A FEN or board string that does not describe a usable position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// Unknown piece letter in the placement field
    #[error("invalid piece character '{found}' in position")]
    InvalidPiece { found: char },
    /// Placement field does not have exactly 8 ranks
    #[error("position must have 8 ranks, found {found}")]
    BadRankCount { found: usize },
    /// A rank describes more or fewer than 8 files
    #[error("rank {rank} describes {files} files, expected 8")]
    BadRankWidth { rank: usize, files: usize },
    /// Board string is not 64 characters
    #[error("board string must be 64 characters, found {found}")]
    BadLength { found: usize },
    /// Side-to-move field is not `w` or `b`
    #[error("invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSide { found: String },
    /// Unknown castling letter
    #[error("invalid castling character '{found}'")]
    InvalidCastling { found: char },
    /// En passant field is not a square on rank 3 or 6
    #[error("invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },
    /// Each side needs exactly one king
    #[error("expected one king per side, found {white} white and {black} black")]
    KingCount { white: u32, black: u32 },
    /// Pawns can never stand on the first or last rank
    #[error("pawn on back rank square {square}")]
    PawnOnBackRank { square: Square },
}

/// Errors raised while parsing or applying a move
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Invalid algebraic square notation
    #[error("invalid square notation '{notation}'")]
    InvalidSquare { notation: String },
    /// Square index outside 0..64
    #[error("square index {index} out of range")]
    SquareOutOfRange { index: u8 },
    /// No legal move connects the two squares
    #[error("no legal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },
}

/// The magic search gave up on a square
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no {slider} magic found for square {square} after {attempts} attempts")]
pub struct MagicError {
    pub slider: &'static str,
    pub square: u8,
    pub attempts: u32,
}
