//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::castling::Castle;
use super::piece::{Color, Piece, PieceKind};
use super::square::Square;

const PIECE_SHIFT: u32 = 0;
const CAPTURED_SHIFT: u32 = 4;
const FROM_SHIFT: u32 = 8;
const TO_SHIFT: u32 = 14;
const PROMOTION_SHIFT: u32 = 20;
const EP_FILE_SHIFT: u32 = 27;

const NIBBLE: u32 = 0xF;
const SQUARE_MASK: u32 = 0x3F;
const FILE_MASK: u32 = 0x7;

const FLAG_DOUBLE_PUSH: u32 = 1 << 24;
const FLAG_EN_PASSANT: u32 = 1 << 25;
const FLAG_CASTLE: u32 = 1 << 26;

/// Packed 32-bit move.
///
/// Encoding (LSB first):
/// - bits 0-3:   moving piece code, or the castle type when castling
/// - bits 4-7:   captured piece code (0 = none)
/// - bits 8-13:  from square
/// - bits 14-19: to square
/// - bits 20-23: promotion piece code (0 = none)
/// - bit 24:     double pawn push
/// - bit 25:     en passant
/// - bit 26:     castle
/// - bits 27-29: file of the pawn removed by en passant
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// The empty move, used for initialization
    pub const NULL: Move = Move(0);

    #[inline]
    const fn pack(piece: Piece, captured: Piece, from: Square, to: Square) -> u32 {
        ((piece.code() as u32) << PIECE_SHIFT)
            | ((captured.code() as u32) << CAPTURED_SHIFT)
            | ((from.0 as u32) << FROM_SHIFT)
            | ((to.0 as u32) << TO_SHIFT)
    }

    /// Non-capturing move of any piece
    #[inline]
    #[must_use]
    pub const fn quiet(piece: Piece, from: Square, to: Square) -> Self {
        Move(Self::pack(piece, Piece::NoPiece, from, to))
    }

    /// Ordinary capture of `captured` standing on `to`
    #[inline]
    #[must_use]
    pub const fn capture(piece: Piece, captured: Piece, from: Square, to: Square) -> Self {
        Move(Self::pack(piece, captured, from, to))
    }

    #[inline]
    #[must_use]
    pub const fn double_push(piece: Piece, from: Square, to: Square) -> Self {
        Move(Self::pack(piece, Piece::NoPiece, from, to) | FLAG_DOUBLE_PUSH)
    }

    /// En passant capture; the removed pawn stands on `from`'s rank and `to`'s file.
    #[inline]
    #[must_use]
    pub const fn en_passant(piece: Piece, from: Square, to: Square) -> Self {
        let victim = match piece.color() {
            Some(Color::White) => Piece::BlackPawn,
            _ => Piece::WhitePawn,
        };
        Move(
            Self::pack(piece, victim, from, to)
                | FLAG_EN_PASSANT
                | (((to.file() as u32) & FILE_MASK) << EP_FILE_SHIFT),
        )
    }

    /// Promotion, capturing when `captured` is not `NoPiece`
    #[inline]
    #[must_use]
    pub const fn promotion(
        piece: Piece,
        captured: Piece,
        from: Square,
        to: Square,
        promoted: Piece,
    ) -> Self {
        Move(Self::pack(piece, captured, from, to) | ((promoted.code() as u32) << PROMOTION_SHIFT))
    }

    /// The constant king move for a castle type
    #[inline]
    #[must_use]
    pub const fn castle(castle: Castle) -> Self {
        let (from, to) = castle.king_squares();
        Move(
            ((castle.bit() as u32) << PIECE_SHIFT)
                | ((from.0 as u32) << FROM_SHIFT)
                | ((to.0 as u32) << TO_SHIFT)
                | FLAG_CASTLE,
        )
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square(((self.0 >> TO_SHIFT) & SQUARE_MASK) as u8)
    }

    /// The moving piece; for castles this is the castling side's king
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        if self.is_castle() {
            return match self.castle_type() {
                Some(castle) => Piece::new(castle.color(), PieceKind::King),
                None => Piece::NoPiece,
            };
        }
        self.piece_field()
    }

    #[inline]
    const fn piece_field(self) -> Piece {
        match Piece::from_code(((self.0 >> PIECE_SHIFT) & NIBBLE) as u8) {
            Some(piece) => piece,
            None => Piece::NoPiece,
        }
    }

    #[inline]
    #[must_use]
    pub const fn captured(self) -> Piece {
        match Piece::from_code(((self.0 >> CAPTURED_SHIFT) & NIBBLE) as u8) {
            Some(piece) => piece,
            None => Piece::NoPiece,
        }
    }

    /// Promotion piece, `NoPiece` when not a promotion
    #[inline]
    #[must_use]
    pub const fn promoted(self) -> Piece {
        match Piece::from_code(((self.0 >> PROMOTION_SHIFT) & NIBBLE) as u8) {
            Some(piece) => piece,
            None => Piece::NoPiece,
        }
    }

    #[inline]
    #[must_use]
    pub const fn castle_type(self) -> Option<Castle> {
        if self.is_castle() {
            Castle::from_code(((self.0 >> PIECE_SHIFT) & NIBBLE) as u8)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        self.0 & FLAG_CASTLE != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_double_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PUSH != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        !self.is_castle() && !self.captured().is_none()
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        !self.promoted().is_none()
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Square of the pawn removed by an en passant capture
    #[inline]
    #[must_use]
    pub const fn en_passant_square(self) -> Square {
        let file = ((self.0 >> EP_FILE_SHIFT) & FILE_MASK) as u8;
        Square(self.from().rank() * 8 + file)
    }

    /// Raw wire value
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(f, "Move({} {}{}", self.piece().to_char(), self.from(), self.to())?;
        if self.is_promotion() {
            write!(f, "={}", self.promoted().to_char())?;
        }
        if self.is_capture() {
            write!(f, " x{}", self.captured().to_char())?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(kind) = self.promoted().kind() {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
pub(crate) const MAX_PLY: usize = 64;

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

/// Capture-only lists share the move list's fixed capacity.
pub type CaptureList = MoveList;

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

/// A scored move for move ordering.
#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of scored moves to avoid heap allocation.
#[derive(Clone, Debug)]
pub struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    #[must_use]
    pub fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: Move::NULL,
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }

    /// Stable sort, highest score first. Equal scores keep generation order.
    pub fn sort_by_score_desc(&mut self) {
        self.moves[..self.len].sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredMove> {
        self.as_slice().iter()
    }
}

impl Default for ScoredMoveList {
    fn default() -> Self {
        ScoredMoveList::new()
    }
}
