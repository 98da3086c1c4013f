//! Castling rights type.

use std::ops::{BitAnd, BitOr, BitXor, Not};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

/// One castling right. The discriminants are the bits used in `CastleRights`
/// and in the castle-type field of a packed `Move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Castle {
    WhiteKingSide = 1 << 0,
    WhiteQueenSide = 1 << 1,
    BlackKingSide = 1 << 2,
    BlackQueenSide = 1 << 3,
}

impl Castle {
    pub const ALL: [Castle; 4] = [
        Castle::WhiteKingSide,
        Castle::WhiteQueenSide,
        Castle::BlackKingSide,
        Castle::BlackQueenSide,
    ];

    #[inline]
    #[must_use]
    pub const fn new(color: Color, kingside: bool) -> Castle {
        match (color, kingside) {
            (Color::White, true) => Castle::WhiteKingSide,
            (Color::White, false) => Castle::WhiteQueenSide,
            (Color::Black, true) => Castle::BlackKingSide,
            (Color::Black, false) => Castle::BlackQueenSide,
        }
    }

    #[inline]
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Castle> {
        match code {
            1 => Some(Castle::WhiteKingSide),
            2 => Some(Castle::WhiteQueenSide),
            4 => Some(Castle::BlackKingSide),
            8 => Some(Castle::BlackQueenSide),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Castle::WhiteKingSide | Castle::WhiteQueenSide => Color::White,
            Castle::BlackKingSide | Castle::BlackQueenSide => Color::Black,
        }
    }

    /// King (from, to) squares
    #[must_use]
    pub const fn king_squares(self) -> (Square, Square) {
        match self {
            Castle::WhiteKingSide => (Square::E1, Square::G1),
            Castle::WhiteQueenSide => (Square::E1, Square::C1),
            Castle::BlackKingSide => (Square::E8, Square::G8),
            Castle::BlackQueenSide => (Square::E8, Square::C8),
        }
    }

    /// Rook (from, to) squares
    #[must_use]
    pub const fn rook_squares(self) -> (Square, Square) {
        match self {
            Castle::WhiteKingSide => (Square::H1, Square::F1),
            Castle::WhiteQueenSide => (Square::A1, Square::D1),
            Castle::BlackKingSide => (Square::H8, Square::F8),
            Castle::BlackQueenSide => (Square::A8, Square::D8),
        }
    }

    /// Squares between king and rook that must be empty
    #[must_use]
    pub const fn path_mask(self) -> u64 {
        match self {
            Castle::WhiteKingSide => 0x60,
            Castle::WhiteQueenSide => 0x0E,
            Castle::BlackKingSide => 0x60 << 56,
            Castle::BlackQueenSide => 0x0E << 56,
        }
    }

    /// Squares the king stands on, crosses, or lands on; none may be attacked
    #[must_use]
    pub const fn king_walk_mask(self) -> u64 {
        match self {
            Castle::WhiteKingSide => 0x70,
            Castle::WhiteQueenSide => 0x1C,
            Castle::BlackKingSide => 0x70 << 56,
            Castle::BlackQueenSide => 0x1C << 56,
        }
    }
}

/// Castling rights represented as a 4-bit set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastleRights(u8);

impl CastleRights {
    const MASK: u8 = 0x0F;

    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastleRights(0)
    }

    /// All castling rights
    #[must_use]
    pub const fn all() -> Self {
        CastleRights(Self::MASK)
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, castle: Castle) -> bool {
        self.0 & castle.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, castle: Castle) {
        self.0 |= castle.bit();
    }

    #[inline]
    pub fn remove(&mut self, castle: Castle) {
        self.0 &= !castle.bit();
    }

    /// Drop both rights of `color`
    #[inline]
    pub fn revoke_side(&mut self, color: Color) {
        self.remove(Castle::new(color, true));
        self.remove(Castle::new(color, false));
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the raw bitmask value
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Create from raw bitmask value; bits above the low four are dropped
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        CastleRights(value & Self::MASK)
    }
}

impl From<Castle> for CastleRights {
    fn from(castle: Castle) -> Self {
        CastleRights(castle.bit())
    }
}

impl BitAnd for CastleRights {
    type Output = CastleRights;
    fn bitand(self, rhs: Self) -> Self {
        CastleRights(self.0 & rhs.0)
    }
}

impl BitOr for CastleRights {
    type Output = CastleRights;
    fn bitor(self, rhs: Self) -> Self {
        CastleRights(self.0 | rhs.0)
    }
}

impl BitXor for CastleRights {
    type Output = CastleRights;
    fn bitxor(self, rhs: Self) -> Self {
        CastleRights(self.0 ^ rhs.0)
    }
}

impl Not for CastleRights {
    type Output = CastleRights;
    fn not(self) -> Self {
        CastleRights(!self.0 & Self::MASK)
    }
}

impl BitOr for Castle {
    type Output = CastleRights;
    fn bitor(self, rhs: Self) -> CastleRights {
        CastleRights(self.bit() | rhs.bit())
    }
}

impl BitOr<Castle> for CastleRights {
    type Output = CastleRights;
    fn bitor(self, rhs: Castle) -> CastleRights {
        CastleRights(self.0 | rhs.bit())
    }
}

impl BitAnd<Castle> for CastleRights {
    type Output = CastleRights;
    fn bitand(self, rhs: Castle) -> CastleRights {
        CastleRights(self.0 & rhs.bit())
    }
}

impl BitXor<Castle> for CastleRights {
    type Output = CastleRights;
    fn bitxor(self, rhs: Castle) -> CastleRights {
        CastleRights(self.0 ^ rhs.bit())
    }
}

impl Not for Castle {
    type Output = CastleRights;
    fn not(self) -> CastleRights {
        !CastleRights::from(self)
    }
}
