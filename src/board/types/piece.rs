//! Piece and color types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Scoring sign for evaluation (+1 for White, -1 for Black)
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Back rank for this color (0 for White, 7 for Black)
    #[inline]
    #[must_use]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Colorless piece kind, in material order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Standard material value in centipawns (king is not counted).
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    /// Lowercase FEN letter
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// One of the 13 board occupants. `NoPiece` is the zero code so an empty
/// capture field needs no initialization.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Piece {
    #[default]
    NoPiece = 0,
    WhitePawn = 1,
    WhiteKnight = 2,
    WhiteBishop = 3,
    WhiteRook = 4,
    WhiteQueen = 5,
    WhiteKing = 6,
    BlackPawn = 7,
    BlackKnight = 8,
    BlackBishop = 9,
    BlackRook = 10,
    BlackQueen = 11,
    BlackKing = 12,
}

/// Number of piece codes including `NoPiece`
pub const PIECE_COUNT: usize = 13;

impl Piece {
    /// All real pieces (no `NoPiece`) in code order
    pub const ALL: [Piece; 12] = [
        Piece::WhitePawn,
        Piece::WhiteKnight,
        Piece::WhiteBishop,
        Piece::WhiteRook,
        Piece::WhiteQueen,
        Piece::WhiteKing,
        Piece::BlackPawn,
        Piece::BlackKnight,
        Piece::BlackBishop,
        Piece::BlackRook,
        Piece::BlackQueen,
        Piece::BlackKing,
    ];

    #[inline]
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        let code = 1 + kind as u8 + 6 * color.index() as u8;
        Piece::ALL[code as usize - 1]
    }

    /// Decode a 4-bit piece code. Codes above 12 map to `None`.
    #[inline]
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Piece> {
        match code {
            0 => Some(Piece::NoPiece),
            1..=12 => Some(Piece::ALL[code as usize - 1]),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Piece::NoPiece)
    }

    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self as u8 {
            0 => None,
            1..=6 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        match self as u8 {
            0 => None,
            code => Some(PieceKind::ALL[((code - 1) % 6) as usize]),
        }
    }

    /// Material value in centipawns, 0 for `NoPiece` and kings.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        match self.kind() {
            Some(kind) => kind.value(),
            None => 0,
        }
    }

    /// Parse a FEN letter (uppercase = White)
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }

    /// FEN letter, `.` for `NoPiece`
    #[must_use]
    pub fn to_char(self) -> char {
        match (self.color(), self.kind()) {
            (Some(Color::White), Some(kind)) => kind.to_char().to_ascii_uppercase(),
            (Some(Color::Black), Some(kind)) => kind.to_char(),
            _ => '.',
        }
    }
}

/// Promotion piece kinds, queen first
pub(crate) const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_compose_from_color_and_kind() {
        assert_eq!(Piece::new(Color::White, PieceKind::Pawn), Piece::WhitePawn);
        assert_eq!(Piece::new(Color::Black, PieceKind::King), Piece::BlackKing);
        for piece in Piece::ALL {
            let color = piece.color().unwrap();
            let kind = piece.kind().unwrap();
            assert_eq!(Piece::new(color, kind), piece);
            assert_eq!(Piece::from_code(piece.code()), Some(piece));
        }
    }

    #[test]
    fn no_piece_is_zero() {
        assert_eq!(Piece::default(), Piece::NoPiece);
        assert_eq!(Piece::NoPiece.code(), 0);
        assert_eq!(Piece::NoPiece.color(), None);
        assert_eq!(Piece::NoPiece.value(), 0);
        assert_eq!(Piece::from_code(13), None);
    }

    #[test]
    fn fen_letters() {
        assert_eq!(Piece::from_char('Q'), Some(Piece::WhiteQueen));
        assert_eq!(Piece::from_char('n'), Some(Piece::BlackKnight));
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::BlackRook.to_char(), 'r');
        assert_eq!(Piece::WhiteKing.to_char(), 'K');
    }
}
