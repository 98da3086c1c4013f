//! Static evaluation: material plus mobility.

use super::types::{Color, PieceKind};
use super::Position;

/// Centipawns per square a side attacks
pub const MOBILITY_WEIGHT: i32 = 2;

const MATERIAL_KINDS: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

impl Position {
    /// Material plus mobility from White's point of view
    #[must_use]
    pub fn evaluate_white(&self) -> i32 {
        let mut score = 0;
        for kind in MATERIAL_KINDS {
            let white = self.pieces_of(Color::White, kind).bit_count() as i32;
            let black = self.pieces_of(Color::Black, kind).bit_count() as i32;
            score += (white - black) * kind.value();
        }
        let mobility = self.attacked_by(Color::White).bit_count() as i32
            - self.attacked_by(Color::Black).bit_count() as i32;
        score + mobility * MOBILITY_WEIGHT
    }

    /// Evaluation from `side`'s point of view (negamax convention)
    #[inline]
    #[must_use]
    pub fn evaluate(&self, side: Color) -> i32 {
        self.evaluate_white() * side.sign()
    }
}
