//! Pseudo-legal move generation and perft.
//!
//! Generated moves respect piece movement and full castling legality but may
//! leave the mover's king in check; `Position::make_legal_move` is the filter.

mod castling;
mod pawns;
mod pieces;

use super::types::{CaptureList, Color, Move, MoveList, PieceKind};
use super::Position;

const NON_PAWN_KINDS: [PieceKind; 5] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

impl Position {
    /// All pseudo-legal moves for `side`
    #[must_use]
    pub fn generate_moves(&self, side: Color) -> MoveList {
        let mut moves = MoveList::new();
        self.pawn_moves(side, false, &mut moves);
        for kind in NON_PAWN_KINDS {
            self.piece_moves(side, kind, false, &mut moves);
        }
        self.castle_moves(side, &mut moves);
        moves
    }

    /// Pseudo-legal captures for `side`, including capturing promotions and
    /// en passant
    #[must_use]
    pub fn generate_captures(&self, side: Color) -> CaptureList {
        let mut moves = CaptureList::new();
        self.pawn_moves(side, true, &mut moves);
        for kind in NON_PAWN_KINDS {
            self.piece_moves(side, kind, true, &mut moves);
        }
        moves
    }

    /// Moves that pass the legality gate, in generation order
    #[must_use]
    pub fn legal_moves(&self, side: Color) -> MoveList {
        let mut legal = MoveList::new();
        for &mv in &self.generate_moves(side) {
            if self.make_legal_move(side, mv).is_some() {
                legal.push(mv);
            }
        }
        legal
    }

    /// Number of leaf positions exactly `depth` plies ahead
    #[must_use]
    pub fn perft(&self, side: Color, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut nodes = 0;
        for &mv in &self.generate_moves(side) {
            if let Some(next) = self.make_legal_move(side, mv) {
                nodes += if depth == 1 {
                    1
                } else {
                    next.perft(side.opponent(), depth - 1)
                };
            }
        }
        nodes
    }

    /// Perft split by legal root move
    #[must_use]
    pub fn divide(&self, side: Color, depth: u32) -> Vec<(Move, u64)> {
        let mut counts = Vec::new();
        if depth == 0 {
            return counts;
        }
        for &mv in &self.generate_moves(side) {
            if let Some(next) = self.make_legal_move(side, mv) {
                counts.push((mv, next.perft(side.opponent(), depth - 1)));
            }
        }
        counts
    }
}
