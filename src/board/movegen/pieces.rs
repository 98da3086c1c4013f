use super::super::attack_tables::tables;
use super::super::types::{BitBoard, Color, Move, MoveList, Piece, PieceKind, Square};
use super::super::Position;

impl Position {
    /// Destinations of a non-pawn piece on `from`, ignoring own-piece blocking
    #[inline]
    pub(crate) fn piece_targets(&self, kind: PieceKind, from: Square) -> BitBoard {
        let tables = tables();
        let occ = self.occupancy();
        match kind {
            PieceKind::Knight => tables.knight(from),
            PieceKind::Bishop => tables.bishop(from, occ),
            PieceKind::Rook => tables.rook(from, occ),
            PieceKind::Queen => tables.queen(from, occ),
            PieceKind::King => tables.king(from),
            PieceKind::Pawn => BitBoard::EMPTY,
        }
    }

    /// Captures first, then quiet moves, for every `kind` piece of `side`
    pub(super) fn piece_moves(
        &self,
        side: Color,
        kind: PieceKind,
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        let piece = Piece::new(side, kind);
        let enemy = self.side(side.opponent());
        let empty = !self.occupancy();

        for from in self.pieces(piece).iter() {
            let targets = self.piece_targets(kind, from);
            for to in (targets & enemy).iter() {
                moves.push(Move::capture(piece, self.piece_at(to), from, to));
            }
            if !captures_only {
                for to in (targets & empty).iter() {
                    moves.push(Move::quiet(piece, from, to));
                }
            }
        }
    }
}
