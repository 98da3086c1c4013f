use super::super::attack_tables::tables;
use super::super::types::{
    BitBoard, Color, Move, MoveList, Piece, PieceKind, Square, PROMOTION_KINDS,
};
use super::super::Position;

/// Rank masks that split a side's pawns by what they can do
struct PawnRanks {
    /// Pawns one step from promotion
    promote: BitBoard,
    /// Pawns that may still double push
    start: BitBoard,
    /// Pawns that may capture en passant
    en_passant: BitBoard,
}

const fn pawn_ranks(side: Color) -> PawnRanks {
    match side {
        Color::White => PawnRanks {
            promote: BitBoard::RANK_7,
            start: BitBoard::RANK_2,
            en_passant: BitBoard::RANK_5,
        },
        Color::Black => PawnRanks {
            promote: BitBoard::RANK_2,
            start: BitBoard::RANK_7,
            en_passant: BitBoard::RANK_4,
        },
    }
}

#[inline]
const fn forward(sq: Square, side: Color) -> Square {
    match side {
        Color::White => Square(sq.0 + 8),
        Color::Black => Square(sq.0 - 8),
    }
}

impl Position {
    pub(super) fn pawn_moves(&self, side: Color, captures_only: bool, moves: &mut MoveList) {
        let tables = tables();
        let pawn = Piece::new(side, PieceKind::Pawn);
        let pawns = self.pieces(pawn);
        let enemy = self.side(side.opponent());
        let empty = !self.occupancy();
        let ranks = pawn_ranks(side);

        for from in (pawns & ranks.promote).iter() {
            for to in (tables.pawn(side, from) & enemy).iter() {
                let captured = self.piece_at(to);
                for kind in PROMOTION_KINDS {
                    moves.push(Move::promotion(pawn, captured, from, to, Piece::new(side, kind)));
                }
            }
            let to = forward(from, side);
            if !captures_only && empty.test(to) {
                for kind in PROMOTION_KINDS {
                    moves.push(Move::promotion(pawn, Piece::NoPiece, from, to, Piece::new(side, kind)));
                }
            }
        }

        for from in (pawns & !ranks.promote).iter() {
            for to in (tables.pawn(side, from) & enemy).iter() {
                moves.push(Move::capture(pawn, self.piece_at(to), from, to));
            }
            if captures_only {
                continue;
            }
            let one = forward(from, side);
            if !empty.test(one) {
                continue;
            }
            moves.push(Move::quiet(pawn, from, one));
            if ranks.start.test(from) {
                let two = forward(one, side);
                if empty.test(two) {
                    moves.push(Move::double_push(pawn, from, two));
                }
            }
        }

        if let Some(target) = self.en_passant() {
            let victims = self.pieces_of(side.opponent(), PieceKind::Pawn);
            // pawns that could capture onto the target are those it attacks as an enemy pawn
            let capturers = pawns & ranks.en_passant & tables.pawn(side.opponent(), target);
            for from in capturers.iter() {
                let mv = Move::en_passant(pawn, from, target);
                if victims.test(mv.en_passant_square()) {
                    moves.push(mv);
                }
            }
        }
    }
}
