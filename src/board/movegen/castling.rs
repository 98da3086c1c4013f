use super::super::types::{Castle, Color, Move, MoveList};
use super::super::Position;

impl Position {
    /// Castles that pass [`Position::can_castle`]. The walk check here is the
    /// only place the square the king crosses is tested.
    pub(super) fn castle_moves(&self, side: Color, moves: &mut MoveList) {
        for kingside in [true, false] {
            let castle = Castle::new(side, kingside);
            if self.can_castle(castle) {
                moves.push(Move::castle(castle));
            }
        }
    }
}
