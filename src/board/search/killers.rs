//! Killer move history.

use crate::board::types::{Move, MAX_PLY};

#[derive(Clone, Copy, Debug, Default)]
struct KillerSlot {
    moves: [Move; 2],
    next: u8,
}

/// Two quiet cutoff moves per ply, replaced round-robin
#[derive(Clone, Debug)]
pub struct KillerMoveHistory {
    slots: [KillerSlot; MAX_PLY],
}

impl KillerMoveHistory {
    #[must_use]
    pub fn new() -> Self {
        KillerMoveHistory {
            slots: [KillerSlot::default(); MAX_PLY],
        }
    }

    /// Remember `mv` as a killer at `ply`. Captures and duplicates are ignored,
    /// as are plies beyond the table.
    pub fn record(&mut self, ply: usize, mv: Move) {
        if mv.is_capture() || mv.is_null() {
            return;
        }
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        if slot.moves.contains(&mv) {
            return;
        }
        slot.moves[slot.next as usize] = mv;
        slot.next ^= 1;
    }

    /// Killers stored at `ply`; unused entries are `Move::NULL`
    #[inline]
    #[must_use]
    pub fn at(&self, ply: usize) -> [Move; 2] {
        self.slots.get(ply).map_or([Move::NULL; 2], |slot| slot.moves)
    }

    #[inline]
    #[must_use]
    pub fn is_killer(&self, ply: usize, mv: Move) -> bool {
        !mv.is_null() && self.at(ply).contains(&mv)
    }

    pub fn clear(&mut self) {
        self.slots = [KillerSlot::default(); MAX_PLY];
    }
}

impl Default for KillerMoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Square};

    fn knight(to: u8) -> Move {
        Move::quiet(Piece::WhiteKnight, Square(1), Square(to))
    }

    #[test]
    fn replaces_round_robin() {
        let mut killers = KillerMoveHistory::new();
        killers.record(3, knight(16));
        killers.record(3, knight(18));
        assert_eq!(killers.at(3), [knight(16), knight(18)]);
        killers.record(3, knight(11));
        assert_eq!(killers.at(3), [knight(11), knight(18)]);
        killers.record(3, knight(16));
        assert_eq!(killers.at(3), [knight(11), knight(16)]);
        assert_eq!(killers.at(2), [Move::NULL; 2]);
    }

    #[test]
    fn ignores_captures_and_duplicates() {
        let mut killers = KillerMoveHistory::new();
        let capture = Move::capture(Piece::WhiteKnight, Piece::BlackPawn, Square(1), Square(18));
        killers.record(0, capture);
        assert!(!killers.is_killer(0, capture));
        killers.record(0, knight(16));
        killers.record(0, knight(16));
        assert_eq!(killers.at(0), [knight(16), Move::NULL]);
        assert!(!killers.is_killer(0, Move::NULL));
    }

    #[test]
    fn out_of_range_ply_is_ignored() {
        let mut killers = KillerMoveHistory::new();
        killers.record(MAX_PLY + 5, knight(16));
        assert_eq!(killers.at(MAX_PLY + 5), [Move::NULL; 2]);
        killers.record(1, knight(16));
        killers.clear();
        assert!(!killers.is_killer(1, knight(16)));
    }
}
