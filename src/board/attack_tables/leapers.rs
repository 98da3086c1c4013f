//! Precomputed attack tables for leaper pieces (knights, kings, pawns).

use crate::board::BitBoard;

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const WHITE_PAWN_DELTAS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const BLACK_PAWN_DELTAS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

fn leaper_table(deltas: &[(i8, i8)]) -> [BitBoard; 64] {
    let mut attacks = [BitBoard::EMPTY; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as i8;
        let f = (sq % 8) as i8;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                slot.set_rank_file(nr as u8, nf as u8);
            }
        }
    }
    attacks
}

pub(super) fn knight_table() -> [BitBoard; 64] {
    leaper_table(&KNIGHT_DELTAS)
}

pub(super) fn king_table() -> [BitBoard; 64] {
    leaper_table(&KING_DELTAS)
}

/// Squares attacked by a pawn, indexed `[color][square]`
pub(super) fn pawn_table() -> [[BitBoard; 64]; 2] {
    [
        leaper_table(&WHITE_PAWN_DELTAS),
        leaper_table(&BLACK_PAWN_DELTAS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn knight_in_corner_has_two_targets() {
        let table = knight_table();
        assert_eq!(table[0].bit_count(), 2);
        assert!(table[0].test(Square(10)));
        assert!(table[0].test(Square(17)));
        assert_eq!(table[27].bit_count(), 8);
    }

    #[test]
    fn king_counts() {
        let table = king_table();
        assert_eq!(table[0].bit_count(), 3);
        assert_eq!(table[4].bit_count(), 5);
        assert_eq!(table[36].bit_count(), 8);
    }

    #[test]
    fn pawn_attacks_do_not_wrap_files() {
        let table = pawn_table();
        // white pawn on a2 attacks b3 only; black pawn on h7 attacks g6 only
        assert_eq!(table[0][8], BitBoard(1 << 17));
        assert_eq!(table[1][55], BitBoard(1 << 46));
        assert!(table[0][56].is_empty());
        assert!(table[1][3].is_empty());
    }
}
