//! Move ordering: killers, then captures by MVV-LVA, then quiet moves.

use super::constants::{KILLER_SCORE, PROMOTION_BONUS};
use crate::board::types::{Move, MoveList, PieceKind, ScoredMoveList};

/// Capture scores indexed `[victim][attacker]`: value of the victim first,
/// cheaper attackers break ties.
const MVV_LVA: [[i32; 6]; 6] = {
    let mut table = [[0; 6]; 6];
    let mut victim = 0;
    while victim < 6 {
        let mut attacker = 0;
        while attacker < 6 {
            table[victim][attacker] = (victim as i32 + 1) * 100 + 5 - attacker as i32;
            attacker += 1;
        }
        victim += 1;
    }
    table
};

#[inline]
#[must_use]
pub fn mvv_lva(victim: PieceKind, attacker: PieceKind) -> i32 {
    MVV_LVA[victim.index()][attacker.index()]
}

/// Ordering score of one move given the killers at its ply
#[must_use]
pub fn move_score(mv: Move, killers: &[Move; 2]) -> i32 {
    let mut score = if killers.contains(&mv) {
        KILLER_SCORE
    } else if mv.is_capture() {
        match (mv.captured().kind(), mv.piece().kind()) {
            (Some(victim), Some(attacker)) => mvv_lva(victim, attacker),
            _ => 0,
        }
    } else {
        0
    };
    if mv.is_promotion() {
        score += PROMOTION_BONUS;
    }
    score
}

/// Score and stably sort `moves`, best first
#[must_use]
pub fn order_moves(moves: &MoveList, killers: &[Move; 2]) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        scored.push(mv, move_score(mv, killers));
    }
    scored.sort_by_score_desc();
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Square};

    #[test]
    fn most_valuable_victim_first() {
        assert_eq!(mvv_lva(PieceKind::Queen, PieceKind::Pawn), 505);
        assert_eq!(mvv_lva(PieceKind::Pawn, PieceKind::King), 100);
        assert!(mvv_lva(PieceKind::Rook, PieceKind::Queen) > mvv_lva(PieceKind::Knight, PieceKind::Pawn));
        assert!(mvv_lva(PieceKind::Rook, PieceKind::Pawn) > mvv_lva(PieceKind::Rook, PieceKind::Knight));
    }

    #[test]
    fn killers_then_captures_then_quiet() {
        let quiet = Move::quiet(Piece::WhiteKnight, Square(1), Square(16));
        let killer = Move::quiet(Piece::WhiteKnight, Square(1), Square(18));
        let pxq = Move::capture(Piece::WhitePawn, Piece::BlackQueen, Square(12), Square(21));
        let promo = Move::promotion(
            Piece::WhitePawn,
            Piece::NoPiece,
            Square(48),
            Square(56),
            Piece::WhiteQueen,
        );
        let mut list = MoveList::new();
        list.push(quiet);
        list.push(pxq);
        list.push(promo);
        list.push(killer);

        let ordered: Vec<Move> = order_moves(&list, &[killer, Move::NULL])
            .iter()
            .map(|s| s.mv)
            .collect();
        assert_eq!(ordered, vec![killer, pxq, promo, quiet]);
        assert_eq!(move_score(promo, &[Move::NULL; 2]), PROMOTION_BONUS);
    }
}
