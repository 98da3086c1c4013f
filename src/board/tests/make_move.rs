//! Copy-make correctness: every move updates boards, rights and the en passant
//! target on a fresh copy and leaves the source untouched.

use super::{fen, find_move, play};
use crate::board::{Castle, Color, Piece, Position, Square};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn double_push_sets_target_and_next_move_clears_it() {
    let pos = Position::start();
    let after = play(&pos, Color::White, "e2e4");
    assert_eq!(after.en_passant(), Some(sq("e3")));
    assert!(pos.en_passant().is_none());

    let reply = play(&after, Color::Black, "g8f6");
    assert!(reply.en_passant().is_none());
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let (pos, side) = fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let mv = find_move(&pos, side, "e5f6");
    assert!(mv.is_en_passant());
    assert_eq!(mv.captured(), Piece::BlackPawn);

    let after = pos.make_legal_move(side, mv).unwrap();
    assert_eq!(after.piece_at(sq("f6")), Piece::WhitePawn);
    assert_eq!(after.piece_at(sq("f5")), Piece::NoPiece);
    assert_eq!(after.piece_at(sq("e5")), Piece::NoPiece);
    assert!(after.is_consistent());
}

#[test]
fn en_passant_needs_the_target_from_the_last_move() {
    // same pawns, but the target was not set by the previous move
    let (pos, side) = fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3");
    assert!(pos.legal_moves(side).iter().all(|mv| !mv.is_en_passant()));
}

#[test]
fn promotions_offer_four_pieces() {
    let (pos, side) = fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    let promos: Vec<String> = pos
        .legal_moves(side)
        .iter()
        .filter(|mv| mv.is_promotion())
        .map(ToString::to_string)
        .collect();
    assert_eq!(promos, ["a7a8q", "a7a8r", "a7a8b", "a7a8n"]);

    let after = play(&pos, side, "a7a8n");
    assert_eq!(after.piece_at(sq("a8")), Piece::WhiteKnight);
    assert!(after.pieces(Piece::WhitePawn).is_empty());
}

#[test]
fn promotion_capture_replaces_the_victim() {
    let (pos, side) = fen("1r5k/P7/8/8/8/8/8/K7 w - - 0 1");
    let mv = find_move(&pos, side, "a7b8q");
    assert!(mv.is_capture() && mv.is_promotion());
    let after = pos.make_legal_move(side, mv).unwrap();
    assert_eq!(after.piece_at(sq("b8")), Piece::WhiteQueen);
    assert!(after.pieces(Piece::BlackRook).is_empty());
    assert!(after.is_consistent());
}

#[test]
fn rook_moves_and_captures_revoke_single_rights() {
    let (pos, side) = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

    let after = play(&pos, side, "h1h5");
    assert!(!after.castle_rights().contains(Castle::WhiteKingSide));
    assert!(after.castle_rights().contains(Castle::WhiteQueenSide));

    let after = play(&pos, side, "a1a8");
    assert!(!after.castle_rights().contains(Castle::WhiteQueenSide));
    assert!(!after.castle_rights().contains(Castle::BlackQueenSide));
    assert!(after.castle_rights().contains(Castle::BlackKingSide));
}

#[test]
fn king_move_revokes_both_rights() {
    let (pos, side) = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let after = play(&pos, side, "e1d1");
    assert!(!after.castle_rights().contains(Castle::WhiteKingSide));
    assert!(!after.castle_rights().contains(Castle::WhiteQueenSide));
    assert!(after.castle_rights().contains(Castle::BlackKingSide));
}

#[test]
fn pinned_piece_cannot_leave_the_line() {
    let (pos, side) = fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
    let mv = pos
        .generate_moves(side)
        .iter()
        .copied()
        .find(|mv| mv.to_string() == "e2c3")
        .unwrap();
    assert!(pos.make_legal_move(side, mv).is_none());
    assert!(pos.legal_moves(side).iter().all(|mv| mv.from() != sq("e2")));
}

#[test]
fn source_position_is_unchanged() {
    let (pos, side) = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = pos;
    for &mv in &pos.legal_moves(side) {
        let _ = pos.make_legal_move(side, mv);
    }
    assert_eq!(pos, before);
}
