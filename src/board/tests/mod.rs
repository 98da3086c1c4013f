//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts for move generation correctness
//! - `make_move.rs` - Copy-make state updates
//! - `check.rs` - Attack caches against a brute-force attack scan
//! - `castling.rs` - Castling legality and rights
//! - `search.rs` - Alpha-beta, mate scores, cancellation and root splitting
//! - `proptest.rs` - Property-based tests

mod make_move;

use crate::board::{Color, Move, Position};

/// Position and side from a FEN that is known to be valid
fn fen(text: &str) -> (Position, Color) {
    crate::board::parse_fen(text).unwrap_or_else(|err| panic!("bad test FEN {text}: {err}"))
}

/// The legal move of `side` written `uci`
fn find_move(pos: &Position, side: Color, uci: &str) -> Move {
    pos.legal_moves(side)
        .iter()
        .copied()
        .find(|mv| mv.to_string() == uci)
        .unwrap_or_else(|| panic!("{uci} is not legal for {side}"))
}

/// Play `uci` and return the new position
fn play(pos: &Position, side: Color, uci: &str) -> Position {
    let mv = find_move(pos, side, uci);
    pos.make_legal_move(side, mv)
        .unwrap_or_else(|| panic!("{uci} rejected by the legality gate"))
}
