//! FEN and 64-character board string conversion.

use std::fmt::Write as _;

use super::error::PositionError;
use super::position::Position;
use super::types::{BitBoard, Castle, CastleRights, Color, Piece, PieceKind, Square};

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN into a position and the side to move.
///
/// Accepts either the placement field alone or a full FEN. With only the
/// placement, White is to move, there is no en passant target, and castling
/// rights are inferred from kings and rooks standing on their home squares.
/// Halfmove and fullmove clocks are ignored.
pub fn parse_fen(fen: &str) -> Result<(Position, Color), PositionError> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().unwrap_or("");
    let mut pos = parse_placement(placement)?;

    let side = match fields.next() {
        None => {
            pos.set_castle_rights(infer_castle_rights(&pos));
            check_pieces(&pos)?;
            return Ok((pos, Color::White));
        }
        Some("w") => Color::White,
        Some("b") => Color::Black,
        Some(other) => {
            return Err(PositionError::InvalidSide {
                found: other.to_string(),
            })
        }
    };

    let rights = match fields.next() {
        Some(field) => parse_castling(field)?,
        None => infer_castle_rights(&pos),
    };
    pos.set_castle_rights(rights);

    if let Some(field) = fields.next() {
        pos.set_en_passant(parse_en_passant(field, side)?);
    }

    check_pieces(&pos)?;
    Ok((pos, side))
}

fn parse_placement(placement: &str) -> Result<Position, PositionError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(PositionError::BadRankCount { found: ranks.len() });
    }

    let mut pos = Position::empty();
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_char(c).ok_or(PositionError::InvalidPiece { found: c })?;
            if file >= 8 {
                return Err(PositionError::BadRankWidth {
                    rank: rank_idx,
                    files: file + 1,
                });
            }
            pos.add_piece(piece, Square(rank * 8 + file as u8));
            file += 1;
        }
        if file != 8 {
            return Err(PositionError::BadRankWidth {
                rank: rank_idx,
                files: file,
            });
        }
    }
    pos.recompute_attacks();
    Ok(pos)
}

fn parse_castling(field: &str) -> Result<CastleRights, PositionError> {
    let mut rights = CastleRights::none();
    for c in field.chars() {
        match c {
            'K' => rights.insert(Castle::WhiteKingSide),
            'Q' => rights.insert(Castle::WhiteQueenSide),
            'k' => rights.insert(Castle::BlackKingSide),
            'q' => rights.insert(Castle::BlackQueenSide),
            '-' => {}
            _ => return Err(PositionError::InvalidCastling { found: c }),
        }
    }
    Ok(rights)
}

/// The target sits behind a pawn the opponent just pushed two squares
fn parse_en_passant(field: &str, side: Color) -> Result<Option<Square>, PositionError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || PositionError::InvalidEnPassant {
        found: field.to_string(),
    };
    let sq: Square = field.parse().map_err(|_| invalid())?;
    let expected_rank = match side {
        Color::White => 5,
        Color::Black => 2,
    };
    if sq.rank() != expected_rank {
        return Err(invalid());
    }
    Ok(Some(sq))
}

/// Rights implied by kings and rooks standing on their home squares
fn infer_castle_rights(pos: &Position) -> CastleRights {
    let mut rights = CastleRights::none();
    for castle in Castle::ALL {
        let color = castle.color();
        let (king_home, _) = castle.king_squares();
        let (rook_home, _) = castle.rook_squares();
        if pos.piece_at(king_home) == Piece::new(color, PieceKind::King)
            && pos.piece_at(rook_home) == Piece::new(color, PieceKind::Rook)
        {
            rights.insert(castle);
        }
    }
    rights
}

/// One king per side and no pawn on the first or last rank
fn check_pieces(pos: &Position) -> Result<(), PositionError> {
    let white = pos.pieces(Piece::WhiteKing).bit_count();
    let black = pos.pieces(Piece::BlackKing).bit_count();
    if white != 1 || black != 1 {
        return Err(PositionError::KingCount { white, black });
    }
    let pawns = pos.pieces(Piece::WhitePawn) | pos.pieces(Piece::BlackPawn);
    if let Some(square) = (pawns & (BitBoard::RANK_1 | BitBoard::RANK_8)).try_lsb() {
        return Err(PositionError::PawnOnBackRank { square });
    }
    Ok(())
}

impl Position {
    /// Parse a FEN, discarding the side to move. See [`parse_fen`].
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        parse_fen(fen).map(|(pos, _)| pos)
    }

    /// Full six-field FEN with `side` to move and zeroed clocks
    #[must_use]
    pub fn to_fen(&self, side: Color) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let piece = self.piece_at(Square(rank * 8 + file));
                if piece.is_none() {
                    empty += 1;
                    continue;
                }
                if empty > 0 {
                    let _ = write!(fen, "{empty}");
                    empty = 0;
                }
                fen.push(piece.to_char());
            }
            if empty > 0 {
                let _ = write!(fen, "{empty}");
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match side {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = self.castle_rights();
        if rights.is_empty() {
            fen.push('-');
        } else {
            for (castle, letter) in Castle::ALL.into_iter().zip(['K', 'Q', 'k', 'q']) {
                if rights.contains(castle) {
                    fen.push(letter);
                }
            }
        }

        fen.push(' ');
        match self.en_passant() {
            Some(sq) => {
                let _ = write!(fen, "{sq}");
            }
            None => fen.push('-'),
        }
        fen.push_str(" 0 1");
        fen
    }

    /// Parse a 64-character board string in square order (a1, b1, ..., h8).
    ///
    /// `.` and space are empty squares. Castling rights are inferred as for a
    /// placement-only FEN.
    pub fn from_board_string(board: &str) -> Result<Self, PositionError> {
        let chars: Vec<char> = board.chars().collect();
        if chars.len() != 64 {
            return Err(PositionError::BadLength { found: chars.len() });
        }
        let mut pos = Position::empty();
        for (idx, &c) in chars.iter().enumerate() {
            if c == '.' || c == ' ' {
                continue;
            }
            let piece = Piece::from_char(c).ok_or(PositionError::InvalidPiece { found: c })?;
            pos.add_piece(piece, Square(idx as u8));
        }
        pos.recompute_attacks();
        pos.set_castle_rights(infer_castle_rights(&pos));
        check_pieces(&pos)?;
        Ok(pos)
    }

    /// 64-character board string in square order, `.` for empty squares
    #[must_use]
    pub fn to_board_string(&self) -> String {
        (0..64u8).map(|idx| self.piece_at(Square(idx)).to_char()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_fen_matches_start_position() {
        let (pos, side) = parse_fen(START_FEN).unwrap();
        assert_eq!(pos, Position::start());
        assert_eq!(side, Color::White);
        assert_eq!(pos.to_fen(Color::White), START_FEN);
    }

    #[test]
    fn placement_only_infers_castling() {
        let pos = Position::from_fen("r3k3/8/8/8/8/8/8/4K2R").unwrap();
        assert_eq!(
            pos.castle_rights(),
            Castle::WhiteKingSide | Castle::BlackQueenSide
        );
    }

    #[test]
    fn full_fen_fields_are_read() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w Kq e6 0 2";
        let (pos, side) = parse_fen(fen).unwrap();
        assert_eq!(side, Color::White);
        assert_eq!(pos.en_passant(), Some(Square(44)));
        assert_eq!(pos.castle_rights(), Castle::WhiteKingSide | Castle::BlackQueenSide);
        assert_eq!(pos.to_fen(side), "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w Kq e6 0 1");
    }

    #[test]
    fn malformed_fens_are_rejected() {
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP"),
            Err(PositionError::BadRankCount { found: 7 })
        );
        assert_eq!(
            parse_fen("rnbqkbnr/ppppXppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(PositionError::InvalidPiece { found: 'X' })
        );
        assert!(matches!(
            parse_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(PositionError::BadRankWidth { rank: 1, .. })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(PositionError::BadRankWidth { rank: 1, files: 7 })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x"),
            Err(PositionError::InvalidSide { .. })
        ));
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KZ"),
            Err(PositionError::InvalidCastling { found: 'Z' })
        );
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4"),
            Err(PositionError::InvalidEnPassant { .. })
        ));
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/4K3"),
            Err(PositionError::KingCount { white: 1, black: 0 })
        );
    }

    #[test]
    fn pawns_on_back_ranks_are_rejected() {
        assert_eq!(
            parse_fen("4k2P/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::PawnOnBackRank { square: Square(63) })
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/p3K3"),
            Err(PositionError::PawnOnBackRank { square: Square(0) })
        );

        let mut board: Vec<char> = Position::start().to_board_string().chars().collect();
        board[0] = 'p';
        let board: String = board.into_iter().collect();
        assert_eq!(
            Position::from_board_string(&board),
            Err(PositionError::PawnOnBackRank { square: Square(0) })
        );
    }

    #[test]
    fn en_passant_rank_follows_side_to_move() {
        let after_e4 = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR";
        let (pos, _) = parse_fen(&format!("{after_e4} b KQkq e3 0 1")).unwrap();
        assert_eq!(pos.en_passant(), Some(Square(20)));
        assert!(matches!(
            parse_fen(&format!("{after_e4} w KQkq e3 0 1")),
            Err(PositionError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e6 0 2"),
            Err(PositionError::InvalidEnPassant { .. })
        ));
    }

    #[test]
    fn board_string_round_trip() {
        let board = Position::start().to_board_string();
        assert_eq!(&board[..8], "RNBQKBNR");
        assert_eq!(&board[56..], "rnbqkbnr");
        let parsed = Position::from_board_string(&board).unwrap();
        assert_eq!(parsed, Position::start());

        let spaced = board.replace('.', " ");
        assert_eq!(Position::from_board_string(&spaced).unwrap(), Position::start());
    }

    #[test]
    fn board_string_length_is_checked() {
        assert_eq!(
            Position::from_board_string("RNBQKBNR"),
            Err(PositionError::BadLength { found: 8 })
        );
    }
}
