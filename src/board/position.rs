//! Board position with copy-make move application.
//!
//! A `Position` is a plain value: search explores a branch by copying it,
//! applying one move to the copy and throwing the copy away on backtrack.
//! Both sides' attacked-square sets are cached and rebuilt after every move.

use super::attack_tables::tables;
use super::types::{BitBoard, Castle, CastleRights, Color, Move, Piece, PieceKind, Square, PIECE_COUNT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) all: BitBoard,
    pub(crate) by_color: [BitBoard; 2],
    /// Indexed by piece code; slot 0 (`NoPiece`) stays empty
    pub(crate) pieces: [BitBoard; PIECE_COUNT],
    pub(crate) en_passant: BitBoard,
    pub(crate) castle: CastleRights,
    pub(crate) attacked: [BitBoard; 2],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// Board with no pieces and no castling rights
    #[must_use]
    pub fn empty() -> Self {
        Position {
            all: BitBoard::EMPTY,
            by_color: [BitBoard::EMPTY; 2],
            pieces: [BitBoard::EMPTY; PIECE_COUNT],
            en_passant: BitBoard::EMPTY,
            castle: CastleRights::none(),
            attacked: [BitBoard::EMPTY; 2],
        }
    }

    /// Standard starting position
    #[must_use]
    pub fn start() -> Self {
        let mut pos = Position::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            pos.add_piece(Piece::new(Color::White, *kind), Square(file));
            pos.add_piece(Piece::new(Color::White, PieceKind::Pawn), Square(8 + file));
            pos.add_piece(Piece::new(Color::Black, PieceKind::Pawn), Square(48 + file));
            pos.add_piece(Piece::new(Color::Black, *kind), Square(56 + file));
        }
        pos.castle = CastleRights::all();
        pos.recompute_attacks();
        pos
    }

    /// Place `piece` on `sq`, replacing whatever stood there.
    pub fn put_piece(&mut self, piece: Piece, sq: Square) {
        let old = self.piece_at(sq);
        if !old.is_none() {
            self.remove_piece(old, sq);
        }
        if !piece.is_none() {
            self.add_piece(piece, sq);
        }
        self.recompute_attacks();
    }

    pub fn set_castle_rights(&mut self, rights: CastleRights) {
        self.castle = rights;
    }

    /// Set the en passant target square (the square a double push skipped)
    pub fn set_en_passant(&mut self, target: Option<Square>) {
        self.en_passant = match target {
            Some(sq) => BitBoard::from_square(sq),
            None => BitBoard::EMPTY,
        };
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Piece {
        if !self.all.test(sq) {
            return Piece::NoPiece;
        }
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[piece.index()].test(sq))
            .unwrap_or(Piece::NoPiece)
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, piece: Piece) -> BitBoard {
        self.pieces[piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> BitBoard {
        self.pieces[Piece::new(color, kind).index()]
    }

    #[inline]
    #[must_use]
    pub fn occupancy(&self) -> BitBoard {
        self.all
    }

    #[inline]
    #[must_use]
    pub fn side(&self, color: Color) -> BitBoard {
        self.by_color[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn castle_rights(&self) -> CastleRights {
        self.castle
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant.try_lsb()
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color, PieceKind::King).try_lsb()
    }

    /// Squares attacked by `color`, excluding squares `color` occupies
    #[inline]
    #[must_use]
    pub fn attacked_by(&self, color: Color) -> BitBoard {
        self.attacked[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        !(self.attacked_by(color.opponent()) & self.pieces_of(color, PieceKind::King)).is_empty()
    }

    /// Castle `castle` is allowed: right held, king and rook at home, path
    /// empty and no square the king touches attacked.
    #[must_use]
    pub fn can_castle(&self, castle: Castle) -> bool {
        let color = castle.color();
        let (king_from, _) = castle.king_squares();
        let (rook_from, _) = castle.rook_squares();
        self.castle.contains(castle)
            && self.pieces_of(color, PieceKind::King).test(king_from)
            && self.pieces_of(color, PieceKind::Rook).test(rook_from)
            && (self.all & BitBoard(castle.path_mask())).is_empty()
            && (self.attacked_by(color.opponent()) & BitBoard(castle.king_walk_mask())).is_empty()
    }

    #[inline]
    pub(super) fn add_piece(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].set(sq);
        if let Some(color) = piece.color() {
            self.by_color[color.index()].set(sq);
        }
        self.all.set(sq);
    }

    #[inline]
    fn remove_piece(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].reset(sq);
        if let Some(color) = piece.color() {
            self.by_color[color.index()].reset(sq);
        }
        self.all.reset(sq);
    }

    #[inline]
    fn move_piece(&mut self, piece: Piece, from: Square, to: Square) {
        self.remove_piece(piece, from);
        self.add_piece(piece, to);
    }

    /// Apply a pseudo-legal move for `side` in place.
    ///
    /// No legality check is made; see [`Position::make_legal_move`].
    pub fn make_move(&mut self, side: Color, mv: Move) {
        debug_assert_eq!(mv.piece().color(), Some(side), "{mv:?} moved by {side}");
        self.en_passant = BitBoard::EMPTY;
        let from = mv.from();
        let to = mv.to();

        if let Some(castle) = mv.castle_type() {
            let (rook_from, rook_to) = castle.rook_squares();
            self.move_piece(mv.piece(), from, to);
            self.move_piece(Piece::new(castle.color(), PieceKind::Rook), rook_from, rook_to);
        } else if mv.is_en_passant() {
            self.remove_piece(mv.captured(), mv.en_passant_square());
            self.move_piece(mv.piece(), from, to);
        } else if mv.is_promotion() && mv.is_capture() {
            self.remove_piece(mv.captured(), to);
            self.remove_piece(mv.piece(), from);
            self.add_piece(mv.promoted(), to);
        } else if mv.is_promotion() {
            self.remove_piece(mv.piece(), from);
            self.add_piece(mv.promoted(), to);
        } else if mv.is_capture() {
            self.remove_piece(mv.captured(), to);
            self.move_piece(mv.piece(), from, to);
        } else if mv.is_double_push() {
            self.move_piece(mv.piece(), from, to);
            self.en_passant = BitBoard::from_square(Square((from.0 + to.0) / 2));
        } else {
            self.move_piece(mv.piece(), from, to);
        }

        self.revoke_castle_rights(mv);
        self.recompute_attacks();
    }

    /// Apply `mv` to a copy and return it if `side` is not left in check.
    ///
    /// Also rejects results where the opponent has no king, which can only
    /// come from a broken position.
    #[must_use]
    pub fn make_legal_move(&self, side: Color, mv: Move) -> Option<Position> {
        let mut next = *self;
        next.make_move(side, mv);
        if next.pieces_of(side.opponent(), PieceKind::King).is_empty() || next.in_check(side) {
            return None;
        }
        Some(next)
    }

    // King moves drop both rights; any move touching a rook home square drops
    // that square's right, which covers rooks moving away and being captured.
    fn revoke_castle_rights(&mut self, mv: Move) {
        if self.castle.is_empty() {
            return;
        }
        if mv.piece().kind() == Some(PieceKind::King) {
            if let Some(color) = mv.piece().color() {
                self.castle.revoke_side(color);
            }
        }
        for castle in Castle::ALL {
            let (rook_home, _) = castle.rook_squares();
            if mv.from() == rook_home || mv.to() == rook_home {
                self.castle.remove(castle);
            }
        }
    }

    /// Rebuild both cached attacked-square sets from scratch.
    pub fn recompute_attacks(&mut self) {
        self.attacked = [self.compute_attacks(Color::White), self.compute_attacks(Color::Black)];
    }

    fn compute_attacks(&self, color: Color) -> BitBoard {
        let tables = tables();
        let occ = self.all;
        let mut attacks = BitBoard::EMPTY;
        for sq in self.pieces_of(color, PieceKind::Pawn).iter() {
            attacks |= tables.pawn(color, sq);
        }
        for sq in self.pieces_of(color, PieceKind::Knight).iter() {
            attacks |= tables.knight(sq);
        }
        for sq in self.pieces_of(color, PieceKind::Bishop).iter() {
            attacks |= tables.bishop(sq, occ);
        }
        for sq in self.pieces_of(color, PieceKind::Rook).iter() {
            attacks |= tables.rook(sq, occ);
        }
        for sq in self.pieces_of(color, PieceKind::Queen).iter() {
            attacks |= tables.queen(sq, occ);
        }
        for sq in self.pieces_of(color, PieceKind::King).iter() {
            attacks |= tables.king(sq);
        }
        attacks & !self.side(color)
    }

    /// Check the structural invariants between the cached boards.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let white = self.side(Color::White);
        let black = self.side(Color::Black);
        if !(white & black).is_empty() || (white | black) != self.all {
            return false;
        }
        if !self.pieces[Piece::NoPiece.index()].is_empty() {
            return false;
        }

        let mut seen = [BitBoard::EMPTY; 2];
        for piece in Piece::ALL {
            let board = self.pieces(piece);
            let Some(color) = piece.color() else {
                return false;
            };
            if !(seen[0] & board).is_empty() || !(seen[1] & board).is_empty() {
                return false;
            }
            seen[color.index()] |= board;
        }
        if seen[0] != white || seen[1] != black {
            return false;
        }

        Color::BOTH
            .iter()
            .all(|&c| self.pieces_of(c, PieceKind::King).bit_count() <= 1)
            && self.en_passant.bit_count() <= 1
            && self.attacked == [self.compute_attacks(Color::White), self.compute_attacks(Color::Black)]
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}
