//! Bitboard type and operations.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use super::square::Square;

/// A set of squares, one bit per square (a1 = bit 0, h8 = bit 63).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BitBoard(pub u64);

// File masks (columns)
impl BitBoard {
    pub const FILE_A: BitBoard = BitBoard(0x0101010101010101);
    pub const FILE_H: BitBoard = BitBoard(0x8080808080808080);

    pub const RANK_1: BitBoard = BitBoard(0x00000000000000FF);
    pub const RANK_2: BitBoard = BitBoard(0x000000000000FF00);
    pub const RANK_3: BitBoard = BitBoard(0x0000000000FF0000);
    pub const RANK_4: BitBoard = BitBoard(0x00000000FF000000);
    pub const RANK_5: BitBoard = BitBoard(0x000000FF00000000);
    pub const RANK_6: BitBoard = BitBoard(0x0000FF0000000000);
    pub const RANK_7: BitBoard = BitBoard(0x00FF000000000000);
    pub const RANK_8: BitBoard = BitBoard(0xFF00000000000000);

    pub const EMPTY: BitBoard = BitBoard(0);
    pub const ALL: BitBoard = BitBoard(!0);
}

impl BitBoard {
    /// Create a bitboard with a single square set
    #[inline]
    #[must_use]
    pub const fn from_square(sq: Square) -> Self {
        BitBoard(1 << sq.0)
    }

    /// Set the bit for `sq`.
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1 << sq.0;
    }

    /// Set the bit at (rank, file), both in 0..8.
    #[inline]
    pub fn set_rank_file(&mut self, rank: u8, file: u8) {
        debug_assert!(rank < 8 && file < 8, "rank/file out of range");
        self.0 |= 1 << (rank * 8 + file);
    }

    /// Clear the bit for `sq`.
    #[inline]
    pub fn reset(&mut self, sq: Square) {
        self.0 &= !(1 << sq.0);
    }

    /// Returns true if the given square is set
    #[inline]
    #[must_use]
    pub const fn test(self, sq: Square) -> bool {
        self.0 & (1 << sq.0) != 0
    }

    /// Returns true if the bitboard is empty
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits (population count)
    #[inline]
    #[must_use]
    pub const fn bit_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Index of the lowest set bit.
    ///
    /// The board must not be empty; this is checked in debug builds only.
    /// Use [`BitBoard::try_lsb`] when emptiness is not already ruled out.
    #[inline]
    #[must_use]
    pub fn lsb(self) -> Square {
        debug_assert!(self.0 != 0, "lsb of an empty bitboard");
        Square(self.0.trailing_zeros() as u8)
    }

    /// Checked variant of [`BitBoard::lsb`].
    #[inline]
    #[must_use]
    pub fn try_lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square(self.0.trailing_zeros() as u8))
        }
    }

    /// Remove and return the lowest set bit. Same precondition as [`BitBoard::lsb`].
    #[inline]
    pub fn pop_lsb(&mut self) -> Square {
        let sq = self.lsb();
        self.0 &= self.0 - 1;
        sq
    }

    /// Returns an iterator over the squares set in this bitboard
    #[inline]
    #[must_use]
    pub fn iter(self) -> BitBoardIter {
        BitBoardIter(self)
    }
}

impl BitAnd for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        BitBoard(self.0 & rhs.0)
    }
}

impl BitOr for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        BitBoard(self.0 | rhs.0)
    }
}

impl BitXor for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        BitBoard(self.0 ^ rhs.0)
    }
}

impl Not for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn not(self) -> Self {
        BitBoard(!self.0)
    }
}

impl BitAndAssign for BitBoard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for BitBoard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for BitBoard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

/// Iterator over set bits in a BitBoard
pub struct BitBoardIter(BitBoard);

impl Iterator for BitBoardIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.pop_lsb())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.bit_count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitBoardIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reset_and_test() {
        let mut bb = BitBoard::EMPTY;
        bb.set(Square(12));
        bb.set_rank_file(7, 7);
        assert!(bb.test(Square(12)));
        assert!(bb.test(Square(63)));
        assert_eq!(bb.bit_count(), 2);
        bb.reset(Square(12));
        assert!(!bb.test(Square(12)));
        assert_eq!(bb, BitBoard(1 << 63));
    }

    #[test]
    fn pop_lsb_iterates_low_to_high() {
        let mut bb = BitBoard((1 << 3) | (1 << 40) | (1 << 63));
        assert_eq!(bb.pop_lsb(), Square(3));
        assert_eq!(bb.pop_lsb(), Square(40));
        assert_eq!(bb.pop_lsb(), Square(63));
        assert!(bb.is_empty());
    }

    #[test]
    fn try_lsb_on_empty_is_none() {
        assert_eq!(BitBoard::EMPTY.try_lsb(), None);
        assert_eq!(BitBoard(0b1000).try_lsb(), Some(Square(3)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "lsb of an empty bitboard")]
    fn lsb_on_empty_panics_in_debug() {
        let _ = BitBoard::EMPTY.lsb();
    }

    #[test]
    fn iter_matches_bit_count() {
        let bb = BitBoard::RANK_2 | BitBoard::FILE_H;
        assert_eq!(bb.iter().count() as u32, bb.bit_count());
        assert_eq!(bb.iter().len(), 15);
    }
}
