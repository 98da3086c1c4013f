//! Magic bitboards for sliding pieces.
//!
//! For every square the relevant-occupancy mask (rays without their edge
//! square) is hashed with `(occ & mask) * magic >> shift` into a slice of one
//! flat attack table. Magics are found by a seeded random search: a candidate
//! is accepted when every occupancy subset of the mask lands on a slot that is
//! either fresh or already holds the same attack set.

use log::trace;
use rand::rngs::StdRng;
use rand::Rng;

use crate::board::error::MagicError;
use crate::board::{BitBoard, Square};

/// Candidates tried per square before giving up.
///
/// Sparse random candidates usually succeed within a few thousand tries for
/// rooks and a few hundred for bishops.
pub const MAX_MAGIC_ATTEMPTS: u32 = 1_000_000;

/// Minimum set bits in the top byte of `mask * magic` for a candidate to be tried
const MIN_HIGH_BITS: u32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    const fn directions(self) -> [(i8, i8); 4] {
        match self {
            Slider::Bishop => [(1, 1), (1, -1), (-1, 1), (-1, -1)],
            Slider::Rook => [(1, 0), (-1, 0), (0, 1), (0, -1)],
        }
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Slider::Bishop => "bishop",
            Slider::Rook => "rook",
        }
    }
}

#[inline]
fn on_board(r: i8, f: i8) -> bool {
    (0..8).contains(&r) && (0..8).contains(&f)
}

/// Relevant-occupancy mask: every ray square whose successor is still on the board.
pub(crate) fn relevant_mask(slider: Slider, sq: Square) -> u64 {
    let rank = sq.rank() as i8;
    let file = sq.file() as i8;
    let mut mask = 0u64;
    for (dr, df) in slider.directions() {
        let mut r = rank + dr;
        let mut f = file + df;
        while on_board(r + dr, f + df) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

/// Attack set by ray-casting, including the first blocker on each ray.
pub(crate) fn ray_attacks(slider: Slider, sq: Square, occupancy: u64) -> u64 {
    let rank = sq.rank() as i8;
    let file = sq.file() as i8;
    let mut attacks = 0u64;
    for (dr, df) in slider.directions() {
        let mut r = rank + dr;
        let mut f = file + df;
        while on_board(r, f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// Every subset of `mask`, starting with the empty set.
pub(crate) fn occupancy_subsets(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1 << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

#[derive(Clone, Copy, Debug, Default)]
struct MagicEntry {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl MagicEntry {
    #[inline(always)]
    fn index(&self, occupancy: u64) -> usize {
        ((occupancy & self.mask).wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// Magic-indexed attack table for one slider kind
pub(crate) struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<BitBoard>,
}

impl MagicTable {
    /// Search magics for all 64 squares of `slider`, drawing candidates from `rng`.
    pub(crate) fn generate(slider: Slider, rng: &mut StdRng) -> Result<Self, MagicError> {
        let mut entries = [MagicEntry::default(); 64];
        let mut attacks = Vec::new();

        for (idx, entry) in entries.iter_mut().enumerate() {
            let sq = Square(idx as u8);
            let (magic, shift, slots) = find_magic(slider, sq, rng)?;
            *entry = MagicEntry {
                mask: relevant_mask(slider, sq),
                magic,
                shift,
                offset: attacks.len(),
            };
            attacks.extend(slots.into_iter().map(BitBoard));
        }

        Ok(MagicTable { entries, attacks })
    }

    #[inline(always)]
    pub(crate) fn attacks(&self, sq: Square, occupancy: BitBoard) -> BitBoard {
        let entry = &self.entries[sq.index()];
        self.attacks[entry.offset + entry.index(occupancy.0)]
    }

    #[cfg(test)]
    pub(crate) fn magic(&self, sq: Square) -> u64 {
        self.entries[sq.index()].magic
    }

    pub(crate) fn len(&self) -> usize {
        self.attacks.len()
    }
}

/// Returns (magic, shift, slot table) for one square.
fn find_magic(
    slider: Slider,
    sq: Square,
    rng: &mut StdRng,
) -> Result<(u64, u32, Vec<u64>), MagicError> {
    let mask = relevant_mask(slider, sq);
    let bits = mask.count_ones();
    let shift = 64 - bits;
    let subsets = occupancy_subsets(mask);
    let reference: Vec<u64> = subsets
        .iter()
        .map(|&occ| ray_attacks(slider, sq, occ))
        .collect();

    let size = 1usize << bits;
    let mut slots = vec![0u64; size];
    let mut stamp = vec![0u32; size];

    for attempt in 1..=MAX_MAGIC_ATTEMPTS {
        let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < MIN_HIGH_BITS {
            continue;
        }

        let mut collided = false;
        for (&occ, &attack) in subsets.iter().zip(&reference) {
            let idx = (occ.wrapping_mul(magic) >> shift) as usize;
            if stamp[idx] != attempt {
                stamp[idx] = attempt;
                slots[idx] = attack;
            } else if slots[idx] != attack {
                collided = true;
                break;
            }
        }

        if !collided {
            trace!(
                "{} magic for {}: {:#018x} after {} attempts",
                slider.name(),
                sq,
                magic,
                attempt
            );
            return Ok((magic, shift, slots));
        }
    }

    Err(MagicError {
        slider: slider.name(),
        square: sq.0,
        attempts: MAX_MAGIC_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn masks_exclude_edges() {
        // rook on a1: a2..a7 and b1..g1
        assert_eq!(relevant_mask(Slider::Rook, Square(0)), 0x000101010101017E);
        assert_eq!(relevant_mask(Slider::Rook, Square(0)).count_ones(), 12);
        assert_eq!(relevant_mask(Slider::Rook, Square(27)).count_ones(), 10);
        assert_eq!(relevant_mask(Slider::Bishop, Square(0)).count_ones(), 6);
        assert_eq!(relevant_mask(Slider::Bishop, Square(27)).count_ones(), 9);
    }

    #[test]
    fn subsets_enumerate_powerset() {
        let mask = 0b1011_0000u64;
        let subsets = occupancy_subsets(mask);
        assert_eq!(subsets.len(), 8);
        assert!(subsets.iter().all(|s| s & !mask == 0));
        let mut unique = subsets.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn ray_attacks_stop_on_blockers() {
        // rook on e4 with blockers on e6 and c4
        let occ = (1u64 << 44) | (1u64 << 26);
        let attacks = ray_attacks(Slider::Rook, Square(28), occ);
        assert_ne!(attacks & (1 << 44), 0);
        assert_eq!(attacks & (1 << 52), 0);
        assert_ne!(attacks & (1 << 26), 0);
        assert_eq!(attacks & (1 << 25), 0);
    }

    #[test]
    fn same_seed_gives_same_magics() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first = MagicTable::generate(Slider::Bishop, &mut a).unwrap();
        let second = MagicTable::generate(Slider::Bishop, &mut b).unwrap();
        for idx in 0..64u8 {
            assert_eq!(first.magic(Square(idx)), second.magic(Square(idx)));
        }
        assert_eq!(first.len(), second.len());
    }
}
