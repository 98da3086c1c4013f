//! Attack tables for move generation.
//!
//! Leapers (pawns, knights, kings) use direct per-square tables. Sliders use
//! magic bitboards whose multipliers are searched at startup from a seeded
//! generator, so every run with the same seed builds identical tables.

#![allow(clippy::inline_always)] // Performance-critical hot path functions

mod leapers;
mod magic;

pub use magic::MAX_MAGIC_ATTEMPTS;

pub(crate) use magic::Slider;
#[cfg(test)]
use magic::{occupancy_subsets, ray_attacks, relevant_mask};

use log::info;
use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::error::MagicError;
use super::types::{BitBoard, Color, Square};
use magic::MagicTable;

/// Seed used for the process-wide tables
pub const DEFAULT_MAGIC_SEED: u64 = 0x5EED_C0FF_EE15_600D;

/// Immutable attack lookups, built once
pub struct AttackTables {
    pawn: [[BitBoard; 64]; 2],
    knight: [BitBoard; 64],
    king: [BitBoard; 64],
    bishop: MagicTable,
    rook: MagicTable,
}

impl AttackTables {
    /// Build all tables, searching slider magics with a generator seeded by `seed`.
    ///
    /// Bishops are searched before rooks from the same generator stream.
    pub fn generate(seed: u64) -> Result<Self, MagicError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let bishop = MagicTable::generate(Slider::Bishop, &mut rng)?;
        let rook = MagicTable::generate(Slider::Rook, &mut rng)?;
        info!(
            "attack tables ready: seed {:#x}, {} bishop and {} rook slots",
            seed,
            bishop.len(),
            rook.len()
        );
        Ok(AttackTables {
            pawn: leapers::pawn_table(),
            knight: leapers::knight_table(),
            king: leapers::king_table(),
            bishop,
            rook,
        })
    }

    /// Squares a `color` pawn on `sq` attacks
    #[inline(always)]
    pub fn pawn(&self, color: Color, sq: Square) -> BitBoard {
        self.pawn[color.index()][sq.index()]
    }

    #[inline(always)]
    pub fn knight(&self, sq: Square) -> BitBoard {
        self.knight[sq.index()]
    }

    #[inline(always)]
    pub fn king(&self, sq: Square) -> BitBoard {
        self.king[sq.index()]
    }

    #[inline(always)]
    pub fn bishop(&self, sq: Square, occupancy: BitBoard) -> BitBoard {
        self.bishop.attacks(sq, occupancy)
    }

    #[inline(always)]
    pub fn rook(&self, sq: Square, occupancy: BitBoard) -> BitBoard {
        self.rook.attacks(sq, occupancy)
    }

    #[inline(always)]
    pub fn queen(&self, sq: Square, occupancy: BitBoard) -> BitBoard {
        self.bishop(sq, occupancy) | self.rook(sq, occupancy)
    }

    /// Magic multiplier chosen for `slider` on `sq`
    #[cfg(test)]
    pub(crate) fn magic(&self, slider: Slider, sq: Square) -> u64 {
        match slider {
            Slider::Bishop => self.bishop.magic(sq),
            Slider::Rook => self.rook.magic(sq),
        }
    }
}

static TABLES: OnceCell<AttackTables> = OnceCell::new();

/// Build the process-wide tables if needed and return them.
///
/// Construction runs at most once; a failure leaves the cell empty so a later
/// call retries.
pub fn init() -> Result<&'static AttackTables, MagicError> {
    TABLES.get_or_try_init(|| AttackTables::generate(DEFAULT_MAGIC_SEED))
}

/// Process-wide tables, built on first use.
#[inline(always)]
pub fn tables() -> &'static AttackTables {
    match TABLES.get() {
        Some(tables) => tables,
        None => init().expect("magic search with the default seed is known to succeed"),
    }
}
