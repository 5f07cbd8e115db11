//! Attack tables for move generation.
//!
//! Leaper attacks (king, knight, pawn captures) are flat per-square tables.
//! Rook and bishop attacks use magic bitboards over a shared attack table;
//! the queen is their union. `between` and `line` give the squares separating
//! two aligned squares and the full board line through them.
//!
//! The tables are built once per process by [`AttackTables::init`] and are
//! read-only afterwards, so one `&'static AttackTables` can be shared freely.

mod magic;
mod tables;

pub use magic::{
    find_magic, relevant_mask, sliding_attacks, subsets, MagicEntry, Slider, MAX_MAGIC_ATTEMPTS,
};

use std::fmt;

use log::debug;
use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::SeedableRng;

use magic::{SliderTable, BISHOP_MAGICS, ROOK_MAGICS};
use tables::PairTable;

use super::types::{Bitboard, Color, PieceType, Square};

static TABLES: OnceCell<AttackTables> = OnceCell::new();

/// Precomputed attack sets for every piece type and square.
pub struct AttackTables {
    king: [Bitboard; 64],
    knight: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    rook: SliderTable,
    bishop: SliderTable,
    between: PairTable,
    line: PairTable,
}

impl AttackTables {
    /// Build tables from the built-in magic constants.
    #[must_use]
    pub fn new() -> Self {
        let tables = Self::with_sliders(
            SliderTable::from_magics(magic::Slider::Rook, &ROOK_MAGICS),
            SliderTable::from_magics(magic::Slider::Bishop, &BISHOP_MAGICS),
        );
        debug!(
            "attack tables built from built-in magics: {} rook + {} bishop entries",
            tables.rook.len(),
            tables.bishop.len()
        );
        tables
    }

    /// Build tables with magic constants searched from `seed`.
    ///
    /// # Panics
    /// Panics if any square exhausts [`MAX_MAGIC_ATTEMPTS`].
    #[must_use]
    pub fn with_magic_search(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let rook = SliderTable::from_search(Slider::Rook, &mut rng);
        let bishop = SliderTable::from_search(Slider::Bishop, &mut rng);
        let tables = Self::with_sliders(rook, bishop);
        debug!(
            "attack tables built from searched magics (seed {seed}): {} rook + {} bishop entries",
            tables.rook.len(),
            tables.bishop.len()
        );
        tables
    }

    fn with_sliders(rook: SliderTable, bishop: SliderTable) -> Self {
        let (between, line) = tables::pair_tables();
        AttackTables {
            king: tables::king_table(),
            knight: tables::knight_table(),
            pawn: tables::pawn_table(),
            rook,
            bishop,
            between,
            line,
        }
    }

    /// Build the process-wide tables on first call and return them.
    pub fn init() -> &'static AttackTables {
        TABLES.get_or_init(AttackTables::new)
    }

    /// The process-wide tables.
    ///
    /// # Panics
    /// Panics if [`AttackTables::init`] has not run yet.
    #[must_use]
    pub fn get() -> &'static AttackTables {
        match TABLES.get() {
            Some(tables) => tables,
            None => panic!("attack tables used before AttackTables::init()"),
        }
    }

    #[inline]
    #[must_use]
    pub fn king(&self, sq: Square) -> Bitboard {
        self.king[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn knight(&self, sq: Square) -> Bitboard {
        self.knight[sq.index()]
    }

    /// Squares a `color` pawn on `sq` captures on
    #[inline]
    #[must_use]
    pub fn pawn(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn rook(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.rook.attacks(sq, occupancy)
    }

    #[inline]
    #[must_use]
    pub fn bishop(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop.attacks(sq, occupancy)
    }

    #[inline]
    #[must_use]
    pub fn queen(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.rook(sq, occupancy) | self.bishop(sq, occupancy)
    }

    /// Attacks of any piece; `color` only matters for pawns.
    #[inline]
    #[must_use]
    pub fn attacks(&self, piece_type: PieceType, color: Color, sq: Square, occupancy: Bitboard) -> Bitboard {
        match piece_type {
            PieceType::Pawn => self.pawn(color, sq),
            PieceType::Knight => self.knight(sq),
            PieceType::Bishop => self.bishop(sq, occupancy),
            PieceType::Rook => self.rook(sq, occupancy),
            PieceType::Queen => self.queen(sq, occupancy),
            PieceType::King => self.king(sq),
        }
    }

    /// Squares strictly between `a` and `b` when they share a rank, file or
    /// diagonal; empty otherwise.
    #[inline]
    #[must_use]
    pub fn between(&self, a: Square, b: Square) -> Bitboard {
        self.between[a.index()][b.index()]
    }

    /// The whole board line through `a` and `b` (both included) when they are
    /// aligned; empty otherwise.
    #[inline]
    #[must_use]
    pub fn line(&self, a: Square, b: Square) -> Bitboard {
        self.line[a.index()][b.index()]
    }

    #[must_use]
    pub fn magic_entry(&self, slider: Slider, sq: Square) -> &MagicEntry {
        match slider {
            Slider::Rook => self.rook.entry(sq),
            Slider::Bishop => self.bishop.entry(sq),
        }
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        AttackTables::new()
    }
}

impl fmt::Debug for AttackTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackTables")
            .field("rook_entries", &self.rook.len())
            .field("bishop_entries", &self.bishop.len())
            .finish_non_exhaustive()
    }
}
