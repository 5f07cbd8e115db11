//! Castling rights and castling geometry.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::piece::Color;
use super::square::Square;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Castling rights as four independent flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    /// Set a specific castling right
    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Remove a specific castling right
    #[inline]
    pub fn remove(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::bit_for(color, kingside);
    }

    /// Clear every right whose bit is set in `mask`
    #[inline]
    pub(crate) fn remove_mask(&mut self, mask: u8) {
        self.0 &= !mask;
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the raw bitmask value (0-15, also the Zobrist key index)
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Create from raw bitmask value; bits above the four flags are ignored
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        CastlingRights(value & ALL_CASTLING_RIGHTS)
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

/// FEN castling field, `KQkq` order, `-` when empty.
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Squares involved in one castling move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CastlingPath {
    pub(crate) king_from: Square,
    pub(crate) king_to: Square,
    pub(crate) rook_from: Square,
    pub(crate) rook_to: Square,
    /// Squares strictly between king and rook; must be empty
    pub(crate) empty: Bitboard,
    /// Squares the king crosses, destination included; must be unattacked
    pub(crate) king_path: Bitboard,
}

const fn path(
    king_from: u8,
    king_to: u8,
    rook_from: u8,
    rook_to: u8,
    empty: u64,
    king_path: u64,
) -> CastlingPath {
    CastlingPath {
        king_from: Square::from_index(king_from as usize),
        king_to: Square::from_index(king_to as usize),
        rook_from: Square::from_index(rook_from as usize),
        rook_to: Square::from_index(rook_to as usize),
        empty: Bitboard(empty),
        king_path: Bitboard(king_path),
    }
}

// Indexed [color][0 = kingside, 1 = queenside]
static CASTLING_PATHS: [[CastlingPath; 2]; 2] = [
    [
        // e1g1: f1 g1 empty and safe
        path(4, 6, 7, 5, 0x60, 0x60),
        // e1c1: b1 c1 d1 empty, c1 d1 safe
        path(4, 2, 0, 3, 0x0E, 0x0C),
    ],
    [
        path(60, 62, 63, 61, 0x60u64 << 56, 0x60u64 << 56),
        path(60, 58, 56, 59, 0x0Eu64 << 56, 0x0Cu64 << 56),
    ],
];

#[inline]
pub(crate) fn castling_path(color: Color, kingside: bool) -> &'static CastlingPath {
    &CASTLING_PATHS[color.index()][if kingside { 0 } else { 1 }]
}

/// Rights cleared when a piece leaves or lands on each square.
pub(crate) const CASTLING_LOSS: [u8; 64] = {
    let mut table = [0u8; 64];
    table[0] = CASTLE_WHITE_Q;
    table[4] = CASTLE_WHITE_K | CASTLE_WHITE_Q;
    table[7] = CASTLE_WHITE_K;
    table[56] = CASTLE_BLACK_Q;
    table[60] = CASTLE_BLACK_K | CASTLE_BLACK_Q;
    table[63] = CASTLE_BLACK_K;
    table
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::none().to_string(), "-");
        let mut rights = CastlingRights::none();
        rights.set(Color::Black, false);
        rights.set(Color::White, true);
        assert_eq!(rights.to_string(), "Kq");
    }

    #[test]
    fn test_loss_table_clears_rights() {
        let mut rights = CastlingRights::all();
        rights.remove_mask(CASTLING_LOSS[Square::H1.index()]);
        assert!(!rights.has(Color::White, true));
        assert!(rights.has(Color::White, false));
        rights.remove_mask(CASTLING_LOSS[Square::E8.index()]);
        assert!(!rights.has(Color::Black, true));
        assert!(!rights.has(Color::Black, false));
    }

    #[test]
    fn test_paths_are_consistent() {
        for color in Color::BOTH {
            for kingside in [true, false] {
                let p = castling_path(color, kingside);
                assert!(p.empty.contains(p.king_to));
                assert!(p.empty.contains(p.rook_to));
                assert!(p.king_path.contains(p.king_to));
                assert!(!p.king_path.contains(p.king_from));
                assert_eq!(
                    p.rook_to.index(),
                    (p.king_from.index() + p.king_to.index()) / 2
                );
            }
        }
    }
}
