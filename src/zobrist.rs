//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position fingerprints: one key per
//! (piece, square), one for Black to move, one per castling-rights value and
//! one per en passant file.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, File, Piece, Square};

/// Random keys for every fingerprint term.
pub struct ZobristKeys {
    // piece_keys[piece_type][color][square_index]
    piece_keys: [[[u64; 64]; 2]; 6],
    black_to_move_key: u64,
    // indexed by the whole 4-bit rights value
    castling_keys: [u64; 16],
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // fixed seed for reproducible hashes
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [0; 16];
        let mut en_passant_keys = [0; 8];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        // no rights hashes to zero so an empty field contributes nothing
        for key in castling_keys.iter_mut().skip(1) {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.piece_type.index()][piece.color.index()][sq.index()]
    }

    #[inline]
    pub fn side(&self, color: Color) -> u64 {
        match color {
            Color::White => 0,
            Color::Black => self.black_to_move_key,
        }
    }

    #[inline]
    pub fn black_to_move(&self) -> u64 {
        self.black_to_move_key
    }

    #[inline]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[rights.as_u8() as usize]
    }

    #[inline]
    pub fn en_passant(&self, file: File) -> u64 {
        self.en_passant_keys[file.index()]
    }
}

/// Process-wide keys, generated on first use.
pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
