//! Core chess types.
//!
//! This module contains the fundamental types used throughout the core:
//! - `Square`, `File`, `Rank` and `Direction` - board coordinates
//! - `PieceType`, `Piece` and `Color` - chess pieces and colors
//! - `Bitboard` - 64-bit square set
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod direction;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use direction::Direction;
pub use moves::{Move, MoveKind, MoveList, MoveListIntoIter, MAX_MOVES};
pub use piece::{Color, Piece, PieceType};
pub use square::{File, Rank, Square};

pub(crate) use castling::{castling_path, CASTLING_LOSS};
pub(crate) use piece::PROMOTION_TYPES;
