//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! # Example
//! ```
//! use chess_core::board::prelude::*;
//!
//! let position = Position::startpos();
//! assert_eq!(position.side_to_move(), Color::White);
//! ```

pub use super::{
    generate_moves, AttackTables, Bitboard, CastlingRights, Color, FenError, Move, MoveList,
    MoveParseError, PerftStats, Piece, PieceType, Position, PositionBuilder, PositionError,
    Square, SquareError,
};
