//! Board representation and legal move generation.
//!
//! Uses bitboards with magic lookups for sliding pieces. A [`Position`] keeps
//! attacks, pins, checkers and a Zobrist fingerprint up to date across
//! [`Position::do_move`] and [`Position::undo_move`], and the generator only
//! ever produces strictly legal moves.
//!
//! # Example
//! ```
//! use chess_core::board::{AttackTables, Position};
//!
//! AttackTables::init();
//! let mut position = Position::startpos();
//! let moves = position.generate_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! assert_eq!(position.perft(3), 8902);
//! ```

mod attack_tables;
mod builder;
mod derived;
mod error;
mod fen;
mod history;
mod make_unmake;
mod movegen;
mod perft;
pub mod prelude;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use attack_tables::{
    find_magic, relevant_mask, sliding_attacks, subsets, AttackTables, MagicEntry, Slider,
    MAX_MAGIC_ATTEMPTS,
};
pub use builder::PositionBuilder;
pub use error::{FenError, MoveParseError, PositionError, SquareError};
pub use history::MAX_HISTORY;
pub use movegen::generate_moves;
pub use perft::PerftStats;
pub use state::{Position, STARTPOS_FEN};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Direction, File, Move, MoveKind, MoveList,
    MoveListIntoIter, Piece, PieceType, Rank, Square, MAX_MOVES,
};
