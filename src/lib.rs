pub mod board;
pub mod zobrist;

pub use board::{AttackTables, Color, Move, Piece, PieceType, Position, Square};
