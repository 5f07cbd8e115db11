//! Strictly legal move generation.
//!
//! King moves come first and avoid every square in `king_danger`. In double
//! check nothing else is generated. In single check all other pieces are
//! limited to capturing the checker or blocking between it and the king.
//! Pinned pieces are further limited to the line through their king.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::state::Position;
use super::types::{Bitboard, Move, MoveList, Square, PROMOTION_TYPES};

/// All legal moves for the side to move in `position`, in no particular order.
#[must_use]
pub fn generate_moves(position: &Position) -> MoveList {
    position.generate_moves()
}

impl Position {
    /// All legal moves for the side to move, in no particular order.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_king_moves(&mut moves);

        let checkers = self.checkers();
        if checkers.more_than_one() {
            return moves;
        }

        let targets = match checkers.lsb() {
            Some(checker) => {
                let king = self.king_square(self.side_to_move);
                self.tables.between(king, checker) | checker.bitboard()
            }
            None => {
                self.generate_castling_moves(&mut moves);
                Bitboard::ALL
            }
        };

        self.generate_knight_moves(&mut moves, targets);
        self.generate_slider_moves(&mut moves, targets);
        self.generate_pawn_moves(&mut moves, targets);
        moves
    }

    /// Side to move is in check and has no legal move.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.generate_moves().is_empty()
    }

    /// Side to move is not in check and has no legal move.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.generate_moves().is_empty()
    }

    /// Targets of a non-pawn piece on `from`, restricted to its pin line.
    #[inline]
    fn pin_restricted(&self, from: Square, targets: Bitboard) -> Bitboard {
        let us = self.side_to_move;
        if self.pinned(us).contains(from) {
            targets & self.tables.line(self.king_square(us), from)
        } else {
            targets
        }
    }

    /// Push a quiet move or capture for every square in `targets`.
    #[inline]
    fn push_moves(&self, moves: &mut MoveList, from: Square, targets: Bitboard) {
        let enemy = self.occupied_by(self.side_to_move.opponent());
        for to in targets {
            if enemy.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}

fn push_promotions(moves: &mut MoveList, from: Square, to: Square, capture: bool) {
    for piece_type in PROMOTION_TYPES {
        if capture {
            moves.push(Move::new_promotion_capture(from, to, piece_type));
        } else {
            moves.push(Move::new_promotion(from, to, piece_type));
        }
    }
}
