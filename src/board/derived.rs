//! Recomputation of attacks, pins, checkers and king danger squares.

use super::state::{DerivedState, Position};
use super::types::{Bitboard, Color, PieceType, Square};

impl Position {
    /// Rebuild the derived state from the current placement. Runs after
    /// every `do_move` and after construction; `undo_move` restores the
    /// saved copy instead.
    pub(crate) fn update_derived(&mut self) {
        let us = self.side_to_move;
        let them = us.opponent();
        let occupancy = self.all_occupied;

        let attacks = [
            self.attacks_by(Color::White, occupancy),
            self.attacks_by(Color::Black, occupancy),
        ];
        let pinned = [
            self.compute_pinned(Color::White),
            self.compute_pinned(Color::Black),
        ];

        let king = self.king_square(us);
        let checkers = self.attackers_to(king, occupancy) & self.occupied_by(them);

        // A checking slider keeps attacking the squares behind the king
        let mut king_danger = attacks[them.index()];
        let without_king = occupancy ^ king.bitboard();
        for sq in checkers {
            if let Some(piece) = self.piece_on(sq) {
                if piece.piece_type.is_slider() {
                    king_danger |= self.tables.attacks(piece.piece_type, them, sq, without_king);
                }
            }
        }

        self.derived = DerivedState {
            attacks,
            pinned,
            checkers,
            king_danger,
        };
    }

    /// Union of every square attacked by `color` given `occupancy`.
    pub(crate) fn attacks_by(&self, color: Color, occupancy: Bitboard) -> Bitboard {
        let tables = self.tables;
        let mut attacks = Bitboard::EMPTY;
        for sq in self.pieces(color, PieceType::Pawn) {
            attacks |= tables.pawn(color, sq);
        }
        for sq in self.pieces(color, PieceType::Knight) {
            attacks |= tables.knight(sq);
        }
        for sq in self.diagonal_sliders(color) {
            attacks |= tables.bishop(sq, occupancy);
        }
        for sq in self.orthogonal_sliders(color) {
            attacks |= tables.rook(sq, occupancy);
        }
        for sq in self.pieces(color, PieceType::King) {
            attacks |= tables.king(sq);
        }
        attacks
    }

    /// Pieces of `color` that alone stand between their king and an enemy slider.
    pub(crate) fn compute_pinned(&self, color: Color) -> Bitboard {
        let tables = self.tables;
        let them = color.opponent();
        let king = self.king_square(color);

        let snipers = (tables.rook(king, Bitboard::EMPTY) & self.orthogonal_sliders(them))
            | (tables.bishop(king, Bitboard::EMPTY) & self.diagonal_sliders(them));

        let mut pinned = Bitboard::EMPTY;
        for sniper in snipers {
            let blockers = tables.between(king, sniper) & self.all_occupied;
            if !blockers.is_empty() && !blockers.more_than_one() {
                pinned |= blockers & self.occupied_by(color);
            }
        }
        pinned
    }

    /// Pieces of either color attacking `sq` when the board holds `occupancy`.
    #[must_use]
    pub fn attackers_to(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let tables = self.tables;
        (tables.pawn(Color::White, sq) & self.pieces(Color::Black, PieceType::Pawn))
            | (tables.pawn(Color::Black, sq) & self.pieces(Color::White, PieceType::Pawn))
            | (tables.knight(sq) & self.pieces_of_type(PieceType::Knight))
            | (tables.king(sq) & self.pieces_of_type(PieceType::King))
            | (tables.bishop(sq, occupancy)
                & (self.pieces_of_type(PieceType::Bishop) | self.pieces_of_type(PieceType::Queen)))
            | (tables.rook(sq, occupancy)
                & (self.pieces_of_type(PieceType::Rook) | self.pieces_of_type(PieceType::Queen)))
    }

    #[inline]
    pub(crate) fn diagonal_sliders(&self, color: Color) -> Bitboard {
        self.pieces(color, PieceType::Bishop) | self.pieces(color, PieceType::Queen)
    }

    #[inline]
    pub(crate) fn orthogonal_sliders(&self, color: Color) -> Bitboard {
        self.pieces(color, PieceType::Rook) | self.pieces(color, PieceType::Queen)
    }
}
