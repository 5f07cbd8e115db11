use super::super::state::Position;
use super::super::types::{Bitboard, MoveList, PieceType};

impl Position {
    /// Bishop, rook and queen moves.
    pub(super) fn generate_slider_moves(&self, moves: &mut MoveList, targets: Bitboard) {
        let us = self.side_to_move;
        let occupancy = self.all_occupied;
        let allowed = targets & !self.occupied_by(us);

        for piece_type in [PieceType::Bishop, PieceType::Rook, PieceType::Queen] {
            for from in self.pieces(us, piece_type) {
                let attacks = self.tables.attacks(piece_type, us, from, occupancy);
                let legal = self.pin_restricted(from, attacks & allowed);
                self.push_moves(moves, from, legal);
            }
        }
    }
}
