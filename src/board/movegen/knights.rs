use super::super::state::Position;
use super::super::types::{Bitboard, MoveList, PieceType};

impl Position {
    pub(super) fn generate_knight_moves(&self, moves: &mut MoveList, targets: Bitboard) {
        let us = self.side_to_move;
        // a pinned knight never has a move along its pin line
        let knights = self.pieces(us, PieceType::Knight) & !self.pinned(us);
        let allowed = targets & !self.occupied_by(us);
        for from in knights {
            self.push_moves(moves, from, self.tables.knight(from) & allowed);
        }
    }
}
