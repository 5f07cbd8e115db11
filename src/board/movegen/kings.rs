use super::super::state::Position;
use super::super::types::{castling_path, Move, MoveList};

impl Position {
    pub(super) fn generate_king_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move;
        let from = self.king_square(us);
        let targets = self.tables.king(from) & !self.occupied_by(us) & !self.king_danger();
        self.push_moves(moves, from, targets);
    }

    /// Castling while not in check: the squares between king and rook must be
    /// empty and the squares the king crosses must be safe.
    pub(super) fn generate_castling_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move;
        for kingside in [true, false] {
            if !self.castling_rights.has(us, kingside) {
                continue;
            }
            let path = castling_path(us, kingside);
            if !(self.all_occupied & path.empty).is_empty()
                || !(self.king_danger() & path.king_path).is_empty()
            {
                continue;
            }
            moves.push(if kingside {
                Move::castle_kingside(path.king_from, path.king_to)
            } else {
                Move::castle_queenside(path.king_from, path.king_to)
            });
        }
    }
}
