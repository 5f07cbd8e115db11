use super::super::state::Position;
use super::super::types::{Bitboard, Direction, Move, MoveList, PieceType, Square};
use super::push_promotions;

impl Position {
    pub(super) fn generate_pawn_moves(&self, moves: &mut MoveList, targets: Bitboard) {
        let us = self.side_to_move;
        let them = us.opponent();
        let forward = Direction::forward(us);
        let start_rank = us.pawn_start_rank();
        let promotion_rank = us.promotion_rank();
        let empty = !self.all_occupied;
        let enemy = self.occupied_by(them);
        let king = self.king_square(us);
        let pinned = self.pinned(us);

        for from in self.pieces(us, PieceType::Pawn) {
            let allowed = if pinned.contains(from) {
                targets & self.tables.line(king, from)
            } else {
                targets
            };

            if let Some(one) = from.offset(forward).filter(|sq| empty.contains(*sq)) {
                if allowed.contains(one) {
                    if one.rank() == promotion_rank {
                        push_promotions(moves, from, one, false);
                    } else {
                        moves.push(Move::quiet(from, one));
                    }
                }
                if from.rank() == start_rank {
                    if let Some(two) = one.offset(forward) {
                        if empty.contains(two) && allowed.contains(two) {
                            moves.push(Move::double_pawn_push(from, two));
                        }
                    }
                }
            }

            let attacks = self.tables.pawn(us, from);
            for to in attacks & enemy & allowed {
                if to.rank() == promotion_rank {
                    push_promotions(moves, from, to, true);
                } else {
                    moves.push(Move::capture(from, to));
                }
            }

            if let Some(ep) = self.en_passant {
                if attacks.contains(ep) && self.en_passant_is_legal(from, ep, targets) {
                    moves.push(Move::en_passant(from, ep));
                }
            }
        }
    }

    /// An en passant capture must resolve any check, either by removing the
    /// checking pawn or by landing between, and may not expose the king along
    /// any line once both pawns leave their squares.
    fn en_passant_is_legal(&self, from: Square, ep: Square, targets: Bitboard) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();
        let victim = Square::new(ep.file(), from.rank());
        if !targets.contains(ep) && !targets.contains(victim) {
            return false;
        }

        let king = self.king_square(us);
        let occupancy =
            (self.all_occupied ^ from.bitboard() ^ victim.bitboard()) | ep.bitboard();
        let tables = self.tables;
        (tables.rook(king, occupancy) & self.orthogonal_sliders(them)).is_empty()
            && (tables.bishop(king, occupancy) & self.diagonal_sliders(them)).is_empty()
    }
}
