use crate::zobrist::ZOBRIST;

use super::history::UndoInfo;
use super::state::Position;
use super::types::{castling_path, Color, Move, MoveKind, Piece, PieceType, Square, CASTLING_LOSS};

impl Position {
    /// Put `piece` on the empty square `sq`.
    #[inline]
    pub(crate) fn add_piece(&mut self, piece: Piece, sq: Square) {
        debug_assert!(self.board[sq.index()].is_none(), "add_piece: {sq} is occupied");
        let bit = sq.bitboard();
        let c_idx = piece.color.index();
        self.pieces[c_idx][piece.piece_type.index()] |= bit;
        self.occupied[c_idx] |= bit;
        self.all_occupied |= bit;
        self.board[sq.index()] = Some(piece);
        self.hash ^= ZOBRIST.piece(piece, sq);
    }

    /// Take the piece off `sq` and return it.
    #[inline]
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Piece {
        let piece = match self.board[sq.index()].take() {
            Some(piece) => piece,
            None => panic!("remove_piece: {sq} is empty"),
        };
        let bit = sq.bitboard();
        let c_idx = piece.color.index();
        self.pieces[c_idx][piece.piece_type.index()] ^= bit;
        self.occupied[c_idx] ^= bit;
        self.all_occupied ^= bit;
        self.hash ^= ZOBRIST.piece(piece, sq);
        piece
    }

    /// Relocate the piece on `from` to the empty square `to`.
    #[inline]
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        debug_assert!(self.board[to.index()].is_none(), "move_piece: {to} is occupied");
        let piece = match self.board[from.index()].take() {
            Some(piece) => piece,
            None => panic!("move_piece: {from} is empty"),
        };
        let mask = from.bitboard() | to.bitboard();
        let c_idx = piece.color.index();
        self.pieces[c_idx][piece.piece_type.index()] ^= mask;
        self.occupied[c_idx] ^= mask;
        self.all_occupied ^= mask;
        self.board[to.index()] = Some(piece);
        self.hash ^= ZOBRIST.piece(piece, from) ^ ZOBRIST.piece(piece, to);
    }

    /// Remove the piece on `to`, then move the piece on `from` there.
    #[inline]
    pub(crate) fn capture_piece(&mut self, from: Square, to: Square) -> Piece {
        let captured = self.remove_piece(to);
        self.move_piece(from, to);
        captured
    }

    /// Play a move produced by the move generator for this position.
    ///
    /// # Panics
    /// Panics when the undo stack already holds
    /// [`MAX_HISTORY`](super::MAX_HISTORY) moves. Moves that are not legal here
    /// leave the position in an undefined state.
    pub fn do_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let them = us.opponent();
        let from = mv.from();
        let to = mv.to();
        let kind = mv.kind();

        let moved = self.board[from.index()];
        let captured = match kind {
            MoveKind::Capture | MoveKind::PromotionCapture(_) => self.board[to.index()],
            MoveKind::EnPassant => Some(Piece::new(them, PieceType::Pawn)),
            _ => None,
        };

        self.history.push(UndoInfo {
            mv,
            captured,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            derived: self.derived,
            hash: self.hash,
        });

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= ZOBRIST.en_passant(ep.file());
        }

        match kind {
            MoveKind::Quiet => self.move_piece(from, to),
            MoveKind::DoublePawnPush => {
                self.move_piece(from, to);
                let skipped = Square::from_index((from.index() + to.index()) / 2);
                self.en_passant = Some(skipped);
                self.hash ^= ZOBRIST.en_passant(skipped.file());
            }
            MoveKind::Capture => {
                self.capture_piece(from, to);
            }
            MoveKind::EnPassant => {
                self.remove_piece(Square::new(to.file(), from.rank()));
                self.move_piece(from, to);
            }
            MoveKind::KingsideCastle | MoveKind::QueensideCastle => {
                let path = castling_path(us, kind == MoveKind::KingsideCastle);
                self.move_piece(path.king_from, path.king_to);
                self.move_piece(path.rook_from, path.rook_to);
            }
            MoveKind::Promotion(piece_type) => {
                self.remove_piece(from);
                self.add_piece(Piece::new(us, piece_type), to);
            }
            MoveKind::PromotionCapture(piece_type) => {
                self.remove_piece(from);
                self.remove_piece(to);
                self.add_piece(Piece::new(us, piece_type), to);
            }
        }

        let lost = CASTLING_LOSS[from.index()] | CASTLING_LOSS[to.index()];
        if lost & self.castling_rights.as_u8() != 0 {
            self.hash ^= ZOBRIST.castling(self.castling_rights);
            self.castling_rights.remove_mask(lost);
            self.hash ^= ZOBRIST.castling(self.castling_rights);
        }

        let pawn_move = moved.is_some_and(|p| p.piece_type == PieceType::Pawn);
        if pawn_move || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = them;
        self.hash ^= ZOBRIST.black_to_move();

        self.update_derived();

        debug_assert_eq!(
            self.hash,
            self.compute_hash(),
            "fingerprint out of sync after {mv} in {}",
            self.to_fen()
        );
    }

    /// Take back the last move played with [`Position::do_move`].
    ///
    /// # Panics
    /// Panics if no move is on the undo stack.
    pub fn undo_move(&mut self) {
        let undo = self.history.pop();
        let mv = undo.mv;
        let us = self.side_to_move.opponent();
        let from = mv.from();
        let to = mv.to();

        match mv.kind() {
            MoveKind::KingsideCastle | MoveKind::QueensideCastle => {
                let path = castling_path(us, mv.kind() == MoveKind::KingsideCastle);
                self.move_piece(path.rook_to, path.rook_from);
                self.move_piece(path.king_to, path.king_from);
            }
            MoveKind::Promotion(_) | MoveKind::PromotionCapture(_) => {
                self.remove_piece(to);
                self.add_piece(Piece::new(us, PieceType::Pawn), from);
            }
            _ => self.move_piece(to, from),
        }

        if let Some(piece) = undo.captured {
            let sq = if mv.is_en_passant() {
                Square::new(to.file(), from.rank())
            } else {
                to
            };
            self.add_piece(piece, sq);
        }

        self.side_to_move = us;
        self.castling_rights = undo.castling_rights;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.derived = undo.derived;
        self.hash = undo.hash;
    }

    /// Fingerprint recomputed from the placement and state fields alone.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for sq in Square::all() {
            if let Some(piece) = self.board[sq.index()] {
                hash ^= ZOBRIST.piece(piece, sq);
            }
        }
        hash ^= ZOBRIST.side(self.side_to_move);
        hash ^= ZOBRIST.castling(self.castling_rights);
        if let Some(ep) = self.en_passant {
            hash ^= ZOBRIST.en_passant(ep.file());
        }
        hash
    }
}
