//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//! [`PositionBuilder::build`] checks the description against the rules and
//! either returns a complete position or a [`PositionError`].
//!
//! # Example
//! ```
//! use chess_core::board::{Color, Piece, PieceType, PositionBuilder, Square};
//!
//! let position = PositionBuilder::new()
//!     .piece(Square::E1, Piece::new(Color::White, PieceType::King))
//!     .piece(Square::E8, Piece::new(Color::Black, PieceType::King))
//!     .piece("a2".parse().unwrap(), Piece::new(Color::White, PieceType::Pawn))
//!     .side_to_move(Color::White)
//!     .build()
//!     .unwrap();
//! assert_eq!(position.generate_moves().len(), 7);
//! ```

use super::attack_tables::AttackTables;
use super::error::PositionError;
use super::state::Position;
use super::types::{
    castling_path, CastlingRights, Color, File, Piece, PieceType, Rank, Square,
};

/// A fluent builder for constructing `Position` values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    board: [Option<Piece>; 64],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    tables: Option<&'static AttackTables>,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Empty board, White to move, no rights, clocks at 0 and 1.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            board: [None; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            tables: None,
        }
    }

    /// Builder preloaded with the initial arrangement and full rights.
    #[must_use]
    pub fn starting_position() -> Self {
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        let mut builder = Self::new();
        for (file, piece_type) in File::ALL.into_iter().zip(back_rank) {
            for color in Color::BOTH {
                builder.board[Square::new(file, color.back_rank()).index()] =
                    Some(Piece::new(color, piece_type));
                builder.board[Square::new(file, color.pawn_start_rank()).index()] =
                    Some(Piece::new(color, PieceType::Pawn));
            }
        }
        builder.castling_rights = CastlingRights::all();
        builder
    }

    /// Place a piece on the board, replacing whatever stood there.
    #[must_use]
    pub fn piece(mut self, square: Square, piece: Piece) -> Self {
        self.board[square.index()] = Some(piece);
        self
    }

    /// Empty `square`.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.board[square.index()] = None;
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Replace every castling right at once.
    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Grant `color` the right to castle short.
    #[must_use]
    pub fn castle_kingside(mut self, color: Color) -> Self {
        self.castling_rights.set(color, true);
        self
    }

    /// Grant `color` the right to castle long.
    #[must_use]
    pub fn castle_queenside(mut self, color: Color) -> Self {
        self.castling_rights.set(color, false);
        self
    }

    #[must_use]
    pub const fn no_castling_rights(mut self) -> Self {
        self.castling_rights = CastlingRights::none();
        self
    }

    /// The square a pawn skipped on the previous move.
    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.en_passant = Some(target);
        self
    }

    #[must_use]
    pub const fn clear_en_passant(mut self) -> Self {
        self.en_passant = None;
        self
    }

    /// Plies since the last capture or pawn move.
    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    /// Set the full move number; 0 is stored as 1.
    #[must_use]
    pub fn fullmove_number(mut self, number: u32) -> Self {
        self.fullmove_number = number.max(1);
        self
    }

    /// Use these attack tables instead of the process-wide ones.
    #[must_use]
    pub const fn tables(mut self, tables: &'static AttackTables) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Validate the description and build the position.
    pub fn build(self) -> Result<Position, PositionError> {
        self.validate_kings()?;
        self.validate_pawns()?;
        self.validate_castling()?;
        self.validate_en_passant()?;

        let tables = self.tables.unwrap_or_else(AttackTables::init);
        let mut position = Position::empty(tables);
        for sq in Square::all() {
            if let Some(piece) = self.board[sq.index()] {
                position.add_piece(piece, sq);
            }
        }
        position.side_to_move = self.side_to_move;
        position.castling_rights = self.castling_rights;
        position.en_passant = self.en_passant;
        position.halfmove_clock = self.halfmove_clock;
        position.fullmove_number = self.fullmove_number;
        position.hash = position.compute_hash();

        let them = self.side_to_move.opponent();
        let their_king = position.king_square(them);
        let attackers = position.attackers_to(their_king, position.occupied())
            & position.occupied_by(self.side_to_move);
        if !attackers.is_empty() {
            return Err(PositionError::OpponentInCheck { color: them });
        }

        position.update_derived();
        Ok(position)
    }

    fn validate_kings(&self) -> Result<(), PositionError> {
        for color in Color::BOTH {
            let king = Piece::new(color, PieceType::King);
            let count = self.board.iter().filter(|p| **p == Some(king)).count() as u32;
            match count {
                0 => return Err(PositionError::MissingKing { color }),
                1 => {}
                _ => return Err(PositionError::TooManyKings { color, count }),
            }
        }
        Ok(())
    }

    fn validate_pawns(&self) -> Result<(), PositionError> {
        for sq in Square::all() {
            let is_pawn = self.board[sq.index()].is_some_and(|p| p.piece_type == PieceType::Pawn);
            if is_pawn && matches!(sq.rank(), Rank::First | Rank::Eighth) {
                return Err(PositionError::PawnOnBackRank { square: sq });
            }
        }
        Ok(())
    }

    fn validate_castling(&self) -> Result<(), PositionError> {
        for color in Color::BOTH {
            for kingside in [true, false] {
                if !self.castling_rights.has(color, kingside) {
                    continue;
                }
                let path = castling_path(color, kingside);
                let king_home =
                    self.board[path.king_from.index()] == Some(Piece::new(color, PieceType::King));
                let rook_home =
                    self.board[path.rook_from.index()] == Some(Piece::new(color, PieceType::Rook));
                if !king_home || !rook_home {
                    return Err(PositionError::InvalidCastlingRights { color, kingside });
                }
            }
        }
        Ok(())
    }

    /// The target must sit behind a pawn that could just have pushed two
    /// squares: right rank, enemy pawn in front, target and origin empty.
    fn validate_en_passant(&self) -> Result<(), PositionError> {
        let Some(square) = self.en_passant else {
            return Ok(());
        };
        let us = self.side_to_move;
        let them = us.opponent();
        let invalid = Err(PositionError::InvalidEnPassant { square });

        if square.rank() != Rank::Sixth.relative_to(us) {
            return invalid;
        }
        let pushed = Square::new(square.file(), Rank::Fifth.relative_to(us));
        let origin = Square::new(square.file(), Rank::Seventh.relative_to(us));
        if self.board[pushed.index()] != Some(Piece::new(them, PieceType::Pawn))
            || self.board[square.index()].is_some()
            || self.board[origin.index()].is_some()
        {
            return invalid;
        }
        Ok(())
    }
}
