use std::fmt;

use super::attack_tables::AttackTables;
use super::history::History;
use super::types::{Bitboard, CastlingRights, Color, File, Move, Piece, PieceType, Rank, Square};

/// Standard initial arrangement.
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// State derived from the placement after every move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct DerivedState {
    /// Squares attacked by each color, indexed by `Color::index`
    pub(crate) attacks: [Bitboard; 2],
    /// Pieces of each color pinned to their own king
    pub(crate) pinned: [Bitboard; 2],
    /// Enemy pieces giving check to the side to move
    pub(crate) checkers: Bitboard,
    /// Squares the side to move's king may not step onto
    pub(crate) king_danger: Bitboard,
}

impl DerivedState {
    pub(crate) const EMPTY: DerivedState = DerivedState {
        attacks: [Bitboard::EMPTY; 2],
        pinned: [Bitboard::EMPTY; 2],
        checkers: Bitboard::EMPTY,
        king_danger: Bitboard::EMPTY,
    };
}

/// A chess position with incrementally maintained attack, pin and check state.
///
/// Built with [`Position::startpos`], [`Position::try_from_fen`] or
/// [`PositionBuilder`](super::PositionBuilder) and mutated only through
/// [`Position::do_move`] and [`Position::undo_move`].
#[derive(Clone)]
pub struct Position {
    pub(crate) tables: &'static AttackTables,
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) board: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) derived: DerivedState,
    pub(crate) hash: u64,
    pub(crate) history: History,
}

impl Position {
    /// The standard initial position.
    #[must_use]
    pub fn startpos() -> Self {
        Self::from_fen(STARTPOS_FEN)
    }

    /// Empty board, White to move, no rights. Not a legal position until
    /// kings are placed and `update_derived` has run.
    pub(crate) fn empty(tables: &'static AttackTables) -> Self {
        Position {
            tables,
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            board: [None; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            derived: DerivedState::EMPTY,
            hash: 0,
            history: History::new(),
        }
    }

    /// Attack tables this position was built with.
    #[inline]
    #[must_use]
    pub fn tables(&self) -> &'static AttackTables {
        self.tables
    }

    #[inline]
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece_type: PieceType) -> Bitboard {
        self.pieces[color.index()][piece_type.index()]
    }

    /// Pieces of one type for both colors
    #[inline]
    #[must_use]
    pub fn pieces_of_type(&self, piece_type: PieceType) -> Bitboard {
        self.pieces[0][piece_type.index()] | self.pieces[1][piece_type.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.all_occupied
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        let kings = self.pieces(color, PieceType::King);
        debug_assert_eq!(kings.popcount(), 1, "{color} must have exactly one king");
        Square::from_index(kings.0.trailing_zeros() as usize)
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Square a pawn skipped over on the previous double push
    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Incrementally maintained Zobrist fingerprint
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Every square attacked by `color`
    #[inline]
    #[must_use]
    pub fn attacks(&self, color: Color) -> Bitboard {
        self.derived.attacks[color.index()]
    }

    /// Pieces of `color` pinned against their own king
    #[inline]
    #[must_use]
    pub fn pinned(&self, color: Color) -> Bitboard {
        self.derived.pinned[color.index()]
    }

    /// Enemy pieces attacking the king of the side to move
    #[inline]
    #[must_use]
    pub fn checkers(&self) -> Bitboard {
        self.derived.checkers
    }

    /// Squares where the side to move's king would be in check, computed
    /// with that king lifted off the board.
    #[inline]
    #[must_use]
    pub fn king_danger(&self) -> Bitboard {
        self.derived.king_danger
    }

    #[inline]
    #[must_use]
    pub fn in_check(&self) -> bool {
        !self.derived.checkers.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn in_double_check(&self) -> bool {
        self.derived.checkers.more_than_one()
    }

    #[inline]
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.attacks(by).contains(sq)
    }

    /// Number of moves on the undo stack
    #[inline]
    #[must_use]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// The move most recently played with `do_move` and not yet undone
    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|undo| undo.mv)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

/// Compares placement, rights, clocks, derived state and fingerprint; the
/// undo stack is not part of a position's identity.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.occupied == other.occupied
            && self.all_occupied == other.all_occupied
            && self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.derived == other.derived
            && self.hash == other.hash
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.to_fen())
            .field("hash", &format_args!("{:#018x}", self.hash))
            .field("history", &self.history)
            .finish()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            write!(f, "{} ", rank.to_char())?;
            for file in File::ALL {
                let c = self
                    .piece_on(Square::new(file, *rank))
                    .map_or('.', Piece::to_fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in File::ALL {
            write!(f, " {}", file.to_char())?;
        }
        writeln!(f)?;
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_queries() {
        let pos = Position::startpos();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.castling_rights(), CastlingRights::all());
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.occupied().popcount(), 32);
        assert_eq!(pos.occupied_by(Color::Black).popcount(), 16);
        assert_eq!(pos.pieces(Color::White, PieceType::Pawn), Bitboard::RANK_2);
        assert_eq!(pos.pieces_of_type(PieceType::Rook).popcount(), 4);
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black), Square::E8);
        assert_eq!(
            pos.piece_on(Square::D8),
            Some(Piece::new(Color::Black, PieceType::Queen))
        );
        assert_eq!(pos.piece_on("e4".parse().unwrap()), None);
        assert!(!pos.in_check());
        assert_eq!(pos.ply(), 0);
        assert_eq!(pos.last_move(), None);
    }

    #[test]
    fn test_startpos_derived_state() {
        let pos = Position::startpos();
        // every square on ranks 3 and 6 is covered by pawns or knights
        assert_eq!(pos.attacks(Color::White) & Bitboard::rank_mask(Rank::Third), Bitboard::rank_mask(Rank::Third));
        assert_eq!(pos.attacks(Color::Black) & Bitboard::rank_mask(Rank::Sixth), Bitboard::rank_mask(Rank::Sixth));
        assert!(pos.pinned(Color::White).is_empty());
        assert!(pos.checkers().is_empty());
        assert!(pos.is_square_attacked("f3".parse().unwrap(), Color::White));
        assert!(!pos.is_square_attacked("e4".parse().unwrap(), Color::White));
    }

    #[test]
    fn test_display_shows_board_and_fen() {
        let text = Position::startpos().to_string();
        assert!(text.starts_with("8  r n b q k b n r"));
        assert!(text.contains("1  R N B Q K B N R"));
        assert!(text.ends_with(STARTPOS_FEN));
    }

    #[test]
    fn test_equality_ignores_history() {
        let mut pos = Position::startpos();
        let mv = pos.parse_move("g1f3").unwrap();
        pos.do_move(mv);
        pos.undo_move();
        assert_eq!(pos, Position::startpos());
        assert_eq!(pos.hash(), Position::startpos().hash());
    }
}
