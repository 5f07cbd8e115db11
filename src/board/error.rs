//! Error types for position construction and move parsing.

use std::fmt;

use super::types::{Color, Square};

/// Why a FEN string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    TooFewFields { found: usize },
    TooManyFields { found: usize },
    /// Piece placement does not have exactly 8 ranks
    WrongRankCount { found: usize },
    InvalidPiece { char: char },
    /// A rank describes more than 8 files
    TooManyFiles { rank: usize, files: usize },
    /// A rank describes fewer than 8 files
    TooFewFiles { rank: usize, files: usize },
    InvalidSideToMove { found: String },
    InvalidCastling { char: char },
    /// Castling character given twice
    DuplicateCastling { char: char },
    /// En passant field is neither '-' nor a square
    InvalidEnPassant { found: String },
    /// Half-move clock is not a non-negative integer
    InvalidHalfmoveClock { found: String },
    /// Full-move number is not a positive integer
    InvalidFullmoveNumber { found: String },
    /// Fields parsed but describe an impossible position
    Position(PositionError),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields { found } => {
                write!(f, "expected 4 to 6 FEN fields, got {found}")
            }
            FenError::TooManyFields { found } => {
                write!(f, "expected 4 to 6 FEN fields, got {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "placement describes {found} ranks instead of 8")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "unknown piece '{char}' in placement")
            }
            FenError::TooManyFiles { rank, files } => {
                write!(f, "rank {rank} spans {files} files, more than 8")
            }
            FenError::TooFewFiles { rank, files } => {
                write!(f, "rank {rank} spans only {files} files")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "side to move '{found}' is neither 'w' nor 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "unknown castling flag '{char}'")
            }
            FenError::DuplicateCastling { char } => {
                write!(f, "castling flag '{char}' appears twice")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "en passant field '{found}' is neither '-' nor a square")
            }
            FenError::InvalidHalfmoveClock { found } => {
                write!(f, "half-move clock '{found}' is not a number")
            }
            FenError::InvalidFullmoveNumber { found } => {
                write!(f, "full-move number '{found}' is not a positive number")
            }
            FenError::Position(err) => write!(f, "illegal position: {err}"),
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::Position(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PositionError> for FenError {
    fn from(err: PositionError) -> Self {
        FenError::Position(err)
    }
}

/// A position that no legal game could reach, or that the core cannot
/// represent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// A side has no king
    MissingKing { color: Color },
    /// A side has more than one king
    TooManyKings { color: Color, count: u32 },
    /// A pawn stands on the first or eighth rank
    PawnOnBackRank { square: Square },
    /// A castling right is set without king and rook on their home squares
    InvalidCastlingRights { color: Color, kingside: bool },
    /// En passant target that no double pawn push could have produced
    InvalidEnPassant { square: Square },
    /// The side that just moved left its king attacked
    OpponentInCheck { color: Color },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::MissingKing { color } => write!(f, "{color} has no king"),
            PositionError::TooManyKings { color, count } => {
                write!(f, "{color} has {count} kings")
            }
            PositionError::PawnOnBackRank { square } => {
                write!(f, "pawn on back rank square {square}")
            }
            PositionError::InvalidCastlingRights { color, kingside } => {
                let side = if *kingside { "kingside" } else { "queenside" };
                write!(f, "{color} {side} castling right without king and rook on home squares")
            }
            PositionError::InvalidEnPassant { square } => {
                write!(f, "en passant square {square} does not follow a double pawn push")
            }
            PositionError::OpponentInCheck { color } => {
                write!(f, "{color} is in check but not to move")
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Failure to turn UCI long algebraic text into a legal move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    InvalidLength { len: usize },
    InvalidSquare { notation: String },
    InvalidPromotion { char: char },
    /// Well-formed, but not among the generated moves
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "UCI move has {len} characters, expected 4 or 5")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "bad square in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "bad promotion letter '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "'{notation}' is not legal here")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    RankOutOfBounds { rank: usize },
    FileOutOfBounds { file: usize },
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "rank index {rank} is off the board")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "file index {file} is off the board")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "'{notation}' is not a square")
            }
        }
    }
}

impl std::error::Error for SquareError {}
