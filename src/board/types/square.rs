//! Square, file and rank types.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::direction::Direction;
use super::piece::Color;
use crate::board::error::SquareError;

/// A board file, `A` (queenside) through `H` (kingside).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(idx: usize) -> Option<File> {
        if idx < 8 {
            Some(File::ALL[idx])
        } else {
            None
        }
    }

    /// Parse a lowercase file letter (`'a'..='h'`)
    #[must_use]
    pub fn from_char(c: char) -> Option<File> {
        match c {
            'a'..='h' => File::from_index(c as usize - 'a' as usize),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

/// A board rank, `First` (White's back rank) through `Eighth`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(idx: usize) -> Option<Rank> {
        if idx < 8 {
            Some(Rank::ALL[idx])
        } else {
            None
        }
    }

    /// Parse a rank digit (`'1'..='8'`)
    #[must_use]
    pub fn from_char(c: char) -> Option<Rank> {
        match c {
            '1'..='8' => Rank::from_index(c as usize - '1' as usize),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// The same rank seen from `color`'s side of the board.
    #[inline]
    #[must_use]
    pub const fn relative_to(self, color: Color) -> Rank {
        match color {
            Color::White => self,
            Color::Black => Rank::ALL[7 - self as usize],
        }
    }
}

/// One of the 64 squares, indexed rank-major from a1 = 0 to h8 = 63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    #[inline]
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square((rank as u8) * 8 + file as u8)
    }

    /// Create a square from an index (0-63).
    ///
    /// # Panics
    /// Panics if `idx >= 64`.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        assert!(idx < 64, "square index out of range");
        Square(idx as u8)
    }

    /// Create a square from rank and file indices (each 0-7), with bounds checking
    #[must_use]
    pub const fn from_coords(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Get the square's index (0-63, a1=0, b1=1, ..., h8=63)
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn file(self) -> File {
        File::ALL[(self.0 & 7) as usize]
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 >> 3) as usize]
    }

    #[inline]
    #[must_use]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1u64 << self.0)
    }

    /// Step one square in `dir`, or `None` when the step leaves the board.
    ///
    /// Wraparound across the a/h files is detected by shifting the square's
    /// bitboard, which clears the wrapped file.
    #[inline]
    #[must_use]
    pub fn offset(self, dir: Direction) -> Option<Square> {
        self.bitboard().shift(dir).lsb()
    }

    /// Mirror the square across the board's horizontal midline (a1 <-> a8)
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().to_char(), self.rank().to_char())
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square((rank * 8 + file) as u8))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        match (File::from_char(f), Rank::from_char(r)) {
            (Some(file), Some(rank)) => Ok(Square::new(file, rank)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_layout() {
        assert_eq!(Square::A1.index(), 0);
        assert_eq!(Square::H1.index(), 7);
        assert_eq!(Square::A8.index(), 56);
        assert_eq!(Square::new(File::E, Rank::Fourth).index(), 28);
        assert_eq!(Square::from_index(28).file(), File::E);
        assert_eq!(Square::from_index(28).rank(), Rank::Fourth);
    }

    #[test]
    fn test_parse_and_display() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(sq, Square::new(File::E, Rank::Fourth));
        assert_eq!(sq.to_string(), "e4");
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset_detects_wraparound() {
        assert_eq!(Square::H1.offset(Direction::East), None);
        assert_eq!(Square::A1.offset(Direction::West), None);
        assert_eq!(Square::A1.offset(Direction::South), None);
        assert_eq!(Square::H8.offset(Direction::NorthEast), None);
        assert_eq!(Square::H1.offset(Direction::NorthWest), Some(Square::from_index(14)));
        assert_eq!(Square::A1.offset(Direction::NorthEast), Some(Square::from_index(9)));
        let h4: Square = "h4".parse().unwrap();
        assert_eq!(h4.offset(Direction::SouthEast), None);
        assert_eq!(h4.offset(Direction::North).map(|s| s.to_string()), Some("h5".into()));
    }

    #[test]
    fn test_try_from_tuple() {
        assert_eq!(Square::try_from((0, 4)), Ok(Square::E1));
        assert_eq!(
            Square::try_from((8, 0)),
            Err(SquareError::RankOutOfBounds { rank: 8 })
        );
        assert_eq!(
            Square::try_from((0, 9)),
            Err(SquareError::FileOutOfBounds { file: 9 })
        );
    }

    #[test]
    fn test_relative_rank() {
        assert_eq!(Rank::Second.relative_to(Color::White), Rank::Second);
        assert_eq!(Rank::Second.relative_to(Color::Black), Rank::Seventh);
    }

    #[test]
    fn test_square_order_follows_index() {
        assert!(Square::A1 < Square::B1);
        assert!(Square::H1 < Square::A8);
        assert_eq!(Square::all().count(), 64);
    }
}
