//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::PieceType;
use super::square::Square;

// Flag nibble. Bit 3 marks a promotion, bit 2 a capture; for promotions the
// low two bits pick the piece (knight, bishop, rook, queen).
const FLAG_QUIET: u16 = 0b0000;
const FLAG_DOUBLE_PAWN: u16 = 0b0001;
const FLAG_CASTLE_KINGSIDE: u16 = 0b0010;
const FLAG_CASTLE_QUEENSIDE: u16 = 0b0011;
const FLAG_CAPTURE: u16 = 0b0100;
const FLAG_EN_PASSANT: u16 = 0b0101;
const PROMOTION_BIT: u16 = 0b1000;
const CAPTURE_BIT: u16 = 0b0100;

const fn promotion_code(piece: PieceType) -> u16 {
    match piece {
        PieceType::Knight => 0,
        PieceType::Bishop => 1,
        PieceType::Rook => 2,
        _ => 3,
    }
}

const fn promotion_piece(code: u16) -> PieceType {
    match code & 0b11 {
        0 => PieceType::Knight,
        1 => PieceType::Bishop,
        2 => PieceType::Rook,
        _ => PieceType::Queen,
    }
}

/// What a move does to the board, decoded from its flag bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    DoublePawnPush,
    KingsideCastle,
    QueensideCastle,
    Capture,
    EnPassant,
    Promotion(PieceType),
    PromotionCapture(PieceType),
}

/// Compact 16-bit move representation.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-15: flags (move type)
///
/// A move carries no reference to the position it came from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    /// The all-zero move, `a1a1`. Only used to fill empty slots.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Move(0)
    }

    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move::encode(from, to, FLAG_QUIET)
    }

    #[inline]
    #[must_use]
    pub const fn capture(from: Square, to: Square) -> Self {
        Move::encode(from, to, FLAG_CAPTURE)
    }

    /// Two-square pawn advance from its start rank.
    #[inline]
    #[must_use]
    pub const fn double_pawn_push(from: Square, to: Square) -> Self {
        Move::encode(from, to, FLAG_DOUBLE_PAWN)
    }

    /// `to` is the en passant target, not the captured pawn's square.
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move::encode(from, to, FLAG_EN_PASSANT)
    }

    /// Castling is encoded by the king's origin and destination.
    #[inline]
    #[must_use]
    pub const fn castle_kingside(from: Square, to: Square) -> Self {
        Move::encode(from, to, FLAG_CASTLE_KINGSIDE)
    }

    #[inline]
    #[must_use]
    pub const fn castle_queenside(from: Square, to: Square) -> Self {
        Move::encode(from, to, FLAG_CASTLE_QUEENSIDE)
    }

    /// Non-capturing promotion to `piece`. Anything other than a knight,
    /// bishop or rook is encoded as a queen.
    #[inline]
    #[must_use]
    pub const fn new_promotion(from: Square, to: Square, piece: PieceType) -> Self {
        Move::encode(from, to, PROMOTION_BIT | promotion_code(piece))
    }

    #[inline]
    #[must_use]
    pub const fn new_promotion_capture(from: Square, to: Square, piece: PieceType) -> Self {
        Move::encode(from, to, PROMOTION_BIT | CAPTURE_BIT | promotion_code(piece))
    }

    #[inline]
    const fn encode(from: Square, to: Square, flag: u16) -> Self {
        Move(from.index() as u16 | (to.index() as u16) << 6 | flag << 12)
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index((self.0 & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> 6) & 0x3F) as usize)
    }

    #[inline]
    const fn flag(self) -> u16 {
        self.0 >> 12
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        let flag = self.flag();
        if flag & PROMOTION_BIT != 0 {
            let piece = promotion_piece(flag);
            return if flag & CAPTURE_BIT != 0 {
                MoveKind::PromotionCapture(piece)
            } else {
                MoveKind::Promotion(piece)
            };
        }
        match flag {
            FLAG_DOUBLE_PAWN => MoveKind::DoublePawnPush,
            FLAG_CASTLE_KINGSIDE => MoveKind::KingsideCastle,
            FLAG_CASTLE_QUEENSIDE => MoveKind::QueensideCastle,
            FLAG_CAPTURE => MoveKind::Capture,
            FLAG_EN_PASSANT => MoveKind::EnPassant,
            _ => MoveKind::Quiet,
        }
    }

    /// Includes en passant and capturing promotions.
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.flag() & CAPTURE_BIT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.flag() == FLAG_EN_PASSANT
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        matches!(self.flag(), FLAG_CASTLE_KINGSIDE | FLAG_CASTLE_QUEENSIDE)
    }

    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        self.flag() == FLAG_DOUBLE_PAWN
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.flag() & PROMOTION_BIT != 0
    }

    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<PieceType> {
        if self.is_promotion() {
            Some(promotion_piece(self.flag()))
        } else {
            None
        }
    }

    /// Raw encoding, stable across runs.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} {:?}", self.kind())
    }
}

/// UCI long algebraic form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Upper bound on legal moves in any reachable position (218), rounded up.
pub const MAX_MOVES: usize = 256;

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::null(); MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        let mv = self.list.get(self.idx)?;
        self.idx += 1;
        Some(mv)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}
