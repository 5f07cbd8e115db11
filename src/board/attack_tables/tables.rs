//! Occupancy-independent tables: leaper attacks and square-pair geometry.

use crate::board::types::{Bitboard, Color, Direction, Square};

// Knight jumps as two compass steps; each step masks its own wraparound
const KNIGHT_STEPS: [(Direction, Direction); 8] = [
    (Direction::North, Direction::NorthEast),
    (Direction::North, Direction::NorthWest),
    (Direction::South, Direction::SouthEast),
    (Direction::South, Direction::SouthWest),
    (Direction::East, Direction::NorthEast),
    (Direction::East, Direction::SouthEast),
    (Direction::West, Direction::NorthWest),
    (Direction::West, Direction::SouthWest),
];

pub(super) fn king_table() -> [Bitboard; 64] {
    std::array::from_fn(|idx| {
        let from = Square::from_index(idx).bitboard();
        Direction::ALL
            .iter()
            .fold(Bitboard::EMPTY, |acc, &dir| acc | from.shift(dir))
    })
}

pub(super) fn knight_table() -> [Bitboard; 64] {
    std::array::from_fn(|idx| {
        let from = Square::from_index(idx).bitboard();
        KNIGHT_STEPS
            .iter()
            .fold(Bitboard::EMPTY, |acc, &(first, second)| {
                acc | from.shift(first).shift(second)
            })
    })
}

pub(super) fn pawn_table() -> [[Bitboard; 64]; 2] {
    let captures = |color: Color| -> [Bitboard; 64] {
        let forward = Direction::forward(color);
        let (left, right) = match forward {
            Direction::North => (Direction::NorthWest, Direction::NorthEast),
            _ => (Direction::SouthWest, Direction::SouthEast),
        };
        std::array::from_fn(|idx| {
            let from = Square::from_index(idx).bitboard();
            from.shift(left) | from.shift(right)
        })
    };
    [captures(Color::White), captures(Color::Black)]
}

pub(super) type PairTable = Box<[[Bitboard; 64]; 64]>;

/// Between and line tables for every aligned pair of squares.
pub(super) fn pair_tables() -> (PairTable, PairTable) {
    let mut between: PairTable = Box::new([[Bitboard::EMPTY; 64]; 64]);
    let mut line: PairTable = Box::new([[Bitboard::EMPTY; 64]; 64]);

    for a in Square::all() {
        for dir in Direction::ALL {
            // full line through `a` along this axis, clipped to the board
            let axis = ray(a, dir) | ray(a, dir.opposite()) | a.bitboard();

            let mut gap = Bitboard::EMPTY;
            let mut current = a;
            while let Some(b) = current.offset(dir) {
                between[a.index()][b.index()] = gap;
                line[a.index()][b.index()] = axis;
                gap |= b.bitboard();
                current = b;
            }
        }
    }
    (between, line)
}

fn ray(from: Square, dir: Direction) -> Bitboard {
    let mut squares = Bitboard::EMPTY;
    let mut current = from;
    while let Some(next) = current.offset(dir) {
        squares |= next.bitboard();
        current = next;
    }
    squares
}
