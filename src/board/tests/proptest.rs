//! Property-based tests for position invariants.
//!
//! Each property plays a seeded random game from the start position or
//! Kiwipete and checks an invariant after every move.

use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;

use crate::board::{Bitboard, Color, PieceType, Position};

const START_FENS: [&str; 2] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
];

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=20usize
}

/// Play up to `num_moves` random legal moves, calling `check` after each.
fn random_game(seed: u64, num_moves: usize, mut check: impl FnMut(&Position)) -> Position {
    let mut rng = StdRng::seed_from_u64(seed);
    let fen = START_FENS[(seed % START_FENS.len() as u64) as usize];
    let mut position = Position::from_fen(fen);
    for _ in 0..num_moves {
        let moves = position.generate_moves();
        if moves.is_empty() {
            break;
        }
        position.do_move(moves.as_slice()[rng.gen_range(0..moves.len())]);
        check(&position);
    }
    position
}

proptest! {
    #[test]
    fn prop_make_unmake_round_trip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let start = Position::from_fen(START_FENS[(seed % START_FENS.len() as u64) as usize]);
        let mut position = random_game(seed, num_moves, |_| {});
        while position.ply() > 0 {
            position.undo_move();
        }
        prop_assert_eq!(position, start);
    }

    #[test]
    fn prop_incremental_hash_matches_full(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut mismatches = 0;
        random_game(seed, num_moves, |p| {
            if p.hash() != p.compute_hash() {
                mismatches += 1;
            }
        });
        prop_assert_eq!(mismatches, 0);
    }

    #[test]
    fn prop_fen_round_trip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let position = random_game(seed, num_moves, |_| {});
        let fen = position.to_fen();
        let parsed = Position::try_from_fen(&fen);
        prop_assert!(parsed.is_ok(), "{} failed to parse: {:?}", fen, parsed.err());
        let parsed = parsed.unwrap();
        prop_assert_eq!(parsed.to_fen(), fen);
        prop_assert_eq!(parsed.hash(), position.hash());
        prop_assert_eq!(parsed, position);
    }

    #[test]
    fn prop_no_move_leaves_king_attacked(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut exposed = Vec::new();
        random_game(seed, num_moves, |p| {
            let mover = p.side_to_move().opponent();
            let king = p.king_square(mover);
            let attackers = p.attackers_to(king, p.occupied()) & p.occupied_by(p.side_to_move());
            if !attackers.is_empty() {
                exposed.push(p.to_fen());
            }
        });
        prop_assert!(exposed.is_empty(), "{:?}", exposed);
    }

    #[test]
    fn prop_one_king_each(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let position = random_game(seed, num_moves, |_| {});
        for color in [Color::White, Color::Black] {
            prop_assert_eq!(position.pieces(color, PieceType::King).popcount(), 1);
        }
        prop_assert_eq!(
            position.occupied_by(Color::White) & position.occupied_by(Color::Black),
            Bitboard::EMPTY
        );
    }
}
