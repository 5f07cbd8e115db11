//! Legal move generation against a brute-force reference.
//!
//! The reference generates pseudo-legal moves straight from the attack
//! tables, plays each one and keeps it only if the mover's king is safe
//! afterwards. The fast generator must agree move for move.

use rand::prelude::*;

use crate::board::{Color, Direction, File, Move, PieceType, Position, Square};

const FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "8/8/8/KPp4r/8/8/8/7k w - c6 0 1",
    "k1b5/8/8/4Pp2/8/7K/8/8 w - f6 0 1",
    "4k3/8/3N4/8/8/8/8/4RK2 b - - 0 1",
];

const PROMOTIONS: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

fn attacked(position: &Position, sq: Square, by: Color) -> bool {
    !(position.attackers_to(sq, position.occupied()) & position.occupied_by(by)).is_empty()
}

fn pseudo_legal(position: &Position) -> Vec<Move> {
    let tables = position.tables();
    let us = position.side_to_move();
    let own = position.occupied_by(us);
    let enemy = position.occupied_by(us.opponent());
    let occupied = position.occupied();
    let mut moves = Vec::new();

    for from in own {
        let Some(piece) = position.piece_on(from) else {
            continue;
        };
        match piece.piece_type {
            PieceType::Pawn => {
                let forward = Direction::forward(us);
                let last_rank = |to: Square| to.rank() == us.promotion_rank();
                if let Some(one) = from.offset(forward).filter(|s| !occupied.contains(*s)) {
                    if last_rank(one) {
                        moves.extend(PROMOTIONS.map(|p| Move::new_promotion(from, one, p)));
                    } else {
                        moves.push(Move::quiet(from, one));
                    }
                    let two = one.offset(forward).filter(|s| !occupied.contains(*s));
                    if let (true, Some(two)) = (from.rank() == us.pawn_start_rank(), two) {
                        moves.push(Move::double_pawn_push(from, two));
                    }
                }
                for to in tables.pawn(us, from) & enemy {
                    if last_rank(to) {
                        moves.extend(PROMOTIONS.map(|p| Move::new_promotion_capture(from, to, p)));
                    } else {
                        moves.push(Move::capture(from, to));
                    }
                }
                if let Some(ep) = position.en_passant() {
                    if tables.pawn(us, from).contains(ep) {
                        moves.push(Move::en_passant(from, ep));
                    }
                }
            }
            piece_type => {
                let targets = tables.attacks(piece_type, us, from, occupied) & !own;
                for to in targets {
                    moves.push(if enemy.contains(to) {
                        Move::capture(from, to)
                    } else {
                        Move::quiet(from, to)
                    });
                }
            }
        }
    }

    let rank = us.back_rank();
    let at = |file| Square::new(file, rank);
    let rights = position.castling_rights();
    let empty = |files: &[File]| files.iter().all(|&f| !occupied.contains(at(f)));
    if rights.has(us, true) && empty(&[File::F, File::G]) {
        moves.push(Move::castle_kingside(at(File::E), at(File::G)));
    }
    if rights.has(us, false) && empty(&[File::B, File::C, File::D]) {
        moves.push(Move::castle_queenside(at(File::E), at(File::C)));
    }
    moves
}

fn reference_moves(position: &mut Position) -> Vec<u16> {
    let us = position.side_to_move();
    let them = us.opponent();
    let rank = us.back_rank();
    let mut legal = Vec::new();

    for mv in pseudo_legal(position) {
        if mv.is_castling() {
            let crossed: &[File] = if mv.to().file() == File::G {
                &[File::E, File::F, File::G]
            } else {
                &[File::E, File::D, File::C]
            };
            if crossed
                .iter()
                .any(|&f| attacked(position, Square::new(f, rank), them))
            {
                continue;
            }
        }
        position.do_move(mv);
        let exposed = attacked(position, position.king_square(us), them);
        position.undo_move();
        if !exposed {
            legal.push(mv.as_u16());
        }
    }
    legal.sort_unstable();
    legal
}

fn generated_moves(position: &Position) -> Vec<u16> {
    let mut moves: Vec<u16> = position.generate_moves().iter().map(|m| m.as_u16()).collect();
    moves.sort_unstable();
    moves
}

fn assert_matches_reference(position: &mut Position) {
    let expected = reference_moves(position);
    let actual = generated_moves(position);
    if expected != actual {
        let show = |moves: &[u16]| -> Vec<String> {
            moves.iter().map(|&m| Move::from_u16(m).to_string()).collect()
        };
        panic!(
            "{}\nexpected {:?}\n     got {:?}",
            position.to_fen(),
            show(&expected),
            show(&actual)
        );
    }
}

#[test]
fn test_fixed_positions_match_reference() {
    for fen in FENS {
        let mut position = Position::from_fen(fen);
        assert_matches_reference(&mut position);
    }
}

#[test]
fn test_random_games_match_reference() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for fen in FENS {
        for _ in 0..10 {
            let mut position = Position::from_fen(fen);
            for _ in 0..60 {
                assert_matches_reference(&mut position);
                let moves = position.generate_moves();
                if moves.is_empty() {
                    break;
                }
                position.do_move(moves.as_slice()[rng.gen_range(0..moves.len())]);
            }
        }
    }
}

#[test]
fn test_depth_two_tree_matches_reference() {
    let mut position = Position::from_fen(FENS[1]);
    for mv in position.generate_moves() {
        position.do_move(mv);
        assert_matches_reference(&mut position);
        position.undo_move();
    }
}
