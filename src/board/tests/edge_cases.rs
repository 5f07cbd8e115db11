//! Edge case tests for move generation.
//!
//! Checks, pins, castling restrictions, promotions and game-end detection.

use crate::board::{Color, MoveKind, PieceType, Position, Square};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn uci_moves(position: &Position) -> Vec<String> {
    let mut moves: Vec<String> = position
        .generate_moves()
        .iter()
        .map(|m| m.to_string())
        .collect();
    moves.sort();
    moves
}

fn has_move(position: &Position, uci: &str) -> bool {
    position.generate_moves().iter().any(|m| m.to_string() == uci)
}

#[test]
fn test_stalemate_detection() {
    let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(position.generate_moves().is_empty());
    assert!(!position.in_check());
    assert!(position.is_stalemate());
    assert!(!position.is_checkmate());
}

#[test]
fn test_fools_mate_is_checkmate() {
    let mut position = Position::startpos();
    for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        position.do_move_uci(uci).unwrap();
    }
    assert!(position.in_check());
    assert!(position.is_checkmate());
    assert!(!position.is_stalemate());
}

#[test]
fn test_checkmate_back_rank() {
    let mut position = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    position.do_move_uci("a1a8").unwrap();
    assert!(position.is_checkmate());
    assert_eq!(position.checkers(), sq("a8").bitboard());
}

#[test]
fn test_all_promotion_pieces_generated() {
    let position = Position::from_fen("8/P7/8/8/8/8/8/k1K5 w - - 0 1");
    let promotions: Vec<PieceType> = position
        .generate_moves()
        .iter()
        .filter(|m| m.from() == sq("a7"))
        .filter_map(|m| m.promotion())
        .collect();
    assert_eq!(promotions.len(), 4);
    for piece in [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ] {
        assert!(promotions.contains(&piece), "missing {piece:?} promotion");
    }
}

#[test]
fn test_underpromotion_capture_with_check() {
    // The knight lands on a8 and checks the b6 king
    let mut position = Position::from_fen("r7/1P6/1k6/8/8/8/8/4K3 w - - 0 1");
    let mv = position.do_move_uci("b7a8n").unwrap();
    assert_eq!(mv.kind(), MoveKind::PromotionCapture(PieceType::Knight));
    assert_eq!(
        position.piece_on(sq("a8")).map(|p| p.piece_type),
        Some(PieceType::Knight)
    );
    assert!(position.in_check());
    position.undo_move();
    assert_eq!(
        position.piece_on(sq("a8")).map(|p| p.piece_type),
        Some(PieceType::Rook)
    );
}

#[test]
fn test_castling_both_sides_available() {
    let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(has_move(&position, "e1g1"));
    assert!(has_move(&position, "e1c1"));
}

#[test]
fn test_no_castling_out_of_check() {
    let position = Position::from_fen("r3k2r/8/8/8/4Q3/8/8/R3K2R b KQkq - 0 1");
    assert!(position.in_check());
    assert!(!position.generate_moves().iter().any(|m| m.is_castling()));
}

#[test]
fn test_no_castling_through_attacked_square() {
    let position = Position::from_fen("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1");
    assert!(!has_move(&position, "e1g1"));
    assert!(has_move(&position, "e1c1"));
}

#[test]
fn test_no_castling_into_check() {
    let position = Position::from_fen("r3k1r1/8/8/8/8/8/8/R3K2R w KQq - 0 1");
    assert!(!has_move(&position, "e1g1"));
    assert!(has_move(&position, "e1c1"));
}

#[test]
fn test_queenside_castling_ignores_attacked_b_file() {
    // b1 must be empty but the king never crosses it
    let position = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(has_move(&position, "e1c1"));
    assert!(has_move(&position, "e1g1"));
}

#[test]
fn test_queenside_castling_blocked_by_piece() {
    let position = Position::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
    assert!(!has_move(&position, "e1c1"));
    assert!(has_move(&position, "e1g1"));
}

#[test]
fn test_queenside_castling_through_attacked_d_file() {
    let position = Position::from_fen("3rk3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!has_move(&position, "e1c1"));
    assert!(has_move(&position, "e1g1"));
}

#[test]
fn test_double_check_only_king_moves() {
    // Knight on d6 and rook on e1 both check the e8 king
    let position = Position::from_fen("4k3/8/3N4/8/8/8/8/4RK2 b - - 0 1");
    assert!(position.in_double_check());
    assert_eq!(uci_moves(&position), vec!["e8d7", "e8d8", "e8f8"]);
}

#[test]
fn test_king_cannot_retreat_along_checking_ray() {
    // f1 is shadowed by the king itself on the a1 rook's rank
    let position = Position::from_fen("4k3/8/8/8/8/8/3N4/r3K3 w - - 0 1");
    assert_eq!(uci_moves(&position), vec!["d2b1", "e1e2", "e1f2"]);
}

#[test]
fn test_check_can_be_captured() {
    let position = Position::from_fen("4k3/8/8/8/8/3n4/8/3RK3 w - - 0 1");
    assert!(position.in_check());
    assert!(has_move(&position, "d1d3"));
    assert!(!has_move(&position, "d1d2"));
}

#[test]
fn test_pinned_rook_moves_along_pin() {
    let position = Position::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
    assert!(position.pinned(Color::White).contains(sq("e2")));
    let mut rook_moves: Vec<String> = position
        .generate_moves()
        .iter()
        .filter(|m| m.from() == sq("e2"))
        .map(|m| m.to_string())
        .collect();
    rook_moves.sort();
    assert_eq!(rook_moves, vec!["e2e3", "e2e4", "e2e5", "e2e6", "e2e7", "e2e8"]);
}

#[test]
fn test_pinned_bishop_on_file_is_frozen() {
    let position = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
    assert!(!position
        .generate_moves()
        .iter()
        .any(|m| m.from() == sq("e2")));
}

#[test]
fn test_pinned_knight_is_frozen() {
    let position = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
    assert!(!position
        .generate_moves()
        .iter()
        .any(|m| m.from() == sq("e2")));
}

#[test]
fn test_pinned_pawn_captures_pinner() {
    let position = Position::from_fen("4k3/8/8/8/8/2b5/3P4/4K3 w - - 0 1");
    let pawn_moves: Vec<String> = position
        .generate_moves()
        .iter()
        .filter(|m| m.from() == sq("d2"))
        .map(|m| m.to_string())
        .collect();
    assert_eq!(pawn_moves, vec!["d2c3"]);
}

#[test]
fn test_castling_rights_lost_when_rook_captured() {
    let mut position = Position::from_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1");
    position.do_move_uci("g2a8").unwrap();
    assert!(!position.castling_rights().has(Color::Black, false));
    assert!(position.castling_rights().has(Color::Black, true));
    assert!(!has_move(&position, "e8c8"));
}

#[test]
fn test_halfmove_clock_resets() {
    let mut position = Position::startpos();
    position.do_move_uci("g1f3").unwrap();
    position.do_move_uci("g8f6").unwrap();
    assert_eq!(position.halfmove_clock(), 2);
    assert_eq!(position.fullmove_number(), 2);
    position.do_move_uci("e2e4").unwrap();
    assert_eq!(position.halfmove_clock(), 0);
    position.do_move_uci("f6e4").unwrap();
    assert_eq!(position.halfmove_clock(), 0);
    assert_eq!(position.fullmove_number(), 3);
}

#[test]
fn test_en_passant_target_set_on_every_double_push() {
    let mut position = Position::startpos();
    position.do_move_uci("a2a4").unwrap();
    assert_eq!(position.en_passant(), Some(sq("a3")));
    position.do_move_uci("g8f6").unwrap();
    assert_eq!(position.en_passant(), None);
}
