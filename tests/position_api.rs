use chess_core::board::{FenError, PositionBuilder, PositionError, STARTPOS_FEN};
use chess_core::{AttackTables, Color, Piece, PieceType, Position, Square};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn startpos_round_trips_through_fen() {
    let position = Position::startpos();
    assert_eq!(position.to_fen(), STARTPOS_FEN);
    assert_eq!(position.generate_moves().len(), 20);
    assert_eq!(position.side_to_move(), Color::White);
}

#[test]
fn builder_and_fen_agree() {
    let built = PositionBuilder::new()
        .piece(sq("e1"), Piece::new(Color::White, PieceType::King))
        .piece(sq("h1"), Piece::new(Color::White, PieceType::Rook))
        .piece(sq("e8"), Piece::new(Color::Black, PieceType::King))
        .castle_kingside(Color::White)
        .build()
        .unwrap();
    let parsed = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
    assert_eq!(built, parsed);
    assert_eq!(built.hash(), parsed.hash());
}

#[test]
fn invalid_fens_are_rejected() {
    assert!(matches!(
        Position::try_from_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
        Err(FenError::Position(PositionError::MissingKing { .. }))
    ));
    assert!(Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
    assert!(Position::try_from_fen("rnbxkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
    assert!(Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
}

#[test]
fn uci_moves_drive_the_position() {
    let mut position = Position::startpos();
    for uci in ["e2e4", "e7e5", "g1f3", "b8c6"] {
        position.do_move_uci(uci).unwrap();
    }
    assert_eq!(
        position.to_fen(),
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
    );
    assert!(position.do_move_uci("e1g1").is_err());
    assert_eq!(position.ply(), 4);
}

#[test]
fn searched_magics_agree_with_builtin() {
    let searched: &'static AttackTables = Box::leak(Box::new(AttackTables::with_magic_search(7)));

    let mut builtin = Position::startpos();
    let mut custom = PositionBuilder::starting_position()
        .tables(searched)
        .build()
        .unwrap();
    assert!(std::ptr::eq(custom.tables(), searched));
    assert_eq!(custom, builtin);
    assert_eq!(custom.perft(3), builtin.perft(3));

    let kiwipete = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );
    let occupied = kiwipete.occupied();
    for square in Square::all() {
        assert_eq!(
            searched.rook(square, occupied),
            kiwipete.tables().rook(square, occupied)
        );
        assert_eq!(
            searched.bishop(square, occupied),
            kiwipete.tables().bishop(square, occupied)
        );
    }
}

#[cfg(feature = "serde")]
#[test]
fn move_and_square_serialize() {
    let position = Position::startpos();
    let moves: Vec<chess_core::Move> = position.generate_moves().into_iter().collect();
    let json = serde_json::to_string(&moves).unwrap();
    let back: Vec<chess_core::Move> = serde_json::from_str(&json).unwrap();
    assert_eq!(moves, back);

    let square = sq("e4");
    let json = serde_json::to_string(&square).unwrap();
    assert_eq!(serde_json::from_str::<Square>(&json).unwrap(), square);
}
