extern crate sable;

use sable::board::fen::ALL_FENS;
use sable::{Board, PieceType, Player};

#[test]
fn start_pos_properties() {
    let b = Board::start_pos();
    assert_eq!(b.count_all_pieces(), 32);
    assert_eq!(b.count_piece(Player::White, PieceType::K), 1);
    assert_eq!(b.count_piece(Player::Black, PieceType::K), 1);
    assert_eq!(b.turn(), Player::White);
    assert!(!b.in_check());
    assert_eq!(b.fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
}

#[test]
fn all_fens_build() {
    for fen in ALL_FENS.iter() {
        let b = Board::from_fen(fen).unwrap_or_else(|e| panic!("fen {} failed: {}", fen, e));
        assert_eq!(&b.fen(), fen);
    }
}

#[test]
fn bad_fens_rejected() {
    assert!(Board::from_fen("").is_err());
    assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
    // No black king.
    assert!(Board::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
    // Two white kings.
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1").is_err());
    // Pawn on the back rank.
    assert!(Board::from_fen("4k2P/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
    // Garbled turn field.
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
}

#[test]
fn fen_game_ply() {
    let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 3 10").unwrap();
    // game_ply = 2 * (fullmove - 1) + 1 for black to move.
    assert_eq!(b.moves_played(), 19);
    assert_eq!(b.rule_50(), 3);
}
