extern crate rand;
extern crate sable;

use sable::board::fen::ALL_FENS;
use sable::Board;

// Plays random legal moves down a line, then takes them all back, checking
// that every unmake restores the position bit for bit.
#[test]
fn random_move_apply_and_undo() {
    for fen in ALL_FENS.iter() {
        let mut board = Board::from_fen(fen).unwrap();
        let mut fen_stack: Vec<String> = Vec::new();
        let mut zob_stack: Vec<u64> = Vec::new();
        let mut pawn_key_stack: Vec<u64> = Vec::new();
        let mut material_key_stack: Vec<u64> = Vec::new();

        let mut plys = 60;
        while plys > 0 {
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }
            fen_stack.push(board.fen());
            zob_stack.push(board.zobrist());
            pawn_key_stack.push(board.pawn_key());
            material_key_stack.push(board.material_key());

            let picked = moves[rand::random::<usize>() % moves.len()];
            board.make_move(picked);
            plys -= 1;
        }

        while let Some(expected_fen) = fen_stack.pop() {
            board.unmake_move();
            assert_eq!(board.fen(), expected_fen);
            assert_eq!(board.zobrist(), zob_stack.pop().unwrap());
            assert_eq!(board.pawn_key(), pawn_key_stack.pop().unwrap());
            assert_eq!(board.material_key(), material_key_stack.pop().unwrap());
        }
    }
}

#[test]
fn null_move_round_trip() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let fen = board.fen();
    let zob = board.zobrist();

    board.make_null_move();
    assert_ne!(board.zobrist(), zob);
    assert_eq!(board.plies_from_null(), 0);
    board.unmake_null_move();

    assert_eq!(board.fen(), fen);
    assert_eq!(board.zobrist(), zob);
}

#[test]
fn castle_round_trip() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let fen = board.fen();
    let castles: Vec<_> = board
        .generate_moves()
        .iter()
        .cloned()
        .filter(|m| m.is_castle())
        .collect();
    assert_eq!(castles.len(), 2);
    for mv in castles {
        board.make_move(mv);
        board.unmake_move();
        assert_eq!(board.fen(), fen);
    }
}

#[test]
fn en_passant_round_trip() {
    let mut board = Board::start_pos();
    for mv in &["e2e4", "g8f6", "e4e5", "d7d5"] {
        assert!(board.apply_uci_move(mv));
    }
    // e5 may take d6 en passant.
    let fen = board.fen();
    assert!(fen.contains("d6"));
    let ep: Vec<_> = board
        .generate_moves()
        .iter()
        .cloned()
        .filter(|m| m.is_en_passant())
        .collect();
    assert_eq!(ep.len(), 1);
    board.make_move(ep[0]);
    board.unmake_move();
    assert_eq!(board.fen(), fen);
}

#[test]
fn uci_castle_shorthand() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    assert!(board.apply_uci_move("O-O"));
    assert!(board.fen().starts_with("r3k2r"));
}
