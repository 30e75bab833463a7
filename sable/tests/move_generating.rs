extern crate sable;

use sable::board::perft::{perft, perft_all};
use sable::Board;

// Published reference counts; any miss here means broken generation,
// legality filtering, or make/unmake.

#[test]
fn perft_start_position() {
    let b = Board::start_pos();
    assert_eq!(perft(&b, 1), 20);
    assert_eq!(perft(&b, 2), 400);
    assert_eq!(perft(&b, 3), 8_902);
    assert_eq!(perft(&b, 4), 197_281);
    assert_eq!(perft(&b, 5), 4_865_609);
}

#[test]
fn perft_kiwipete() {
    let b = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    assert_eq!(perft(&b, 1), 48);
    assert_eq!(perft(&b, 2), 2_039);
    assert_eq!(perft(&b, 3), 97_862);
    assert_eq!(perft(&b, 4), 4_085_603);
}

#[test]
fn perft_position_three() {
    let b = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(perft(&b, 1), 14);
    assert_eq!(perft(&b, 2), 191);
    assert_eq!(perft(&b, 3), 2_812);
    assert_eq!(perft(&b, 4), 43_238);
    assert_eq!(perft(&b, 5), 674_624);
}

#[test]
fn perft_position_four() {
    let b = Board::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
        .unwrap();
    assert_eq!(perft(&b, 1), 6);
    assert_eq!(perft(&b, 2), 264);
    assert_eq!(perft(&b, 3), 9_467);
    assert_eq!(perft(&b, 4), 422_333);
}

#[test]
fn perft_position_five() {
    let b = Board::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8").unwrap();
    assert_eq!(perft(&b, 1), 44);
    assert_eq!(perft(&b, 2), 1_486);
    assert_eq!(perft(&b, 3), 62_379);
    assert_eq!(perft(&b, 4), 2_103_487);
}

#[test]
fn perft_all_counts_special_moves() {
    let b = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    let nodes = perft_all(&b, 2);
    assert_eq!(nodes.nodes, 2_039);
    assert_eq!(nodes.captures, 351);
    assert_eq!(nodes.en_passant, 1);
    assert_eq!(nodes.castles, 91);
}
