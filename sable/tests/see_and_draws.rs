extern crate sable;

use sable::{BitMove, Board, SQ};

// For any move, see_ge must be monotone in the threshold: passing at t
// implies passing at every t' <= t.
#[test]
fn see_monotone_in_threshold() {
    let positions = [
        "4k3/8/3p4/2p5/3P4/8/8/4K3 w - - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "2kr3r/p1ppqpb1/bn2Qnp1/3PN3/1p2P3/2N5/PPPBBPPP/R3K2R b KQ - 3 2",
    ];
    let thresholds = [-900, -500, -200, -100, -1, 0, 1, 100, 200, 500, 900];

    for fen in positions.iter() {
        let board = Board::from_fen(fen).unwrap();
        for mv in board.generate_moves().iter() {
            let mut last = true;
            for t in thresholds.iter() {
                let now = board.see_ge(*mv, *t);
                // Once a threshold fails, every higher one must fail too.
                assert!(
                    last || !now,
                    "see_ge not monotone for {} at t={} in {}",
                    mv,
                    t,
                    fen
                );
                last = now;
            }
        }
    }
}

#[test]
fn see_winning_and_losing_captures() {
    // A rook takes an undefended pawn: wins a pawn, no more.
    let board = Board::from_fen("4k3/8/8/8/8/8/p7/R3K3 w - - 0 1").unwrap();
    let mv = BitMove::make_normal(SQ::A1, SQ::A2);
    assert!(board.see_ge(mv, 0));
    assert!(board.see_ge(mv, 100));
    assert!(!board.see_ge(mv, 101));

    // A queen takes a pawn defended by a pawn: loses the queen for a pawn.
    let board = Board::from_fen("4k3/8/3p4/2p5/8/8/3Q4/4K3 w - - 0 1").unwrap();
    let mv = BitMove::make_normal(SQ::D2, SQ::D6);
    assert!(!board.see_ge(mv, 0));
}

#[test]
fn fifty_move_counter_draw() {
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 100 80").unwrap();
    assert!(board.fifty_move_rule());

    let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 99 80").unwrap();
    assert!(!board.fifty_move_rule());
}

#[test]
fn single_repetition_flagged() {
    let mut board = Board::start_pos();
    // One return to the starting position is already flagged; the search
    // treats it as a draw.
    for mv in &["g1f3", "g8f6", "f3g1", "f6g8"] {
        assert!(board.apply_uci_move(mv));
    }
    assert!(board.is_repetition());

    // Unwinding clears the flag.
    board.unmake_move();
    assert!(!board.is_repetition());
}

#[test]
fn capture_resets_repetition_window() {
    let mut board = Board::start_pos();
    for mv in &["e2e4", "d7d5", "e4d5", "d8d5"] {
        assert!(board.apply_uci_move(mv));
    }
    // A capture happened; nothing can have repeated since.
    assert!(!board.is_repetition());
    assert_eq!(board.rule_50(), 0);
}
