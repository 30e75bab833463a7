extern crate sable;
extern crate sable_engine;

use sable::core::score::MATE;
use sable::{BitMove, Board};
use sable_engine::engine::Engine;
use sable_engine::threadpool::threadpool;
use sable_engine::time::uci_timer::PreLimits;

fn depth_limit(depth: u16) -> PreLimits {
    let mut limit = PreLimits::blank();
    limit.depth = Some(depth);
    limit
}

fn best_move_at_depth(engine: &mut Engine, board: &Board, depth: u16) -> BitMove {
    engine.clear_search();
    engine.search(board, &depth_limit(depth));
    engine.await_move()
}

// The searcher threads are a single process-wide pool, so the scenarios run
// inside one test body, sequentially.
#[test]
fn search_scenarios() {
    let mut engine = Engine::init(false);

    // From the start position any sane engine plays a normal developing
    // move; above all it must be legal.
    let board = Board::start_pos();
    let mv = best_move_at_depth(&mut engine, &board, 8);
    assert!(
        board.generate_moves().contains(&mv),
        "illegal move from startpos: {}",
        mv
    );

    // Mate in one: the rook mates on the back rank.
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4R2K w - - 0 1").unwrap();
    let mv = best_move_at_depth(&mut engine, &board, 8);
    assert_eq!(mv.stringify(), "e1e8", "expected the back-rank mate");
    let score = threadpool().main().root_moves().first().score;
    assert_eq!(score, MATE - 1, "mate-in-one must score as such");
    {
        let mut b2 = board.shallow_clone();
        b2.make_move(mv);
        assert!(b2.checkmate());
    }

    // Stalemate: no legal move exists, and the search reports none.
    let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(board.stalemate());
    let mv = best_move_at_depth(&mut engine, &board, 6);
    assert!(mv.is_null(), "stalemate must yield no best move");

    // Threefold by knight shuffle: the position repeats, and the search
    // still produces a legal move.
    let mut board = Board::start_pos();
    for mv_str in &["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        assert!(board.apply_uci_move(mv_str));
    }
    assert!(board.is_repetition());
    let mv = best_move_at_depth(&mut engine, &board, 6);
    assert!(board.generate_moves().contains(&mv));

    // A queen-up endgame must keep a winning score for the side to move.
    let board = Board::from_fen("8/8/1P2K3/8/2n5/1q6/8/5k2 b - - 0 1").unwrap();
    let mv = best_move_at_depth(&mut engine, &board, 8);
    assert!(board.generate_moves().contains(&mv));
    let score = threadpool().main().root_moves().first().score;
    assert!(score > 0, "black is a queen up but scored {}", score);

    // King and rook versus king: the search must see a decisive advantage
    // and start driving the bare king back.
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    let mv = best_move_at_depth(&mut engine, &board, 10);
    assert!(board.generate_moves().contains(&mv));
    let score = threadpool().main().root_moves().first().score;
    assert!(score > 900, "a full rook up scored only {}", score);

    // Determinism: identical input must reproduce the identical best move.
    let board =
        Board::from_fen("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10")
            .unwrap();
    let first = best_move_at_depth(&mut engine, &board, 7);
    let second = best_move_at_depth(&mut engine, &board, 7);
    assert_eq!(first, second);
}
