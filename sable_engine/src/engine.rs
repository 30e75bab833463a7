//! The engine context: the UCI loop, the options it owns, and the current
//! position. Process-wide state (the transposition table, the thread pool,
//! the timer) is initialized from here and driven through it.

use std::io;
use std::sync::atomic::Ordering;

use sable::board::perft::{perft, perft_divide};
use sable::{BitMove, Board};

use crate::consts::*;
use crate::search::eval::Evaluation;
use crate::threadpool::threadpool;
use crate::time::uci_timer::PreLimits;
use crate::uci::options::{OptionWork, OptionsMap};
use crate::uci::parse;

pub static ID_NAME: &str = "Sable";
pub static ID_AUTHORS: &str = "the Sable authors";
pub static VERSION: &str = env!("CARGO_PKG_VERSION");

/// FEN suite the `bench` command runs through.
static BENCH_FENS: [&str; 8] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "2r5/3pk3/8/2P5/8/2K5/8/8 w - - 5 4",
    "8/8/1P2K3/8/2n5/1q6/8/5k2 b - - 0 1",
    "4k3/1P6/8/8/8/8/K7/8 w - - 0 1",
];

#[derive(PartialEq)]
enum SearchType {
    None,
    Search,
    Ponder,
}

/// The state owned by the UCI loop.
pub struct Engine {
    options: OptionsMap,
    search_mode: SearchType,
    board: Board,
}

impl Engine {
    /// Initializes the process-wide structures and builds the context.
    pub fn init(use_stdout: bool) -> Self {
        init_globals();
        USE_STDOUT.store(use_stdout, Ordering::Relaxed);
        if use_stdout {
            match crate::nnue::load_network(crate::nnue::DEFAULT_NETWORK) {
                Ok(()) => println!("info string network {} loaded", crate::nnue::DEFAULT_NETWORK),
                Err(e) => println!("info string {}; using the classical evaluation", e),
            }
        }
        Engine {
            options: OptionsMap::new(),
            search_mode: SearchType::None,
            board: Board::start_pos(),
        }
    }

    /// Runs the UCI read loop until `quit`.
    pub fn uci(&mut self) {
        let mut full_command = String::new();
        loop {
            full_command.clear();
            if io::stdin().read_line(&mut full_command).is_err() {
                break;
            }
            let args: Vec<&str> = full_command.split_whitespace().collect();
            let command: &str = args.first().unwrap_or(&"");
            match command {
                "" => continue,
                "uci" => self.uci_startup(),
                "setoption" => self.apply_option(&full_command),
                "ucinewgame" => self.clear_search(),
                "isready" => println!("readyok"),
                "position" => {
                    if let Some(b) = parse::position_parse_board(
                        &args[1..],
                        CHESS960.load(Ordering::Relaxed),
                    ) {
                        self.board = b;
                    } else {
                        println!("info string unable to parse position");
                    }
                }
                "go" => self.uci_go(&args[1..]),
                "stop" => self.halt(),
                "ponderhit" => threadpool().ponder_hit(),
                "quit" => {
                    self.halt();
                    break;
                }
                "eval" => Evaluation::trace(&self.board),
                "bench" => self.bench(&args[1..]),
                "perft" => self.perft_cmd(&args[1..], false),
                "divide" => self.perft_cmd(&args[1..], true),
                // Malformed lines are ignored, per protocol.
                _ => {}
            }
            self.apply_all_options();
        }
    }

    /// Resets the table and every thread's heuristics, for a new game.
    pub fn clear_search(&mut self) {
        self.clear_tt();
        threadpool().clear_all();
    }

    fn uci_go(&mut self, args: &[&str]) {
        let limit = parse::parse_time(args);
        self.search_mode = if limit.ponder {
            SearchType::Ponder
        } else {
            SearchType::Search
        };
        threadpool().uci_search(&self.board, &limit.create());
    }

    fn apply_option(&mut self, full_command: &str) {
        let mut args = full_command.split_whitespace();
        args.next(); // setoption
        match args.next() {
            Some("name") => {}
            _ => {
                println!("info string expected: setoption name <name> [value <x>]");
                return;
            }
        }
        let mut name = String::new();
        let mut value = String::new();

        if let Some(third_arg) = args.next() {
            name += third_arg;
        } else {
            println!("info string expected: setoption name <name> [value <x>]");
            return;
        }

        'nv: while let Some(partial_name) = args.next() {
            if partial_name == "value" {
                value = args
                    .map(|s| s.to_string() + " ")
                    .collect::<String>()
                    .trim()
                    .to_string();
                break 'nv;
            } else {
                name += " ";
                name += partial_name;
            }
        }

        // A bad option is reported and otherwise ignored.
        if !self.options.apply_option(&name, &value) {
            println!("info string unknown or invalid option: {}", name);
        }
    }

    fn apply_all_options(&mut self) {
        while let Some(work) = self.options.work() {
            if self.is_searching() && !work.usable_while_searching() {
                println!("info string option deferred until the search ends");
            } else {
                match work {
                    OptionWork::ClearTT => self.clear_tt(),
                    OptionWork::ResizeTT(mb) => self.resize_tt(mb),
                    OptionWork::Threads(num) => threadpool().set_thread_count(num),
                }
            }
        }
    }

    fn uci_startup(&self) {
        println!("id name {} {}", ID_NAME, VERSION);
        println!("id author {}", ID_AUTHORS);
        self.options.display_all();
        println!("uciok");
    }

    /// Starts a search programmatically, without the UCI loop.
    pub fn search(&mut self, board: &Board, limit: &PreLimits) {
        self.search_mode = SearchType::Search;
        self.board = board.shallow_clone();
        threadpool().uci_search(board, &(limit.clone().create()));
    }

    /// Signals the search to stop.
    pub fn halt(&mut self) {
        self.search_mode = SearchType::None;
        threadpool().set_stop(true);
    }

    /// Stops the search and returns the best move found.
    pub fn stop_search_get_move(&mut self) -> BitMove {
        if self.is_searching() {
            self.search_mode = SearchType::None;
            threadpool().set_stop(true);
            threadpool().wait_for_finish();
            threadpool().best_move()
        } else {
            BitMove::null()
        }
    }

    /// Blocks until the search completes on its own and returns the best
    /// move.
    pub fn await_move(&mut self) -> BitMove {
        if self.is_searching() {
            self.search_mode = SearchType::None;
            threadpool().wait_for_finish();
            threadpool().best_move()
        } else {
            BitMove::null()
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search_mode != SearchType::None
    }

    pub fn hash_full(&self) -> u32 {
        tt().hash_full()
    }

    pub fn clear_tt(&mut self) {
        unsafe {
            tt().clear();
        }
    }

    pub fn resize_tt(&mut self, mb: usize) {
        let actual = unsafe { tt().resize_to_megabytes(mb) };
        println!("info string hash resized to {} MB", actual);
    }

    /// Fixed-depth searches over the bench suite, totalling nodes and speed.
    fn bench(&mut self, args: &[&str]) {
        let depth: u16 = args
            .first()
            .and_then(|d| d.parse::<u16>().ok())
            .unwrap_or(12);

        let stdout_was = USE_STDOUT.swap(false, Ordering::Relaxed);
        let start = std::time::Instant::now();
        let mut total_nodes: u64 = 0;

        for (i, fen) in BENCH_FENS.iter().enumerate() {
            let board = match Board::from_fen(fen) {
                Ok(b) => b,
                Err(_) => continue,
            };
            self.clear_search();
            let mut limit = PreLimits::blank();
            limit.depth = Some(depth);
            threadpool().uci_search(&board, &limit.create());
            threadpool().wait_for_finish();
            let nodes = threadpool().nodes();
            total_nodes += nodes;
            println!(
                "position {}/{}: bestmove {} nodes {}",
                i + 1,
                BENCH_FENS.len(),
                threadpool().best_move(),
                nodes
            );
        }

        let elapsed_ms = start.elapsed().as_millis().max(1) as u64;
        USE_STDOUT.store(stdout_was, Ordering::Relaxed);
        println!("total nodes : {}", total_nodes);
        println!("total time  : {} ms", elapsed_ms);
        println!("nps         : {}", total_nodes * 1000 / elapsed_ms);
    }

    /// `perft <depth> [fen]` / `divide <depth> [fen]` diagnostics.
    fn perft_cmd(&mut self, args: &[&str], divide: bool) {
        let depth: u16 = match args.first().and_then(|d| d.parse::<u16>().ok()) {
            Some(d) if d > 0 => d,
            _ => {
                println!("info string expected: perft <depth> [fen]");
                return;
            }
        };
        let board = if args.len() > 1 {
            match Board::from_fen(&args[1..].join(" ")) {
                Ok(b) => b,
                Err(e) => {
                    println!("info string invalid fen: {}", e);
                    return;
                }
            }
        } else {
            self.board.shallow_clone()
        };

        let start = std::time::Instant::now();
        let nodes = if divide {
            perft_divide(&board, depth)
        } else {
            perft(&board, depth)
        };
        let elapsed_ms = start.elapsed().as_millis().max(1);
        println!(
            "perft {}: {} nodes in {} ms",
            depth, nodes, elapsed_ms
        );
    }
}
