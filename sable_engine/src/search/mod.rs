//! The main searching structure: one `Searcher` per thread, each owning its
//! board, search stack, and heuristic tables, all sharing the transposition
//! table.

pub mod eval;

use std::cell::UnsafeCell;
use std::cmp::{max, min};
use std::mem;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use sable::core::piece_move::{BitMove, MoveType, NULL_MOVE};
use sable::core::score::*;
use sable::core::sq::SQ;
use sable::tools::eval::to_centipawns;
use sable::tools::tt::NodeBound;
use sable::tools::PreFetchable;
use sable::{Board, Piece, PieceType};

use crate::consts::*;
use crate::movepick::{MovePicker, PickerHists};
use crate::root_moves::root_moves_list::RootMoveList;
use crate::search::eval::Evaluation;
use crate::sync::{GuardedBool, LockLatch};
use crate::syzygy;
use crate::tables::prelude::*;
use crate::threadpool::threadpool;
use crate::time::time_management::TimeManager;
use crate::time::uci_timer::{Limits, LimitsType};

/// Tempo term mirrored from the evaluation, used by the gain learner.
const TEMPO: Value = 17;

/// Nodes the main thread searches between interrupt polls.
const POLL_NODES: u32 = 4096;

const THREAD_DIST: usize = 20;

// Per-thread iterative-deepening offsets, so helper threads explore
// different depths than the main thread at any moment.
//                                      1  2  3  4  5  6  7  8  9 10 11 12 13 14 15 16 17 18 19 20
static SKIP_SIZE: [i16; THREAD_DIST] = [1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4];
static START_PLY: [i16; THREAD_DIST] = [0, 1, 0, 1, 2, 3, 0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5, 6, 7];

// [pv][improving][depth][move number], in whole plies.
static mut REDUCTIONS: [[[[i16; 64]; 64]; 2]; 2] = [[[[0; 64]; 64]; 2]; 2];
// [improving][depth in plies]
static mut FUTILITY_MOVE_COUNTS: [[i32; 16]; 2] = [[0; 16]; 2];

static RAZOR_MARGIN: [i32; 3] = [0, 590, 604];

static CAPTURE_PRUNE_MARGIN: [i32; 7] = [
    0,
    PAWN_EG * 1055 / 1000,
    2 * PAWN_EG * 1042 / 1000,
    3 * PAWN_EG * 963 / 1000,
    4 * PAWN_EG * 1038 / 1000,
    5 * PAWN_EG * 950 / 1000,
    6 * PAWN_EG * 930 / 1000,
];

/// Fills the reduction and move-count tables. Called once at startup.
#[cold]
pub fn init() {
    for imp in 0..2 {
        for d in 1..64 {
            for mc in 1..64 {
                let r: f64 = (d as f64).log(2.0) * (mc as f64).log(2.0) / 1.95;
                unsafe {
                    REDUCTIONS[0][imp][d][mc] = r as i16;
                    REDUCTIONS[1][imp][d][mc] = (REDUCTIONS[0][imp][d][mc] - 1).max(1);

                    // Reduce more at non-PV nodes when the eval is sinking.
                    if imp == 0 && r > 1.0 {
                        REDUCTIONS[0][imp][d][mc] += 1;
                    }
                }
            }
        }
    }

    for d in 0..16 {
        unsafe {
            FUTILITY_MOVE_COUNTS[0][d] = (2.4 + 0.74 * (d as f64).powf(1.78)) as i32;
            FUTILITY_MOVE_COUNTS[1][d] = (5.0 + 1.0 * (d as f64).powf(2.0)) as i32;
        }
    }
}

/// One frame of the per-thread search stack.
pub struct Stack {
    cont_history: *mut PieceToHistory,
    ply: u16,
    current_move: BitMove,
    excluded_move: BitMove,
    killers: [BitMove; 2],
    static_eval: Value,
    stat_score: i32,
    move_count: u32,
    /// The reduction this node searched its current child with; a failing
    /// null move in the child hands the decision back instead of trusting it.
    lmr_reduction: Depth,
}

impl Stack {
    /// Returns the frame at the given offset from this one.
    ///
    /// # Safety
    ///
    /// The offset must stay inside the owning `ThreadStack`; the guard
    /// frames make offsets down to -4 valid from ply zero onward.
    pub fn offset(&mut self, count: isize) -> &mut Stack {
        unsafe {
            let ptr: *mut Stack = self as *mut Stack;
            &mut *ptr.offset(count)
        }
    }

    /// Returns the next ply's frame.
    pub fn incr(&mut self) -> &mut Stack {
        self.offset(1)
    }
}

/// The per-thread stack of search frames. Ply zero sits at index 4, leaving
/// four zeroed guard frames behind it so that `(ss - 4)` is always a valid
/// read without bounds checks.
pub struct ThreadStack {
    stack: [Stack; THREAD_STACK_SIZE],
}

impl ThreadStack {
    pub fn new() -> Self {
        unsafe { mem::zeroed() }
    }

    /// Returns a frame by index.
    pub fn get(&mut self, frame: usize) -> &mut Stack {
        debug_assert!(frame < THREAD_STACK_SIZE);
        unsafe { self.stack.get_unchecked_mut(frame) }
    }

    /// Returns the frame of ply zero.
    pub fn ply_zero(&mut self) -> &mut Stack {
        self.get(4)
    }
}

/// A searcher thread's entire state.
pub struct Searcher {
    // Synchronization
    pub id: usize,
    pub kill: AtomicBool,
    pub searching: Arc<GuardedBool>,
    pub cond: Arc<LockLatch>,

    // Search data
    pub depth_completed: i16,
    pub limit: Limits,
    pub board: Board,
    pub time_man: &'static TimeManager,
    pub root_moves: UnsafeCell<RootMoveList>,
    pub selected_depth: u16,
    pub last_best_move: BitMove,
    pub last_best_move_depth: i16,
    pub nodes: AtomicU64,
    pub tb_hits: AtomicU64,
    nodes_since_poll: u32,
    last_info_ms: i64,

    // Heuristic tables
    pub main_history: MoveValueStats,
    pub evasion_history: EvasionHistory,
    pub capture_history: CaptureHistory,
    pub counter_moves: CounterMoves,
    pub counter_followups: CounterFollowupMoves,
    pub max_gain: MaxGainStats,
    pub cont_history: ContinuationHistory,

    // Main-thread bookkeeping
    pub pv_idx: usize,
    pub multi_pv: usize,
    pub previous_score: Value,
    pub best_move: BitMove,
    pub ponder_move: BitMove,
    pub failed_low: bool,
    pub best_move_changes: f64,
    pub previous_time_reduction: f64,
}

unsafe impl Send for Searcher {}
unsafe impl Sync for Searcher {}

impl Searcher {
    /// Creates a new `Searcher` with an id and the condition it parks on.
    pub fn new(id: usize, cond: Arc<LockLatch>) -> Self {
        Searcher {
            id,
            kill: AtomicBool::new(false),
            searching: Arc::new(GuardedBool::new(true)),
            cond,
            depth_completed: 0,
            limit: Limits::blank(),
            board: Board::start_pos(),
            time_man: timer(),
            root_moves: UnsafeCell::new(RootMoveList::new()),
            selected_depth: 0,
            last_best_move: BitMove::null(),
            last_best_move_depth: 0,
            nodes: AtomicU64::new(0),
            tb_hits: AtomicU64::new(0),
            nodes_since_poll: 0,
            last_info_ms: 0,
            main_history: MoveValueStats::new(),
            evasion_history: EvasionHistory::new(),
            capture_history: CaptureHistory::new(),
            counter_moves: CounterMoves::new(),
            counter_followups: CounterFollowupMoves::new(),
            max_gain: MaxGainStats::new(),
            cont_history: ContinuationHistory::new(),
            pv_idx: 0,
            multi_pv: 1,
            previous_score: INFINITE,
            best_move: BitMove::null(),
            ponder_move: BitMove::null(),
            failed_low: false,
            best_move_changes: 0.0,
            previous_time_reduction: 0.0,
        }
    }

    /// Wipes the thread's heuristic state, for `ucinewgame`.
    pub fn clear(&mut self) {
        self.previous_time_reduction = 0.0;
        self.previous_score = INFINITE;
        self.main_history.clear();
        self.evasion_history.clear();
        self.capture_history.clear();
        self.counter_moves.clear();
        self.counter_followups.clear();
        self.max_gain.clear();
        self.cont_history.clear();
    }

    /// Parks until woken, then searches; exits when killed.
    pub fn idle_loop(&mut self) {
        self.searching.set(false);
        loop {
            self.cond.wait();
            if self.kill.load(Ordering::SeqCst) {
                return;
            }
            self.go();
        }
    }

    fn go(&mut self) {
        self.searching.set(true);
        if self.main_thread() {
            self.main_thread_go();
        } else {
            self.search_root();
        }
        self.searching.set(false);
    }

    /// The main thread wakes the workers, searches, gathers the best line
    /// from every thread, and reports the final best move.
    fn main_thread_go(&mut self) {
        threadpool().thread_cond.set();

        self.search_root();

        threadpool().thread_cond.lock();
        threadpool().set_stop(true);
        threadpool().wait_for_non_main();

        if self.root_moves().is_empty() {
            // Mate or stalemate at the root; search_root already reported.
            self.best_move = BitMove::null();
            self.ponder_move = BitMove::null();
            return;
        }

        let mut best_move = self.root_moves().first().bit_move;
        let mut best_score = self.root_moves().first().score;
        let mut ponder = self.root_moves().first().ponder_move();

        // Another thread may have completed a deeper iteration with a better
        // score; prefer its line.
        if !self.limit.limits_type.is_depth() && self.multi_pv == 1 {
            let mut best_depth = self.depth_completed;
            for th in threadpool().non_main_threads() {
                let th_rm = unsafe { &mut *th.root_moves.get() };
                if th_rm.is_empty() {
                    continue;
                }
                let depth_diff = th.depth_completed as i32 - best_depth as i32;
                let score_diff = th_rm.first().score - best_score;
                if score_diff > 0 && depth_diff >= 0 {
                    best_score = th_rm.first().score;
                    best_move = th_rm.first().bit_move;
                    ponder = th_rm.first().ponder_move();
                    best_depth = th.depth_completed;
                }
            }
        }

        self.previous_score = best_score;
        self.best_move = best_move;
        self.ponder_move = ponder.unwrap_or_else(BitMove::null);

        if self.use_stdout() {
            match ponder {
                Some(p) => println!(
                    "bestmove {} ponder {}",
                    uci_move_string(best_move),
                    uci_move_string(p)
                ),
                None => println!("bestmove {}", uci_move_string(best_move)),
            }
        }
    }

    /// The per-thread iterative deepening loop.
    fn search_root(&mut self) {
        if self.stop() {
            return;
        }

        if self.root_moves().is_empty() {
            // No legal move: mate or stalemate at the root.
            if self.main_thread() && self.use_stdout() {
                let score = if self.board.in_check() {
                    format!("mate 0")
                } else {
                    format!("cp 0")
                };
                println!("info depth 0 score {}", score);
                println!("bestmove 0000");
            }
            return;
        }

        let mut stack: ThreadStack = ThreadStack::new();
        let sentinel: *mut PieceToHistory =
            &mut self.cont_history[(Piece::None, SQ(0))] as *mut PieceToHistory;
        for i in 0..5 {
            stack.get(i).cont_history = sentinel;
        }
        stack.ply_zero().ply = 0;

        let max_depth: i16 = if self.main_thread() {
            if let LimitsType::Depth(d) = self.limit.limits_type {
                d as i16
            } else {
                MAX_PLY as i16
            }
        } else {
            MAX_PLY as i16
        };

        if self.main_thread() {
            self.best_move_changes = 0.0;
            self.failed_low = false;
        }

        self.multi_pv = MULTI_PV.load(Ordering::Relaxed).max(1).min(self.root_moves().len());

        let start_ply: i16 = START_PLY[self.id % THREAD_DIST];
        let skip_size: i16 = SKIP_SIZE[self.id % THREAD_DIST];
        let mut depth: i16 = start_ply + 1;

        let mut best_value: Value = NEG_INFINITE;
        let mut time_reduction: f64 = 1.0;

        'iterative_deepening: while !self.stop() && depth <= max_depth {
            if self.main_thread() {
                self.best_move_changes *= 0.440;
                self.failed_low = false;
            }

            self.root_moves().rollback();

            for pv_idx in 0..self.multi_pv {
                if self.stop() {
                    break;
                }
                self.pv_idx = pv_idx;
                self.selected_depth = 0;

                let mut delta: Value = NEG_INFINITE;
                let mut alpha: Value = NEG_INFINITE;
                let mut beta: Value = INFINITE;

                // Narrow window around the previous score once some depth is
                // reached, widening exponentially on fails.
                if depth >= 5 {
                    let prev_best_score = self.root_moves()[pv_idx].prev_score;
                    delta = 40;
                    alpha = max(prev_best_score - delta, NEG_INFINITE);
                    beta = min(prev_best_score + delta, INFINITE);
                }

                'aspiration_window: loop {
                    best_value = self.search::<PV>(
                        alpha,
                        beta,
                        stack.ply_zero(),
                        depth * ONE_PLY,
                        false,
                        false,
                    );

                    self.root_moves().sort_from(pv_idx);

                    if self.stop() {
                        break 'aspiration_window;
                    }

                    if self.use_stdout()
                        && self.main_thread()
                        && self.multi_pv == 1
                        && (best_value <= alpha || best_value >= beta)
                        && self.time_man.elapsed() > 3000
                    {
                        self.print_pv(depth, alpha, beta);
                    }

                    if best_value <= alpha {
                        beta = (alpha + beta) / 2;
                        alpha = max(best_value - delta, NEG_INFINITE);
                        if self.main_thread() {
                            self.failed_low = true;
                        }
                    } else if best_value >= beta {
                        beta = min(best_value + delta, INFINITE);
                    } else {
                        break 'aspiration_window;
                    }
                    delta += delta / 4 + 5;

                    debug_assert!(alpha >= NEG_INFINITE);
                    debug_assert!(beta <= INFINITE);
                }

                self.root_moves().sort_to(pv_idx + 1);
                self.extract_pv(pv_idx, depth);

                if self.use_stdout() && self.main_thread() && !self.stop() {
                    self.print_pv(depth, NEG_INFINITE, INFINITE);
                }
            }

            if !self.stop() {
                self.depth_completed = depth;
            }

            let curr_best_move = self.root_moves().first().bit_move;
            if curr_best_move != self.last_best_move {
                self.last_best_move = curr_best_move;
                self.last_best_move_depth = depth;
            }

            // A mate limit stops once a short enough mate is proven.
            if self.main_thread() {
                if let Some(mate) = self.limit.use_mate() {
                    if best_value >= MATE - 2 * mate as Value {
                        threadpool().set_stop(true);
                        break 'iterative_deepening;
                    }
                }
            }

            depth += skip_size;

            if !self.main_thread() {
                continue;
            }

            // Time management: stop early when the best move has stayed
            // stable and the target budget is spent.
            if self.limit.use_time_management().is_some() && !self.stop() {
                let score_diff: Value = best_value - self.previous_score;

                let improving_factor: i64 = (232)
                    .max((787).min(306 + 119 * self.failed_low as i64 - 6 * score_diff as i64));

                time_reduction = 1.0;
                for i in 3..6i16 {
                    if self.last_best_move_depth * i < self.depth_completed {
                        time_reduction *= 1.42;
                    }
                }

                let mut unstable_factor: f64 = 1.0 + self.best_move_changes;
                unstable_factor *= self.previous_time_reduction.powf(0.40) / time_reduction;

                if self.root_moves().len() == 1
                    || self.time_man.elapsed()
                        >= (self.time_man.optimum() as f64
                            * unstable_factor
                            * improving_factor as f64
                            / 600.0) as i64
                {
                    if threadpool().is_pondering() {
                        // Keep searching until the ponder resolves, but
                        // remember the budget ran out.
                        threadpool().set_stop_on_ponder_hit(true);
                    } else {
                        threadpool().set_stop(true);
                        break 'iterative_deepening;
                    }
                }
            }
        }

        if self.main_thread() {
            self.previous_time_reduction = time_reduction;
        }
    }

    /// The alpha-beta search.
    fn search<N: PVNode>(
        &mut self,
        mut alpha: Value,
        mut beta: Value,
        ss: &mut Stack,
        depth: Depth,
        cut_node: bool,
        skip_early_pruning: bool,
    ) -> Value {
        if depth < ONE_PLY {
            return self.qsearch_dispatch::<N>(alpha, beta, ss, 0);
        }

        debug_assert!(depth >= ONE_PLY);
        let is_pv: bool = N::is_pv();
        let ply: u16 = ss.ply;
        let at_root: bool = ply == 0;
        let in_check: bool = self.board.in_check();

        debug_assert!(alpha >= NEG_INFINITE && alpha < beta && beta <= INFINITE);
        debug_assert!(is_pv || alpha == beta - 1);

        if self.main_thread() {
            self.nodes_since_poll += 1;
            if self.nodes_since_poll >= POLL_NODES {
                self.nodes_since_poll = 0;
                self.check_time();
            }
        }

        if is_pv && ply > self.selected_depth {
            self.selected_depth = ply;
        }

        if !at_root {
            if self.stop() || ply >= MAX_PLY {
                return if !in_check && ply >= MAX_PLY {
                    self.eval()
                } else {
                    draw_value()
                };
            }

            if self.board.fifty_move_rule() || self.board.is_repetition() {
                return draw_value();
            }

            // Mate-distance pruning: no line from here can beat a mate
            // already found closer to the root.
            alpha = alpha.max(mated_in(ply));
            beta = beta.min(mate_in(ply + 1));
            if alpha >= beta {
                return alpha;
            }
        }

        let sentinel: *mut PieceToHistory =
            &mut self.cont_history[(Piece::None, SQ(0))] as *mut PieceToHistory;

        ss.move_count = 0;
        ss.lmr_reduction = 0;
        ss.current_move = BitMove::null();
        ss.cont_history = sentinel;
        ss.incr().ply = ply + 1;
        ss.offset(1).excluded_move = BitMove::null();
        ss.offset(2).killers = [BitMove::null(); 2];
        ss.offset(2).stat_score = 0;

        let prev_move: BitMove = ss.offset(-1).current_move;
        let prev_sq: SQ = prev_move.get_dest();

        let mut best_move = BitMove::null();
        let mut best_value: Value = NEG_INFINITE;
        let mut value: Value;

        let mut captures_searched: [BitMove; 32] = [BitMove::null(); 32];
        let mut captures_count = 0;
        let mut quiets_searched: [BitMove; 64] = [BitMove::null(); 64];
        let mut quiets_count = 0;

        // Probe the shared table, salting the key with any excluded move so
        // singular searches don't collide with the plain entry.
        let excluded_move = ss.excluded_move;
        let zob: u64 = self.board.tt_key() ^ ((excluded_move.get_raw() as u64) << 16);
        let (tt_hit, tt_entry) = tt().probe(zob);
        let tt_value: Value = if tt_hit {
            value_from_tt(tt_entry.score as Value, ply)
        } else {
            NONE
        };
        let mut tt_move: BitMove = if at_root {
            self.root_moves()[self.pv_idx].bit_move
        } else if tt_hit {
            tt_entry.best_move()
        } else {
            BitMove::null()
        };
        let tt_e_depth: Depth = if tt_hit {
            tt_entry.depth as Depth * ONE_PLY
        } else {
            -(ONE_PLY * 7)
        };
        let tt_e_bound: NodeBound = if tt_hit {
            tt_entry.node_type()
        } else {
            NodeBound::NoBound
        };

        // A deep enough stored bound settles a non-PV node outright; keep
        // the ordering tables warm while returning it.
        if !is_pv
            && tt_hit
            && tt_e_depth >= depth
            && tt_value != NONE
            && correct_bound_eq(tt_value, beta, tt_e_bound)
        {
            if tt_move != BitMove::null() {
                if tt_value >= beta {
                    if !self.board.is_capture_or_promotion(tt_move) {
                        let bonus = stat_bonus(depth);
                        self.update_quiet_stats(tt_move, ss, &[], bonus);
                    }
                    if ss.offset(-1).move_count == 1
                        && self.board.piece_captured_last_turn() == PieceType::None
                        && prev_move.is_okay()
                    {
                        let piece_at_sq = self.board.piece_at_sq(prev_sq);
                        self.update_continuation_histories(
                            ss.offset(-1),
                            piece_at_sq,
                            prev_sq,
                            -stat_bonus(depth + ONE_PLY),
                        );
                    }
                } else if !self.board.is_capture_or_promotion(tt_move) {
                    let penalty = -stat_bonus(depth);
                    let moved_piece = self.board.moved_piece(tt_move);
                    self.main_history
                        .update((moved_piece, tt_move.get_dest()), penalty);
                    self.update_continuation_histories(ss, moved_piece, tt_move.get_dest(), penalty);
                }
            }
            return tt_value;
        }

        // Endgame tablebases answer instead of the search when few enough
        // pieces remain.
        if !at_root
            && excluded_move == BitMove::null()
            && (depth / ONE_PLY) as i32 >= syzygy::probe_depth()
        {
            if let Some(wdl) = syzygy::probe_wdl(&self.board) {
                self.tb_hits.fetch_add(1, Ordering::Relaxed);
                let tb_value = wdl_to_value(wdl, ply);
                let (_, e) = tt().probe(zob);
                e.save(
                    zob,
                    value_to_tt(tb_value, ply),
                    NodeBound::Exact,
                    ((depth / ONE_PLY).min(120) as i8) + 6,
                    BitMove::null(),
                    NONE as i16,
                    tt().time_age(),
                );
                return tb_value;
            }
        }

        // Static evaluation, cached in the frame and seeded into the table.
        let pos_eval: Value;
        let improving: bool;
        if in_check {
            ss.static_eval = NONE;
            pos_eval = NONE;
            improving = false;
        } else {
            if tt_hit {
                let stored_eval = tt_entry.eval as Value;
                let mut ev = if stored_eval == NONE {
                    self.eval()
                } else {
                    stored_eval
                };
                ss.static_eval = ev;
                if tt_value != NONE && correct_bound(tt_value, ev, tt_e_bound) {
                    ev = tt_value;
                }
                pos_eval = ev;
            } else {
                let ev = if prev_move == NULL_MOVE {
                    // A null move only flips the side; negate the cached eval.
                    -ss.offset(-1).static_eval + 2 * TEMPO
                } else {
                    self.eval()
                };
                ss.static_eval = ev;
                pos_eval = ev;
                tt_entry.save(
                    zob,
                    NONE as i16,
                    NodeBound::NoBound,
                    -6,
                    BitMove::null(),
                    ev as i16,
                    tt().time_age(),
                );
            }

            improving = {
                let two_plies_ago = ss.offset(-2).static_eval;
                ss.static_eval >= two_plies_ago || two_plies_ago == NONE
            };

            // Feed the gain learner with the eval swing the previous quiet
            // move produced.
            if prev_move.is_okay()
                && !prev_move.is_promo()
                && ss.offset(-1).static_eval != NONE
                && self.board.piece_captured_last_turn() == PieceType::None
            {
                let gain = -ss.static_eval - ss.offset(-1).static_eval + 2 * TEMPO;
                let prev_piece = self.board.piece_at_sq(prev_sq);
                if prev_piece != Piece::None {
                    self.max_gain.update(prev_piece, prev_move, gain);
                }
            }
        }

        if !in_check && !skip_early_pruning && self.board.non_pawn_material_all() != 0 {
            // Razoring: hopeless shallow nodes drop straight into quiescence.
            if !is_pv
                && depth < 3 * ONE_PLY
                && tt_move == BitMove::null()
                && pos_eval + RAZOR_MARGIN[(depth / ONE_PLY) as usize] <= alpha
            {
                let r_alpha =
                    alpha - ((depth >= 2 * ONE_PLY) as Value) * RAZOR_MARGIN[(depth / ONE_PLY) as usize];
                let v = self.qsearch_dispatch::<NonPV>(r_alpha, r_alpha + 1, ss, 0);
                if depth < 2 * ONE_PLY || v <= r_alpha {
                    return v;
                }
            }

            // Futility: a big enough static margin over beta stands on its
            // own at shallow depth.
            if !at_root
                && depth < 7 * ONE_PLY
                && pos_eval - futility_margin(depth, improving) >= beta
                && pos_eval < 10000
                && self.board.non_pawn_material(self.board.turn()) != 0
            {
                return pos_eval - futility_margin(depth, improving);
            }

            // Null-move pruning: hand the opponent a free move; if the
            // reduced search still clears beta, this node almost surely does.
            if !is_pv
                && excluded_move == BitMove::null()
                && depth >= 2 * ONE_PLY
                && pos_eval >= beta
                && prev_move != NULL_MOVE
                && beta > MATED_IN_MAX_PLY
                && self.board.non_pawn_material(self.board.turn()) != 0
            {
                let r: Depth = ((823 + 67 * (depth / ONE_PLY) as i32) / 256) as Depth * ONE_PLY
                    + min((pos_eval - beta) / PAWN_MG, 3) as Depth * ONE_PLY;

                ss.current_move = NULL_MOVE;
                ss.cont_history = sentinel;

                self.board.make_null_move();
                tt().prefetch(self.board.tt_key());
                let null_depth = depth - r;
                let mut null_value = if null_depth < ONE_PLY {
                    -self.qsearch_dispatch::<NonPV>(-beta, -beta + 1, ss.incr(), 0)
                } else {
                    -self.search::<NonPV>(-beta, -beta + 1, ss.incr(), null_depth, !cut_node, true)
                };
                self.board.unmake_null_move();

                if self.stop() {
                    return ZERO;
                }

                if null_value >= beta {
                    // The parent searched us with a reduction; rather than
                    // trust a reduced null cutoff, send back a fail-high
                    // that forces the full-depth re-search.
                    if ss.offset(-1).lmr_reduction > 0 {
                        return beta - 1;
                    }

                    if null_value >= MATE_IN_MAX_PLY {
                        null_value = beta;
                    }

                    if depth < 12 * ONE_PLY && beta.abs() < 10000 {
                        return null_value;
                    }

                    // Verify with a reduced non-null search near the horizon
                    // of trust.
                    let v = if null_depth < ONE_PLY {
                        self.qsearch_dispatch::<NonPV>(beta - 1, beta, ss, 0)
                    } else {
                        self.search::<NonPV>(beta - 1, beta, ss, null_depth, false, true)
                    };
                    if v >= beta {
                        return null_value;
                    }
                }
            }

            // ProbCut: a capture clearing beta by a margin at reduced depth
            // is proof enough for a cutoff here.
            if !is_pv && depth >= 5 * ONE_PLY && beta.abs() < MATE_IN_MAX_PLY {
                let rbeta: Value = min(beta + 216 - 48 * improving as Value, INFINITE);
                let cont: [*const PieceToHistory; 3] = [std::ptr::null(); 3];
                let mut picker = MovePicker::probcut(
                    &self.board,
                    rbeta - ss.static_eval,
                    tt_move,
                    self.picker_hists(cont),
                );
                while let Some(mov) = picker.next(false) {
                    if mov != excluded_move && self.board.legal_move(mov) {
                        let moved_piece = self.board.moved_piece(mov);
                        ss.current_move = mov;
                        ss.cont_history =
                            &mut self.cont_history[(moved_piece, mov.get_dest())] as *mut _;
                        let gives_check = self.board.gives_check(mov);
                        self.apply_move(mov, gives_check);
                        value = -self.search::<NonPV>(
                            -rbeta,
                            -rbeta + 1,
                            ss.incr(),
                            depth - 4 * ONE_PLY,
                            !cut_node,
                            false,
                        );
                        self.board.unmake_move();
                        if self.stop() {
                            return ZERO;
                        }
                        if value >= rbeta {
                            return value;
                        }
                    }
                }
            }

            // Internal iterative deepening: populate the table with a move
            // to order on when the probe came up empty.
            if tt_move == BitMove::null()
                && ((is_pv && depth >= 5 * ONE_PLY) || (cut_node && depth >= 8 * ONE_PLY))
            {
                let d = depth - 2 * ONE_PLY;
                self.search::<N>(alpha, beta, ss, d, cut_node, true);
                let (iid_hit, iid_entry) = tt().probe(zob);
                if iid_hit {
                    tt_move = iid_entry.best_move();
                }
            }
        }

        // Continuation channels of the moves 1, 2, and 4 plies back.
        let cont_hists: [*const PieceToHistory; 3] = [
            ss.offset(-1).cont_history as *const _,
            ss.offset(-2).cont_history as *const _,
            ss.offset(-4).cont_history as *const _,
        ];

        let counter: BitMove = self.resolve_counter_move(ss, prev_move, prev_sq);

        let mut picker = MovePicker::main_search(
            &self.board,
            depth,
            self.picker_hists(cont_hists),
            tt_move,
            ss.killers,
            counter,
        );

        let singular_extension_node: bool = !at_root
            && depth >= 8 * ONE_PLY
            && tt_move != BitMove::null()
            && tt_value != NONE
            && tt_value.abs() < MATE_IN_MAX_PLY
            && excluded_move == BitMove::null()
            && (tt_e_bound as u8 & NodeBound::LowerBound as u8) != 0
            && tt_e_depth >= depth - 3 * ONE_PLY;

        // When even the optimistic margin cannot reach alpha, quiets are
        // only worth trying if they give check.
        let quiet_checks_only: bool = !in_check
            && depth < 6 * ONE_PLY
            && pos_eval != NONE
            && pos_eval + 110 + 170 * (depth / ONE_PLY) as Value <= alpha;

        let mut skip_quiets: bool = false;
        let mut tt_capture: bool = false;
        let pv_exact: bool = is_pv && tt_hit && tt_e_bound == NodeBound::Exact;
        let mut moves_played: u32 = 0;

        while let Some(mov) = picker.next(skip_quiets) {
            if mov == excluded_move {
                continue;
            }

            // At the root, only walk moves belonging to this PV slot.
            if at_root {
                match self.root_moves().position(mov) {
                    Some(idx) if idx >= self.pv_idx => {}
                    _ => continue,
                }
            }

            moves_played += 1;
            ss.move_count = moves_played;

            if at_root
                && self.main_thread()
                && self.use_stdout()
                && self.time_man.elapsed() > 4000
            {
                println!(
                    "info currmove {} currmovenumber {}",
                    uci_move_string(mov),
                    moves_played as usize + self.pv_idx
                );
            }

            let gives_check: bool = self.board.gives_check(mov);
            let capture_or_promotion: bool = self.board.is_capture_or_promotion(mov);
            let moved_piece: Piece = self.board.moved_piece(mov);

            if quiet_checks_only && !capture_or_promotion && !gives_check && moves_played > 1 {
                moves_played -= 1;
                ss.move_count -= 1;
                continue;
            }

            let move_count_pruning: bool = depth < 16 * ONE_PLY
                && moves_played as i32 > futility_move_count(improving, depth);

            // Singular extension: when the hash move alone beats a lowered
            // bound that every other move fails, it deserves another ply.
            let mut extension: Depth = 0;
            if singular_extension_node && mov == tt_move && self.board.legal_move(mov) {
                let rbeta: Value = (tt_value - 2 * (depth / ONE_PLY) as Value).max(-MATE);
                ss.excluded_move = mov;
                value = self.search::<NonPV>(rbeta - 1, rbeta, ss, depth / 2, cut_node, true);
                ss.excluded_move = BitMove::null();
                if value < rbeta {
                    extension = ONE_PLY;
                }
                ss.move_count = moves_played;
            } else if gives_check && !move_count_pruning && self.board.see_ge(mov, 0) {
                extension = ONE_PLY;
            }

            let new_depth: Depth = depth - ONE_PLY + extension;

            // Pruning at shallow depth.
            if !at_root
                && best_value > MATED_IN_MAX_PLY
                && self.board.non_pawn_material(self.board.turn()) != 0
            {
                if !capture_or_promotion
                    && !gives_check
                    && (!self.board.advanced_pawn_push(mov)
                        || self.board.non_pawn_material_all() >= 5000)
                {
                    // Late-move count pruning.
                    if move_count_pruning {
                        skip_quiets = true;
                        continue;
                    }

                    let lmr_depth: i32 = (max(
                        new_depth - reduction(is_pv, improving, depth, moves_played),
                        0,
                    ) / ONE_PLY) as i32;

                    // Continuation-history pruning.
                    unsafe {
                        if lmr_depth < 3
                            && (&(*cont_hists[0]))[(moved_piece, mov.get_dest())] < 0
                            && (&(*cont_hists[1]))[(moved_piece, mov.get_dest())] < 0
                        {
                            continue;
                        }
                    }

                    // Gain-based pruning: the move has never produced
                    // anything at this shallow depth.
                    if lmr_depth < 6 && self.max_gain.get(moved_piece, mov) < -64 * lmr_depth {
                        continue;
                    }

                    // Extended futility.
                    if lmr_depth < 7
                        && !in_check
                        && ss.static_eval + 256 + 200 * lmr_depth <= alpha
                    {
                        continue;
                    }

                    // SEE pruning of losing quiets.
                    if lmr_depth < 8 && !self.board.see_ge(mov, -35 * lmr_depth * lmr_depth) {
                        continue;
                    }
                } else if depth < 7 * ONE_PLY
                    && extension == 0
                    && !self
                        .board
                        .see_ge(mov, -CAPTURE_PRUNE_MARGIN[(depth / ONE_PLY) as usize])
                {
                    continue;
                }
            }

            tt().prefetch(self.board.key_after(mov));

            if !at_root && !self.board.legal_move(mov) {
                ss.move_count -= 1;
                moves_played -= 1;
                continue;
            }

            if mov == tt_move && capture_or_promotion {
                tt_capture = true;
            }

            ss.current_move = mov;
            ss.cont_history = &mut self.cont_history[(moved_piece, mov.get_dest())] as *mut _;

            self.apply_move(mov, gives_check);
            tt().prefetch(self.board.tt_key());

            // Whether the piece could not safely return to its origin: it
            // just escaped a standing capture, so reduce it less. Judged on
            // the post-move board, where the reverse move is well-formed.
            let escapes_capture: bool = !capture_or_promotion
                && mov.move_type() == MoveType::Normal
                && !self
                    .board
                    .see_ge(BitMove::make_normal(mov.get_dest(), mov.get_src()), 0);

            // Late-move reductions: search lesser moves shallower first,
            // stepping back up only when they surprise.
            let do_full_depth: bool;
            ss.lmr_reduction = 0;
            value = ZERO;
            if moves_played > 1 && depth >= 3 * ONE_PLY && (!capture_or_promotion || move_count_pruning)
            {
                let mut r: Depth = reduction(is_pv, improving, depth, moves_played);

                if capture_or_promotion {
                    r = max(r - ONE_PLY, 0);
                } else {
                    if cut_node && !is_pv {
                        r += 2 * ONE_PLY;
                    }

                    if ss.offset(-1).move_count > 15 {
                        r -= ONE_PLY;
                    }

                    if pv_exact {
                        r -= ONE_PLY;
                    }

                    if tt_capture {
                        r += ONE_PLY;
                    }

                    if escapes_capture {
                        r -= 2 * ONE_PLY;
                    }

                    ss.stat_score = unsafe {
                        self.main_history[(moved_piece, mov.get_dest())] as i32
                            + (&(*cont_hists[0]))[(moved_piece, mov.get_dest())] as i32
                            + (&(*cont_hists[1]))[(moved_piece, mov.get_dest())] as i32
                            + (&(*cont_hists[2]))[(moved_piece, mov.get_dest())] as i32
                            - 4000
                    };

                    if ss.stat_score >= 0 && ss.offset(-1).stat_score < 0 {
                        r -= ONE_PLY;
                    } else if ss.offset(-1).stat_score >= 0 && ss.stat_score < 0 {
                        r += ONE_PLY;
                    }

                    r = max(r - (ss.stat_score / 20000) as Depth * ONE_PLY, 0);
                }

                let d: Depth = max(new_depth - r, ONE_PLY);
                ss.lmr_reduction = new_depth - d;

                value = -self.search::<NonPV>(-(alpha + 1), -alpha, ss.incr(), d, true, false);

                // A deep reduction that got beaten earns a half-way retry
                // before the full-depth verdict.
                if value > alpha && ss.lmr_reduction >= 5 * ONE_PLY {
                    let half: Depth = max(new_depth - ss.lmr_reduction / 2, ONE_PLY);
                    ss.lmr_reduction = new_depth - half;
                    value =
                        -self.search::<NonPV>(-(alpha + 1), -alpha, ss.incr(), half, true, false);
                }

                do_full_depth = value > alpha && ss.lmr_reduction != 0;
                ss.lmr_reduction = 0;
            } else {
                do_full_depth = !is_pv || moves_played > 1;
            }

            if do_full_depth {
                value = -self.search::<NonPV>(
                    -(alpha + 1),
                    -alpha,
                    ss.incr(),
                    new_depth,
                    !cut_node,
                    false,
                );
            }

            if is_pv && (moves_played == 1 || (value > alpha && (at_root || value < beta))) {
                value = -self.search::<PV>(-beta, -alpha, ss.incr(), new_depth, false, false);
            }

            self.board.unmake_move();

            debug_assert!(value > NEG_INFINITE && value < INFINITE);

            if self.stop() {
                return ZERO;
            }

            if at_root {
                let mut incr_bmc: bool = false;
                let main_thread = self.main_thread();
                let pv_depth = depth / ONE_PLY;
                if let Some(rm) = self.root_moves().find(mov) {
                    if moves_played == 1 || value > alpha {
                        rm.score = value;
                        rm.depth_reached = pv_depth;
                        if moves_played > 1 && main_thread && depth > 5 * ONE_PLY {
                            incr_bmc = true;
                        }
                    } else {
                        rm.score = NEG_INFINITE;
                    }
                }
                if incr_bmc {
                    self.best_move_changes += 1.0;
                }
            }

            if value > best_value {
                best_value = value;

                if value > alpha {
                    best_move = mov;

                    if is_pv && value < beta {
                        alpha = value;
                    } else {
                        break;
                    }
                }
            }

            if mov != best_move {
                if capture_or_promotion && captures_count < 32 {
                    captures_searched[captures_count] = mov;
                    captures_count += 1;
                } else if !capture_or_promotion && quiets_count < 64 {
                    quiets_searched[quiets_count] = mov;
                    quiets_count += 1;
                }
            }
        }

        if moves_played == 0 {
            // No legal move: a singular sub-search just reports its bound, a
            // checkmate scores by distance, anything else is stalemate.
            if excluded_move != BitMove::null() {
                return alpha;
            } else if in_check {
                return mated_in(ply);
            } else {
                return draw_value();
            }
        } else if best_move != BitMove::null() {
            if !self.board.is_capture_or_promotion(best_move) {
                let bonus = stat_bonus(depth);
                self.update_quiet_stats(best_move, ss, &quiets_searched[0..quiets_count], bonus);
            } else {
                let bonus = stat_bonus(depth);
                self.update_capture_stats(best_move, &captures_searched[0..captures_count], bonus);
            }

            // A quiet previous move that was refuted first try gets marked
            // down on the opponent's continuation channel.
            if ss.offset(-1).move_count == 1
                && self.board.piece_captured_last_turn() == PieceType::None
                && prev_move.is_okay()
            {
                let piece_at_sq = self.board.piece_at_sq(prev_sq);
                self.update_continuation_histories(
                    ss.offset(-1),
                    piece_at_sq,
                    prev_sq,
                    -stat_bonus(depth + ONE_PLY),
                );
            }
        } else if depth >= 3 * ONE_PLY {
            // Failed low with nothing to show: demote the tried quiets a
            // little and reward the opponent's path.
            let bonus = stat_bonus(depth) / 2;
            for q_mov in quiets_searched[0..quiets_count].iter() {
                let q_piece = self.board.moved_piece(*q_mov);
                if in_check {
                    self.evasion_history.update((q_piece, q_mov.get_dest()), -bonus);
                } else {
                    self.main_history.update((q_piece, q_mov.get_dest()), -bonus);
                }
            }
            if self.board.piece_captured_last_turn() == PieceType::None && prev_move.is_okay() {
                let piece_at_sq = self.board.piece_at_sq(prev_sq);
                self.update_continuation_histories(
                    ss.offset(-1),
                    piece_at_sq,
                    prev_sq,
                    stat_bonus(depth),
                );
            }
        }

        if excluded_move == BitMove::null() {
            let node_bound = if best_value >= beta {
                NodeBound::LowerBound
            } else if is_pv && !best_move.is_null() {
                NodeBound::Exact
            } else {
                NodeBound::UpperBound
            };
            let (_, entry) = tt().probe(zob);
            entry.save(
                zob,
                value_to_tt(best_value, ply),
                node_bound,
                (depth / ONE_PLY) as i8,
                best_move,
                ss.static_eval as i16,
                tt().time_age(),
            );
        }

        debug_assert!(best_value > NEG_INFINITE && best_value < INFINITE);
        best_value
    }

    /// Dispatches into quiescence with the check state monomorphized.
    #[inline]
    fn qsearch_dispatch<N: PVNode>(
        &mut self,
        alpha: Value,
        beta: Value,
        ss: &mut Stack,
        rev_depth: Depth,
    ) -> Value {
        if self.board.in_check() {
            self.qsearch::<N, InCheck>(alpha, beta, ss, rev_depth)
        } else {
            self.qsearch::<N, NoCheck>(alpha, beta, ss, rev_depth)
        }
    }

    /// Quiescence: only tactical moves (and evasions while in check) are
    /// searched until the position settles enough to stand on its eval.
    fn qsearch<N: PVNode, C: CheckState>(
        &mut self,
        mut alpha: Value,
        beta: Value,
        ss: &mut Stack,
        rev_depth: Depth,
    ) -> Value {
        let is_pv: bool = N::is_pv();
        let in_check: bool = C::in_check();
        debug_assert_eq!(in_check, self.board.in_check());
        debug_assert!(rev_depth <= 0);
        debug_assert!(alpha >= NEG_INFINITE && alpha < beta && beta <= INFINITE);
        debug_assert!(is_pv || (alpha == beta - 1));

        let old_alpha = alpha;

        if self.board.fifty_move_rule() || self.board.is_repetition() {
            return draw_value();
        }

        let ply: u16 = ss.ply;

        if ply >= MAX_PLY {
            return if !in_check { self.eval() } else { draw_value() };
        }

        let zob: u64 = self.board.tt_key();
        let (tt_hit, tt_entry) = tt().probe(zob);
        let tt_value: Value = if tt_hit {
            value_from_tt(tt_entry.score as Value, ply)
        } else {
            NONE
        };
        let tt_move: BitMove = if tt_hit {
            tt_entry.best_move()
        } else {
            BitMove::null()
        };
        let tt_e_bound: NodeBound = if tt_hit {
            tt_entry.node_type()
        } else {
            NodeBound::NoBound
        };

        // The stored depth floor: zero when checks are still generated,
        // minus one ply beyond that.
        let hash_depth: Depth = if in_check || rev_depth >= 0 { 0 } else { -ONE_PLY };

        ss.incr().ply = ply + 1;
        ss.current_move = BitMove::null();
        let mut best_move = tt_move;

        if !is_pv
            && tt_hit
            && (tt_entry.depth as Depth * ONE_PLY) >= hash_depth
            && tt_value != NONE
            && correct_bound_eq(tt_value, beta, tt_e_bound)
        {
            return tt_value;
        }

        // Shallow tablebase peek.
        if let Some(wdl) = syzygy::probe_wdl(&self.board) {
            self.tb_hits.fetch_add(1, Ordering::Relaxed);
            return wdl_to_value(wdl, ply);
        }

        let mut best_value: Value;
        let futility_base: Value;

        // Stand pat on the static eval outside of check.
        if in_check {
            ss.static_eval = NONE;
            best_value = NEG_INFINITE;
            futility_base = NEG_INFINITE;
        } else {
            let pos_eval: Value;
            if tt_hit {
                let stored = tt_entry.eval as Value;
                pos_eval = if stored == NONE { self.eval() } else { stored };
                ss.static_eval = pos_eval;
                best_value = pos_eval;
                // A stored score that tightens the bound upgrades the
                // stand-pat value.
                if tt_value != NONE && correct_bound(tt_value, best_value, tt_e_bound) {
                    best_value = tt_value;
                }
            } else {
                pos_eval = self.eval();
                ss.static_eval = pos_eval;
                best_value = pos_eval;
            }

            if best_value >= beta {
                if !tt_hit {
                    let (_, entry) = tt().probe(zob);
                    entry.save(
                        zob,
                        value_to_tt(best_value, ply),
                        NodeBound::LowerBound,
                        (hash_depth / ONE_PLY) as i8,
                        BitMove::null(),
                        pos_eval as i16,
                        tt().time_age(),
                    );
                }
                return best_value;
            }

            if is_pv && best_value > alpha {
                alpha = best_value;
            }

            futility_base = 128 + best_value;
        }

        let recap_sq: SQ = ss.offset(-1).current_move.get_dest();
        let cont: [*const PieceToHistory; 3] = [std::ptr::null(); 3];
        let mut picker = MovePicker::qsearch(
            &self.board,
            rev_depth,
            tt_move,
            self.picker_hists(cont),
            recap_sq,
        );

        let mut moves_played: u32 = 0;
        let mut value: Value;

        while let Some(mov) = picker.next(false) {
            let gives_check: bool = self.board.gives_check(mov);
            moves_played += 1;

            // Delta pruning: even winning this piece cannot lift alpha.
            if !in_check && !gives_check && futility_base > -10000 && !self.board.advanced_pawn_push(mov)
            {
                let captured = self.board.captured_piece(mov);
                let moved = self.board.moved_piece(mov);
                let mut futility_value =
                    futility_base + sable::helper::prelude::piecetype_value(captured, true);
                futility_value += self.capture_history[(moved, mov.get_dest())] as Value / 64;

                if futility_value <= alpha {
                    best_value = best_value.max(futility_value);
                    continue;
                }

                if futility_base <= alpha && !self.board.see_ge(mov, 1) {
                    best_value = best_value.max(futility_base);
                    continue;
                }
            }

            let evasion_prunable: bool = in_check
                && (rev_depth != 0 || moves_played > 2)
                && best_value > MATED_IN_MAX_PLY
                && !self.board.is_capture(mov);

            if (!in_check || evasion_prunable) && !self.board.see_ge(mov, 0) {
                continue;
            }

            tt().prefetch(self.board.key_after(mov));

            if !self.board.legal_move(mov) {
                moves_played -= 1;
                continue;
            }

            ss.current_move = mov;
            let moved_piece = self.board.moved_piece(mov);
            let is_capture = self.board.is_capture(mov);

            self.apply_move(mov, gives_check);
            tt().prefetch(self.board.tt_key());

            value = -self.qsearch_dispatch::<N>(-beta, -alpha, ss.incr(), rev_depth - ONE_PLY);

            self.board.unmake_move();

            debug_assert!(value > NEG_INFINITE && value < INFINITE);

            // Track how this capture fared against alpha.
            if is_capture {
                let bonus = if value > alpha { 128 } else { -128 };
                self.capture_history.update((moved_piece, mov.get_dest()), bonus);
            }

            if value > best_value {
                best_value = value;

                if value > alpha {
                    best_move = mov;
                    if is_pv && value < beta {
                        alpha = value;
                    } else {
                        let (_, entry) = tt().probe(zob);
                        entry.save(
                            zob,
                            value_to_tt(best_value, ply),
                            NodeBound::LowerBound,
                            (hash_depth / ONE_PLY) as i8,
                            mov,
                            ss.static_eval as i16,
                            tt().time_age(),
                        );
                        return value;
                    }
                }
            }
        }

        if in_check && best_value == NEG_INFINITE {
            return mated_in(ply);
        }

        let node_bound = if is_pv && best_value > old_alpha {
            NodeBound::Exact
        } else {
            NodeBound::UpperBound
        };
        let (_, entry) = tt().probe(zob);
        entry.save(
            zob,
            value_to_tt(best_value, ply),
            node_bound,
            (hash_depth / ONE_PLY) as i8,
            best_move,
            ss.static_eval as i16,
            tt().time_age(),
        );

        debug_assert!(best_value > NEG_INFINITE && best_value < INFINITE);
        best_value
    }

    /// Looks up the refutation of the previous move, falling back to the
    /// counter-followup table when the plain slot is missing or unusable.
    fn resolve_counter_move(&mut self, ss: &mut Stack, prev_move: BitMove, prev_sq: SQ) -> BitMove {
        if !prev_move.is_okay() || !prev_sq.is_okay() {
            return BitMove::null();
        }
        let prev_piece = self.board.piece_at_sq(prev_sq);
        if prev_piece == Piece::None {
            return BitMove::null();
        }
        let cm = self.counter_moves[(prev_piece, prev_sq)];
        if cm != BitMove::null()
            && !self.board.is_capture_or_promotion(cm)
            && self.board.pseudo_legal_move(cm)
        {
            return cm;
        }
        let prev2 = ss.offset(-2).current_move;
        if prev2.is_okay() {
            let p2_sq = prev2.get_dest();
            let p2_piece = self.board.piece_at_sq(p2_sq);
            if p2_piece != Piece::None {
                return self.counter_followups[(p2_piece, p2_sq, prev_piece.type_of(), prev_sq)];
            }
        }
        BitMove::null()
    }

    /// A new best capture updates the capture ordering table.
    fn update_capture_stats(&mut self, mov: BitMove, captures: &[BitMove], bonus: i32) {
        let moved_piece: Piece = self.board.moved_piece(mov);
        self.capture_history
            .update((moved_piece, mov.get_dest()), bonus);

        for m in captures.iter() {
            let p = self.board.moved_piece(*m);
            self.capture_history.update((p, m.get_dest()), -bonus);
        }
    }

    /// A new best quiet updates killers, counters, both history tables, and
    /// the continuation channels, demoting every quiet tried before it.
    fn update_quiet_stats(&mut self, mov: BitMove, ss: &mut Stack, quiets: &[BitMove], bonus: i32) {
        if ss.killers[0] != mov {
            ss.killers[1] = ss.killers[0];
            ss.killers[0] = mov;
        }

        let in_check = self.board.in_check();
        let moved_piece = self.board.moved_piece(mov);
        let to_sq = mov.get_dest();
        if in_check {
            self.evasion_history.update((moved_piece, to_sq), bonus);
        } else {
            self.main_history.update((moved_piece, to_sq), bonus);
        }
        self.update_continuation_histories(ss, moved_piece, to_sq, bonus);

        let prev = ss.offset(-1).current_move;
        if prev.is_okay() {
            let prev_sq = prev.get_dest();
            let prev_piece = self.board.piece_at_sq(prev_sq);
            if prev_piece != Piece::None {
                self.counter_moves[(prev_piece, prev_sq)] = mov;

                let prev2 = ss.offset(-2).current_move;
                if prev2.is_okay() {
                    let p2_sq = prev2.get_dest();
                    let p2_piece = self.board.piece_at_sq(p2_sq);
                    if p2_piece != Piece::None {
                        self.counter_followups
                            [(p2_piece, p2_sq, prev_piece.type_of(), prev_sq)] = mov;
                    }
                }
            }
        }

        for q_mov in quiets.iter() {
            let q_piece = self.board.moved_piece(*q_mov);
            let q_to = q_mov.get_dest();
            if in_check {
                self.evasion_history.update((q_piece, q_to), -bonus);
            } else {
                self.main_history.update((q_piece, q_to), -bonus);
            }
            self.update_continuation_histories(ss, q_piece, q_to, -bonus);
        }
    }

    /// Updates the continuation channels of the moves played 1, 2, and 4
    /// plies ago.
    fn update_continuation_histories(&mut self, ss: &mut Stack, piece: Piece, to: SQ, bonus: i32) {
        if piece == Piece::None {
            return;
        }
        for i in [1, 2, 4].iter() {
            let i_ss: &mut Stack = ss.offset(-(*i as isize));
            if i_ss.current_move.is_okay() {
                unsafe {
                    let cont_his: &mut PieceToHistory = &mut *i_ss.cont_history;
                    cont_his.update((piece, to), bonus);
                }
            }
        }
    }

    fn picker_hists(&self, cont: [*const PieceToHistory; 3]) -> PickerHists {
        PickerHists {
            main: &self.main_history,
            captures: &self.capture_history,
            evasions: &self.evasion_history,
            max_gain: &self.max_gain,
            cont,
        }
    }

    #[inline(always)]
    fn apply_move(&mut self, mov: BitMove, gives_check: bool) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
        self.board.make_move_gc(mov, gives_check);
    }

    pub fn eval(&mut self) -> Value {
        Evaluation::evaluate(&self.board)
    }

    #[inline(always)]
    fn main_thread(&self) -> bool {
        self.id == 0
    }

    #[inline(always)]
    fn stop(&self) -> bool {
        threadpool().stop.load(Ordering::SeqCst)
    }

    #[inline(always)]
    pub fn use_stdout(&self) -> bool {
        USE_STDOUT.load(Ordering::Relaxed)
    }

    /// The periodic interrupt: time, node limit, and once-a-second progress
    /// output. Main thread only.
    fn check_time(&mut self) {
        if threadpool().is_pondering() {
            return;
        }

        if self.limit.use_time_management().is_some() {
            if self.time_man.elapsed() >= self.time_man.maximum() {
                threadpool().set_stop(true);
            }
        } else if let Some(mt) = self.limit.use_movetime() {
            if self.limit.elapsed() >= mt as i64 {
                threadpool().set_stop(true);
            }
        }

        if let Some(node_limit) = self.limit.use_nodes() {
            if threadpool().nodes() >= node_limit {
                threadpool().set_stop(true);
            }
        }

        let elapsed = self.time_man.elapsed();
        if self.use_stdout() && elapsed - self.last_info_ms >= 1000 {
            self.last_info_ms = elapsed;
            let nodes = threadpool().nodes();
            let nps = if elapsed > 0 {
                nodes * 1000 / elapsed as u64
            } else {
                0
            };
            println!(
                "info time {} nodes {} nps {} hashfull {} tbhits {}",
                elapsed,
                nodes,
                nps,
                tt().hash_full(),
                threadpool().tb_hits() + syzygy::tb_hits(),
            );
        }
    }

    #[inline]
    pub fn root_moves(&self) -> &mut RootMoveList {
        unsafe { &mut *self.root_moves.get() }
    }

    /// Rebuilds the principal variation of a root move by walking the
    /// transposition table, stopping at the first break in legality,
    /// repetition, or depth.
    fn extract_pv(&mut self, pv_idx: usize, depth: i16) {
        let first_move = self.root_moves()[pv_idx].bit_move;
        let mut pv: Vec<BitMove> = vec![first_move];
        let mut made: usize = 0;

        self.board.make_move(first_move);
        made += 1;

        while (pv.len() as i16) < depth.min(MAX_PLY as i16) {
            let (hit, entry) = tt().probe(self.board.tt_key());
            if !hit {
                break;
            }
            let mv = entry.best_move();
            if mv.is_null()
                || !self.board.pseudo_legal_move(mv)
                || !self.board.legal_move(mv)
                || self.board.is_repetition()
            {
                break;
            }
            pv.push(mv);
            self.board.make_move(mv);
            made += 1;
        }

        for _ in 0..made {
            self.board.unmake_move();
        }

        self.root_moves()[pv_idx].pv = pv;
    }

    /// Prints `info` lines for every PV slot at the given depth.
    fn print_pv(&mut self, depth: i16, alpha: Value, beta: Value) {
        let elapsed = self.time_man.elapsed().max(1) as u64;
        let nodes = threadpool().nodes();
        let seldepth = self.selected_depth;
        let multi_pv = self.multi_pv;
        let hashfull = tt().hash_full();
        let tbhits = threadpool().tb_hits() + syzygy::tb_hits();

        for k in 0..multi_pv {
            let (score, prev_score, pv, updated) = {
                let rm = &self.root_moves()[k];
                (rm.score, rm.prev_score, rm.pv.clone(), rm.score != NEG_INFINITE)
            };
            let v = if updated { score } else { prev_score };
            if v == NEG_INFINITE {
                continue;
            }

            let mut s = String::with_capacity(128);
            s.push_str(&format!("info depth {} seldepth {}", depth, seldepth));
            s.push_str(&format!(" multipv {}", k + 1));
            if v.abs() < MATE_IN_MAX_PLY {
                s.push_str(&format!(" score cp {}", to_centipawns(v)));
            } else {
                let mate_in = if v > 0 {
                    (MATE - v + 1) / 2
                } else {
                    -(MATE + v) / 2
                };
                s.push_str(&format!(" score mate {}", mate_in));
            }
            if v >= beta {
                s.push_str(" lowerbound");
            } else if v <= alpha {
                s.push_str(" upperbound");
            }
            s.push_str(&format!(" nodes {} nps {}", nodes, nodes * 1000 / elapsed));
            s.push_str(&format!(" hashfull {} tbhits {}", hashfull, tbhits));
            s.push_str(&format!(" time {}", elapsed));
            s.push_str(" pv");
            for mv in pv.iter() {
                s.push(' ');
                s.push_str(&uci_move_string(*mv));
            }
            println!("{}", s);
        }
    }
}

impl Drop for Searcher {
    fn drop(&mut self) {
        self.searching.set(false);
    }
}

/// Translates a move to its UCI string, emitting king-takes-rook castle
/// notation in Chess960 mode.
pub fn uci_move_string(mv: BitMove) -> String {
    if CHESS960.load(Ordering::Relaxed) && mv.is_castle() {
        let src = mv.get_src();
        let dst = mv.get_dest();
        let rook_dst = if dst > src { dst + SQ(1) } else { dst - SQ(2) };
        format!("{}{}", src, rook_dst)
    } else {
        mv.stringify()
    }
}

/// The draw score from the side to move's perspective, biased by contempt.
#[inline]
fn draw_value() -> Value {
    DRAW - CONTEMPT.load(Ordering::Relaxed)
}

/// Maps a tablebase win/draw/loss outcome onto a search score.
fn wdl_to_value(wdl: Value, ply: u16) -> Value {
    if wdl > 0 {
        MATE_IN_MAX_PLY - ply as Value - 1
    } else if wdl < 0 {
        MATED_IN_MAX_PLY + ply as Value + 1
    } else {
        draw_value()
    }
}

fn correct_bound_eq(tt_value: Value, beta: Value, bound: NodeBound) -> bool {
    if tt_value >= beta {
        bound as u8 & NodeBound::LowerBound as u8 != 0
    } else {
        bound as u8 & NodeBound::UpperBound as u8 != 0
    }
}

fn correct_bound(tt_value: Value, val: Value, bound: NodeBound) -> bool {
    if tt_value >= val {
        bound as u8 & NodeBound::LowerBound as u8 != 0
    } else {
        bound as u8 & NodeBound::UpperBound as u8 != 0
    }
}

/// Mate scores are stored relative to the storing node and rebased on read,
/// so an entry stays correct wherever it is probed from.
fn value_to_tt(value: Value, ply: u16) -> i16 {
    debug_assert!(value != NONE);
    if value >= MATE_IN_MAX_PLY {
        (value + ply as Value) as i16
    } else if value <= MATED_IN_MAX_PLY {
        (value - ply as Value) as i16
    } else {
        value as i16
    }
}

fn value_from_tt(value: Value, ply: u16) -> Value {
    if value == NONE {
        NONE
    } else if value >= MATE_IN_MAX_PLY {
        value - ply as Value
    } else if value <= MATED_IN_MAX_PLY {
        value + ply as Value
    } else {
        value
    }
}

#[inline]
fn futility_margin(depth: Depth, improving: bool) -> Value {
    (depth / ONE_PLY) as Value * (175 - 50 * improving as Value)
}

#[inline]
fn futility_move_count(improving: bool, depth: Depth) -> i32 {
    unsafe { FUTILITY_MOVE_COUNTS[improving as usize][((depth / ONE_PLY) as usize).min(15)] }
}

/// Base reduction in internal units, from the log-log table.
fn reduction(is_pv: bool, improving: bool, depth: Depth, move_number: u32) -> Depth {
    let plies = unsafe {
        REDUCTIONS[is_pv as usize][improving as usize][((depth / ONE_PLY) as usize).min(63)]
            [(move_number as usize).min(63)]
    };
    plies * ONE_PLY
}

/// The history bonus awarded at a given depth.
fn stat_bonus(depth: Depth) -> i32 {
    let d = (depth / ONE_PLY) as i32;
    (24 * (d * d + 2 * d - 2)).max(0).min(8192)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mate_value_helpers() {
        assert_eq!(mate_in(1), MATE - 1);
        assert_eq!(mated_in(2), -MATE + 2);
        assert!(mate_in(3) > mate_in(5));
    }

    #[test]
    fn tt_value_round_trip() {
        for &(v, ply) in &[(MATE - 3, 2u16), (-MATE + 5, 4), (240, 12), (-900, 3)] {
            let stored = value_to_tt(v, ply);
            assert_eq!(value_from_tt(stored as Value, ply), v);
        }
    }

    #[test]
    fn stat_bonus_capped() {
        assert_eq!(stat_bonus(0), 0);
        assert!(stat_bonus(10 * ONE_PLY) > 0);
        assert_eq!(stat_bonus(60 * ONE_PLY), 8192);
    }
}
