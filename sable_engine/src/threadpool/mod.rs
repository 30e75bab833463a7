//! The pool of searcher threads.
//!
//! One "main" thread drives iterative deepening, time checks, and reporting;
//! the remaining workers run the same loop with diverging depth offsets. All
//! of them share only the transposition table, the root snapshot handed out
//! at `go`, and the atomic stop/ponder signals.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::cell::UnsafeCell;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use std::thread::{self, JoinHandle};
use std::{mem, ptr};

use sable::{Board, BitMove, MoveList};

use crate::consts::*;
use crate::search::{uci_move_string, Searcher};
use crate::sync::LockLatch;
use crate::syzygy;
use crate::time::uci_timer::Limits;

const KILOBYTE: usize = 1000;
// Searcher structures are several megabytes of tables; spawned threads get
// stacks deep enough to construct them in place.
const THREAD_OS_STACK_SIZE: usize = 18_000 * KILOBYTE;

static mut THREADPOOL: Option<ThreadPool> = None;

static THREADPOOL_INIT: Once = Once::new();

/// Initializes the global thread pool. Called once at startup.
#[cold]
pub fn init_threadpool() {
    THREADPOOL_INIT.call_once(|| {
        // A spawned thread builds the pool so the large searcher values
        // never touch the small initial stack.
        let builder = thread::Builder::new()
            .name("Starter".to_string())
            .stack_size(THREAD_OS_STACK_SIZE);

        let handle = builder
            .spawn(|| unsafe {
                THREADPOOL = Some(ThreadPool::new());
            })
            .unwrap();
        handle.join().unwrap();
    });
}

/// Returns access to the global thread pool.
#[inline(always)]
pub fn threadpool() -> &'static mut ThreadPool {
    unsafe { THREADPOOL.as_mut().unwrap() }
}

// Wrapper to move a raw searcher pointer into a spawned thread.
struct SearcherPtr {
    ptr: UnsafeCell<*mut Searcher>,
}

unsafe impl Sync for SearcherPtr {}
unsafe impl Send for SearcherPtr {}

/// The thread pool itself: the searcher structures, their join handles, and
/// the shared signaling state.
pub struct ThreadPool {
    /// Access to each thread's structure.
    pub threads: Vec<UnsafeCell<*mut Searcher>>,
    /// Handles of each spawned thread.
    handles: Vec<JoinHandle<()>>,
    /// Condition the main thread parks on.
    pub main_cond: Arc<LockLatch>,
    /// Condition all workers park on.
    pub thread_cond: Arc<LockLatch>,
    /// Cooperative stop flag, polled throughout the search.
    pub stop: AtomicBool,
    /// Set while a `go ponder` search runs.
    pondering: AtomicBool,
    /// Set when the budget expired mid-ponder: stop as soon as the ponder
    /// resolves.
    stop_on_ponder_hit: AtomicBool,
}

impl ThreadPool {
    /// Creates a new `ThreadPool` with the main thread attached.
    pub fn new() -> Self {
        let mut pool: ThreadPool = ThreadPool {
            threads: Vec::new(),
            handles: Vec::new(),
            main_cond: Arc::new(LockLatch::new()),
            thread_cond: Arc::new(LockLatch::new()),
            stop: AtomicBool::new(true),
            pondering: AtomicBool::new(false),
            stop_on_ponder_hit: AtomicBool::new(false),
        };
        pool.main_cond.lock();
        pool.thread_cond.lock();
        pool.attach_thread();
        pool
    }

    /// Spawns a new searcher thread and parks it on its condition.
    fn attach_thread(&mut self) {
        unsafe {
            let thread_ptr: SearcherPtr = self.create_thread();
            let builder = thread::Builder::new()
                .name(self.size().to_string())
                .stack_size(THREAD_OS_STACK_SIZE);

            let handle = builder
                .spawn(move || {
                    let thread = &mut **thread_ptr.ptr.get();
                    thread.cond.lock();
                    thread.idle_loop();
                })
                .unwrap();
            self.handles.push(handle);
        };
    }

    /// Heap-allocates the searcher structure for the next thread. The main
    /// thread parks on its own condition; workers share one.
    fn create_thread(&mut self) -> SearcherPtr {
        let len: usize = self.threads.len();
        let layout = Layout::new::<Searcher>();
        let cond = if len == 0 {
            self.main_cond.clone()
        } else {
            self.thread_cond.clone()
        };
        unsafe {
            let result = alloc_zeroed(layout);
            if result.is_null() {
                eprintln!("fatal: failed to allocate searcher thread {}", len);
                std::process::exit(1);
            }
            let new_ptr: *mut Searcher = result.cast();
            ptr::write(new_ptr, Searcher::new(len, cond));
            self.threads.push(UnsafeCell::new(new_ptr));
            SearcherPtr {
                ptr: UnsafeCell::new(new_ptr),
            }
        }
    }

    /// Returns the number of threads.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.threads.len()
    }

    /// Returns the main thread's searcher.
    pub fn main(&mut self) -> &mut Searcher {
        unsafe {
            let main_thread: *mut Searcher = *self.threads.get_unchecked(0).get();
            &mut *main_thread
        }
    }

    /// Returns every worker thread's searcher.
    pub fn non_main_threads(&self) -> Vec<&mut Searcher> {
        self.threads
            .iter()
            .skip(1)
            .map(|c| unsafe { &mut **c.get() })
            .collect()
    }

    /// Sets the thread count. Ignored while under 1; capped at
    /// [`MAX_THREADS`]. Unsafe to call mid-search, so the UCI layer defers it.
    ///
    /// [`MAX_THREADS`]: ../consts/constant.MAX_THREADS.html
    pub fn set_thread_count(&mut self, mut num: usize) {
        if num >= 1 {
            num = num.min(MAX_THREADS);
            self.wait_for_finish();
            self.kill_all();
            while self.size() < num {
                self.attach_thread();
            }
        }
    }

    /// Kills and de-allocates every thread, blocking until each exits.
    pub fn kill_all(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.wait_for_finish();
        let mut join_handles = Vec::with_capacity(self.size());
        unsafe {
            self.threads
                .iter()
                .map(|s| &**s.get())
                .for_each(|s: &Searcher| s.kill.store(true, Ordering::SeqCst));

            self.threads
                .iter()
                .map(|s| &**s.get())
                .for_each(|s: &Searcher| {
                    s.cond.set();
                });

            while let Some(handle) = self.handles.pop() {
                join_handles.push(handle.join());
            }

            while let Some(unc) = self.threads.pop() {
                let th: *mut Searcher = *unc.get();
                ptr::drop_in_place(th);
                let raw: NonNull<u8> = NonNull::new_unchecked(th as *mut u8);
                let layout = Layout::new::<Searcher>();
                dealloc(raw.as_ptr(), layout);
            }
        }

        while let Some(handle_result) = join_handles.pop() {
            handle_result.unwrap_or_else(|e| println!("thread failed: {:?}", e));
        }
    }

    /// Sets the cooperative stop flag.
    #[inline(always)]
    pub fn set_stop(&mut self, stop: bool) {
        self.stop.store(stop, Ordering::SeqCst);
    }

    /// Returns if the pool is currently pondering.
    #[inline(always)]
    pub fn is_pondering(&self) -> bool {
        self.pondering.load(Ordering::Relaxed)
    }

    /// Flags that the search budget ran out mid-ponder.
    #[inline(always)]
    pub fn set_stop_on_ponder_hit(&mut self, value: bool) {
        self.stop_on_ponder_hit.store(value, Ordering::Relaxed);
    }

    /// Handles `ponderhit`: the pondered move was played, so the clock
    /// adjustment applies and a spent budget stops the search outright.
    pub fn ponder_hit(&mut self) {
        crate::consts::timer().adjustment_after_ponder_hit();
        self.pondering.store(false, Ordering::Relaxed);
        if self.stop_on_ponder_hit.load(Ordering::Relaxed) {
            self.set_stop(true);
        }
    }

    /// Blocks until every thread has finished searching.
    pub fn wait_for_finish(&self) {
        self.await_search_state(true, false);
    }

    /// Blocks until every worker thread has finished searching.
    pub fn wait_for_non_main(&self) {
        self.await_search_state(false, false);
    }

    /// Blocks until the main thread has started searching.
    pub fn wait_for_main_start(&self) {
        self.threads
            .iter()
            .take(1)
            .map(|s| unsafe { &**s.get() })
            .for_each(|t: &Searcher| t.searching.wait(true));
    }

    fn await_search_state(&self, include_main: bool, searching: bool) {
        self.threads
            .iter()
            .map(|s| unsafe { &**s.get() })
            .filter(|t| include_main || t.id != 0)
            .for_each(|t: &Searcher| {
                t.searching.wait(searching);
            });
    }

    /// Clears every thread's heuristic tables, for `ucinewgame`.
    pub fn clear_all(&mut self) {
        self.threads
            .iter_mut()
            .map(|thread_ptr| unsafe { &mut **(*thread_ptr).get() })
            .for_each(|t| t.clear());
    }

    /// Starts a search. Returns immediately; the threads run until a limit
    /// trips or `stop` arrives.
    pub fn uci_search(&mut self, board: &Board, limits: &Limits) {
        // Arm the clock before anything else.
        if let Some(uci_timer) = limits.use_time_management() {
            timer().init(limits.start, &uci_timer, board.turn(), board.moves_played());
        } else {
            timer().start_timer(limits.start);
        }

        let mut root_moves: MoveList = board.generate_moves();

        // An explicit searchmoves list narrows the root.
        if !limits.search_moves.is_empty() {
            let filtered: Vec<BitMove> = root_moves
                .iter()
                .cloned()
                .filter(|m| {
                    limits.search_moves.iter().any(|s| {
                        *s == m.stringify() || *s == uci_move_string(*m)
                    })
                })
                .collect();
            if !filtered.is_empty() {
                root_moves = MoveList::from(filtered);
            }
        }

        // Tablebase root filtering, when a probe backend covers the position.
        if let Some((filtered, _score)) = syzygy::root_probe(board, &root_moves) {
            root_moves = filtered;
        }

        self.wait_for_finish();
        self.stop.store(false, Ordering::Relaxed);
        self.pondering.store(limits.ponder, Ordering::Relaxed);
        self.stop_on_ponder_hit.store(false, Ordering::Relaxed);
        tt().new_search();
        syzygy::reset_hits();

        // No legal move: mate or stalemate at the root. Answer without
        // waking any thread.
        if root_moves.is_empty() {
            self.stop.store(true, Ordering::Relaxed);
            let use_stdout = USE_STDOUT.load(Ordering::Relaxed);
            let in_check = board.in_check();
            let main = self.main();
            main.root_moves().replace(&root_moves);
            main.best_move = BitMove::null();
            main.ponder_move = BitMove::null();
            if use_stdout {
                if in_check {
                    println!("info depth 0 score mate 0");
                } else {
                    println!("info depth 0 score cp 0");
                }
                println!("bestmove 0000");
            }
            return;
        }

        // Random mode skips searching altogether.
        if engine_mode() == EngineMode::Random {
            self.stop.store(true, Ordering::Relaxed);
            let use_stdout = USE_STDOUT.load(Ordering::Relaxed);
            let choice = root_moves[rand::random::<usize>() % root_moves.len()];
            let main = self.main();
            main.root_moves().replace(&root_moves);
            main.best_move = choice;
            main.ponder_move = BitMove::null();
            if use_stdout {
                println!("bestmove {}", uci_move_string(choice));
            }
            return;
        }

        let chess960 = CHESS960.load(Ordering::Relaxed);
        for thread_ptr in self.threads.iter_mut() {
            let thread: &mut Searcher = unsafe { &mut **(*thread_ptr).get() };
            thread.nodes.store(0, Ordering::Relaxed);
            thread.tb_hits.store(0, Ordering::Relaxed);
            thread.depth_completed = 0;
            thread.selected_depth = 0;
            thread.board = board.shallow_clone();
            thread.board.set_chess960(chess960);
            thread.limit = limits.clone();
            thread.root_moves().replace(&root_moves);
            thread.root_moves().shuffle(thread.id);
        }

        self.main_cond.set();
        self.wait_for_main_start();
        self.main_cond.lock();
    }

    /// Runs a blocking search and returns the best move found.
    pub fn search(&mut self, board: &Board, limits: &Limits) -> BitMove {
        self.uci_search(board, limits);
        self.wait_for_finish();
        self.best_move()
    }

    /// Returns the best move of the last finished search.
    pub fn best_move(&mut self) -> BitMove {
        self.main().best_move
    }

    /// Returns the ponder move of the last finished search, if any.
    pub fn ponder_move(&mut self) -> BitMove {
        self.main().ponder_move
    }

    /// Total nodes searched by all threads.
    pub fn nodes(&self) -> u64 {
        self.threads
            .iter()
            .map(|s| unsafe { &**s.get() })
            .map(|s: &Searcher| s.nodes.load(Ordering::Relaxed))
            .sum()
    }

    /// Total tablebase hits by all threads.
    pub fn tb_hits(&self) -> u64 {
        self.threads
            .iter()
            .map(|s| unsafe { &**s.get() })
            .map(|s: &Searcher| s.tb_hits.load(Ordering::Relaxed))
            .sum()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.kill_all();
    }
}
