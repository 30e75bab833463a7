//! Constant values, global structures, and the compile-time search traits.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicI64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Once;

use sable::tools::tt::TranspositionTable;

use crate::time::time_management::TimeManager;

/// Search depths are measured in eighths of a ply, leaving room for
/// fractional extensions and reductions.
pub type Depth = i16;

/// One ply of search depth, in internal units.
pub const ONE_PLY: Depth = 8;

/// The deepest ply the search may reach.
pub const MAX_PLY: u16 = 126;

/// Frames in a per-thread search stack: every ply, plus guard frames so that
/// reading up to four plies behind the first one needs no bounds check.
pub const THREAD_STACK_SIZE: usize = MAX_PLY as usize + 7;

/// The most searcher threads the pool will spawn.
pub const MAX_THREADS: usize = 256;

/// Transposition table size at startup, in megabytes.
pub const DEFAULT_TT_SIZE: usize = 64;

static INITIALIZED: Once = Once::new();

static mut TT_TABLE: Option<TranspositionTable> = None;
static mut TIMER: Option<TimeManager> = None;

/// Whether search output is written to stdout.
pub static USE_STDOUT: AtomicBool = AtomicBool::new(true);

/// Draw bias in internal evaluation units, from the engine's perspective.
pub static CONTEMPT: AtomicI32 = AtomicI32::new(0);

/// Number of principal variations to report.
pub static MULTI_PV: AtomicUsize = AtomicUsize::new(1);

/// Chess960 mode, affecting castle move translation only.
pub static CHESS960: AtomicBool = AtomicBool::new(false);

/// Whether pondering is enabled via UCI option.
pub static PONDER_ENABLED: AtomicBool = AtomicBool::new(false);

/// Milliseconds subtracted per move for I/O latency.
pub static MOVE_OVERHEAD: AtomicI64 = AtomicI64::new(50);

/// Floor on the per-move time budget, in milliseconds.
pub static MINIMUM_TIME: AtomicI64 = AtomicI64::new(1);

/// The evaluator behind the search: the network evaluation with its
/// classical fallback, or uniformly random move selection.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum EngineMode {
    Nnue = 0,
    Random = 1,
}

static ENGINE_MODE: AtomicU8 = AtomicU8::new(EngineMode::Nnue as u8);

/// Sets the engine mode.
pub fn set_engine_mode(mode: EngineMode) {
    ENGINE_MODE.store(mode as u8, Ordering::Relaxed);
}

/// Returns the current engine mode.
pub fn engine_mode() -> EngineMode {
    match ENGINE_MODE.load(Ordering::Relaxed) {
        1 => EngineMode::Random,
        _ => EngineMode::Nnue,
    }
}

/// Initializes the global structures. Only ever runs once.
pub fn init_globals() {
    INITIALIZED.call_once(|| unsafe {
        sable::helper::prelude::init_statics();
        crate::search::init();
        TT_TABLE = Some(TranspositionTable::new(DEFAULT_TT_SIZE));
        TIMER = Some(TimeManager::uninitialized());
        crate::threadpool::init_threadpool();
    });
}

/// Returns access to the shared transposition table.
///
/// The table hands out entries through shared references; writes race by
/// design and are caught by key verification on read.
#[inline(always)]
pub fn tt() -> &'static mut TranspositionTable {
    unsafe { TT_TABLE.as_mut().unwrap() }
}

/// Returns access to the global time manager. Only the main thread writes
/// to it.
#[inline(always)]
pub fn timer() -> &'static TimeManager {
    unsafe { TIMER.as_ref().unwrap() }
}

/// Compile-time marker for whether a node is on the principal variation.
pub trait PVNode {
    fn is_pv() -> bool;
}

pub struct PV {}
pub struct NonPV {}

impl PVNode for PV {
    #[inline(always)]
    fn is_pv() -> bool {
        true
    }
}

impl PVNode for NonPV {
    #[inline(always)]
    fn is_pv() -> bool {
        false
    }
}

/// Compile-time marker for whether quiescence runs from a position in check.
pub trait CheckState {
    fn in_check() -> bool;
}

pub struct InCheck {}
pub struct NoCheck {}

impl CheckState for InCheck {
    #[inline(always)]
    fn in_check() -> bool {
        true
    }
}

impl CheckState for NoCheck {
    #[inline(always)]
    fn in_check() -> bool {
        false
    }
}
