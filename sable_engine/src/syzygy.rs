//! The Syzygy tablebase boundary.
//!
//! Probing itself is an external concern; this module owns the
//! configuration, the gating logic the search consults, and the probe entry
//! points. Without a probing backend wired in, every probe reports a miss,
//! which the search treats exactly like an absent tablebase.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::Mutex;

use sable::core::score::Value;
use sable::{Board, MoveList};

static ENABLED: AtomicBool = AtomicBool::new(false);
static PROBE_DEPTH: AtomicI32 = AtomicI32::new(1);
static PROBE_LIMIT: AtomicI32 = AtomicI32::new(6);
static USE_50_MOVE_RULE: AtomicBool = AtomicBool::new(true);
static TB_HITS: AtomicU64 = AtomicU64::new(0);

lazy_static! {
    static ref TB_PATH: Mutex<String> = Mutex::new(String::new());
}

/// Points the probing code at a tablebase directory. A bad path disables
/// probing with a warning rather than failing the engine.
pub fn set_path(path: &str) {
    let usable = !path.is_empty() && path != "<empty>" && Path::new(path).is_dir();
    if usable {
        *TB_PATH.lock().unwrap() = path.to_string();
        ENABLED.store(true, Ordering::Relaxed);
    } else {
        ENABLED.store(false, Ordering::Relaxed);
        if !path.is_empty() && path != "<empty>" {
            println!("info string tablebases disabled: path {} not usable", path);
        }
    }
}

pub fn set_probe_depth(depth: i32) {
    PROBE_DEPTH.store(depth, Ordering::Relaxed);
}

pub fn set_probe_limit(limit: i32) {
    PROBE_LIMIT.store(limit, Ordering::Relaxed);
}

pub fn set_use_50_move_rule(use_rule: bool) {
    USE_50_MOVE_RULE.store(use_rule, Ordering::Relaxed);
}

/// Returns if probing is configured and enabled.
#[inline(always)]
pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Returns the most pieces a position may have to be probed.
#[inline(always)]
pub fn probe_limit() -> i32 {
    PROBE_LIMIT.load(Ordering::Relaxed)
}

/// Returns the minimum search depth, in plies, to probe at.
#[inline(always)]
pub fn probe_depth() -> i32 {
    PROBE_DEPTH.load(Ordering::Relaxed)
}

/// Returns the number of successful probes this search.
#[inline(always)]
pub fn tb_hits() -> u64 {
    TB_HITS.load(Ordering::Relaxed)
}

/// Resets the per-search hit counter.
pub fn reset_hits() {
    TB_HITS.store(0, Ordering::Relaxed);
}

/// Returns if the position qualifies for a probe at all: few enough pieces
/// and no castling rights remaining.
pub fn can_probe(board: &Board) -> bool {
    enabled()
        && board.count_all_pieces() as i32 <= probe_limit()
        && board.player_can_castle(sable::Player::White).is_empty()
        && board.player_can_castle(sable::Player::Black).is_empty()
}

/// Win/draw/loss probe. `None` means no table covered the position.
pub fn probe_wdl(board: &Board) -> Option<Value> {
    if !can_probe(board) {
        return None;
    }
    // Backend hook; a hit must also bump TB_HITS.
    None
}

/// Distance-to-zero probe. `None` means no table covered the position.
pub fn probe_dtz(board: &Board) -> Option<i32> {
    if !can_probe(board) {
        return None;
    }
    None
}

/// Filters the root move list down to tablebase-preserving moves, returning
/// the filtered list and the canonical score. `None` leaves the root list
/// untouched.
pub fn root_probe(board: &Board, _moves: &MoveList) -> Option<(MoveList, Value)> {
    if !can_probe(board) {
        return None;
    }
    None
}
