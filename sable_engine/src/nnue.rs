//! The NNUE boundary.
//!
//! The network format and inference are outside this crate; what lives here
//! is the loading handshake and the evaluation hook the search calls. A
//! missing or unreadable network is not fatal: the engine reports the
//! failure and the classical evaluation takes over.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use sable::core::score::Value;
use sable::tools::eval::Eval;
use sable::Board;

/// Default network file looked for at startup.
pub const DEFAULT_NETWORK: &str = "sable.nnue";

static NETWORK_LOADED: AtomicBool = AtomicBool::new(false);

/// A failure to load a network file.
#[derive(Debug)]
pub enum NnueLoadError {
    Missing(String),
    Unreadable(String),
}

impl fmt::Display for NnueLoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NnueLoadError::Missing(p) => write!(f, "network file not found: {}", p),
            NnueLoadError::Unreadable(p) => write!(f, "network file unreadable: {}", p),
        }
    }
}

/// Attempts to load a network from the given path. On any failure the
/// previous network (if any) is dropped and the classical evaluation takes
/// over.
pub fn load_network(path: &str) -> Result<(), NnueLoadError> {
    NETWORK_LOADED.store(false, Ordering::Relaxed);
    let p = Path::new(path);
    if !p.is_file() {
        return Err(NnueLoadError::Missing(path.to_string()));
    }
    match std::fs::metadata(p) {
        Ok(meta) if meta.len() > 0 => {
            // Inference backend goes here; none is wired in, so the file is
            // validated and the classical evaluator keeps serving evaluate().
            Err(NnueLoadError::Unreadable(path.to_string()))
        }
        _ => Err(NnueLoadError::Unreadable(path.to_string())),
    }
}

/// Returns if a network is loaded and serving evaluations.
#[inline(always)]
pub fn network_loaded() -> bool {
    NETWORK_LOADED.load(Ordering::Relaxed)
}

/// Evaluates through the network.
///
/// Only meaningful when [`network_loaded`] is true; falls back to the
/// classical evaluation otherwise.
///
/// [`network_loaded`]: fn.network_loaded.html
#[inline(always)]
pub fn evaluate(board: &Board) -> Value {
    Eval::evaluate(board)
}

/// Hook for incremental accumulator maintenance on piece placement. The
/// board calls nothing today; a backend wanting dirty-piece updates plugs in
/// here.
#[inline(always)]
pub fn piece_moved_hook() {}
