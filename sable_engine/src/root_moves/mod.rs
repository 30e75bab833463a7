//! The moves available at the root of the search, with the bookkeeping each
//! carries between iterations.

pub mod root_moves_list;

use std::cmp::Ordering as CmpOrder;

use sable::core::score::*;
use sable::BitMove;

/// One legal root move and what the search has learned about it so far.
#[derive(Clone)]
pub struct RootMove {
    pub bit_move: BitMove,
    pub score: Value,
    pub prev_score: Value,
    pub depth_reached: i16,
    /// The principal variation found behind this move, the move itself first.
    pub pv: Vec<BitMove>,
}

impl RootMove {
    /// Creates a new `RootMove`.
    #[inline]
    pub fn new(bit_move: BitMove) -> Self {
        RootMove {
            bit_move,
            score: NEG_INFINITE,
            prev_score: NEG_INFINITE,
            depth_reached: 0,
            pv: vec![bit_move],
        }
    }

    /// Shifts the current score into the previous-score slot.
    #[inline]
    pub fn rollback(&mut self) {
        self.prev_score = self.score;
    }

    /// Inserts a score found at a depth.
    #[inline]
    pub fn insert(&mut self, score: Value, depth: i16) {
        self.score = score;
        self.depth_reached = depth;
    }

    /// The move to ponder on, if a reply is known.
    #[inline]
    pub fn ponder_move(&self) -> Option<BitMove> {
        self.pv.get(1).cloned()
    }
}

// Better score first; ties broken by the previous iteration's score.
impl Ord for RootMove {
    #[inline]
    fn cmp(&self, other: &RootMove) -> CmpOrder {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.prev_score.cmp(&self.prev_score))
    }
}

impl PartialOrd for RootMove {
    fn partial_cmp(&self, other: &RootMove) -> Option<CmpOrder> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RootMove {
    fn eq(&self, other: &RootMove) -> bool {
        self.score == other.score && self.prev_score == other.prev_score
    }
}

impl Eq for RootMove {}
