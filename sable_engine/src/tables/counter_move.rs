//! Counter moves: the move that last refuted a particular (piece, to), and
//! the follow-up variant keyed on the refuted move's own predecessor.

use std::mem;
use std::ops::{Index, IndexMut};

use sable::core::masks::*;
use sable::{BitMove, Piece, PieceType, SQ};

use super::StatBoard;

/// Index by the previous move's (piece, to).
type CmIdx = (Piece, SQ);

/// Stores the refutation move seen for each (piece, to) of the previous move.
pub struct CounterMoves {
    a: [[BitMove; SQ_CNT]; PIECE_CNT],
}

impl Index<CmIdx> for CounterMoves {
    type Output = BitMove;

    #[inline(always)]
    fn index(&self, idx: CmIdx) -> &Self::Output {
        unsafe {
            self.a
                .get_unchecked(idx.0 as usize)
                .get_unchecked((idx.1).0 as usize)
        }
    }
}

impl IndexMut<CmIdx> for CounterMoves {
    #[inline(always)]
    fn index_mut(&mut self, idx: CmIdx) -> &mut Self::Output {
        unsafe {
            self.a
                .get_unchecked_mut(idx.0 as usize)
                .get_unchecked_mut((idx.1).0 as usize)
        }
    }
}

impl StatBoard<BitMove, CmIdx> for CounterMoves {
    const FILL: BitMove = BitMove::null();

    fn clear(&mut self) {
        self.a = [[Self::FILL; SQ_CNT]; PIECE_CNT];
    }
}

/// Index by (two-plies-ago piece, its to, previous piece type, its to): the
/// fallback refutation when the plain counter move is missing or unusable.
type CfIdx = (Piece, SQ, PieceType, SQ);

/// Counter-followup moves, the deeper variant of [`CounterMoves`].
///
/// [`CounterMoves`]: struct.CounterMoves.html
pub struct CounterFollowupMoves {
    a: [[[[BitMove; SQ_CNT]; PIECE_TYPE_CNT]; SQ_CNT]; PIECE_CNT],
}

impl CounterFollowupMoves {
    pub fn new() -> Self {
        unsafe { mem::zeroed() }
    }

    pub fn clear(&mut self) {
        *self = unsafe { mem::zeroed() };
    }
}

impl Index<CfIdx> for CounterFollowupMoves {
    type Output = BitMove;

    #[inline(always)]
    fn index(&self, idx: CfIdx) -> &Self::Output {
        unsafe {
            self.a
                .get_unchecked(idx.0 as usize)
                .get_unchecked((idx.1).0 as usize)
                .get_unchecked(idx.2 as usize)
                .get_unchecked((idx.3).0 as usize)
        }
    }
}

impl IndexMut<CfIdx> for CounterFollowupMoves {
    #[inline(always)]
    fn index_mut(&mut self, idx: CfIdx) -> &mut Self::Output {
        unsafe {
            self.a
                .get_unchecked_mut(idx.0 as usize)
                .get_unchecked_mut((idx.1).0 as usize)
                .get_unchecked_mut(idx.2 as usize)
                .get_unchecked_mut((idx.3).0 as usize)
        }
    }
}
