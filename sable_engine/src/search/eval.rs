//! The evaluation hook the search calls. Dispatches to the network
//! evaluation when one is loaded, falling back to the classical evaluation
//! otherwise.

use sable::core::score::Value;
use sable::tools::eval::{to_centipawns, Eval};
use sable::Board;

use crate::nnue;

pub struct Evaluation {}

impl Evaluation {
    /// Evaluates a board from the side to move's perspective, in internal
    /// units.
    #[inline(always)]
    pub fn evaluate(board: &Board) -> Value {
        if nnue::network_loaded() {
            nnue::evaluate(board)
        } else {
            Eval::evaluate(board)
        }
    }

    /// Prints the static evaluation of a board, for the `eval` command.
    pub fn trace(board: &Board) {
        let v = Evaluation::evaluate(board);
        println!(
            "info string static eval {} cp ({} internal, {} to move)",
            to_centipawns(v),
            v,
            board.turn()
        );
    }
}
