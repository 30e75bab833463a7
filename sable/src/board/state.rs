//! Per-ply state of the `Board` that is cheaper to save and restore than to
//! recompute.
//!
//! The board keeps a [`StateInfo`] for every ply of the current line in a
//! plain growable stack. `make_move` pushes a frame (copying forward the
//! fields that evolve incrementally), `unmake_move` pops it. The frames form
//! the history walked by repetition detection.
//!
//! [`StateInfo`]: struct.StateInfo.html

use super::castle_rights::Castling;

use crate::core::bitboard::BitBoard;
use crate::core::masks::*;
use crate::core::piece_move::BitMove;
use crate::core::score::{Score, Value};
use crate::core::sq::{NO_SQ, SQ};
use crate::core::PieceType;

/// The state of the board after a particular move was made, holding
/// everything that would otherwise need recomputation on unmake.
#[derive(Clone)]
pub struct StateInfo {
    // Copied forward from the previous state and then modified.
    /// The castling rights.
    pub castling: Castling,
    /// Halfmoves since the last capture or pawn move.
    pub rule_50: i16,
    /// Plies since a null move was played; bounds repetition walks.
    pub plies_from_null: i16,
    /// The en-passant target square, `NO_SQ` if none. Only set if the last
    /// move was a double pawn push and an enemy pawn attacks this square.
    pub ep_square: SQ,
    /// Incrementally maintained piece-square score of the board.
    pub psq: Score,
    /// Sum of material values per player, pawns excluded.
    pub nonpawn_material: [Value; PLAYER_CNT],

    // Recomputed after every move.
    /// The zobrist key of the position.
    pub zobrist: u64,
    /// The zobrist key of the pawn configuration only.
    pub pawn_key: u64,
    /// The zobrist key of the material configuration only.
    pub material_key: u64,
    /// Key of the bishop placement by square color.
    pub bishop_color_key: u64,
    /// The type of piece the last move captured, if any.
    pub captured_piece: PieceType,
    /// The type of piece the last move moved.
    pub moved_piece: PieceType,
    /// The move that produced this state, `BitMove::null()` at the root and
    /// `NULL_MOVE` after a null move.
    pub prev_move: BitMove,
    /// Pieces currently giving check to the side to move.
    pub checkers_bb: BitBoard,
    /// Per player, pieces blocking an attack on that player's king. Can hold
    /// pieces of either color.
    pub blockers_king: [BitBoard; PLAYER_CNT],
    /// Per player, the sliders pinning something against that player's king.
    pub pinners_king: [BitBoard; PLAYER_CNT],
    /// Per piece type, the squares from which that piece would check the
    /// enemy king.
    pub check_sqs: [BitBoard; PIECE_TYPE_CNT],
    /// Set when this position already occurred earlier in the line.
    pub repetition: bool,
}

impl StateInfo {
    /// State for the standard starting position.
    pub const fn start() -> StateInfo {
        StateInfo {
            castling: Castling::all_castling(),
            rule_50: 0,
            plies_from_null: 0,
            ep_square: NO_SQ,
            psq: Score::ZERO,
            nonpawn_material: [0; PLAYER_CNT],
            zobrist: 0,
            pawn_key: 0,
            material_key: 0,
            bishop_color_key: 0,
            captured_piece: PieceType::None,
            moved_piece: PieceType::None,
            prev_move: BitMove::null(),
            checkers_bb: BitBoard(0),
            blockers_king: [BitBoard(0); PLAYER_CNT],
            pinners_king: [BitBoard(0); PLAYER_CNT],
            check_sqs: [BitBoard(0); PIECE_TYPE_CNT],
            repetition: false,
        }
    }

    /// A fully blank state.
    pub const fn blank() -> StateInfo {
        StateInfo {
            castling: Castling::empty_set(),
            rule_50: 0,
            plies_from_null: 0,
            ep_square: NO_SQ,
            psq: Score::ZERO,
            nonpawn_material: [0; PLAYER_CNT],
            zobrist: 0,
            pawn_key: 0,
            material_key: 0,
            bishop_color_key: 0,
            captured_piece: PieceType::None,
            moved_piece: PieceType::None,
            prev_move: BitMove::null(),
            checkers_bb: BitBoard(0),
            blockers_king: [BitBoard(0); PLAYER_CNT],
            pinners_king: [BitBoard(0); PLAYER_CNT],
            check_sqs: [BitBoard(0); PIECE_TYPE_CNT],
            repetition: false,
        }
    }

    /// Copies the incrementally evolving prefix of this state into a new
    /// frame. The recomputed fields start out cleared.
    pub fn partial_clone(&self) -> StateInfo {
        StateInfo {
            castling: self.castling,
            rule_50: self.rule_50,
            plies_from_null: self.plies_from_null,
            ep_square: self.ep_square,
            psq: self.psq,
            nonpawn_material: self.nonpawn_material,
            zobrist: self.zobrist,
            pawn_key: self.pawn_key,
            material_key: self.material_key,
            bishop_color_key: self.bishop_color_key,
            captured_piece: PieceType::None,
            moved_piece: PieceType::None,
            prev_move: BitMove::null(),
            checkers_bb: BitBoard(0),
            blockers_king: [BitBoard(0); PLAYER_CNT],
            pinners_king: [BitBoard(0); PLAYER_CNT],
            check_sqs: [BitBoard(0); PIECE_TYPE_CNT],
            repetition: false,
        }
    }
}

impl PartialEq for StateInfo {
    fn eq(&self, other: &StateInfo) -> bool {
        self.castling == other.castling
            && self.rule_50 == other.rule_50
            && self.ep_square == other.ep_square
            && self.zobrist == other.zobrist
            && self.pawn_key == other.pawn_key
            && self.material_key == other.material_key
            && self.captured_piece == other.captured_piece
            && self.checkers_bb == other.checkers_bb
            && self.blockers_king == other.blockers_king
            && self.pinners_king == other.pinners_king
            && self.check_sqs == other.check_sqs
    }
}
