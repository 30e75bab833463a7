//! The classical evaluation: material and piece-square scores maintained
//! incrementally by the board, plus a handful of positional terms computed
//! here. Returned from the side to move's perspective, in the same internal
//! units as the piece values in `core::score`.
//!
//! The engine uses this as the fallback when no NNUE network is available.

use crate::core::bitboard::BitBoard;
use crate::core::masks::*;
use crate::core::mono_traits::*;
use crate::core::score::*;
use crate::core::sq::SQ;
use crate::core::{PieceType, Player, Rank};
use crate::helper::prelude::*;
use crate::Board;

/// Bonus for moving second to nowhere in particular.
const TEMPO: Value = 17;

const BISHOP_PAIR: Score = Score(48, 65);
const PAWN_DOUBLED: Score = Score(11, 35);
const PAWN_ISOLATED: Score = Score(10, 22);
const ROOK_OPEN_FILE: Score = Score(43, 21);
const ROOK_SEMI_OPEN_FILE: Score = Score(19, 10);
const KING_PAWN_SHIELD: Score = Score(9, 0);
const PINNED_PIECE: Score = Score(14, 8);

/// Passed-pawn bonus by relative rank.
const PAWN_PASSED: [Score; RANK_CNT] = [
    Score(0, 0),
    Score(5, 12),
    Score(9, 19),
    Score(25, 41),
    Score(54, 80),
    Score(118, 152),
    Score(210, 262),
    Score(0, 0),
];

/// Mobility bonus per reachable square, by piece type.
const MOBILITY: [Score; PIECE_TYPE_CNT] = [
    Score(0, 0),
    Score(0, 0), // king
    Score(0, 0), // pawn
    Score(7, 7), // knight
    Score(6, 6), // bishop
    Score(4, 6), // rook
    Score(2, 5), // queen
    Score(0, 0),
];

// Phase interpolation bounds on non-pawn material.
const MIDGAME_LIMIT: Value = 2 * (2 * KNIGHT_MG + 2 * BISHOP_MG + 2 * ROOK_MG + QUEEN_MG) - 2000;
const ENDGAME_LIMIT: Value = 2 * ROOK_MG;

/// The full classical evaluation of a board.
pub struct Eval;

impl Eval {
    /// Evaluates the board from the side to move's perspective.
    pub fn evaluate(board: &Board) -> Value {
        let mut score: Score = board.psq();
        score += eval_player::<WhiteType>(board) - eval_player::<BlackType>(board);

        let v = interpolate(board, score);
        let v = match board.turn() {
            Player::White => v,
            Player::Black => -v,
        };
        v + TEMPO
    }
}

/// Interpolates a tapered score by the remaining non-pawn material.
fn interpolate(board: &Board, score: Score) -> Value {
    let npm = board
        .non_pawn_material_all()
        .max(ENDGAME_LIMIT)
        .min(MIDGAME_LIMIT);
    let phase = ((npm - ENDGAME_LIMIT) * 128) / (MIDGAME_LIMIT - ENDGAME_LIMIT);
    (score.mg() * phase + score.eg() * (128 - phase)) / 128
}

fn eval_player<P: PlayerTrait>(board: &Board) -> Score {
    eval_pawns::<P>(board)
        + eval_pieces::<P>(board)
        + eval_king::<P>(board)
        + eval_threats::<P>(board)
}

fn eval_pawns<P: PlayerTrait>(board: &Board) -> Score {
    let us = P::player();
    let them = P::opp_player();
    let mut score = Score::ZERO;

    let our_pawns: BitBoard = board.piece_bb(us, PieceType::P);
    let their_pawns: BitBoard = board.piece_bb(them, PieceType::P);

    let mut bb = our_pawns;
    while let Some(sq) = bb.pop_some_lsb() {
        // Doubled: another friendly pawn directly ahead on the file.
        if (forward_file_bb(us, sq) & our_pawns).is_not_empty() {
            score -= PAWN_DOUBLED;
        }
        // Isolated: no friendly pawn on an adjacent file.
        if (adjacent_sq_file(sq) & our_pawns).is_empty() {
            score -= PAWN_ISOLATED;
        }
        // Passed: no enemy pawn can ever stop it.
        if (passed_pawn_mask(us, sq) & their_pawns).is_empty() {
            score += PAWN_PASSED[us.relative_rank_of_sq(sq) as usize];
        }
    }

    score
}

fn eval_pieces<P: PlayerTrait>(board: &Board) -> Score {
    let us = P::player();
    let mut score = Score::ZERO;
    let occ = board.occupied();
    let us_occ = board.get_occupied_player(us);
    let all_pawns = board.piece_bb_both_players(PieceType::P);

    if board.count_piece(us, PieceType::B) > 1 {
        score += BISHOP_PAIR;
    }

    for pt in &[PieceType::N, PieceType::B, PieceType::R, PieceType::Q] {
        let mut bb = board.piece_bb(us, *pt);
        while let Some(sq) = bb.pop_some_lsb() {
            let attacks = attack_bb(*pt, sq, occ) & !us_occ;
            let mob = attacks.count_bits() as Value;
            let bonus = MOBILITY[*pt as usize];
            score += Score(bonus.mg() * mob, bonus.eg() * mob);

            if *pt == PieceType::R {
                let file = sq.file_bb();
                if (file & all_pawns).is_empty() {
                    score += ROOK_OPEN_FILE;
                } else if (file & board.piece_bb(us, PieceType::P)).is_empty() {
                    score += ROOK_SEMI_OPEN_FILE;
                }
            }
        }
    }

    score
}

fn eval_king<P: PlayerTrait>(board: &Board) -> Score {
    let us = P::player();
    let ksq = board.king_sq(us);
    let mut score = Score::ZERO;

    // A screen of friendly pawns near the king, while material remains.
    let shield = (king_zone(ksq) & board.piece_bb(us, PieceType::P)).count_bits() as Value;
    score += Score(KING_PAWN_SHIELD.mg() * shield, 0);

    // Keep the king out of the center before the endgame.
    if us.relative_rank_of_sq(ksq) > Rank::R2 {
        score -= Score(25, 0);
    }

    score
}

fn eval_threats<P: PlayerTrait>(board: &Board) -> Score {
    let us = P::player();
    let pinned = (board.all_pinned_pieces(us) & board.get_occupied_player(us)).count_bits();
    -Score(
        PINNED_PIECE.mg() * pinned as Value,
        PINNED_PIECE.eg() * pinned as Value,
    )
}

/// Converts an internal evaluation to centipawns for reporting.
#[inline]
pub fn to_centipawns(v: Value) -> Value {
    v * 100 / PAWN_EG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pos_roughly_balanced() {
        let board = Board::start_pos();
        let v = Eval::evaluate(&board);
        // White to move holds only the tempo plus symmetric noise.
        assert!(v.abs() < 100, "start pos eval: {}", v);
    }

    #[test]
    fn symmetric_perspective() {
        let white = Board::from_fen("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1").unwrap();
        let black = Board::from_fen("4k3/ppp5/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(Eval::evaluate(&white), Eval::evaluate(&black));
    }

    #[test]
    fn material_up_is_positive() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/QQQQK3 w - - 0 1").unwrap();
        assert!(Eval::evaluate(&board) > QUEEN_MG);
    }

    #[test]
    fn sq_color_helper() {
        assert!(SQ::A1.on_dark_square());
        assert!(SQ::H1.on_light_square());
    }
}
