//! Move generation for a `Board`, producing either `Legal` or `PseudoLegal`
//! moves of a chosen [`GenTypes`] class.
//!
//! Pseudo-legal generation is roughly twice as fast as legal generation; a
//! pseudo-legal move must pass [`Board::legal_move`] before being applied.
//! The staged move picker in the engine relies on that split, filtering
//! legality only for the moves it actually tries.
//!
//! `QuietChecks`, `NonEvasions`, `PawnAdvances`, `QueenChecks`, and
//! `CastleOnly` may only be requested while not in check; `Evasions` only
//! while in check.
//!
//! [`GenTypes`]: ../../core/enum.GenTypes.html
//! [`Board::legal_move`]: ../struct.Board.html#method.legal_move

use super::Board;

use crate::core::bitboard::BitBoard;
use crate::core::mono_traits::*;
use crate::core::move_list::{MoveList, ScoringMoveList};
use crate::core::piece_move::BitMove;
use crate::core::sq::{NO_SQ, SQ};
use crate::core::{CastleType, GenTypes, PieceType, Player, Rank};
use crate::helper::prelude::{
    aligned, between_bb, bishop_moves, king_moves, knight_moves, line_bb, pawn_attacks_from,
    queen_moves, rook_moves,
};

/// Determines whether the generated moves are filtered for legality on the
/// fly (`Legal`) or left for the caller to check (`PseudoLegal`).
pub trait Legality {
    /// Returns if only legal moves should be generated.
    fn gen_legal() -> bool;
}

/// Dummy struct for generating only legal moves.
pub struct Legal {}

/// Dummy struct for generating pseudo-legal moves.
pub struct PseudoLegal {}

impl Legality for Legal {
    #[inline(always)]
    fn gen_legal() -> bool {
        true
    }
}

impl Legality for PseudoLegal {
    #[inline(always)]
    fn gen_legal() -> bool {
        false
    }
}

/// A sink the generator can push moves into.
pub trait MVPushable {
    /// Appends a move to the container.
    fn push_mv(&mut self, mv: BitMove);
}

impl MVPushable for MoveList {
    #[inline(always)]
    fn push_mv(&mut self, mv: BitMove) {
        self.push(mv);
    }
}

impl MVPushable for ScoringMoveList {
    #[inline(always)]
    fn push_mv(&mut self, mv: BitMove) {
        self.push(mv);
    }
}

/// Public interface to the move generator.
pub struct MoveGen {}

impl MoveGen {
    /// Returns a `MoveList` of moves for the given legality & generation class.
    #[inline]
    pub fn generate<L: Legality, G: GenTypeTrait>(chessboard: &Board) -> MoveList {
        let mut movelist = MoveList::default();
        InnerMoveGen::<MoveList>::generate::<L, G>(chessboard, &mut movelist);
        movelist
    }

    /// Returns a `ScoringMoveList` of moves for the given legality &
    /// generation class.
    #[inline]
    pub fn generate_scoring<L: Legality, G: GenTypeTrait>(chessboard: &Board) -> ScoringMoveList {
        let mut movelist = ScoringMoveList::default();
        InnerMoveGen::<ScoringMoveList>::generate::<L, G>(chessboard, &mut movelist);
        movelist
    }

    /// Extends an existing list with moves of the given legality & class.
    #[inline]
    pub fn extend<L: Legality, G: GenTypeTrait, MP: MVPushable>(
        chessboard: &Board,
        movelist: &mut MP,
    ) {
        InnerMoveGen::<MP>::generate::<L, G>(chessboard, movelist);
    }
}

/// The generator itself, holding the occupancy views it keeps re-using.
struct InnerMoveGen<'a, MP: MVPushable + 'a> {
    movelist: &'a mut MP,
    board: &'a Board,
    occ: BitBoard,      // all pieces
    us_occ: BitBoard,   // pieces of the side to move
    them_occ: BitBoard, // pieces of the opponent
}

impl<'a, MP: MVPushable> InnerMoveGen<'a, MP> {
    #[inline(always)]
    fn generate<L: Legality, G: GenTypeTrait>(chessboard: &'a Board, movelist: &'a mut MP) {
        match chessboard.turn() {
            Player::White => {
                InnerMoveGen::<MP>::generate_helper::<L, G, WhiteType>(chessboard, movelist)
            }
            Player::Black => {
                InnerMoveGen::<MP>::generate_helper::<L, G, BlackType>(chessboard, movelist)
            }
        }
    }

    #[inline(always)]
    fn get_self(chessboard: &'a Board, movelist: &'a mut MP) -> Self {
        InnerMoveGen {
            movelist,
            board: chessboard,
            occ: chessboard.occupied(),
            us_occ: chessboard.get_occupied_player(chessboard.turn()),
            them_occ: chessboard.get_occupied_player(chessboard.turn().other_player()),
        }
    }

    fn generate_helper<L: Legality, G: GenTypeTrait, P: PlayerTrait>(
        chessboard: &'a Board,
        movelist: &'a mut MP,
    ) {
        let mut movegen = InnerMoveGen::<MP>::get_self(chessboard, movelist);
        let gen_type = G::gen_type();
        match gen_type {
            GenTypes::Evasions => movegen.generate_evasions::<L, P>(),
            GenTypes::QuietChecks => movegen.generate_quiet_checks::<L, P>(),
            GenTypes::PawnAdvances => movegen.generate_pawn_advances::<L, P>(),
            GenTypes::QueenChecks => movegen.generate_queen_checks::<L, P>(),
            GenTypes::CastleOnly => movegen.generate_castling::<L, P>(),
            GenTypes::All => {
                if movegen.board.in_check() {
                    movegen.generate_evasions::<L, P>();
                } else {
                    movegen.generate_non_evasions::<L, NonEvasionsGenType, P>();
                }
            }
            _ => movegen.generate_non_evasions::<L, G, P>(),
        }
    }

    /// Generates moves for a board not in check.
    fn generate_non_evasions<L: Legality, G: GenTypeTrait, P: PlayerTrait>(&mut self) {
        debug_assert_ne!(G::gen_type(), GenTypes::All);
        debug_assert_ne!(G::gen_type(), GenTypes::QuietChecks);
        debug_assert_ne!(G::gen_type(), GenTypes::Evasions);
        debug_assert!(!self.board.in_check());

        // The squares the generator aims for.
        let target: BitBoard = match G::gen_type() {
            GenTypes::NonEvasions => !self.us_occ,
            GenTypes::Captures => self.them_occ,
            GenTypes::Quiets => !(self.us_occ | self.them_occ),
            _ => unreachable!(),
        };

        self.generate_all::<L, G, P>(target);
    }

    /// Generates moves of a certain class for each piece kind; the target is
    /// the set of squares moves may land on.
    fn generate_all<L: Legality, G: GenTypeTrait, P: PlayerTrait>(&mut self, target: BitBoard) {
        self.generate_pawn_moves::<L, G, P>(target);
        self.moves_per_piece::<L, G, P, KnightType>(target);
        self.moves_per_piece::<L, G, P, BishopType>(target);
        self.moves_per_piece::<L, G, P, RookType>(target);
        self.moves_per_piece::<L, G, P, QueenType>(target);

        if G::gen_type() != GenTypes::QuietChecks && G::gen_type() != GenTypes::Evasions {
            self.moves_per_piece::<L, G, P, KingType>(target);
        }

        if G::gen_type() != GenTypes::Captures
            && G::gen_type() != GenTypes::Evasions
            && (self.board.can_castle(P::player(), CastleType::KingSide)
                || self.board.can_castle(P::player(), CastleType::QueenSide))
        {
            self.generate_castling::<L, P>();
        }
    }

    /// Generates quiet moves giving check, by discovery or directly.
    fn generate_quiet_checks<L: Legality, P: PlayerTrait>(&mut self) {
        debug_assert!(!self.board.in_check());
        let mut disc_check: BitBoard = self.board.discovered_check_candidates();
        let target: BitBoard = !self.occ;

        // Any quiet move of a discovered-check candidate checks, as long as
        // the piece leaves the king line.
        let opp_ksq: SQ = self.board.king_sq(self.board.turn().other_player());
        while let Some(from) = disc_check.pop_some_lsb() {
            let piece: PieceType = self.board.piece_at_sq(from).type_of();
            if piece != PieceType::P {
                let mut b: BitBoard = self.moves_bb(piece, from) & target;
                while let Some(dst) = b.pop_some_lsb() {
                    if !aligned(from, dst, opp_ksq) {
                        self.check_and_add::<L>(BitMove::make_normal(from, dst));
                    }
                }
            }
        }
        self.generate_all::<L, QuietChecksGenType, P>(target);
    }

    /// Generates moves out of check: king steps, blocks, and captures of the
    /// checker.
    fn generate_evasions<L: Legality, P: PlayerTrait>(&mut self) {
        debug_assert!(self.board.in_check());

        let ksq: SQ = self.board.king_sq(P::player());
        let mut slider_attacks = BitBoard(0);

        // Squares swept by checking sliders stay off-limits to the king even
        // after it steps off them.
        let mut sliders: BitBoard = self.board.checkers()
            & !self
                .board
                .piece_two_bb_both_players(PieceType::P, PieceType::N);

        while let Some((check_sq, check_sq_bb)) = sliders.pop_some_lsb_and_bit() {
            slider_attacks |= line_bb(check_sq, ksq) ^ check_sq_bb;
        }

        let mut k_moves: BitBoard = king_moves(ksq) & !slider_attacks & !self.us_occ;
        self.move_append_from_bb::<L>(&mut k_moves, ksq);

        // A double check can only be answered by the king.
        if !self.board.checkers().more_than_one() {
            let checking_sq: SQ = self.board.checkers().bit_scan_forward();
            let target: BitBoard = between_bb(checking_sq, ksq) | checking_sq.to_bb();
            self.generate_all::<L, EvasionsGenType, P>(target);
        }
    }

    /// Generates single and double pawn pushes, promotions excluded.
    fn generate_pawn_advances<L: Legality, P: PlayerTrait>(&mut self) {
        debug_assert!(!self.board.in_check());
        let rank_7: BitBoard = if P::player() == Player::White {
            BitBoard::RANK_7
        } else {
            BitBoard::RANK_2
        };
        let rank_3: BitBoard = if P::player() == Player::White {
            BitBoard::RANK_3
        } else {
            BitBoard::RANK_6
        };
        let pawns: BitBoard = self.board.piece_bb(P::player(), PieceType::P) & !rank_7;
        let empty: BitBoard = !self.occ;

        let mut push_one: BitBoard = empty & P::shift_up(pawns);
        let mut push_two: BitBoard = P::shift_up(push_one & rank_3) & empty;

        while let Some(dst) = push_one.pop_some_lsb() {
            let src: SQ = P::down(dst);
            self.check_and_add::<L>(BitMove::make_normal(src, dst));
        }
        while let Some(dst) = push_two.pop_some_lsb() {
            let src: SQ = P::down(P::down(dst));
            self.check_and_add::<L>(BitMove::make_normal(src, dst));
        }
    }

    /// Generates quiet queen moves that give check.
    fn generate_queen_checks<L: Legality, P: PlayerTrait>(&mut self) {
        debug_assert!(!self.board.in_check());
        let target: BitBoard = self.board.check_sq(PieceType::Q) & !self.occ;
        let mut queens: BitBoard = self.board.piece_bb(P::player(), PieceType::Q);
        while let Some(src) = queens.pop_some_lsb() {
            let mut moves_bb: BitBoard = queen_moves(self.occ, src) & target;
            self.move_append_from_bb::<L>(&mut moves_bb, src);
        }
    }

    /// Generates castles for both sides of the board.
    fn generate_castling<L: Legality, P: PlayerTrait>(&mut self) {
        self.castling_side::<L, P>(CastleType::QueenSide);
        self.castling_side::<L, P>(CastleType::KingSide);
    }

    /// Generates a castle for a single side, verifying the empty path, the
    /// rook, and that the king never crosses an attacked square.
    fn castling_side<L: Legality, P: PlayerTrait>(&mut self, side: CastleType) {
        if !self.board.castle_impeded(side)
            && self.board.can_castle(P::player(), side)
            && self
                .board
                .piece_at_sq(self.board.castling_rook_square(side))
                .type_of()
                == PieceType::R
        {
            let king_side: bool = side == CastleType::KingSide;
            let ksq: SQ = self.board.king_sq(P::player());
            if ksq != P::player().relative_square(SQ::E1) {
                return;
            }
            let k_to: SQ = P::player().relative_square(if king_side { SQ::G1 } else { SQ::C1 });

            let enemies: BitBoard = self.them_occ;
            let direction: fn(SQ) -> SQ = if king_side {
                |x: SQ| x - SQ(1)
            } else {
                |x: SQ| x + SQ(1)
            };

            let mut s: SQ = k_to;
            let mut can_castle: bool = true;

            'outer: while s != ksq {
                let attackers: BitBoard = self.board.attackers_to(s, self.occ) & enemies;
                if attackers.is_not_empty() {
                    can_castle = false;
                    break 'outer;
                }
                s = direction(s);
            }
            if can_castle {
                self.check_and_add::<L>(BitMove::make_castle(ksq, k_to));
            }
        }
    }

    /// Generates the captures and quiets of a single piece kind.
    fn moves_per_piece<L: Legality, G: GenTypeTrait, PL: PlayerTrait, P: PieceTrait>(
        &mut self,
        target: BitBoard,
    ) {
        let mut piece_bb: BitBoard = self.board.piece_bb(PL::player(), P::piece_type());
        // Direct quiet checks only come from the checking squares, and the
        // discovered-check candidates were already handled separately.
        let check_mask: BitBoard = if G::gen_type() == GenTypes::QuietChecks {
            piece_bb &= !self.board.discovered_check_candidates();
            self.board.check_sq(P::piece_type())
        } else {
            BitBoard::ALL
        };
        while let Some(src) = piece_bb.pop_some_lsb() {
            let mut moves_bb: BitBoard =
                self.moves_bb(P::piece_type(), src) & !self.us_occ & target & check_mask;
            self.move_append_from_bb::<L>(&mut moves_bb, src);
        }
    }

    /// Generates pawn moves of the given class.
    fn generate_pawn_moves<L: Legality, G: GenTypeTrait, P: PlayerTrait>(
        &mut self,
        target: BitBoard,
    ) {
        let (rank_8, rank_7, rank_3): (BitBoard, BitBoard, BitBoard) =
            if P::player() == Player::White {
                (BitBoard::RANK_8, BitBoard::RANK_7, BitBoard::RANK_3)
            } else {
                (BitBoard::RANK_1, BitBoard::RANK_2, BitBoard::RANK_6)
            };

        let all_pawns: BitBoard = self.board.piece_bb(P::player(), PieceType::P);

        let mut empty_squares = BitBoard(0);

        // Pawns on the seventh promote; the rest move normally.
        let pawns_rank_7: BitBoard = all_pawns & rank_7;
        let pawns_not_rank_7: BitBoard = all_pawns & !rank_7;

        let enemies: BitBoard = if G::gen_type() == GenTypes::Evasions {
            self.them_occ & target
        } else if G::gen_type() == GenTypes::Captures {
            target
        } else {
            self.them_occ
        };

        // Single and double pushes.
        if G::gen_type() != GenTypes::Captures {
            empty_squares =
                if G::gen_type() == GenTypes::Quiets || G::gen_type() == GenTypes::QuietChecks {
                    target
                } else {
                    !self.occ
                };

            let mut push_one: BitBoard = empty_squares & P::shift_up(pawns_not_rank_7);
            let mut push_two: BitBoard = P::shift_up(push_one & rank_3) & empty_squares;

            if G::gen_type() == GenTypes::Evasions {
                push_one &= target;
                push_two &= target;
            }

            if G::gen_type() == GenTypes::QuietChecks {
                let ksq: SQ = self.board.king_sq(P::opp_player());
                let mut direct_one = push_one & pawn_attacks_from(ksq, P::opp_player());
                let mut direct_two = push_two & pawn_attacks_from(ksq, P::opp_player());

                // A pawn shielding the enemy king checks by any advance off
                // the king's file.
                let dc_candidates: BitBoard = self.board.discovered_check_candidates();
                if (pawns_not_rank_7 & dc_candidates).is_not_empty() {
                    let dc1: BitBoard = P::shift_up(pawns_not_rank_7 & dc_candidates)
                        & empty_squares
                        & !ksq.file_bb();
                    let dc2: BitBoard = P::shift_up(rank_3 & dc1) & empty_squares;

                    direct_one |= dc1;
                    direct_two |= dc2;
                }
                push_one = direct_one;
                push_two = direct_two;
            }

            while let Some(dst) = push_one.pop_some_lsb() {
                let src: SQ = P::down(dst);
                self.check_and_add::<L>(BitMove::make_normal(src, dst));
            }

            while let Some(dst) = push_two.pop_some_lsb() {
                let src: SQ = P::down(P::down(dst));
                self.check_and_add::<L>(BitMove::make_normal(src, dst));
            }
        }

        // Promotions, push and capture flavors.
        if pawns_rank_7.is_not_empty()
            && (G::gen_type() != GenTypes::Evasions || (target & rank_8).is_not_empty())
        {
            if G::gen_type() == GenTypes::Captures {
                empty_squares = !self.occ;
            } else if G::gen_type() == GenTypes::Evasions {
                empty_squares &= target;
            }

            if G::gen_type() != GenTypes::Captures {
                let mut no_promo: BitBoard = P::shift_up(pawns_rank_7) & empty_squares;
                while let Some(dst) = no_promo.pop_some_lsb() {
                    self.create_push_promos::<L, G>(dst, P::down(dst));
                }
            } else {
                // Queen push-promotions ride along with the captures.
                let mut q_promo: BitBoard = P::shift_up(pawns_rank_7) & empty_squares;
                while let Some(dst) = q_promo.pop_some_lsb() {
                    self.check_and_add::<L>(BitMove::make_promo(
                        P::down(dst),
                        dst,
                        PieceType::Q,
                    ));
                }
            }

            if G::gen_type() != GenTypes::Quiets && G::gen_type() != GenTypes::QuietChecks {
                let mut left_cap_promo: BitBoard = P::shift_up_left(pawns_rank_7) & enemies;
                let mut right_cap_promo: BitBoard = P::shift_up_right(pawns_rank_7) & enemies;

                while let Some(dst) = left_cap_promo.pop_some_lsb() {
                    self.create_all_cap_promos::<L>(dst, P::down_right(dst));
                }

                while let Some(dst) = right_cap_promo.pop_some_lsb() {
                    self.create_all_cap_promos::<L>(dst, P::down_left(dst));
                }
            }
        }

        // Captures, en passant included.
        if G::gen_type() == GenTypes::Captures
            || G::gen_type() == GenTypes::Evasions
            || G::gen_type() == GenTypes::NonEvasions
            || G::gen_type() == GenTypes::All
        {
            let mut left_cap: BitBoard = P::shift_up_left(pawns_not_rank_7) & enemies;
            let mut right_cap: BitBoard = P::shift_up_right(pawns_not_rank_7) & enemies;

            while let Some(dst) = left_cap.pop_some_lsb() {
                let src: SQ = P::down_right(dst);
                self.check_and_add::<L>(BitMove::make_normal(src, dst));
            }

            while let Some(dst) = right_cap.pop_some_lsb() {
                let src: SQ = P::down_left(dst);
                self.check_and_add::<L>(BitMove::make_normal(src, dst));
            }

            if self.board.ep_square() != NO_SQ {
                let ep_sq: SQ = self.board.ep_square();
                debug_assert_eq!(ep_sq.rank(), P::player().relative_rank(Rank::R6));

                // An en-passant capture evades check only when the checking
                // piece is the double-pushed pawn itself.
                if G::gen_type() != GenTypes::Evasions
                    || (target & P::down(ep_sq).to_bb()).is_not_empty()
                {
                    let mut ep_attackers =
                        pawns_not_rank_7 & pawn_attacks_from(ep_sq, P::opp_player());

                    while let Some(src) = ep_attackers.pop_some_lsb() {
                        self.check_and_add::<L>(BitMove::make_ep_capture(src, ep_sq));
                    }
                }
            }
        }
    }

    /// Push promotions: the queen belongs to the capture class, the
    /// under-promotions to the quiet class.
    #[inline]
    fn create_push_promos<L: Legality, G: GenTypeTrait>(&mut self, dst: SQ, src: SQ) {
        match G::gen_type() {
            GenTypes::Quiets => {
                self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::R));
                self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::B));
                self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::N));
            }
            GenTypes::QuietChecks => {
                // Only the knight under-promotion can quietly check.
                let ksq = self.board.king_sq(self.board.turn().other_player());
                if (knight_moves(dst) & ksq.to_bb()).is_not_empty() {
                    self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::N));
                }
            }
            _ => {
                self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::Q));
                self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::R));
                self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::B));
                self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::N));
            }
        }
    }

    /// Capture promotions, queen first.
    #[inline]
    fn create_all_cap_promos<L: Legality>(&mut self, dst: SQ, src: SQ) {
        self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::Q));
        self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::R));
        self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::B));
        self.check_and_add::<L>(BitMove::make_promo(src, dst, PieceType::N));
    }

    /// The attack board of a non-pawn piece.
    #[inline]
    fn moves_bb(&self, piece: PieceType, square: SQ) -> BitBoard {
        debug_assert!(square.is_okay());
        debug_assert_ne!(piece, PieceType::P);
        match piece {
            PieceType::N => knight_moves(square),
            PieceType::B => bishop_moves(self.occ, square),
            PieceType::R => rook_moves(self.occ, square),
            PieceType::Q => queen_moves(self.occ, square),
            PieceType::K => king_moves(square),
            _ => BitBoard(0),
        }
    }

    #[inline]
    fn move_append_from_bb<L: Legality>(&mut self, bits: &mut BitBoard, src: SQ) {
        while let Some(dst) = bits.pop_some_lsb() {
            self.check_and_add::<L>(BitMove::make_normal(src, dst));
        }
    }

    /// Appends the move, checking legality first when generating `Legal`.
    #[inline]
    fn check_and_add<L: Legality>(&mut self, b_move: BitMove) {
        if !L::gen_legal() || self.board.legal_move(b_move) {
            self.movelist.push_mv(b_move);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::ALL_FENS;
    use crate::board::Board;

    #[test]
    fn start_pos_move_count() {
        let b = Board::start_pos();
        assert_eq!(b.generate_moves().len(), 20);
    }

    #[test]
    fn legal_subset_of_pseudolegal() {
        for fen in ALL_FENS.iter() {
            let b = Board::from_fen(fen).unwrap();
            let legal = b.generate_moves();
            let pseudo = b.generate_pseudolegal_moves();
            assert!(legal.len() <= pseudo.len());
            for mv in legal.iter() {
                assert!(pseudo.contains(mv));
            }
        }
    }

    #[test]
    fn classes_partition_all_moves() {
        for fen in ALL_FENS.iter() {
            let b = Board::from_fen(fen).unwrap();
            if b.in_check() {
                let evasions = b.generate_moves_of_type(GenTypes::Evasions);
                let all = b.generate_moves();
                assert_eq!(evasions.len(), all.len());
            } else {
                let caps = b.generate_moves_of_type(GenTypes::Captures);
                let quiets = b.generate_moves_of_type(GenTypes::Quiets);
                let all = b.generate_moves();
                assert_eq!(caps.len() + quiets.len(), all.len());
                for mv in caps.iter() {
                    assert!(b.is_capture_or_promotion(*mv));
                }
            }
        }
    }

    #[test]
    fn quiet_checks_give_check() {
        for fen in ALL_FENS.iter() {
            let b = Board::from_fen(fen).unwrap();
            if !b.in_check() {
                for mv in b.generate_moves_of_type(GenTypes::QuietChecks).iter() {
                    assert!(b.gives_check(*mv), "fen: {} move: {}", fen, mv);
                    assert!(!b.is_capture(*mv));
                }
            }
        }
    }

    #[test]
    fn pawn_advances_are_pushes() {
        let b = Board::start_pos();
        let advances = b.generate_moves_of_type(GenTypes::PawnAdvances);
        assert_eq!(advances.len(), 16);
        for mv in advances.iter() {
            assert_eq!(
                b.piece_at_sq(mv.get_src()).type_of(),
                PieceType::P
            );
            assert!(!b.is_capture(*mv));
        }
    }
}
