//! This module contains [`Board`], the object representing the current state
//! of a chessboard. All modifications to the current state of the board are
//! done through this object, as well as gathering information about the
//! current state of the board.
//!
//! The board keeps, per ply, a [`StateInfo`] frame with everything needed to
//! take a move back and to answer check/pin/repetition queries without
//! recomputation. Frames live in a plain stack owned by the board, so each
//! search thread owns its whole line privately.
//!
//! [`Board`]: struct.Board.html
//! [`StateInfo`]: state/struct.StateInfo.html

pub mod castle_rights;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod piece_locations;
pub mod state;

use crate::core::bit_twiddles::*;
use crate::core::bitboard::BitBoard;
use crate::core::masks::*;
use crate::core::mono_traits::*;
use crate::core::move_list::MoveList;
use crate::core::piece_move::{BitMove, MoveType, NULL_MOVE};
use crate::core::score::{Score, Value};
use crate::core::sq::{NO_SQ, SQ};
use crate::core::*;

use crate::helper::prelude::*;

use self::castle_rights::Castling;
pub use self::fen::FenBuildError;
use self::movegen::{Legal, MoveGen, PseudoLegal};
use self::piece_locations::PieceLocations;
use self::state::StateInfo;

use std::char;
use std::fmt;

/// Starting capacity of the per-board state stack, enough for any
/// realistic game plus a search line on top.
const STATE_STACK_CAP: usize = 512;

/// Piece values used by the static exchange evaluation, indexed by
/// `PieceType`. The king never ends up exchanged, so its slot is unused.
pub static SEE_VALUE: [Value; PIECE_TYPE_CNT] = [0, 0, 100, 350, 351, 500, 900, 0];

/// Represents a chessboard.
///
/// `Board` contains everything that needs to be known about the current state
/// of the game. It is used by both the engine and the library callers alike.
///
/// # `BitBoard` representation
///
/// Occupancy is stored as one [`BitBoard`] per (player, piece type), with bit
/// 0 being square a1 and bit 63 square h8, increasing file-first.
///
/// [`BitBoard`]: ../core/bitboard/struct.BitBoard.html
pub struct Board {
    turn: Player,
    bbs: [[BitBoard; PIECE_TYPE_CNT]; PLAYER_CNT],
    occ: [BitBoard; PLAYER_CNT],
    occ_all: BitBoard,
    half_moves: u16,
    piece_counts: [[u8; PIECE_TYPE_CNT]; PLAYER_CNT],
    piece_locations: PieceLocations,
    states: Vec<StateInfo>,
    chess960: bool,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty_string())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board: {}", &self.pretty_string())
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.turn == other.turn
            && self.occ_all == other.occ_all
            && *self.st() == *other.st()
            && self.piece_locations == other.piece_locations
    }
}

impl Clone for Board {
    fn clone(&self) -> Self {
        Board {
            turn: self.turn,
            bbs: self.bbs,
            occ: self.occ,
            occ_all: self.occ_all,
            half_moves: self.half_moves,
            piece_counts: self.piece_counts,
            piece_locations: self.piece_locations.clone(),
            states: self.states.clone(),
            chess960: self.chess960,
        }
    }
}

impl Board {
    /// Constructs a board from the starting position.
    pub fn start_pos() -> Board {
        init_statics();
        let mut b = Board {
            turn: Player::White,
            bbs: [[BitBoard(0); PIECE_TYPE_CNT]; PLAYER_CNT],
            occ: [BitBoard(START_WHITE_OCC), BitBoard(START_BLACK_OCC)],
            occ_all: BitBoard(START_OCC_ALL),
            half_moves: 0,
            piece_counts: [[0; PIECE_TYPE_CNT]; PLAYER_CNT],
            piece_locations: PieceLocations::blank(),
            states: Vec::with_capacity(STATE_STACK_CAP),
            chess960: false,
        };
        b.states.push(StateInfo::start());

        b.bbs[0][PieceType::P as usize] = BitBoard(RANK_2);
        b.bbs[0][PieceType::N as usize] = SQ::B1.to_bb() | SQ::G1.to_bb();
        b.bbs[0][PieceType::B as usize] = SQ::C1.to_bb() | SQ::F1.to_bb();
        b.bbs[0][PieceType::R as usize] = SQ::A1.to_bb() | SQ::H1.to_bb();
        b.bbs[0][PieceType::Q as usize] = SQ::D1.to_bb();
        b.bbs[0][PieceType::K as usize] = SQ::E1.to_bb();
        b.bbs[1][PieceType::P as usize] = BitBoard(RANK_7);
        b.bbs[1][PieceType::N as usize] = SQ::B8.to_bb() | SQ::G8.to_bb();
        b.bbs[1][PieceType::B as usize] = SQ::C8.to_bb() | SQ::F8.to_bb();
        b.bbs[1][PieceType::R as usize] = SQ::A8.to_bb() | SQ::H8.to_bb();
        b.bbs[1][PieceType::Q as usize] = SQ::D8.to_bb();
        b.bbs[1][PieceType::K as usize] = SQ::E8.to_bb();

        b.set_piece_states();
        b.set_keys_and_material();
        {
            let mut st = b.states.pop().unwrap();
            st.checkers_bb = b.attackers_to(b.king_sq(b.turn), b.occupied())
                & b.get_occupied_player(b.turn.other_player());
            b.set_checking_state(&mut st);
            b.states.push(st);
        }
        b
    }

    /// Constructs a board from a FEN string.
    ///
    /// FEN stands for Forsyth-Edwards Notation, the standard 6-field text
    /// form of a chess position.
    pub fn from_fen(fen: &str) -> Result<Board, FenBuildError> {
        init_statics();

        let det_split: Vec<&str> = fen.split_whitespace().collect();

        // [placement, side to move, castling, en passant, halfmove, fullmove]
        if det_split.len() != 6 {
            return Err(FenBuildError::NotEnoughSections {
                sections: det_split.len(),
            });
        }

        let b_rep: Vec<&str> = det_split[0].split('/').collect();

        if b_rep.len() != 8 {
            return Err(FenBuildError::IncorrectRankAmounts { ranks: b_rep.len() });
        }

        let (piece_loc, piece_cnt) = PieceLocations::from_partial_fen(b_rep.as_slice())?;

        let turn_char: char = det_split[1]
            .chars()
            .next()
            .ok_or_else(|| FenBuildError::UnrecognizedTurn {
                turn: det_split[1].to_string(),
            })?;
        let turn: Player = match turn_char {
            'b' => Player::Black,
            'w' => Player::White,
            _ => {
                return Err(FenBuildError::UnrecognizedTurn {
                    turn: det_split[1].to_string(),
                });
            }
        };

        let mut castling = Castling::empty_set();
        for ch in det_split[2].chars() {
            if !castling.add_castling_char(ch) {
                return Err(FenBuildError::UnrecognizedCastling { castling: ch });
            }
        }

        let mut ep_sq: SQ = SQ(0);
        for (i, character) in det_split[3].chars().enumerate() {
            if i > 1 {
                return Err(FenBuildError::EPSquareUnreadable {
                    ep: det_split[3].to_string(),
                });
            }
            if i == 0 {
                match character {
                    'a' => ep_sq += SQ(0),
                    'b' => ep_sq += SQ(1),
                    'c' => ep_sq += SQ(2),
                    'd' => ep_sq += SQ(3),
                    'e' => ep_sq += SQ(4),
                    'f' => ep_sq += SQ(5),
                    'g' => ep_sq += SQ(6),
                    'h' => ep_sq += SQ(7),
                    '-' => {}
                    _ => {
                        return Err(FenBuildError::EPSquareUnreadable {
                            ep: det_split[3].to_string(),
                        });
                    }
                }
            } else {
                let digit = character.to_digit(10).ok_or_else(|| {
                    FenBuildError::EPSquareUnreadable {
                        ep: det_split[3].to_string(),
                    }
                })? as u8;

                // Rank must be 3 or 6.
                if digit == 3 {
                    ep_sq += SQ(16);
                } else if digit == 6 {
                    ep_sq += SQ(40);
                } else {
                    return Err(FenBuildError::EPSquareInvalid {
                        ep: det_split[3].to_string(),
                    });
                }
            }
        }

        if ep_sq == SQ(0) {
            ep_sq = NO_SQ
        }

        let rule_50 = det_split[4].parse::<i16>()?;

        let full_moves = det_split[5].parse::<u16>()?;
        let mut total_moves = full_moves.saturating_sub(1) * 2;
        if turn == Player::Black {
            total_moves += 1
        };

        let mut st = StateInfo::blank();
        st.castling = castling;
        st.rule_50 = rule_50;
        st.ep_square = ep_sq;

        let mut b = Board {
            turn,
            bbs: [[BitBoard(0); PIECE_TYPE_CNT]; PLAYER_CNT],
            occ: [BitBoard(0), BitBoard(0)],
            occ_all: BitBoard(0),
            half_moves: total_moves,
            piece_counts: piece_cnt,
            piece_locations: piece_loc,
            states: Vec::with_capacity(STATE_STACK_CAP),
            chess960: false,
        };

        b.set_bitboards();

        for player in &ALL_PLAYERS {
            let num = b.count_piece(*player, PieceType::K);
            if num != 1 {
                return Err(FenBuildError::IllegalNumKings {
                    player: *player,
                    num,
                });
            }
        }
        if ((b.piece_bb_both_players(PieceType::P)) & (BitBoard::RANK_1 | BitBoard::RANK_8))
            .is_not_empty()
        {
            return Err(FenBuildError::PawnOnLastRow);
        }

        // Only keep the ep square if a capture is actually possible there.
        if st.ep_square != NO_SQ
            && (pawn_attacks_from(st.ep_square, !turn) & b.piece_bb(turn, PieceType::P)).is_empty()
        {
            st.ep_square = NO_SQ;
        }

        b.states.push(st);
        b.set_keys_and_material();
        {
            let mut st = b.states.pop().unwrap();
            st.checkers_bb = b.attackers_to(b.king_sq(b.turn), b.occupied())
                & b.get_occupied_player(b.turn.other_player());
            b.set_checking_state(&mut st);
            b.states.push(st);
        }
        Ok(b)
    }

    /// Constructs a clone of the board suitable for handing to another
    /// searcher: identical position, with the available history retained for
    /// repetition detection.
    pub fn shallow_clone(&self) -> Board {
        self.clone()
    }

    /// Constructs a clone of the board for searching the same line in
    /// parallel.
    pub fn parallel_clone(&self) -> Board {
        self.clone()
    }

    /// Sets Chess960 mode. Only changes how castle moves are translated at
    /// the text boundary.
    pub fn set_chess960(&mut self, is960: bool) {
        self.chess960 = is960;
    }

    /// Returns if the board is in Chess960 mode.
    #[inline(always)]
    pub fn is_chess960(&self) -> bool {
        self.chess960
    }

    /// The current state frame.
    #[inline(always)]
    fn st(&self) -> &StateInfo {
        debug_assert!(!self.states.is_empty());
        unsafe { self.states.get_unchecked(self.states.len() - 1) }
    }

    #[inline(always)]
    fn st_mut(&mut self) -> &mut StateInfo {
        debug_assert!(!self.states.is_empty());
        let idx = self.states.len() - 1;
        unsafe { self.states.get_unchecked_mut(idx) }
    }

    /// Counts the pieces and mirrors the bitboards into the square-indexed
    /// map. Assumes the per-piece bitboards are fully set.
    fn set_piece_states(&mut self) {
        for player in &ALL_PLAYERS {
            for piece in &ALL_PIECE_TYPES {
                self.piece_counts[*player as usize][*piece as usize] =
                    self.piece_bb(*player, *piece).count_bits();
            }
        }

        for square in 0..SQ_CNT as u8 {
            let bb = SQ(square).to_bb();
            if (bb & self.occupied()).is_not_empty() {
                let player = if (bb & self.occupied_black()).is_empty() {
                    Player::White
                } else {
                    Player::Black
                };
                let mut piece = PieceType::None;
                for pt in &ALL_PIECE_TYPES {
                    if (self.piece_bb(player, *pt) & bb).is_not_empty() {
                        piece = *pt;
                        break;
                    }
                }
                assert!(piece != PieceType::None);
                self.piece_locations.place(SQ(square), player, piece);
            } else {
                self.piece_locations.remove(SQ(square));
            }
        }
    }

    /// Fills the bitboards from a fully set `PieceLocations`. Only used when
    /// creating the board from a FEN string.
    fn set_bitboards(&mut self) {
        for sq in 0..SQ_CNT as u8 {
            if let Some((player, piece)) = self.piece_locations.player_piece_at(SQ(sq)) {
                let bb = SQ(sq).to_bb();
                self.bbs[player as usize][piece as usize] |= bb;
                self.occ[player as usize] |= bb;
            }
        }
        self.occ_all = self.occupied_black() | self.occupied_white();
        for player in &ALL_PLAYERS {
            for piece in &ALL_PIECE_TYPES {
                self.piece_counts[*player as usize][*piece as usize] =
                    self.piece_bb(*player, *piece).count_bits();
            }
        }
    }

    /// Computes the zobrist keys, the material keys, the piece-square score,
    /// and the non-pawn material from scratch. Used at construction only.
    fn set_keys_and_material(&mut self) {
        let mut zob: u64 = 0;
        let mut pawn_key: u64 = z_no_pawns();
        let mut material_key: u64 = 0;
        let mut bishop_key: u64 = 0;
        let mut psq_score: Score = Score::ZERO;
        let mut npm: [Value; PLAYER_CNT] = [0; PLAYER_CNT];

        let mut occ = self.occupied();
        while let Some(sq) = occ.pop_some_lsb() {
            let piece = self.piece_locations.piece_at(sq);
            let player = piece.player_lossy();
            let pt = piece.type_of();
            let key = z_square(sq, piece);
            zob ^= key;
            psq_score += psq(piece, sq);
            match pt {
                PieceType::P => pawn_key ^= key,
                PieceType::K => {}
                _ => {
                    npm[player as usize] += piecetype_value(pt, false);
                    if pt == PieceType::B {
                        bishop_key ^= z_square(SQ(sq.square_color_index() as u8), piece);
                    }
                }
            }
        }

        for player in &ALL_PLAYERS {
            for pt in &ALL_PIECE_TYPES {
                let piece = Piece::make_lossy(*player, *pt);
                for i in 0..self.piece_counts[*player as usize][*pt as usize] {
                    material_key ^= z_square(SQ(i), piece);
                }
            }
        }

        let ep = self.st().ep_square;
        if ep != NO_SQ && ep.is_okay() {
            zob ^= z_ep(ep);
        }

        if self.turn == Player::Black {
            zob ^= z_side();
        }
        zob ^= z_castle(self.st().castling.bits());

        let st = self.st_mut();
        st.zobrist = zob;
        st.pawn_key = pawn_key;
        st.material_key = material_key;
        st.bishop_color_key = bishop_key;
        st.psq = psq_score;
        st.nonpawn_material = npm;
    }

    /// Applies a move to the board.
    ///
    /// # Safety
    ///
    /// The move must be legal for the current position.
    pub fn make_move(&mut self, bit_move: BitMove) {
        let gives_check: bool = self.gives_check(bit_move);
        self.make_move_gc(bit_move, gives_check);
    }

    /// Applies a move to the board, with the caller supplying whether the
    /// move gives check. Useful when check status has already been computed.
    ///
    /// # Safety
    ///
    /// The move must be legal for the current position, and `gives_check`
    /// must be accurate, or undefined behavior follows.
    pub fn make_move_gc(&mut self, bit_move: BitMove, gives_check: bool) {
        debug_assert!(bit_move.is_okay());

        let us = self.turn;
        let them = us.other_player();
        let from: SQ = bit_move.get_src();
        let to: SQ = bit_move.get_dest();
        let piece: PieceType = self.piece_locations.piece_type_at(from);
        debug_assert!(piece != PieceType::None);
        debug_assert_eq!(self.piece_locations.player_at(from), Some(us));

        let captured: PieceType = if bit_move.is_en_passant() {
            PieceType::P
        } else {
            self.piece_locations.piece_type_at(to)
        };
        debug_assert!(captured != PieceType::K);

        let mut next = self.st().partial_clone();
        next.rule_50 += 1;
        next.plies_from_null += 1;
        next.prev_move = bit_move;
        next.moved_piece = piece;

        self.half_moves += 1;

        let mut zob: u64 = next.zobrist ^ z_side();
        let mut pawn_key: u64 = next.pawn_key;
        let mut material_key: u64 = next.material_key;
        let mut bishop_key: u64 = next.bishop_color_key;
        let mut psq_score: Score = next.psq;

        if bit_move.is_castle() {
            debug_assert_eq!(piece, PieceType::K);
            debug_assert_eq!(captured, PieceType::None);

            let king_side: bool = to > from;
            let r_from: SQ = self.castle_rook_from(us, king_side);
            let r_to: SQ = self.castle_rook_to(us, king_side);
            let k_piece = Piece::make_lossy(us, PieceType::K);
            let r_piece = Piece::make_lossy(us, PieceType::R);

            self.move_piece_c(PieceType::K, from, to, us);
            self.move_piece_c(PieceType::R, r_from, r_to, us);

            zob ^= z_square(from, k_piece) ^ z_square(to, k_piece);
            zob ^= z_square(r_from, r_piece) ^ z_square(r_to, r_piece);
            psq_score += psq(k_piece, to) - psq(k_piece, from);
            psq_score += psq(r_piece, r_to) - psq(r_piece, r_from);
            next.captured_piece = PieceType::None;
        } else {
            if captured != PieceType::None {
                let cap_piece = Piece::make_lossy(them, captured);
                let mut cap_sq: SQ = to;
                if captured == PieceType::P {
                    if bit_move.is_en_passant() {
                        debug_assert_eq!(to, self.st().ep_square);
                        cap_sq = match us {
                            Player::White => to - SQ(8),
                            Player::Black => to + SQ(8),
                        };
                        debug_assert_eq!(piece, PieceType::P);
                        debug_assert_eq!(
                            self.piece_locations.piece_at(cap_sq),
                            Piece::make_lossy(them, PieceType::P)
                        );
                    }
                    pawn_key ^= z_square(cap_sq, cap_piece);
                } else {
                    next.nonpawn_material[them as usize] -= piecetype_value(captured, false);
                    if captured == PieceType::B {
                        bishop_key ^= z_square(SQ(cap_sq.square_color_index() as u8), cap_piece);
                    }
                }

                let cnt = self.piece_counts[them as usize][captured as usize];
                debug_assert!(cnt > 0);
                material_key ^= z_square(SQ(cnt - 1), cap_piece);

                self.remove_piece_c(captured, cap_sq, them);
                zob ^= z_square(cap_sq, cap_piece);
                psq_score -= psq(cap_piece, cap_sq);
                next.rule_50 = 0;
            }
            next.captured_piece = captured;

            let moved = Piece::make_lossy(us, piece);
            self.move_piece_c(piece, from, to, us);
            zob ^= z_square(from, moved) ^ z_square(to, moved);
            psq_score += psq(moved, to) - psq(moved, from);
        }

        if next.ep_square != NO_SQ {
            zob ^= z_ep(next.ep_square);
            next.ep_square = NO_SQ;
        }

        if !next.castling.is_empty()
            && (to.castle_rights_mask() | from.castle_rights_mask()) != 0
        {
            let removed = next.castling.update_castling(to, from);
            zob ^= z_castle(removed);
        }

        if piece == PieceType::P {
            let us_pawn = Piece::make_lossy(us, PieceType::P);
            if to.0 ^ from.0 == 16 {
                // A double push only yields an ep square when an enemy pawn
                // can actually take there.
                let ep = SQ((to.0 + from.0) / 2);
                if (pawn_attacks_from(ep, us) & self.piece_bb(them, PieceType::P)).is_not_empty() {
                    next.ep_square = ep;
                    zob ^= z_ep(ep);
                }
            } else if bit_move.is_promo() {
                let promo: PieceType = bit_move.promo_piece();
                let promo_piece = Piece::make_lossy(us, promo);

                self.remove_piece_c(PieceType::P, to, us);
                self.put_piece_c(promo, to, us);

                zob ^= z_square(to, us_pawn) ^ z_square(to, promo_piece);
                pawn_key ^= z_square(to, us_pawn);
                psq_score += psq(promo_piece, to) - psq(us_pawn, to);
                next.nonpawn_material[us as usize] += piecetype_value(promo, false);
                if promo == PieceType::B {
                    bishop_key ^= z_square(SQ(to.square_color_index() as u8), promo_piece);
                }

                // The pawn count dropped by one and the promoted piece's count
                // rose by one.
                let pawn_cnt = self.piece_counts[us as usize][PieceType::P as usize];
                material_key ^= z_square(SQ(pawn_cnt), us_pawn);
                let promo_cnt = self.piece_counts[us as usize][promo as usize];
                debug_assert!(promo_cnt > 0);
                material_key ^= z_square(SQ(promo_cnt - 1), promo_piece);
            }
            pawn_key ^= z_square(from, us_pawn) ^ z_square(to, us_pawn);
            next.rule_50 = 0;
        }

        next.zobrist = zob;
        next.pawn_key = pawn_key;
        next.material_key = material_key;
        next.bishop_color_key = bishop_key;
        next.psq = psq_score;

        next.checkers_bb = if gives_check {
            self.attackers_to(self.king_sq(them), self.occupied()) & self.get_occupied_player(us)
        } else {
            BitBoard(0)
        };

        self.turn = them;
        self.set_checking_state(&mut next);
        next.repetition = self.detect_repetition(&next);
        self.states.push(next);

        debug_assert!(self.is_okay());
    }

    /// Un-does the previously applied move, returning the board to its prior
    /// state.
    ///
    /// # Panics
    ///
    /// Panics if no move has been made since the board was created or cloned,
    /// or if the last applied move was a null move.
    pub fn unmake_move(&mut self) {
        assert!(self.states.len() > 1);
        let prev_state = self.states.pop().unwrap();
        let undo_move: BitMove = prev_state.prev_move;
        assert!(!undo_move.is_null());
        assert!(undo_move != NULL_MOVE);

        self.turn = self.turn.other_player();
        let us: Player = self.turn;
        let from: SQ = undo_move.get_src();
        let to: SQ = undo_move.get_dest();

        debug_assert!(!self.piece_locations.at_square(from) || undo_move.is_castle());

        if undo_move.is_promo() {
            debug_assert_eq!(
                self.piece_locations.piece_type_at(to),
                undo_move.promo_piece()
            );
            self.remove_piece_c(undo_move.promo_piece(), to, us);
            self.put_piece_c(PieceType::P, to, us);
        }

        if undo_move.is_castle() {
            let king_side: bool = to > from;
            let r_from: SQ = self.castle_rook_from(us, king_side);
            let r_to: SQ = self.castle_rook_to(us, king_side);
            self.move_piece_c(PieceType::K, to, from, us);
            self.move_piece_c(PieceType::R, r_to, r_from, us);
        } else {
            let piece = self.piece_locations.piece_type_at(to);
            self.move_piece_c(piece, to, from, us);
            if prev_state.captured_piece != PieceType::None {
                let mut cap_sq: SQ = to;
                if undo_move.is_en_passant() {
                    cap_sq = match us {
                        Player::White => to - SQ(8),
                        Player::Black => to + SQ(8),
                    };
                }
                self.put_piece_c(prev_state.captured_piece, cap_sq, us.other_player());
            }
        }
        self.half_moves -= 1;

        debug_assert!(self.is_okay());
    }

    /// Applies a "null move": the side to move passes. Used by null-move
    /// pruning only.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the board is in check.
    pub fn make_null_move(&mut self) {
        debug_assert!(self.checkers().is_empty());

        let mut next = self.st().partial_clone();
        next.prev_move = NULL_MOVE;
        next.rule_50 += 1;
        next.plies_from_null = 0;
        next.moved_piece = PieceType::None;

        let mut zob: u64 = next.zobrist ^ z_side();
        if next.ep_square != NO_SQ {
            zob ^= z_ep(next.ep_square);
            next.ep_square = NO_SQ;
        }
        next.zobrist = zob;

        self.turn = self.turn.other_player();
        self.set_checking_state(&mut next);
        self.states.push(next);
    }

    /// Takes back a null move.
    ///
    /// # Panics
    ///
    /// Panics if the last applied move was not a null move.
    pub fn unmake_null_move(&mut self) {
        assert!(self.st().prev_move == NULL_MOVE);
        self.states.pop();
        self.turn = self.turn.other_player();
    }

    /// Returns a list of legal moves for the side to move.
    pub fn generate_moves(&self) -> MoveList {
        MoveGen::generate::<Legal, AllGenType>(self)
    }

    /// Returns a list of pseudo-legal moves for the side to move. Each move
    /// must pass `Board::legal_move` before being applied.
    pub fn generate_pseudolegal_moves(&self) -> MoveList {
        MoveGen::generate::<PseudoLegal, AllGenType>(self)
    }

    /// Returns a list of legal moves of the given generation class.
    ///
    /// # Panics
    ///
    /// Panics if a check-restricted class is requested while in check, or
    /// `Evasions` while not in check.
    pub fn generate_moves_of_type(&self, gen_type: GenTypes) -> MoveList {
        match gen_type {
            GenTypes::All => MoveGen::generate::<Legal, AllGenType>(self),
            GenTypes::Captures => MoveGen::generate::<Legal, CapturesGenType>(self),
            GenTypes::Quiets => MoveGen::generate::<Legal, QuietsGenType>(self),
            GenTypes::QuietChecks => MoveGen::generate::<Legal, QuietChecksGenType>(self),
            GenTypes::Evasions => MoveGen::generate::<Legal, EvasionsGenType>(self),
            GenTypes::NonEvasions => MoveGen::generate::<Legal, NonEvasionsGenType>(self),
            GenTypes::PawnAdvances => MoveGen::generate::<Legal, PawnAdvancesGenType>(self),
            GenTypes::QueenChecks => MoveGen::generate::<Legal, QueenChecksGenType>(self),
            GenTypes::CastleOnly => MoveGen::generate::<Legal, CastleOnlyGenType>(self),
        }
    }

    /// Returns a list of pseudo-legal moves of the given generation class.
    pub fn generate_pseudolegal_moves_of_type(&self, gen_type: GenTypes) -> MoveList {
        match gen_type {
            GenTypes::All => MoveGen::generate::<PseudoLegal, AllGenType>(self),
            GenTypes::Captures => MoveGen::generate::<PseudoLegal, CapturesGenType>(self),
            GenTypes::Quiets => MoveGen::generate::<PseudoLegal, QuietsGenType>(self),
            GenTypes::QuietChecks => MoveGen::generate::<PseudoLegal, QuietChecksGenType>(self),
            GenTypes::Evasions => MoveGen::generate::<PseudoLegal, EvasionsGenType>(self),
            GenTypes::NonEvasions => MoveGen::generate::<PseudoLegal, NonEvasionsGenType>(self),
            GenTypes::PawnAdvances => MoveGen::generate::<PseudoLegal, PawnAdvancesGenType>(self),
            GenTypes::QueenChecks => MoveGen::generate::<PseudoLegal, QueenChecksGenType>(self),
            GenTypes::CastleOnly => MoveGen::generate::<PseudoLegal, CastleOnlyGenType>(self),
        }
    }

    //  ------- PRIVATE MUTATING FUNCTIONS -------

    /// Recomputes the blockers, pinners, and per-piece checking squares for
    /// the state frame. Called after every make.
    fn set_checking_state(&self, state: &mut StateInfo) {
        let mut white_pinners = BitBoard(0);
        state.blockers_king[Player::White as usize] = self.slider_blockers(
            self.occupied_black(),
            self.king_sq(Player::White),
            &mut white_pinners,
        );
        state.pinners_king[Player::White as usize] = white_pinners;

        let mut black_pinners = BitBoard(0);
        state.blockers_king[Player::Black as usize] = self.slider_blockers(
            self.occupied_white(),
            self.king_sq(Player::Black),
            &mut black_pinners,
        );
        state.pinners_king[Player::Black as usize] = black_pinners;

        // Squares from which the side to move would check the enemy king.
        let ksq: SQ = self.king_sq(self.turn.other_player());
        let occupied = self.occupied();

        state.check_sqs[PieceType::P as usize] =
            pawn_attacks_from(ksq, self.turn.other_player());
        state.check_sqs[PieceType::N as usize] = knight_moves(ksq);
        state.check_sqs[PieceType::B as usize] = bishop_moves(occupied, ksq);
        state.check_sqs[PieceType::R as usize] = rook_moves(occupied, ksq);
        state.check_sqs[PieceType::Q as usize] = state.check_sqs[PieceType::B as usize]
            | state.check_sqs[PieceType::R as usize];
        state.check_sqs[PieceType::K as usize] = BitBoard(0);
    }

    /// Walks the state stack backwards looking for an earlier position with
    /// the same key. One prior occurrence is enough; the search scores it as
    /// a draw.
    fn detect_repetition(&self, next: &StateInfo) -> bool {
        let roll = next.rule_50.min(next.plies_from_null);
        if roll < 4 {
            return false;
        }
        let len = self.states.len();
        let mut i: usize = 4;
        while i as i16 <= roll && i <= len {
            if unsafe { self.states.get_unchecked(len - i) }.zobrist == next.zobrist {
                return true;
            }
            i += 2;
        }
        false
    }

    /// Places a piece on the board for a given player.
    ///
    /// # Safety
    ///
    /// Assumes the target square is empty.
    fn put_piece_c(&mut self, piece: PieceType, square: SQ, player: Player) {
        let bb = square.to_bb();
        self.occ_all |= bb;
        self.occ[player as usize] |= bb;
        self.bbs[player as usize][piece as usize] |= bb;

        self.piece_locations.place(square, player, piece);
        self.piece_counts[player as usize][piece as usize] += 1;
    }

    /// Removes a piece from the board for a given player.
    fn remove_piece_c(&mut self, piece: PieceType, square: SQ, player: Player) {
        debug_assert_eq!(self.piece_locations.piece_type_at(square), piece);
        let bb = square.to_bb();
        self.occ_all ^= bb;
        self.occ[player as usize] ^= bb;
        self.bbs[player as usize][piece as usize] ^= bb;

        self.piece_locations.remove(square);
        self.piece_counts[player as usize][piece as usize] -= 1;
    }

    /// Moves a player's piece from `from` to `to`.
    fn move_piece_c(&mut self, piece: PieceType, from: SQ, to: SQ, player: Player) {
        debug_assert_ne!(from, to);
        let comb_bb: BitBoard = from.to_bb() | to.to_bb();

        self.occ_all ^= comb_bb;
        self.occ[player as usize] ^= comb_bb;
        self.bbs[player as usize][piece as usize] ^= comb_bb;

        self.piece_locations.remove(from);
        self.piece_locations.place(to, player, piece);
    }

    /// Rook origin square for a castle of the given player and side.
    #[inline]
    fn castle_rook_from(&self, player: Player, king_side: bool) -> SQ {
        if king_side {
            player.relative_square(SQ::H1)
        } else {
            player.relative_square(SQ::A1)
        }
    }

    /// Rook destination square for a castle of the given player and side.
    #[inline]
    fn castle_rook_to(&self, player: Player, king_side: bool) -> SQ {
        if king_side {
            player.relative_square(SQ::F1)
        } else {
            player.relative_square(SQ::D1)
        }
    }

    /// Returns the pieces (of either color) shielding `s` from the given
    /// sliders, and fills `pinners` with the sliders doing the pinning.
    fn slider_blockers(&self, sliders: BitBoard, s: SQ, pinners: &mut BitBoard) -> BitBoard {
        let mut result = BitBoard(0);
        *pinners = BitBoard(0);
        let occupied: BitBoard = self.occupied();

        let mut snipers: BitBoard = sliders
            & ((rook_moves(BitBoard(0), s)
                & self.piece_two_bb_both_players(PieceType::R, PieceType::Q))
                | (bishop_moves(BitBoard(0), s)
                    & self.piece_two_bb_both_players(PieceType::B, PieceType::Q)));

        while let Some(sniper_sq) = snipers.pop_some_lsb() {
            let b: BitBoard = between_bb(s, sniper_sq) & occupied;
            if b.is_not_empty() && !b.more_than_one() {
                result |= b;
                if let Some(player_at_s) = self.piece_locations.player_at(s) {
                    if (b & self.get_occupied_player(player_at_s)).is_not_empty() {
                        *pinners |= sniper_sq.to_bb();
                    }
                }
            }
        }

        result
    }
}

// General information

impl Board {
    /// Returns the player whose turn it is to move.
    #[inline(always)]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the zobrist hash of the board.
    #[inline(always)]
    pub fn zobrist(&self) -> u64 {
        self.st().zobrist
    }

    /// Returns the key used for transposition lookups: the zobrist key salted
    /// by the 50-move counter.
    #[inline(always)]
    pub fn tt_key(&self) -> u64 {
        self.st().zobrist ^ z_fifty(self.st().rule_50)
    }

    /// Returns the pawn-configuration hash of the board.
    #[inline(always)]
    pub fn pawn_key(&self) -> u64 {
        self.st().pawn_key
    }

    /// Returns the material-configuration hash of the board.
    #[inline(always)]
    pub fn material_key(&self) -> u64 {
        self.st().material_key
    }

    /// Returns the hash of the bishop placement by square color.
    #[inline(always)]
    pub fn bishop_color_key(&self) -> u64 {
        self.st().bishop_color_key
    }

    /// Returns the total number of half-moves played from the game start.
    #[inline(always)]
    pub fn moves_played(&self) -> u16 {
        self.half_moves
    }

    /// Returns the number of half-moves since a pawn move or capture.
    #[inline(always)]
    pub fn rule_50(&self) -> i16 {
        self.st().rule_50
    }

    /// Returns the number of plies since a null move was played.
    #[inline(always)]
    pub fn plies_from_null(&self) -> i16 {
        self.st().plies_from_null
    }

    /// Returns the piece, if any, that was captured by the last move.
    #[inline(always)]
    pub fn piece_captured_last_turn(&self) -> PieceType {
        self.st().captured_piece
    }

    /// Returns the current en-passant square, `NO_SQ` if none.
    #[inline(always)]
    pub fn ep_square(&self) -> SQ {
        self.st().ep_square
    }

    /// Returns the incrementally maintained piece-square score.
    #[inline(always)]
    pub fn psq(&self) -> Score {
        self.st().psq
    }

    /// Returns the occupancy of all pieces.
    #[inline(always)]
    pub fn occupied(&self) -> BitBoard {
        self.occ_all
    }

    /// Returns the occupancy of the given player's pieces.
    #[inline(always)]
    pub fn get_occupied_player(&self, player: Player) -> BitBoard {
        self.occ[player as usize]
    }

    /// Returns the occupancy of the white player's pieces.
    #[inline(always)]
    pub fn occupied_white(&self) -> BitBoard {
        self.occ[Player::White as usize]
    }

    /// Returns the occupancy of the black player's pieces.
    #[inline(always)]
    pub fn occupied_black(&self) -> BitBoard {
        self.occ[Player::Black as usize]
    }

    /// Returns the occupancy of one player's pieces of one type.
    #[inline]
    pub fn piece_bb(&self, player: Player, piece: PieceType) -> BitBoard {
        self.bbs[player as usize][piece as usize]
    }

    /// Returns the rooks and queens of a player.
    #[inline]
    pub fn sliding_piece_bb(&self, player: Player) -> BitBoard {
        self.bbs[player as usize][PieceType::R as usize]
            ^ self.bbs[player as usize][PieceType::Q as usize]
    }

    /// Returns the bishops and queens of a player.
    #[inline]
    pub fn diagonal_piece_bb(&self, player: Player) -> BitBoard {
        self.bbs[player as usize][PieceType::B as usize]
            ^ self.bbs[player as usize][PieceType::Q as usize]
    }

    /// Returns the combined occupancy of both players for a piece type.
    #[inline(always)]
    pub fn piece_bb_both_players(&self, piece: PieceType) -> BitBoard {
        self.bbs[Player::White as usize][piece as usize]
            ^ self.bbs[Player::Black as usize][piece as usize]
    }

    /// Returns the combined occupancy of both players for two piece types.
    #[inline]
    pub fn piece_two_bb_both_players(&self, piece: PieceType, piece2: PieceType) -> BitBoard {
        self.piece_bb_both_players(piece) | self.piece_bb_both_players(piece2)
    }

    /// Returns the occupancy of two piece types for the given player.
    #[inline(always)]
    pub fn piece_two_bb(&self, piece: PieceType, piece2: PieceType, player: Player) -> BitBoard {
        self.bbs[player as usize][piece as usize] | self.bbs[player as usize][piece2 as usize]
    }

    /// Returns the count of a given piece and player.
    #[inline(always)]
    pub fn count_piece(&self, player: Player, piece: PieceType) -> u8 {
        self.piece_counts[player as usize][piece as usize]
    }

    /// Returns the total number of pieces a player has.
    pub fn count_pieces_player(&self, player: Player) -> u8 {
        self.piece_counts[player as usize].iter().sum()
    }

    /// Returns the total number of pieces on the board.
    #[inline]
    pub fn count_all_pieces(&self) -> u8 {
        self.count_pieces_player(Player::White) + self.count_pieces_player(Player::Black)
    }

    /// Returns the piece standing at a square, `Piece::None` if empty.
    #[inline]
    pub fn piece_at_sq(&self, sq: SQ) -> Piece {
        debug_assert!(sq.is_okay());
        self.piece_locations.piece_at(sq)
    }

    /// Returns the player occupying a square, if any.
    #[inline(always)]
    pub fn player_at_sq(&self, s: SQ) -> Option<Player> {
        self.piece_locations.player_at(s)
    }

    /// Returns the square of the given player's king.
    #[inline(always)]
    pub fn king_sq(&self, player: Player) -> SQ {
        self.bbs[player as usize][PieceType::K as usize].to_sq()
    }

    /// Returns the given player's pieces that are pinned to their own king.
    #[inline(always)]
    pub fn pinned_pieces(&self, player: Player) -> BitBoard {
        self.st().blockers_king[player as usize] & self.get_occupied_player(player)
    }

    /// Returns all pieces (of either color) blocking attacks on the given
    /// player's king.
    #[inline(always)]
    pub fn all_pinned_pieces(&self, player: Player) -> BitBoard {
        self.st().blockers_king[player as usize]
    }

    /// Returns the sliders pinning something against the given player's king.
    #[inline(always)]
    pub fn pinning_pieces(&self, player: Player) -> BitBoard {
        self.st().pinners_king[player as usize]
    }

    /// Returns the sum of the player's piece values, pawns excluded.
    #[inline(always)]
    pub fn non_pawn_material(&self, player: Player) -> Value {
        self.st().nonpawn_material[player as usize]
    }

    /// Returns the sum of both players' piece values, pawns excluded.
    #[inline(always)]
    pub fn non_pawn_material_all(&self) -> Value {
        self.st().nonpawn_material[0] + self.st().nonpawn_material[1]
    }

    /// Returns if a player still holds the right to castle on a given side.
    #[inline(always)]
    pub fn can_castle(&self, player: Player, castle_type: CastleType) -> bool {
        self.st().castling.castle_rights(player, castle_type)
    }

    /// Returns the castling rights of a single player.
    #[inline(always)]
    pub fn player_can_castle(&self, player: Player) -> Castling {
        self.st().castling.player_can_castle(player)
    }

    /// Returns if the path between the side-to-move's king and rook is
    /// occupied for the given castle.
    #[inline]
    pub fn castle_impeded(&self, castle_type: CastleType) -> bool {
        let path = BitBoard(CASTLING_PATH[self.turn as usize][castle_type as usize]);
        (path & self.occ_all).is_not_empty()
    }

    /// Returns the starting square of the rook for the given castle of the
    /// side to move.
    #[inline]
    pub fn castling_rook_square(&self, castle_type: CastleType) -> SQ {
        SQ(CASTLING_ROOK_START[self.turn as usize][castle_type as usize])
    }

    /// Returns the last move played, if any.
    #[inline(always)]
    pub fn last_move(&self) -> Option<BitMove> {
        let prev = self.st().prev_move;
        if prev.is_null() {
            None
        } else {
            Some(prev)
        }
    }

    //  ------- CHECKING -------

    /// Returns if the side to move is in check.
    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.st().checkers_bb.is_not_empty()
    }

    /// Returns if the side to move is checkmated.
    ///
    /// Computationally expensive; intended for tests and endpoints, not the
    /// search loop.
    pub fn checkmate(&self) -> bool {
        self.in_check() && self.generate_moves().is_empty()
    }

    /// Returns if the side to move is stalemated.
    pub fn stalemate(&self) -> bool {
        !self.in_check() && self.generate_moves().is_empty()
    }

    /// Returns if the 50-move counter has run out. A mate on the final move
    /// still counts as a mate.
    #[inline]
    pub fn fifty_move_rule(&self) -> bool {
        self.st().rule_50 >= 100 && (!self.in_check() || !self.generate_moves().is_empty())
    }

    /// Returns if the current position already occurred once earlier in the
    /// line. The search treats a single repetition as a draw.
    #[inline(always)]
    pub fn is_repetition(&self) -> bool {
        self.st().repetition
    }

    /// Returns the pieces currently checking the side to move's king.
    #[inline(always)]
    pub fn checkers(&self) -> BitBoard {
        self.st().checkers_bb
    }

    /// Returns the side-to-move pieces that could give a discovered check by
    /// moving off a line to the enemy king.
    #[inline(always)]
    pub fn discovered_check_candidates(&self) -> BitBoard {
        self.st().blockers_king[self.turn.other_player() as usize]
            & self.get_occupied_player(self.turn)
    }

    /// Returns the squares from which a side-to-move piece of the given type
    /// would check the enemy king.
    #[inline(always)]
    pub fn check_sq(&self, pt: PieceType) -> BitBoard {
        self.st().check_sqs[pt as usize]
    }

    /// Returns if a discovered check is possible for the side to move.
    #[inline(always)]
    pub fn discovered_check_possible(&self) -> bool {
        self.discovered_check_candidates().is_not_empty()
    }

    /// Returns all pieces, of both colors, attacking or defending `sq` under
    /// the given occupancy.
    pub fn attackers_to(&self, sq: SQ, occupied: BitBoard) -> BitBoard {
        (pawn_attacks_from(sq, Player::Black) & self.piece_bb(Player::White, PieceType::P))
            | (pawn_attacks_from(sq, Player::White) & self.piece_bb(Player::Black, PieceType::P))
            | (knight_moves(sq) & self.piece_bb_both_players(PieceType::N))
            | (rook_moves(occupied, sq)
                & (self.sliding_piece_bb(Player::White) | self.sliding_piece_bb(Player::Black)))
            | (bishop_moves(occupied, sq)
                & (self.diagonal_piece_bb(Player::White) | self.diagonal_piece_bb(Player::Black)))
            | (king_moves(sq) & self.piece_bb_both_players(PieceType::K))
    }

    //  ------- Move Testing -------

    /// Tests if a pseudo-legally generated move is actually legal: the moving
    /// side's king must not be left in check.
    pub fn legal_move(&self, m: BitMove) -> bool {
        if m.get_src() == m.get_dest() {
            return false;
        }
        let them: Player = self.turn.other_player();
        let src: SQ = m.get_src();
        let src_bb: BitBoard = src.to_bb();
        let dst: SQ = m.get_dest();

        // En passant exposes two squares at once; recompute the slider rays.
        if m.move_type() == MoveType::EnPassant {
            let k_sq: SQ = self.king_sq(self.turn);
            let dst_bb: BitBoard = dst.to_bb();
            let captured_sq: SQ = SQ((dst.0 as i8).wrapping_sub(self.turn.pawn_push()) as u8);
            let occupied: BitBoard =
                (self.occupied() ^ src_bb ^ captured_sq.to_bb()) | dst_bb;

            return (rook_moves(occupied, k_sq) & self.sliding_piece_bb(them)).is_empty()
                && (bishop_moves(occupied, k_sq) & self.diagonal_piece_bb(them)).is_empty();
        }

        let piece = self.piece_at_sq(src);
        if piece == Piece::None {
            return false;
        }

        // King moves may not enter an attacked square. Castles verified
        // square-by-square at generation / pseudo-legality time.
        if piece.type_of() == PieceType::K {
            return m.move_type() == MoveType::Castle
                || (self.attackers_to(dst, self.occupied() ^ src_bb)
                    & self.get_occupied_player(them))
                .is_empty();
        }

        // Otherwise the piece must not be pinned, or must stay on its pin ray.
        (self.pinned_pieces(self.turn) & src_bb).is_empty()
            || aligned(src, dst, self.king_sq(self.turn))
    }

    /// Tests if a move from an outside source (a hash entry, a killer slot)
    /// could have been generated pseudo-legally for this position. Does not
    /// test full legality; follow up with `legal_move`.
    pub fn pseudo_legal_move(&self, m: BitMove) -> bool {
        if m.is_null() || !m.is_okay() {
            return false;
        }
        let us = self.turn;
        let them = us.other_player();
        let src: SQ = m.get_src();
        let dst: SQ = m.get_dest();
        if !src.is_okay() || !dst.is_okay() {
            return false;
        }

        let piece = self.piece_at_sq(src);
        if piece == Piece::None || piece.player_lossy() != us {
            return false;
        }
        let pt = piece.type_of();

        if m.is_castle() {
            return self.castle_pseudo_legal(m, pt);
        }

        // Cannot land on a friendly piece.
        if (self.get_occupied_player(us) & dst.to_bb()).is_not_empty() {
            return false;
        }

        if pt == PieceType::P {
            if m.is_en_passant() {
                let cap_sq = SQ((dst.0 as i8).wrapping_sub(us.pawn_push()) as u8);
                return self.ep_square() == dst
                    && (pawn_attacks_from(src, us) & dst.to_bb()).is_not_empty()
                    && self.piece_at_sq(cap_sq) == Piece::make_lossy(them, PieceType::P)
                    && !self.piece_locations.at_square(dst);
            }
            let on_promo_rank = us.relative_rank_of_sq(dst) == Rank::R8;
            if m.is_promo() != on_promo_rank {
                return false;
            }
            let push = us.pawn_push();
            let single = SQ((src.0 as i8).wrapping_add(push) as u8);
            let capture_shape =
                (pawn_attacks_from(src, us) & dst.to_bb() & self.get_occupied_player(them))
                    .is_not_empty();
            let single_push = dst == single && !self.piece_locations.at_square(dst);
            let double_push = us.relative_rank_of_sq(src) == Rank::R2
                && dst == SQ((single.0 as i8).wrapping_add(push) as u8)
                && !self.piece_locations.at_square(single)
                && !self.piece_locations.at_square(dst);
            if !(capture_shape || single_push || double_push) {
                return false;
            }
        } else {
            if m.is_promo() || m.is_en_passant() {
                return false;
            }
            if (attack_bb(pt, src, self.occupied()) & dst.to_bb()).is_empty() {
                return false;
            }
        }

        // While in check, anything but a king move must block or capture the
        // single checker.
        if self.in_check() && pt != PieceType::K {
            let checkers = self.checkers();
            if checkers.more_than_one() {
                return false;
            }
            let checker_sq = checkers.bit_scan_forward();
            let mut target = between_bb(checker_sq, self.king_sq(us)) | checkers;
            if m.is_en_passant() {
                // Capturing the checking pawn en passant lands beside it.
                target |= self.ep_square().to_bb();
            }
            if (target & dst.to_bb()).is_empty() {
                return false;
            }
        }

        true
    }

    /// Full verification of a castle arriving from outside the generator.
    fn castle_pseudo_legal(&self, m: BitMove, pt: PieceType) -> bool {
        let us = self.turn;
        let src = m.get_src();
        let dst = m.get_dest();
        if pt != PieceType::K || self.in_check() {
            return false;
        }
        let king_side = dst > src;
        let side = if king_side {
            CastleType::KingSide
        } else {
            CastleType::QueenSide
        };
        if src != us.relative_square(SQ::E1)
            || dst
                != us.relative_square(if king_side { SQ::G1 } else { SQ::C1 })
        {
            return false;
        }
        if !self.can_castle(us, side) || self.castle_impeded(side) {
            return false;
        }
        if self.piece_at_sq(self.castling_rook_square(side))
            != Piece::make_lossy(us, PieceType::R)
        {
            return false;
        }
        // The king's transit squares must not be attacked.
        let enemies = self.get_occupied_player(us.other_player());
        let mut s: SQ = dst;
        while s != src {
            if (self.attackers_to(s, self.occupied()) & enemies).is_not_empty() {
                return false;
            }
            s = if king_side { s - SQ(1) } else { s + SQ(1) };
        }
        true
    }

    /// Returns if a move gives check to the opposing player's king.
    ///
    /// # Safety
    ///
    /// Assumes the move is at least pseudo-legal for the current position.
    pub fn gives_check(&self, m: BitMove) -> bool {
        let src: SQ = m.get_src();
        let dst: SQ = m.get_dest();
        let src_bb: BitBoard = src.to_bb();
        let dst_bb: BitBoard = dst.to_bb();
        let opp_king_sq: SQ = self.king_sq(self.turn.other_player());

        debug_assert_ne!(src, dst);
        debug_assert_eq!(self.piece_locations.player_at(src), Some(self.turn));

        // Direct check from the precomputed checking squares.
        let src_pt = self.piece_locations.piece_type_at(src);
        if (self.check_sq(src_pt) & dst_bb).is_not_empty() {
            return true;
        }

        // Discovered check: moving off the king line while not staying on it.
        if (self.discovered_check_candidates() & src_bb).is_not_empty()
            && !aligned(src, dst, opp_king_sq)
        {
            return true;
        }

        match m.move_type() {
            MoveType::Normal => false,
            MoveType::Promotion => {
                // The promoted piece may attack the king from its new square.
                let occ = self.occupied() ^ src_bb;
                let attacks_bb = match m.promo_piece() {
                    PieceType::N => knight_moves(dst),
                    PieceType::B => bishop_moves(occ, dst),
                    PieceType::R => rook_moves(occ, dst),
                    PieceType::Q => queen_moves(occ, dst),
                    _ => unreachable!(),
                };
                (attacks_bb & opp_king_sq.to_bb()).is_not_empty()
            }
            MoveType::EnPassant => {
                // Removing the captured pawn can uncover a slider.
                let captured_sq: SQ = SQ::make(dst.file(), src.rank());
                let b: BitBoard = (self.occupied() ^ src_bb ^ captured_sq.to_bb()) | dst_bb;

                ((rook_moves(b, opp_king_sq) & self.sliding_piece_bb(self.turn))
                    | (bishop_moves(b, opp_king_sq) & self.diagonal_piece_bb(self.turn)))
                .is_not_empty()
            }
            MoveType::Castle => {
                let king_side = dst > src;
                let r_from = self.castle_rook_from(self.turn, king_side);
                let r_to = self.castle_rook_to(self.turn, king_side);

                let occ_after =
                    (self.occupied() ^ src_bb ^ r_from.to_bb()) | dst_bb | r_to.to_bb();
                (rook_moves(occ_after, r_to) & opp_king_sq.to_bb()).is_not_empty()
            }
        }
    }

    /// Static exchange evaluation: returns if the exchanges following `m` on
    /// its destination square net at least `threshold` centipawns.
    ///
    /// Pinned attackers stay out of the exchange while their pinner remains
    /// on the board.
    pub fn see_ge(&self, m: BitMove, threshold: Value) -> bool {
        if m.move_type() != MoveType::Normal {
            return 0 >= threshold;
        }

        let from: SQ = m.get_src();
        let to: SQ = m.get_dest();

        let mut swap: Value = SEE_VALUE[self.piece_locations.piece_type_at(to) as usize] - threshold;
        if swap < 0 {
            return false;
        }

        swap = SEE_VALUE[self.piece_locations.piece_type_at(from) as usize] - swap;
        if swap <= 0 {
            return true;
        }

        let mut occupied: BitBoard = self.occupied() ^ from.to_bb() ^ to.to_bb();
        // The exchange runs from the moving piece's side, which is not
        // necessarily the side to move (the reverse-move probe runs through
        // here with the colors flipped).
        let mut stm: Player = match self.piece_locations.piece_at(from).player() {
            Some(p) => p,
            None => self.turn,
        };
        let mut attackers: BitBoard = self.attackers_to(to, occupied);
        let mut res: bool = true;

        loop {
            stm = stm.other_player();
            attackers &= occupied;

            let mut stm_attackers: BitBoard = attackers & self.get_occupied_player(stm);
            if stm_attackers.is_empty() {
                break;
            }

            // An attacker pinned against its own king cannot join in while
            // the pinning slider is still on the board.
            if (self.pinning_pieces(stm) & occupied).is_not_empty() {
                stm_attackers &= !self.st().blockers_king[stm as usize];
                if stm_attackers.is_empty() {
                    break;
                }
            }

            res = !res;

            // Capture with the least valuable attacker, then open any x-rays
            // behind it.
            let mut bb: BitBoard;

            bb = stm_attackers & self.piece_bb(stm, PieceType::P);
            if bb.is_not_empty() {
                swap = SEE_VALUE[PieceType::P as usize] - swap;
                if swap < res as Value {
                    break;
                }
                occupied ^= bb.lsb();
                attackers |= bishop_moves(occupied, to)
                    & self.piece_two_bb_both_players(PieceType::B, PieceType::Q);
                continue;
            }

            bb = stm_attackers & self.piece_bb(stm, PieceType::N);
            if bb.is_not_empty() {
                swap = SEE_VALUE[PieceType::N as usize] - swap;
                if swap < res as Value {
                    break;
                }
                occupied ^= bb.lsb();
                continue;
            }

            bb = stm_attackers & self.piece_bb(stm, PieceType::B);
            if bb.is_not_empty() {
                swap = SEE_VALUE[PieceType::B as usize] - swap;
                if swap < res as Value {
                    break;
                }
                occupied ^= bb.lsb();
                attackers |= bishop_moves(occupied, to)
                    & self.piece_two_bb_both_players(PieceType::B, PieceType::Q);
                continue;
            }

            bb = stm_attackers & self.piece_bb(stm, PieceType::R);
            if bb.is_not_empty() {
                swap = SEE_VALUE[PieceType::R as usize] - swap;
                if swap < res as Value {
                    break;
                }
                occupied ^= bb.lsb();
                attackers |= rook_moves(occupied, to)
                    & self.piece_two_bb_both_players(PieceType::R, PieceType::Q);
                continue;
            }

            bb = stm_attackers & self.piece_bb(stm, PieceType::Q);
            if bb.is_not_empty() {
                swap = SEE_VALUE[PieceType::Q as usize] - swap;
                if swap < res as Value {
                    break;
                }
                occupied ^= bb.lsb();
                attackers |= (bishop_moves(occupied, to)
                    & self.piece_two_bb_both_players(PieceType::B, PieceType::Q))
                    | (rook_moves(occupied, to)
                        & self.piece_two_bb_both_players(PieceType::R, PieceType::Q));
                continue;
            }

            // King: the capture only stands if the opponent has no
            // defenders left.
            return if (attackers & !self.get_occupied_player(stm)).is_not_empty() {
                !res
            } else {
                res
            };
        }

        res
    }

    /// Computes the zobrist key the position would have after `m`, without
    /// making the move. Used for transposition-table prefetching.
    pub fn key_after(&self, m: BitMove) -> u64 {
        let src = m.get_src();
        let dst = m.get_dest();
        let piece = self.piece_at_sq(src);
        let captured = self.piece_at_sq(dst);

        let mut key: u64 = self.zobrist() ^ z_side();
        if captured != Piece::None {
            key ^= z_square(dst, captured);
        }
        if piece != Piece::None {
            key ^= z_square(src, piece) ^ z_square(dst, piece);
        }
        key
    }

    /// Returns the piece a move would transport.
    ///
    /// # Safety
    ///
    /// Assumes the move is pseudo-legal for the current position.
    #[inline]
    pub fn moved_piece(&self, m: BitMove) -> Piece {
        let src = m.get_src();
        self.piece_at_sq(src)
    }

    /// Returns the piece type a move would capture, `PieceType::None` for a
    /// quiet move.
    #[inline]
    pub fn captured_piece(&self, m: BitMove) -> PieceType {
        if m.is_en_passant() {
            return PieceType::P;
        }
        if m.is_castle() {
            return PieceType::None;
        }
        let dst = m.get_dest();
        self.piece_locations.piece_type_at(dst)
    }

    /// Returns if a move is a capture of any kind.
    #[inline]
    pub fn is_capture(&self, m: BitMove) -> bool {
        self.captured_piece(m) != PieceType::None
    }

    /// Returns if a move is a capture or a promotion.
    #[inline]
    pub fn is_capture_or_promotion(&self, m: BitMove) -> bool {
        m.is_promo() || self.is_capture(m)
    }

    /// Returns if a move is a pawn push into the opponent's half beyond its
    /// fourth rank. Such pawns are exempt from most pruning.
    #[inline]
    pub fn advanced_pawn_push(&self, m: BitMove) -> bool {
        self.piece_locations.piece_type_at(m.get_src()) == PieceType::P
            && self.turn.relative_rank_of_sq(m.get_dest()) > Rank::R4
    }

    /// Applies a move given in UCI long algebraic form, if it matches a legal
    /// move of the current position. Returns whether a move was applied.
    pub fn apply_uci_move(&mut self, uci_move: &str) -> bool {
        let uci_move = self.translate_castle_str(uci_move);
        let all_moves: MoveList = self.generate_moves();
        let bit_move: Option<BitMove> = all_moves
            .iter()
            .find(|m| m.stringify() == uci_move)
            .cloned();
        if let Some(mov) = bit_move {
            self.make_move(mov);
            return true;
        }
        false
    }

    /// Accepts `O-O` / `O-O-O` and Chess960 king-takes-rook castle strings,
    /// translating them to the internal king-destination form.
    fn translate_castle_str(&self, uci_move: &str) -> String {
        let us = self.turn;
        match uci_move {
            "O-O" | "0-0" => format!(
                "{}{}",
                us.relative_square(SQ::E1),
                us.relative_square(SQ::G1)
            ),
            "O-O-O" | "0-0-0" => format!(
                "{}{}",
                us.relative_square(SQ::E1),
                us.relative_square(SQ::C1)
            ),
            _ => {
                if self.chess960 {
                    // King-takes-rook form: e1h1 means castle short.
                    let ks = format!(
                        "{}{}",
                        us.relative_square(SQ::E1),
                        us.relative_square(SQ::H1)
                    );
                    let qs = format!(
                        "{}{}",
                        us.relative_square(SQ::E1),
                        us.relative_square(SQ::A1)
                    );
                    if uci_move == ks {
                        return format!(
                            "{}{}",
                            us.relative_square(SQ::E1),
                            us.relative_square(SQ::G1)
                        );
                    } else if uci_move == qs {
                        return format!(
                            "{}{}",
                            us.relative_square(SQ::E1),
                            us.relative_square(SQ::C1)
                        );
                    }
                }
                uci_move.to_string()
            }
        }
    }

    /// Creates a FEN string of the board.
    pub fn fen(&self) -> String {
        let mut s = String::default();
        let mut blanks = 0;
        for idx in 0..SQ_CNT as u8 {
            // FEN ordering starts from the eighth rank.
            let sq = SQ((idx % 8) + (8 * (7 - (idx / 8))));
            if sq.file() == File::A && sq.rank() != Rank::R8 {
                if blanks != 0 {
                    s.push(char::from_digit(blanks, 10).unwrap());
                    blanks = 0;
                }
                s.push('/');
            }
            let piece = self.piece_at_sq(sq);
            if piece == Piece::None {
                blanks += 1;
            } else {
                if blanks != 0 {
                    s.push(char::from_digit(blanks, 10).unwrap());
                    blanks = 0;
                }
                s.push(piece.character_lossy());
            }
        }

        if blanks != 0 {
            s.push(char::from_digit(blanks, 10).unwrap());
        }

        s.push(' ');
        s.push(match self.turn {
            Player::White => 'w',
            Player::Black => 'b',
        });
        s.push(' ');
        s.push_str(&self.st().castling.pretty_string());
        s.push(' ');

        if self.ep_square() == NO_SQ {
            s.push('-');
        } else {
            let ep = self.ep_square();
            s.push(FILE_DISPLAYS[ep.file_idx_of_sq() as usize]);
            s.push(RANK_DISPLAYS[ep.rank_idx_of_sq() as usize]);
        }
        s.push(' ');
        s.push_str(&format!("{}", self.rule_50()));
        s.push(' ');
        s.push_str(&format!("{}", (self.half_moves / 2) + 1));

        s
    }

    /// Returns a pretty string of the board for terminal display. Capital
    /// letters are white pieces, lowercase black.
    pub fn pretty_string(&self) -> String {
        let mut s = String::with_capacity(SQ_CNT * 2 + 8);
        for sq in SQ_DISPLAY_ORDER.iter() {
            let piece = self.piece_at_sq(SQ(*sq));
            let ch = piece.character().unwrap_or('-');
            s.push(ch);
            s.push(' ');
            if sq % 8 == 7 {
                s.push('\n');
            }
        }
        s
    }

    /// Checks the basic invariants of the board, returning false if something
    /// is off. Debug builds run it after every make/unmake.
    pub fn is_okay(&self) -> bool {
        if cfg!(debug_assertions) {
            self.check_full()
        } else {
            true
        }
    }

    fn check_full(&self) -> bool {
        // King presence and en-passant sanity.
        if self.count_piece(Player::White, PieceType::K) != 1
            || self.count_piece(Player::Black, PieceType::K) != 1
        {
            return false;
        }
        if self.st().ep_square != NO_SQ
            && self.turn.relative_rank_of_sq(self.st().ep_square) != Rank::R6
        {
            return false;
        }

        // Occupancy consistency.
        if self.occupied_white() & self.occupied_black() != BitBoard(0) {
            return false;
        }
        if self.occupied_white() | self.occupied_black() != self.occupied() {
            return false;
        }
        let mut all = BitBoard(0);
        for player in &ALL_PLAYERS {
            for pt in &ALL_PIECE_TYPES {
                let bb = self.piece_bb(*player, *pt);
                if (bb & all).is_not_empty() {
                    return false;
                }
                all |= bb;
                if bb.count_bits() != self.piece_counts[*player as usize][*pt as usize] {
                    return false;
                }
            }
        }
        if all != self.occupied() {
            return false;
        }

        // Square map agreement.
        for sq in 0..SQ_CNT as u8 {
            let piece = self.piece_locations.piece_at(SQ(sq));
            if piece == Piece::None {
                if (SQ(sq).to_bb() & self.occupied()).is_not_empty() {
                    return false;
                }
            } else {
                let player = piece.player_lossy();
                if (self.piece_bb(player, piece.type_of()) & SQ(sq).to_bb()).is_empty() {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pos_counts() {
        let board = Board::start_pos();
        assert_eq!(board.count_all_pieces(), 32);
        assert_eq!(board.count_piece(Player::White, PieceType::P), 8);
        assert_eq!(board.turn(), Player::White);
        assert_eq!(board.moves_played(), 0);
        assert!(!board.in_check());
    }

    #[test]
    fn fen_round_trip() {
        for fen in fen::ALL_FENS.iter() {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(&board.fen(), fen);
        }
    }

    #[test]
    fn make_unmake_restores() {
        let mut board = Board::start_pos();
        let fen = board.fen();
        let zob = board.zobrist();
        let moves = board.generate_moves();
        for mv in moves.iter() {
            board.make_move(*mv);
            board.unmake_move();
            assert_eq!(board.fen(), fen);
            assert_eq!(board.zobrist(), zob);
        }
    }

    #[test]
    fn key_after_normal_moves() {
        let mut board = Board::start_pos();
        let moves = board.generate_moves();
        for mv in moves.iter().filter(|m| m.move_type() == MoveType::Normal) {
            let predicted = board.key_after(*mv);
            board.make_move(*mv);
            // A double push may add an ep contribution on top.
            if board.ep_square() == NO_SQ {
                assert_eq!(predicted, board.zobrist());
            }
            board.unmake_move();
        }
    }

    #[test]
    fn threefold_repetition_knights() {
        let mut board = Board::start_pos();
        for mv in &["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
            assert!(board.apply_uci_move(mv));
        }
        assert!(board.is_repetition());
    }

    #[test]
    fn stalemate_position() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!board.in_check());
        assert_eq!(board.generate_moves().len(), 0);
        assert!(board.stalemate());
    }

    #[test]
    fn see_simple() {
        // A pawn takes a defended pawn: even exchange.
        let board = Board::from_fen("4k3/8/3p4/2p5/3P4/8/8/4K3 w - - 0 1").unwrap();
        let mv = BitMove::make_normal(SQ::D4, SQ::C5);
        assert!(board.see_ge(mv, 0));
        assert!(!board.see_ge(mv, 1));

        // Monotone in the threshold.
        assert!(board.see_ge(mv, -100));
    }

    #[test]
    fn see_hanging_queen_capture() {
        // Queen takes a pawn defended by a pawn: loses material.
        let board = Board::from_fen("4k3/8/3p4/2p5/8/8/3Q4/4K3 w - - 0 1").unwrap();
        let mv = BitMove::make_normal(SQ::D2, SQ::D6);
        assert!(!board.see_ge(mv, 0));
        assert!(board.see_ge(mv, 100 - 900));
    }
}
