//! Accessors for the statically computed lookup tables.
//!
//! # Safety
//!
//! These functions read static tables that must have been filled by
//! [`init_statics`] first. The `Board` constructors call it for you; code
//! poking at the tables directly must do so itself.
//!
//! [`init_statics`]: fn.init_statics.html

use super::boards;
use super::magic;
use super::psqt;
use super::zobrist;

use crate::core::score::{Score, Value};
use crate::core::sq::SQ;
use crate::core::{File, Piece, PieceType, Player, Rank};
use crate::core::bitboard::BitBoard;

use std::sync::atomic::{compiler_fence, fence, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the static lookup tables. Guaranteed to run the initialization
/// only once, no matter how often or from how many threads it is called.
#[cold]
pub fn init_statics() {
    INIT.call_once(|| {
        compiler_fence(Ordering::SeqCst);
        fence(Ordering::SeqCst);
        zobrist::init_zobrist();
        psqt::init_psqt();
        magic::init_magics();
        compiler_fence(Ordering::SeqCst);
        boards::init_boards();
        fence(Ordering::SeqCst);
        compiler_fence(Ordering::SeqCst);
    });
}

// MAGIC FUNCTIONS

/// Bishop attack set from `sq` with the given occupancy. Includes squares
/// occupied by either side; mask off friendly pieces before generating moves.
#[inline(always)]
pub fn bishop_moves(occupied: BitBoard, sq: SQ) -> BitBoard {
    debug_assert!(sq.is_okay());
    BitBoard(magic::bishop_attacks(occupied.0, sq.0))
}

/// Rook attack set from `sq` with the given occupancy.
#[inline(always)]
pub fn rook_moves(occupied: BitBoard, sq: SQ) -> BitBoard {
    debug_assert!(sq.is_okay());
    BitBoard(magic::rook_attacks(occupied.0, sq.0))
}

/// Queen attack set from `sq` with the given occupancy.
#[inline(always)]
pub fn queen_moves(occupied: BitBoard, sq: SQ) -> BitBoard {
    debug_assert!(sq.is_okay());
    BitBoard(magic::rook_attacks(occupied.0, sq.0) | magic::bishop_attacks(occupied.0, sq.0))
}

/// Attack set for a non-pawn piece type from `sq` under the given occupancy.
///
/// # Panics
///
/// Asserts that the piece type is not a pawn; pawn attacks depend on the
/// player and are queried through [`pawn_attacks_from`].
///
/// [`pawn_attacks_from`]: fn.pawn_attacks_from.html
#[inline]
pub fn attack_bb(piece: PieceType, sq: SQ, occupied: BitBoard) -> BitBoard {
    debug_assert!(sq.is_okay());
    match piece {
        PieceType::N => knight_moves(sq),
        PieceType::B => bishop_moves(occupied, sq),
        PieceType::R => rook_moves(occupied, sq),
        PieceType::Q => queen_moves(occupied, sq),
        PieceType::K => king_moves(sq),
        _ => {
            assert!(false, "attack_bb on a pawn or empty piece");
            BitBoard(0)
        }
    }
}

// BOARD FUNCTIONS

/// Knight attack set from a square.
#[inline(always)]
pub fn knight_moves(sq: SQ) -> BitBoard {
    BitBoard(boards::knight_moves(sq))
}

/// King attack set from a square.
#[inline(always)]
pub fn king_moves(sq: SQ) -> BitBoard {
    BitBoard(boards::king_moves(sq))
}

/// Distance between two squares, in king moves.
#[inline(always)]
pub fn distance_of_sqs(sq_one: SQ, sq_two: SQ) -> u8 {
    boards::distance_of_sqs(sq_one, sq_two)
}

/// The full line (diagonal / file / rank) both squares lie on, if any.
#[inline(always)]
pub fn line_bb(sq_one: SQ, sq_two: SQ) -> BitBoard {
    BitBoard(boards::line_bb(sq_one, sq_two))
}

/// The squares strictly between the two given squares, if aligned.
#[inline(always)]
pub fn between_bb(sq_one: SQ, sq_two: SQ) -> BitBoard {
    BitBoard(boards::between_bb(sq_one, sq_two))
}

/// The files adjacent to the square's file.
#[inline(always)]
pub fn adjacent_sq_file(sq: SQ) -> BitBoard {
    BitBoard(boards::adjacent_sq_file(sq))
}

/// The files adjacent to the given file.
#[inline(always)]
pub fn adjacent_file(f: File) -> BitBoard {
    BitBoard(boards::adjacent_file(f))
}

/// The squares a pawn of `player` on `sq` attacks.
#[inline(always)]
pub fn pawn_attacks_from(sq: SQ, player: Player) -> BitBoard {
    BitBoard(boards::pawn_attacks_from(sq, player))
}

/// Returns if three squares share a diagonal, file, or rank.
#[inline(always)]
pub fn aligned(s1: SQ, s2: SQ, s3: SQ) -> bool {
    boards::aligned(s1, s2, s3)
}

/// All squares on ranks in front of the given one, from `player`'s view.
#[inline(always)]
pub fn forward_rank_bb(player: Player, rank: Rank) -> BitBoard {
    BitBoard(boards::forward_rank_bb(player, rank))
}

/// The squares a pawn of `player` could ever attack while advancing from `sq`.
#[inline(always)]
pub fn pawn_attacks_span(player: Player, sq: SQ) -> BitBoard {
    BitBoard(boards::pawn_attacks_span(player, sq))
}

/// The squares directly in front of `sq` along its file.
#[inline(always)]
pub fn forward_file_bb(player: Player, sq: SQ) -> BitBoard {
    BitBoard(boards::forward_file_bb(player, sq))
}

/// The passed-pawn test mask for a pawn of `player` on `sq`.
#[inline(always)]
pub fn passed_pawn_mask(player: Player, sq: SQ) -> BitBoard {
    BitBoard(boards::passed_pawn_mask(player, sq))
}

/// The king's safety zone around a square.
#[inline(always)]
pub fn king_zone(sq: SQ) -> BitBoard {
    BitBoard(boards::king_zone(sq))
}

// ZOBRIST FUNCTIONS

/// The zobrist key for a piece at a square.
#[inline(always)]
pub fn z_square(sq: SQ, piece: Piece) -> u64 {
    zobrist::z_square(sq, piece)
}

/// The zobrist key for an en-passant square's file.
#[inline(always)]
pub fn z_ep(sq: SQ) -> u64 {
    zobrist::z_ep(sq)
}

/// The zobrist key for a castling-rights set.
///
/// Undefined behavior if the bits are greater than 15.
#[inline(always)]
pub fn z_castle(castle: u8) -> u64 {
    zobrist::z_castle(castle)
}

/// The zobrist key for black being the side to move.
#[inline(always)]
pub fn z_side() -> u64 {
    zobrist::z_side()
}

/// The zobrist key for having no pawns.
#[inline(always)]
pub fn z_no_pawns() -> u64 {
    zobrist::z_no_pawns()
}

/// The 50-move salt mixed into the transposition key.
#[inline(always)]
pub fn z_fifty(rule_50: i16) -> u64 {
    zobrist::z_fifty(rule_50)
}

// PSQT FUNCTIONS

/// The piece-square score for a player's piece at a square.
#[inline(always)]
pub fn psq(piece: Piece, sq: SQ) -> Score {
    psqt::psq(piece, sq)
}

/// The value of a piece; end-game value if `eg` is true, else mid-game.
#[inline(always)]
pub fn piece_value(piece: Piece, eg: bool) -> Value {
    psqt::piece_value(piece, eg)
}

/// The value of a piece type; end-game value if `eg` is true, else mid-game.
#[inline(always)]
pub fn piecetype_value(piece_type: PieceType, eg: bool) -> Value {
    psqt::piecetype_value(piece_type, eg)
}
