//! Dummy types implementing traits for the `Player`, `GenTypes`, and
//! `PieceType` enums.
//!
//! These exist purely so that move generation and attack helpers can be
//! monomorphized per player / generation class at compile time, rather than
//! branching on an enum value in the hot loop. They shouldn't be used in
//! place of their enum counterparts anywhere else.

use super::bitboard::BitBoard;
use super::sq::SQ;
use super::{GenTypes, PieceType, Player};

/// Compile-time specialization over a `Player`.
pub trait PlayerTrait {
    /// Returns this side.
    fn player() -> Player;

    /// Returns the opposing side.
    fn opp_player() -> Player;

    /// Returns the index of this side.
    fn player_idx() -> usize;

    /// Given a square, returns the square one step toward this side's back rank.
    fn down(sq: SQ) -> SQ;

    /// Given a square, returns the square one step toward the enemy back rank.
    fn up(sq: SQ) -> SQ;

    /// Shift the board one rank toward this side's back rank.
    fn shift_down(bb: BitBoard) -> BitBoard;

    /// Shift the board one rank toward the enemy back rank.
    fn shift_up(bb: BitBoard) -> BitBoard;

    /// Shift the board one step down-left; the leftmost file falls off.
    fn shift_down_left(bb: BitBoard) -> BitBoard;

    /// Shift the board one step down-right; the rightmost file falls off.
    fn shift_down_right(bb: BitBoard) -> BitBoard;

    /// Shift the board one step up-left; the leftmost file falls off.
    fn shift_up_left(bb: BitBoard) -> BitBoard;

    /// Shift the board one step up-right; the rightmost file falls off.
    fn shift_up_right(bb: BitBoard) -> BitBoard;

    /// Given a square, returns the square one step down-left of it.
    fn down_left(sq: SQ) -> SQ;

    /// Given a square, returns the square one step down-right of it.
    fn down_right(sq: SQ) -> SQ;

    /// Given a square, returns the square one step up-left of it.
    fn up_left(sq: SQ) -> SQ;

    /// Given a square, returns the square one step up-right of it.
    fn up_right(sq: SQ) -> SQ;
}

/// Dummy type representing `Player::White`.
pub struct WhiteType {}

/// Dummy type representing `Player::Black`.
pub struct BlackType {}

impl PlayerTrait for WhiteType {
    #[inline(always)]
    fn player() -> Player {
        Player::White
    }

    #[inline(always)]
    fn opp_player() -> Player {
        Player::Black
    }

    #[inline(always)]
    fn player_idx() -> usize {
        Player::White as usize
    }

    #[inline(always)]
    fn down(sq: SQ) -> SQ {
        sq - SQ(8)
    }

    #[inline(always)]
    fn up(sq: SQ) -> SQ {
        sq + SQ(8)
    }

    #[inline(always)]
    fn shift_down(bb: BitBoard) -> BitBoard {
        bb >> 8
    }

    #[inline(always)]
    fn shift_up(bb: BitBoard) -> BitBoard {
        bb << 8
    }

    #[inline(always)]
    fn shift_down_left(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard::FILE_A) >> 9
    }

    #[inline(always)]
    fn shift_down_right(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard::FILE_H) >> 7
    }

    #[inline(always)]
    fn shift_up_left(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard::FILE_A) << 7
    }

    #[inline(always)]
    fn shift_up_right(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard::FILE_H) << 9
    }

    #[inline(always)]
    fn down_left(sq: SQ) -> SQ {
        sq - SQ(9)
    }

    #[inline(always)]
    fn down_right(sq: SQ) -> SQ {
        sq - SQ(7)
    }

    #[inline(always)]
    fn up_left(sq: SQ) -> SQ {
        sq + SQ(7)
    }

    #[inline(always)]
    fn up_right(sq: SQ) -> SQ {
        sq + SQ(9)
    }
}

impl PlayerTrait for BlackType {
    #[inline(always)]
    fn player() -> Player {
        Player::Black
    }

    #[inline(always)]
    fn opp_player() -> Player {
        Player::White
    }

    #[inline(always)]
    fn player_idx() -> usize {
        Player::Black as usize
    }

    #[inline(always)]
    fn down(sq: SQ) -> SQ {
        sq + SQ(8)
    }

    #[inline(always)]
    fn up(sq: SQ) -> SQ {
        sq - SQ(8)
    }

    #[inline(always)]
    fn shift_down(bb: BitBoard) -> BitBoard {
        bb << 8
    }

    #[inline(always)]
    fn shift_up(bb: BitBoard) -> BitBoard {
        bb >> 8
    }

    #[inline(always)]
    fn shift_down_left(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard::FILE_H) << 9
    }

    #[inline(always)]
    fn shift_down_right(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard::FILE_A) << 7
    }

    #[inline(always)]
    fn shift_up_left(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard::FILE_H) >> 7
    }

    #[inline(always)]
    fn shift_up_right(bb: BitBoard) -> BitBoard {
        (bb & !BitBoard::FILE_A) >> 9
    }

    #[inline(always)]
    fn down_left(sq: SQ) -> SQ {
        sq + SQ(9)
    }

    #[inline(always)]
    fn down_right(sq: SQ) -> SQ {
        sq + SQ(7)
    }

    #[inline(always)]
    fn up_left(sq: SQ) -> SQ {
        sq - SQ(7)
    }

    #[inline(always)]
    fn up_right(sq: SQ) -> SQ {
        sq - SQ(9)
    }
}

/// Compile-time specialization over a `GenTypes`.
pub trait GenTypeTrait {
    /// Returns the `GenTypes`.
    fn gen_type() -> GenTypes;
}

/// Dummy type representing `GenTypes::All`.
pub struct AllGenType {}
/// Dummy type representing `GenTypes::Captures`.
pub struct CapturesGenType {}
/// Dummy type representing `GenTypes::Quiets`.
pub struct QuietsGenType {}
/// Dummy type representing `GenTypes::QuietChecks`.
pub struct QuietChecksGenType {}
/// Dummy type representing `GenTypes::Evasions`.
pub struct EvasionsGenType {}
/// Dummy type representing `GenTypes::NonEvasions`.
pub struct NonEvasionsGenType {}
/// Dummy type representing `GenTypes::PawnAdvances`.
pub struct PawnAdvancesGenType {}
/// Dummy type representing `GenTypes::QueenChecks`.
pub struct QueenChecksGenType {}
/// Dummy type representing `GenTypes::CastleOnly`.
pub struct CastleOnlyGenType {}

impl GenTypeTrait for AllGenType {
    #[inline(always)]
    fn gen_type() -> GenTypes {
        GenTypes::All
    }
}

impl GenTypeTrait for CapturesGenType {
    #[inline(always)]
    fn gen_type() -> GenTypes {
        GenTypes::Captures
    }
}

impl GenTypeTrait for QuietsGenType {
    #[inline(always)]
    fn gen_type() -> GenTypes {
        GenTypes::Quiets
    }
}

impl GenTypeTrait for QuietChecksGenType {
    #[inline(always)]
    fn gen_type() -> GenTypes {
        GenTypes::QuietChecks
    }
}

impl GenTypeTrait for EvasionsGenType {
    #[inline(always)]
    fn gen_type() -> GenTypes {
        GenTypes::Evasions
    }
}

impl GenTypeTrait for NonEvasionsGenType {
    #[inline(always)]
    fn gen_type() -> GenTypes {
        GenTypes::NonEvasions
    }
}

impl GenTypeTrait for PawnAdvancesGenType {
    #[inline(always)]
    fn gen_type() -> GenTypes {
        GenTypes::PawnAdvances
    }
}

impl GenTypeTrait for QueenChecksGenType {
    #[inline(always)]
    fn gen_type() -> GenTypes {
        GenTypes::QueenChecks
    }
}

impl GenTypeTrait for CastleOnlyGenType {
    #[inline(always)]
    fn gen_type() -> GenTypes {
        GenTypes::CastleOnly
    }
}

/// Compile-time specialization over a `PieceType`.
pub trait PieceTrait {
    /// Returns the `PieceType`.
    fn piece_type() -> PieceType;
}

/// Dummy type representing a pawn.
pub struct PawnType {}
/// Dummy type representing a knight.
pub struct KnightType {}
/// Dummy type representing a bishop.
pub struct BishopType {}
/// Dummy type representing a rook.
pub struct RookType {}
/// Dummy type representing a queen.
pub struct QueenType {}
/// Dummy type representing a king.
pub struct KingType {}

impl PieceTrait for PawnType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::P
    }
}

impl PieceTrait for KnightType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::N
    }
}

impl PieceTrait for BishopType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::B
    }
}

impl PieceTrait for RookType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::R
    }
}

impl PieceTrait for QueenType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::Q
    }
}

impl PieceTrait for KingType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::K
    }
}
