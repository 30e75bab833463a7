//! Masks and other constants describing the geometry of the board.

use super::sq::SQ;

/// The number of players on a chessboard.
pub const PLAYER_CNT: usize = 2;
/// The number of piece-type slots, including the empty and spare slots.
pub const PIECE_TYPE_CNT: usize = 8;
/// The number of (player, piece-type) combinations, including empty slots.
pub const PIECE_CNT: usize = 16;
/// The number of squares on a chessboard.
pub const SQ_CNT: usize = 64;
/// The number of files on a chessboard.
pub const FILE_CNT: usize = 8;
/// The number of ranks on a chessboard.
pub const RANK_CNT: usize = 8;
/// The number of game phases (mid game, end game).
pub const PHASE_CNT: usize = 2;
/// The number of castling directions for a single player.
pub const CASTLING_SIDES: usize = 2;
/// The number of distinct castling-rights sets for both players.
pub const ALL_CASTLING_RIGHTS: usize = 16;

/// Bit representation of file A.
pub const FILE_A: u64 = 0x0101_0101_0101_0101;
/// Bit representation of file B.
pub const FILE_B: u64 = FILE_A << 1;
/// Bit representation of file C.
pub const FILE_C: u64 = FILE_A << 2;
/// Bit representation of file D.
pub const FILE_D: u64 = FILE_A << 3;
/// Bit representation of file E.
pub const FILE_E: u64 = FILE_A << 4;
/// Bit representation of file F.
pub const FILE_F: u64 = FILE_A << 5;
/// Bit representation of file G.
pub const FILE_G: u64 = FILE_A << 6;
/// Bit representation of file H.
pub const FILE_H: u64 = FILE_A << 7;

/// Bit representation of rank 1.
pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
/// Bit representation of rank 2.
pub const RANK_2: u64 = RANK_1 << 8;
/// Bit representation of rank 3.
pub const RANK_3: u64 = RANK_1 << 16;
/// Bit representation of rank 4.
pub const RANK_4: u64 = RANK_1 << 24;
/// Bit representation of rank 5.
pub const RANK_5: u64 = RANK_1 << 32;
/// Bit representation of rank 6.
pub const RANK_6: u64 = RANK_1 << 40;
/// Bit representation of rank 7.
pub const RANK_7: u64 = RANK_1 << 48;
/// Bit representation of rank 8.
pub const RANK_8: u64 = RANK_1 << 56;

/// Bit representation of all dark squares.
pub const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;
/// Bit representation of all light squares.
pub const LIGHT_SQUARES: u64 = !DARK_SQUARES;

/// All files, indexed from file A to file H.
pub static FILE_BB: [u64; FILE_CNT] = [
    FILE_A, FILE_B, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H,
];

/// All ranks, indexed from rank 1 to rank 8.
pub static RANK_BB: [u64; RANK_CNT] = [
    RANK_1, RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8,
];

/// Direction of going north on a chessboard.
pub const NORTH: i8 = 8;
/// Direction of going south on a chessboard.
pub const SOUTH: i8 = -8;
/// Direction of going west on a chessboard.
pub const WEST: i8 = -1;
/// Direction of going east on a chessboard.
pub const EAST: i8 = 1;
/// Direction of going northeast on a chessboard.
pub const NORTH_EAST: i8 = 9;
/// Direction of going northwest on a chessboard.
pub const NORTH_WEST: i8 = 7;
/// Direction of going southeast on a chessboard.
pub const SOUTH_EAST: i8 = -7;
/// Direction of going southwest on a chessboard.
pub const SOUTH_WEST: i8 = -9;

/// Starting occupancy for the white player.
pub const START_WHITE_OCC: u64 = RANK_1 | RANK_2;
/// Starting occupancy for the black player.
pub const START_BLACK_OCC: u64 = RANK_7 | RANK_8;
/// Starting occupancy for both players.
pub const START_OCC_ALL: u64 = START_WHITE_OCC | START_BLACK_OCC;

/// Starting square of the white king.
pub const WHITE_KING_START: u8 = 4;
/// Starting square of the black king.
pub const BLACK_KING_START: u8 = 60;
/// Starting square of the white king-side rook.
pub const ROOK_WHITE_KSIDE_START: u8 = 7;
/// Starting square of the white queen-side rook.
pub const ROOK_WHITE_QSIDE_START: u8 = 0;
/// Starting square of the black king-side rook.
pub const ROOK_BLACK_KSIDE_START: u8 = 63;
/// Starting square of the black queen-side rook.
pub const ROOK_BLACK_QSIDE_START: u8 = 56;

/// Castling-rights bit for white king-side.
pub const C_WHITE_K_MASK: u8 = 0b0000_1000;
/// Castling-rights bit for white queen-side.
pub const C_WHITE_Q_MASK: u8 = 0b0000_0100;
/// Castling-rights bit for black king-side.
pub const C_BLACK_K_MASK: u8 = 0b0000_0010;
/// Castling-rights bit for black queen-side.
pub const C_BLACK_Q_MASK: u8 = 0b0000_0001;

/// Starting rook squares, indexed by `[player][castle side]`.
pub static CASTLING_ROOK_START: [[u8; CASTLING_SIDES]; PLAYER_CNT] = [
    [ROOK_WHITE_KSIDE_START, ROOK_WHITE_QSIDE_START],
    [ROOK_BLACK_KSIDE_START, ROOK_BLACK_QSIDE_START],
];

/// Squares that must be empty for a white king-side castle.
pub const CASTLING_PATH_WHITE_K_SIDE: u64 = (1_u64 << SQ::F1.0) | (1_u64 << SQ::G1.0);
/// Squares that must be empty for a white queen-side castle.
pub const CASTLING_PATH_WHITE_Q_SIDE: u64 =
    (1_u64 << SQ::B1.0) | (1_u64 << SQ::C1.0) | (1_u64 << SQ::D1.0);
/// Squares that must be empty for a black king-side castle.
pub const CASTLING_PATH_BLACK_K_SIDE: u64 = (1_u64 << SQ::F8.0) | (1_u64 << SQ::G8.0);
/// Squares that must be empty for a black queen-side castle.
pub const CASTLING_PATH_BLACK_Q_SIDE: u64 =
    (1_u64 << SQ::B8.0) | (1_u64 << SQ::C8.0) | (1_u64 << SQ::D8.0);

/// Empty-path requirements for castling, indexed by `[player][castle side]`.
pub static CASTLING_PATH: [[u64; CASTLING_SIDES]; PLAYER_CNT] = [
    [CASTLING_PATH_WHITE_K_SIDE, CASTLING_PATH_WHITE_Q_SIDE],
    [CASTLING_PATH_BLACK_K_SIDE, CASTLING_PATH_BLACK_Q_SIDE],
];

/// The order squares are printed in, rank 8 first.
pub static SQ_DISPLAY_ORDER: [u8; SQ_CNT] = [
    56, 57, 58, 59, 60, 61, 62, 63, 48, 49, 50, 51, 52, 53, 54, 55, 40, 41, 42, 43, 44, 45, 46, 47,
    32, 33, 34, 35, 36, 37, 38, 39, 24, 25, 26, 27, 28, 29, 30, 31, 16, 17, 18, 19, 20, 21, 22, 23,
    8, 9, 10, 11, 12, 13, 14, 15, 0, 1, 2, 3, 4, 5, 6, 7,
];

/// Maps a square index to its algebraic name.
pub static SQ_DISPLAY: [&str; SQ_CNT] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1", "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3", "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5", "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

/// Characters for each file, file A first.
pub static FILE_DISPLAYS: [char; FILE_CNT] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Characters for each rank, rank 1 first.
pub static RANK_DISPLAYS: [char; RANK_CNT] = ['1', '2', '3', '4', '5', '6', '7', '8'];
