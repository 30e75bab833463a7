//! FEN parsing errors and reference FEN strings.

use std::fmt;
use std::num;

/// An error encountered while building a `Board` from a FEN string.
#[derive(Debug, Clone)]
pub enum FenBuildError {
    NotEnoughSections { sections: usize },
    IncorrectRankAmounts { ranks: usize },
    UnrecognizedTurn { turn: String },
    EPSquareUnreadable { ep: String },
    EPSquareInvalid { ep: String },
    SquareSmallerRank { rank: usize, square: usize },
    SquareLargerRank { rank: usize, square: usize },
    UnrecognizedPiece { piece: char },
    UnrecognizedCastling { castling: char },
    UnreadableMoves(num::ParseIntError),
    IllegalNumKings { player: crate::core::Player, num: u8 },
    PawnOnLastRow,
}

impl fmt::Display for FenBuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenBuildError::NotEnoughSections { sections } => write!(
                f,
                "invalid number of fen sections: {}, expected 6",
                sections
            ),
            FenBuildError::IncorrectRankAmounts { ranks } => {
                write!(f, "invalid number of ranks: {}, expected 8", ranks)
            }
            FenBuildError::UnrecognizedTurn { turn } => {
                write!(f, "invalid turn: {}, expected 'w' or 'b'", turn)
            }
            FenBuildError::EPSquareUnreadable { ep } => {
                write!(f, "unreadable en-passant square: {}", ep)
            }
            FenBuildError::EPSquareInvalid { ep } => {
                write!(f, "invalid en-passant square: {}", ep)
            }
            FenBuildError::SquareSmallerRank { rank, square } => write!(
                f,
                "square number {} too small for rank {}",
                square, rank
            ),
            FenBuildError::SquareLargerRank { rank, square } => write!(
                f,
                "square number {} too large for rank {}",
                square, rank
            ),
            FenBuildError::UnrecognizedPiece { piece } => {
                write!(f, "unrecognized piece: {}", piece)
            }
            FenBuildError::UnrecognizedCastling { castling } => {
                write!(f, "unrecognized castling character: {}", castling)
            }
            FenBuildError::UnreadableMoves(err) => {
                write!(f, "unreadable move counter: {}", err)
            }
            FenBuildError::IllegalNumKings { player, num } => {
                write!(f, "incorrect number of kings for {}: {}", player, num)
            }
            FenBuildError::PawnOnLastRow => write!(f, "pawn on the first or last row"),
        }
    }
}

impl std::error::Error for FenBuildError {}

impl From<num::ParseIntError> for FenBuildError {
    fn from(err: num::ParseIntError) -> FenBuildError {
        FenBuildError::UnreadableMoves(err)
    }
}

/// A collection of valid FEN strings of various positions, for testing.
pub static ALL_FENS: [&str; 12] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    "rnbqkb1r/pp1p1ppp/2p5/4P3/2B5/8/PPP1NnPP/RNBQK2R w KQkq - 0 6",
    "2kr3r/p1ppqpb1/bn2Qnp1/3PN3/1p2P3/2N5/PPPBBPPP/R3K2R b KQ - 3 2",
    "rnb2k1r/pp1Pbppp/2p5/q7/2B5/8/PPPQNnPP/RNB1K2R w KQ - 3 9",
    "2r5/3pk3/8/2P5/8/2K5/8/8 w - - 5 4",
    "8/8/1P2K3/8/2n5/1q6/8/5k2 b - - 0 1",
    "4k3/1P6/8/8/8/8/K7/8 w - - 0 1",
];
