//! The chess foundation of the Sable engine: board representation, move
//! generation, and the shared search primitives (transposition table, SEE,
//! perft, zobrist hashing).
//!
//! This crate is split off from the engine proper so that the board logic can
//! be tested and benchmarked on its own. The searching side lives in
//! `sable_engine`.
//!
//! # Usage
//!
//! A [`Board`] starts from the standard position or from a FEN string:
//!
//! ```ignore
//! use sable::Board;
//!
//! let mut board = Board::start_pos();
//! let moves = board.generate_moves();
//! board.make_move(moves[0]);
//! board.unmake_move();
//! ```
//!
//! # Safety
//!
//! The library favors speed over defensive checks in a handful of hot paths.
//! Methods that can misbehave on bad input (an illegal move, an out-of-bounds
//! square) document that fact; debug builds assert the full set of board
//! invariants after every make/unmake.
//!
//! [`Board`]: board/struct.Board.html

#![allow(dead_code)]

#[macro_use]
extern crate bitflags;
extern crate rand;

pub mod core;
pub mod board;
pub mod helper;
pub mod tools;

pub use crate::board::Board;
pub use crate::core::bitboard::BitBoard;
pub use crate::core::move_list::{MoveList, ScoringMoveList};
pub use crate::core::piece_move::{BitMove, ScoringMove};
pub use crate::core::sq::SQ;
pub use crate::core::{File, GenTypes, Piece, PieceType, Player, Rank};
