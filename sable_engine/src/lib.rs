//! The Sable chess engine: a UCI front end over an iterative-deepening
//! alpha-beta search with lazy-SMP parallelism, built on the `sable` board
//! library.
//!
//! This crate is mostly useful as a direct executable. For the chess
//! foundations (boards, move generation, perft), depend on `sable` instead.

#![allow(dead_code)]

extern crate chrono;
#[macro_use]
extern crate lazy_static;
extern crate num_cpus;
extern crate rand;
extern crate sable;

pub mod consts;
pub mod engine;
pub mod movepick;
pub mod nnue;
pub mod root_moves;
pub mod search;
pub mod sync;
pub mod syzygy;
pub mod tables;
pub mod threadpool;
pub mod time;
pub mod uci;

pub use crate::consts::*;
