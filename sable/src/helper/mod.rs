//! Statically initialized lookup tables: sliding-piece magics, jump attacks,
//! board geometry, zobrist keys, and piece-square scores.
//!
//! Everything here is filled exactly once by [`prelude::init_statics`] and
//! read-only afterwards; the `Board` constructors trigger the initialization.

mod boards;
mod magic;
mod psqt;
mod zobrist;

pub mod prelude;

pub use self::prelude::*;
