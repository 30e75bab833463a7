//! Time management: turning the clock situation into a per-move budget.
//!
//! Two budgets come out of `init`: `optimum`, the time the search aims to
//! spend, and `maximum`, the hard cap it may stretch to when the iteration
//! is unstable. Both come from apportioning the remaining clock over a
//! shrinking horizon of future moves, each weighted by an importance curve
//! that peaks in the early middlegame and decays logistically after it.

use std::cell::UnsafeCell;
use std::time::Instant;

use chrono;
use sable::Player;

use super::uci_timer::UCITimer;
use crate::consts::{MINIMUM_TIME, MOVE_OVERHEAD, PONDER_ENABLED};
use std::sync::atomic::Ordering;

/// Most future moves the budget is spread across.
const MOVES_HORIZON: i64 = 50;
/// Cap on how much of the remaining importance one move may steal.
const MAX_RATIO: f64 = 7.09;
/// Fraction of the other moves' importance the hard cap may borrow.
const STEAL_RATIO: f64 = 0.35;

// Move-importance curve parameters.
const X_SCALE: f64 = 7.64;
const X_SHIFT: f64 = 58.4;
const SKEW: f64 = 0.183;
const FACTOR_BASE: f64 = 1.225;
const PLY_FACTOR: f64 = 0.00025;
const PLY_MIN: i64 = 10;
const PLY_MAX: i64 = 70;
const BASE_MOVES: i64 = 50;
const IMPORTANCE_FACTOR: f64 = 0.89;

/// The per-search time budgets. Written by the main thread at search start
/// and on ponder hits, read by everybody.
pub struct TimeManager {
    optimal_time: UnsafeCell<i64>,
    maximum_time: UnsafeCell<i64>,
    start: UnsafeCell<Instant>,
}

unsafe impl Sync for TimeManager {}

impl TimeManager {
    pub fn uninitialized() -> TimeManager {
        TimeManager {
            optimal_time: UnsafeCell::new(0),
            maximum_time: UnsafeCell::new(0),
            start: UnsafeCell::new(Instant::now()),
        }
    }

    /// Starts the clock without computing budgets, for fixed-depth, fixed
    /// node, or infinite searches.
    pub fn start_timer(&self, start: Instant) {
        unsafe {
            *self.start.get() = start;
        }
    }

    /// Computes `optimum` and `maximum` for the position at `ply` under the
    /// given clock.
    pub fn init(&self, start: Instant, timer: &UCITimer, turn: Player, ply: u16) {
        let overhead: i64 = MOVE_OVERHEAD.load(Ordering::Relaxed);
        let minimum: i64 = MINIMUM_TIME.load(Ordering::Relaxed).max(1);

        let my_time: i64 = timer.time_msec[turn as usize];
        let my_inc: i64 = timer.inc_msec[turn as usize];
        let moves_to_go: i64 = timer.moves_to_go as i64;

        let mut optimal: i64 = my_time;
        let mut maximum: i64 = my_time;

        let maxmoves: i64 = if moves_to_go == 0 {
            MOVES_HORIZON
        } else {
            moves_to_go.min(MOVES_HORIZON)
        };

        let move_importance: f64 = calc_move_importance(ply as i64) * IMPORTANCE_FACTOR;
        let mut other_moves_importance: f64 = 0.0;

        let mut available: i64 = my_time - overhead;

        for n in 1..=maxmoves {
            let ratio1: f64 = move_importance / (move_importance + other_moves_importance);
            let t1: i64 = (available as f64 * ratio1).round() as i64;

            let ratio2: f64 = MAX_RATIO * move_importance
                / (MAX_RATIO * move_importance + other_moves_importance);
            let ratio3: f64 = (move_importance + STEAL_RATIO * other_moves_importance)
                / (move_importance + other_moves_importance);
            let t2: i64 = (available as f64 * ratio2.min(ratio3)).round() as i64;

            optimal = t1.min(optimal);
            maximum = t2.min(maximum);

            other_moves_importance += calc_move_importance(ply as i64 + 2 * n);
            available += my_inc - overhead;
        }

        optimal = optimal.max(minimum);
        maximum = maximum.max(minimum);

        if PONDER_ENABLED.load(Ordering::Relaxed) {
            optimal += optimal * 3 / 10;
            optimal = optimal.min(maximum);
        }

        unsafe {
            *self.start.get() = start;
            *self.optimal_time.get() = optimal;
            *self.maximum_time.get() = maximum;
        }
    }

    /// On a ponder hit, the time already burned pondering is granted on top,
    /// and the target scales up proportionally.
    pub fn adjustment_after_ponder_hit(&self) {
        unsafe {
            let max = self.maximum_time.get();
            let opt = self.optimal_time.get();
            let new_max = *max + self.elapsed();
            if *max > 0 {
                *opt = *opt * new_max / *max;
            }
            *max = new_max;
        }
    }

    /// The instant the search started.
    pub fn start(&self) -> Instant {
        unsafe { *self.start.get() }
    }

    /// Milliseconds elapsed since the search started.
    pub fn elapsed(&self) -> i64 {
        let start = self.start();
        chrono::Duration::from_std(start.elapsed())
            .unwrap()
            .num_milliseconds()
    }

    /// The time the search aims to spend on this move.
    #[inline(always)]
    pub fn optimum(&self) -> i64 {
        unsafe { *self.optimal_time.get() }
    }

    /// The hard cap on this move's time.
    #[inline(always)]
    pub fn maximum(&self) -> i64 {
        unsafe { *self.maximum_time.get() }
    }
}

/// The importance of the move at `ply`: a parabola peaking around the
/// fiftieth ply, attenuated by a logistic tail.
fn calc_move_importance(ply: i64) -> f64 {
    let mut factor: f64 = 1.0;
    if ply > PLY_MIN && ply < PLY_MAX {
        let dist = ply as f64 - BASE_MOVES as f64;
        factor = FACTOR_BASE - PLY_FACTOR * dist * dist;
    }
    factor * (1.0 + ((ply as f64 - X_SHIFT) / X_SCALE).exp()).powf(-SKEW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_decays_late() {
        assert!(calc_move_importance(1) > calc_move_importance(90));
        assert!(calc_move_importance(90) > 0.0);
    }

    #[test]
    fn game_start_budget_sane() {
        let timer = UCITimer {
            time_msec: [60_000, 60_000],
            inc_msec: [0, 0],
            moves_to_go: 0,
        };
        let tm = TimeManager::uninitialized();
        tm.init(Instant::now(), &timer, Player::White, 1);
        let optimum = tm.optimum();
        let maximum = tm.maximum();
        assert!(
            optimum > 1000 && optimum < 3000,
            "optimum out of range: {}",
            optimum
        );
        assert!(maximum <= 15_000, "maximum too large: {}", maximum);
        assert!(maximum >= optimum);
    }

    #[test]
    fn moves_to_go_spends_faster() {
        let few_moves = UCITimer {
            time_msec: [60_000, 60_000],
            inc_msec: [0, 0],
            moves_to_go: 5,
        };
        let many_moves = UCITimer {
            time_msec: [60_000, 60_000],
            inc_msec: [0, 0],
            moves_to_go: 0,
        };
        let tm_few = TimeManager::uninitialized();
        let tm_many = TimeManager::uninitialized();
        tm_few.init(Instant::now(), &few_moves, Player::White, 1);
        tm_many.init(Instant::now(), &many_moves, Player::White, 1);
        assert!(tm_few.optimum() > tm_many.optimum());
    }
}
