//! The time controls received over UCI, and the search limits built from
//! them.

use chrono;
use sable::core::masks::PLAYER_CNT;
use std::time;

/// The kind of limit a `go` command imposed.
#[derive(Clone)]
pub enum LimitsType {
    /// Clock-based: use the time manager.
    Time(UCITimer),
    /// Search for exactly this many milliseconds.
    MoveTime(u64),
    /// Search for a mate in the given number of moves.
    Mate(u16),
    /// Search to exactly this depth, in plies.
    Depth(u16),
    /// Search exactly this many nodes.
    Nodes(u64),
    /// Search until told to stop.
    Infinite,
}

impl LimitsType {
    pub fn is_depth(&self) -> bool {
        matches!(*self, LimitsType::Depth(_))
    }
}

/// The raw clock fields of a `go` command.
#[derive(Clone)]
pub struct UCITimer {
    /// Time remaining per player, in milliseconds.
    pub time_msec: [i64; PLAYER_CNT],
    /// Increment per move per player, in milliseconds.
    pub inc_msec: [i64; PLAYER_CNT],
    /// Moves until the next time control, 0 if unknown.
    pub moves_to_go: u32,
}

impl UCITimer {
    pub fn blank() -> Self {
        UCITimer {
            time_msec: [0; PLAYER_CNT],
            inc_msec: [0; PLAYER_CNT],
            moves_to_go: 0,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.time_msec[0] == 0
            && self.time_msec[1] == 0
            && self.inc_msec[0] == 0
            && self.inc_msec[1] == 0
    }
}

/// Everything a `go` command can carry, before being condensed into
/// [`Limits`].
///
/// [`Limits`]: struct.Limits.html
#[derive(Clone)]
pub struct PreLimits {
    pub time: Option<UCITimer>,
    pub move_time: Option<u64>,
    pub nodes: Option<u64>,
    pub depth: Option<u16>,
    pub mate: Option<u16>,
    pub infinite: bool,
    pub ponder: bool,
    pub search_moves: Vec<String>,
}

impl PreLimits {
    pub fn blank() -> Self {
        PreLimits {
            time: None,
            move_time: None,
            nodes: None,
            depth: None,
            mate: None,
            infinite: false,
            ponder: false,
            search_moves: Vec::new(),
        }
    }

    /// Condenses into the `Limits` the searcher threads consume.
    pub fn create(self) -> Limits {
        let mut limits = Limits {
            search_moves: self.search_moves.clone(),
            limits_type: LimitsType::Infinite,
            ponder: self.ponder,
            start: time::Instant::now(),
        };

        limits.limits_type = if let Some(m_time) = self.move_time {
            LimitsType::MoveTime(m_time)
        } else if let Some(mate) = self.mate {
            LimitsType::Mate(mate)
        } else if let Some(depth) = self.depth {
            LimitsType::Depth(depth)
        } else if let Some(nodes) = self.nodes {
            LimitsType::Nodes(nodes)
        } else if let Some(timer) = self.time {
            LimitsType::Time(timer)
        } else {
            LimitsType::Infinite
        };
        limits
    }
}

/// The limits of the running search.
#[derive(Clone)]
pub struct Limits {
    pub search_moves: Vec<String>,
    pub limits_type: LimitsType,
    /// Set while pondering: no stop until `ponderhit` or `stop` arrives.
    pub ponder: bool,
    pub start: time::Instant,
}

impl Limits {
    pub fn blank() -> Self {
        Limits {
            search_moves: Vec::new(),
            limits_type: LimitsType::Infinite,
            ponder: false,
            start: time::Instant::now(),
        }
    }

    pub fn use_time_management(&self) -> Option<UCITimer> {
        match self.limits_type {
            LimitsType::Time(ref timer) => Some(timer.clone()),
            _ => None,
        }
    }

    pub fn use_movetime(&self) -> Option<u64> {
        match self.limits_type {
            LimitsType::MoveTime(time) => Some(time),
            _ => None,
        }
    }

    pub fn use_nodes(&self) -> Option<u64> {
        match self.limits_type {
            LimitsType::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub fn use_mate(&self) -> Option<u16> {
        match self.limits_type {
            LimitsType::Mate(m) => Some(m),
            _ => None,
        }
    }

    /// Milliseconds since the search started.
    pub fn elapsed(&self) -> i64 {
        chrono::Duration::from_std(self.start.elapsed())
            .unwrap()
            .num_milliseconds()
    }
}
