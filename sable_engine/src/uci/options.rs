//! The UCI options the engine understands, and the framework for parsing and
//! applying them.
//!
//! Options that can take effect immediately do so from their mutator; the
//! rest (table resizes, thread-count changes) are queued as [`OptionWork`]
//! and applied between searches.
//!
//! [`OptionWork`]: enum.OptionWork.html

use std::collections::VecDeque;
use std::sync::atomic::Ordering;

use num_cpus;

use crate::consts::*;
use crate::nnue;
use crate::syzygy;

/// Deferred work produced by applying an option.
pub enum OptionWork {
    ClearTT,
    ResizeTT(usize),
    Threads(usize),
}

impl OptionWork {
    pub fn usable_while_searching(&self) -> bool {
        match *self {
            OptionWork::ClearTT => false,
            OptionWork::ResizeTT(_) => false,
            OptionWork::Threads(_) => false,
        }
    }
}

/// The set of options, sorted by name, plus the queue of deferred work.
pub struct OptionsMap {
    pub map: Vec<Box<dyn UCIOption>>,
    pub work: VecDeque<OptionWork>,
}

impl OptionsMap {
    /// Creates the default `OptionsMap`.
    pub fn new() -> Self {
        let mut map: Vec<Box<dyn UCIOption>> = Vec::new();
        let work = VecDeque::new();

        map.push(OptionsMap::hash());
        map.push(OptionsMap::clear_hash());
        map.push(OptionsMap::threads());
        map.push(OptionsMap::multi_pv());
        map.push(OptionsMap::contempt());
        map.push(OptionsMap::move_overhead());
        map.push(OptionsMap::minimum_time());
        map.push(OptionsMap::ponder());
        map.push(OptionsMap::chess960());
        map.push(OptionsMap::syzygy_path());
        map.push(OptionsMap::syzygy_probe_depth());
        map.push(OptionsMap::syzygy_probe_limit());
        map.push(OptionsMap::syzygy_50_move_rule());
        map.push(OptionsMap::mcts());
        map.push(OptionsMap::engine_mode());
        map.sort_by(|a, b| a.option_name().cmp(b.option_name()));

        OptionsMap { map, work }
    }

    /// Applies an option by name and returns whether it was accepted.
    pub fn apply_option(&mut self, name: &str, value: &str) -> bool {
        for op in self.map.iter() {
            if op.option_name().eq_ignore_ascii_case(name) {
                if let Some(work) = op.mutate(value) {
                    self.work.push_back(work);
                }
                return op.accepted(value);
            }
        }
        false
    }

    /// Prints every option in `option name ...` form.
    pub fn display_all(&self) {
        for op in self.map.iter() {
            println!("{}", op.display());
        }
    }

    /// Pops the next piece of deferred work, if any.
    pub fn work(&mut self) -> Option<OptionWork> {
        self.work.pop_front()
    }

    fn hash() -> Box<dyn UCIOption> {
        let mutator: fn(i64) -> Option<OptionWork> =
            |mb| Some(OptionWork::ResizeTT(mb as usize));
        Box::new(UCISpin {
            option_name: "Hash",
            default: DEFAULT_TT_SIZE as i64,
            min: 1,
            max: 128_000,
            mutator,
        })
    }

    fn clear_hash() -> Box<dyn UCIOption> {
        let mutator: fn() -> Option<OptionWork> = || Some(OptionWork::ClearTT);
        Box::new(UCIButton {
            option_name: "Clear Hash",
            mutator,
        })
    }

    fn threads() -> Box<dyn UCIOption> {
        let mutator: fn(i64) -> Option<OptionWork> =
            |num| Some(OptionWork::Threads(num as usize));
        Box::new(UCISpin {
            option_name: "Threads",
            default: num_cpus::get() as i64,
            min: 1,
            max: MAX_THREADS as i64,
            mutator,
        })
    }

    fn multi_pv() -> Box<dyn UCIOption> {
        let mutator: fn(i64) -> Option<OptionWork> = |k| {
            MULTI_PV.store(k as usize, Ordering::Relaxed);
            None
        };
        Box::new(UCISpin {
            option_name: "MultiPV",
            default: 1,
            min: 1,
            max: 250,
            mutator,
        })
    }

    fn contempt() -> Box<dyn UCIOption> {
        let mutator: fn(i64) -> Option<OptionWork> = |cp| {
            CONTEMPT.store(cp as i32, Ordering::Relaxed);
            None
        };
        Box::new(UCISpin {
            option_name: "Contempt",
            default: 0,
            min: -100,
            max: 100,
            mutator,
        })
    }

    fn move_overhead() -> Box<dyn UCIOption> {
        let mutator: fn(i64) -> Option<OptionWork> = |ms| {
            MOVE_OVERHEAD.store(ms, Ordering::Relaxed);
            None
        };
        Box::new(UCISpin {
            option_name: "MoveOverhead",
            default: 50,
            min: 0,
            max: 5000,
            mutator,
        })
    }

    fn minimum_time() -> Box<dyn UCIOption> {
        let mutator: fn(i64) -> Option<OptionWork> = |ms| {
            MINIMUM_TIME.store(ms, Ordering::Relaxed);
            None
        };
        Box::new(UCISpin {
            option_name: "MinimumTime",
            default: 1,
            min: 1,
            max: 5000,
            mutator,
        })
    }

    fn ponder() -> Box<dyn UCIOption> {
        let mutator: fn(bool) -> Option<OptionWork> = |on| {
            PONDER_ENABLED.store(on, Ordering::Relaxed);
            None
        };
        Box::new(UCICheck {
            option_name: "Ponder",
            default: false,
            mutator,
        })
    }

    fn chess960() -> Box<dyn UCIOption> {
        let mutator: fn(bool) -> Option<OptionWork> = |on| {
            CHESS960.store(on, Ordering::Relaxed);
            None
        };
        Box::new(UCICheck {
            option_name: "UCI_Chess960",
            default: false,
            mutator,
        })
    }

    fn syzygy_path() -> Box<dyn UCIOption> {
        let mutator: fn(&str) -> Option<OptionWork> = |path| {
            syzygy::set_path(path);
            None
        };
        Box::new(UCIText {
            option_name: "SyzygyPath",
            default: "<empty>",
            mutator,
        })
    }

    fn syzygy_probe_depth() -> Box<dyn UCIOption> {
        let mutator: fn(i64) -> Option<OptionWork> = |d| {
            syzygy::set_probe_depth(d as i32);
            None
        };
        Box::new(UCISpin {
            option_name: "SyzygyProbeDepth",
            default: 1,
            min: 1,
            max: 100,
            mutator,
        })
    }

    fn syzygy_probe_limit() -> Box<dyn UCIOption> {
        let mutator: fn(i64) -> Option<OptionWork> = |l| {
            syzygy::set_probe_limit(l as i32);
            None
        };
        Box::new(UCISpin {
            option_name: "SyzygyProbeLimit",
            default: 6,
            min: 0,
            max: 7,
            mutator,
        })
    }

    fn syzygy_50_move_rule() -> Box<dyn UCIOption> {
        let mutator: fn(bool) -> Option<OptionWork> = |on| {
            syzygy::set_use_50_move_rule(on);
            None
        };
        Box::new(UCICheck {
            option_name: "Syzygy50MoveRule",
            default: true,
            mutator,
        })
    }

    fn mcts() -> Box<dyn UCIOption> {
        let mutator: fn(bool) -> Option<OptionWork> = |on| {
            if on {
                println!("info string MCTS search is not available; option ignored");
            }
            None
        };
        Box::new(UCICheck {
            option_name: "MCTS",
            default: false,
            mutator,
        })
    }

    fn engine_mode() -> Box<dyn UCIOption> {
        let mutator: fn(&str) -> Option<OptionWork> = |mode| {
            match mode {
                "nnue" => {
                    set_engine_mode(EngineMode::Nnue);
                    if let Err(e) = nnue::load_network(nnue::DEFAULT_NETWORK) {
                        println!(
                            "info string {}; using the classical evaluation",
                            e
                        );
                    }
                }
                "random" => set_engine_mode(EngineMode::Random),
                _ => {}
            }
            None
        };
        Box::new(UCICombo {
            option_name: "EngineMode",
            default: "nnue",
            values: &["nnue", "random"],
            mutator,
        })
    }
}

impl Default for OptionsMap {
    fn default() -> Self {
        OptionsMap::new()
    }
}

/// A UCI-visible option of some type.
pub trait UCIOption {
    /// One of: button, check, spin, text, or combo.
    fn option_type(&self) -> &'static str;

    /// The exact name of the option.
    fn option_name(&self) -> &'static str;

    /// The remaining display text of the option, if any.
    fn partial_display(&self) -> Option<String>;

    /// Renders the `option name ... type ...` line.
    fn display(&self) -> String {
        let mut display =
            String::from("option name ") + self.option_name() + " type " + self.option_type();

        if let Some(part_dis) = self.partial_display() {
            display += " ";
            display += &part_dis;
        }
        display
    }

    /// Returns whether a value parses for this option.
    fn accepted(&self, val: &str) -> bool;

    /// Applies a value, possibly producing deferred work.
    fn mutate(&self, val: &str) -> Option<OptionWork>;
}

pub struct UCIButton {
    option_name: &'static str,
    mutator: fn() -> Option<OptionWork>,
}

pub struct UCICheck {
    option_name: &'static str,
    default: bool,
    mutator: fn(bool) -> Option<OptionWork>,
}

pub struct UCISpin {
    option_name: &'static str,
    default: i64,
    max: i64,
    min: i64,
    mutator: fn(i64) -> Option<OptionWork>,
}

pub struct UCICombo {
    option_name: &'static str,
    default: &'static str,
    values: &'static [&'static str],
    mutator: fn(&str) -> Option<OptionWork>,
}

pub struct UCIText {
    option_name: &'static str,
    default: &'static str,
    mutator: fn(&str) -> Option<OptionWork>,
}

impl UCIOption for UCIButton {
    fn option_type(&self) -> &'static str {
        "button"
    }

    fn option_name(&self) -> &'static str {
        self.option_name
    }

    fn partial_display(&self) -> Option<String> {
        None
    }

    fn accepted(&self, _val: &str) -> bool {
        true
    }

    fn mutate(&self, _val: &str) -> Option<OptionWork> {
        (self.mutator)()
    }
}

impl UCIOption for UCICheck {
    fn option_type(&self) -> &'static str {
        "check"
    }

    fn option_name(&self) -> &'static str {
        self.option_name
    }

    fn partial_display(&self) -> Option<String> {
        Some(String::from("default ") + &self.default.to_string())
    }

    fn accepted(&self, val: &str) -> bool {
        val == "true" || val == "false"
    }

    fn mutate(&self, val: &str) -> Option<OptionWork> {
        match val {
            "true" => (self.mutator)(true),
            "false" => (self.mutator)(false),
            _ => None,
        }
    }
}

impl UCIOption for UCISpin {
    fn option_type(&self) -> &'static str {
        "spin"
    }

    fn option_name(&self) -> &'static str {
        self.option_name
    }

    fn partial_display(&self) -> Option<String> {
        Some(format!(
            "default {} min {} max {}",
            self.default, self.min, self.max
        ))
    }

    fn accepted(&self, val: &str) -> bool {
        val.parse::<i64>()
            .map(|v| v >= self.min && v <= self.max)
            .unwrap_or(false)
    }

    fn mutate(&self, val: &str) -> Option<OptionWork> {
        if let Ok(integer) = val.parse::<i64>() {
            if integer >= self.min && integer <= self.max {
                return (self.mutator)(integer);
            }
        }
        None
    }
}

impl UCIOption for UCICombo {
    fn option_type(&self) -> &'static str {
        "combo"
    }

    fn option_name(&self) -> &'static str {
        self.option_name
    }

    fn partial_display(&self) -> Option<String> {
        let mut disp = String::from("default ") + self.default;
        self.values.iter().for_each(|s| {
            disp += " var ";
            disp += *s;
        });
        Some(disp)
    }

    fn accepted(&self, val: &str) -> bool {
        self.values.contains(&val)
    }

    fn mutate(&self, val: &str) -> Option<OptionWork> {
        if self.values.contains(&val) {
            return (self.mutator)(val);
        }
        None
    }
}

impl UCIOption for UCIText {
    fn option_type(&self) -> &'static str {
        "string"
    }

    fn option_name(&self) -> &'static str {
        self.option_name
    }

    fn partial_display(&self) -> Option<String> {
        Some(String::from("default ") + self.default)
    }

    fn accepted(&self, _val: &str) -> bool {
        true
    }

    fn mutate(&self, val: &str) -> Option<OptionWork> {
        (self.mutator)(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_bounds_respected() {
        let mut map = OptionsMap::new();
        assert!(map.apply_option("MultiPV", "3"));
        assert_eq!(MULTI_PV.load(Ordering::Relaxed), 3);
        assert!(!map.apply_option("MultiPV", "0"));
        assert!(!map.apply_option("MultiPV", "elephant"));
        MULTI_PV.store(1, Ordering::Relaxed);
    }

    #[test]
    fn unknown_option_rejected() {
        let mut map = OptionsMap::new();
        assert!(!map.apply_option("NoSuchOption", "1"));
    }

    #[test]
    fn hash_resize_queues_work() {
        let mut map = OptionsMap::new();
        assert!(map.apply_option("Hash", "16"));
        match map.work() {
            Some(OptionWork::ResizeTT(16)) => {}
            _ => panic!("expected a resize"),
        }
    }
}
