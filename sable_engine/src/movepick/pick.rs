//! The stages the move picker steps through. Each pipeline occupies a
//! contiguous run of discriminants and terminates without entering the next
//! pipeline's first stage.

use std::fmt;
use std::mem;

#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Pick {
    // Main search
    MainTT = 0,
    CapturesInit = 1,
    GoodCaptures = 2,
    KillerOne = 3,
    KillerTwo = 4,
    CounterMove = 5,
    BishopTakesKnight = 6,
    QuietsInit = 7,
    Quiets = 8,
    BadCaptures = 9,
    Delayed = 10,
    // Evasions, shared by main search and quiescence
    EvasionTT = 11,
    EvasionsInit = 12,
    AllEvasions = 13,
    // ProbCut
    ProbCutTT = 14,
    ProbCutInit = 15,
    ProbCutCaptures = 16,
    // Quiescence
    QSearchTT = 17,
    QCapturesInit = 18,
    QCaptures = 19,
    QChecksInit = 20,
    QChecks = 21,
    // Quiescence, recaptures only
    RecapturesInit = 22,
    Recaptures = 23,
}

impl Pick {
    /// Advances to the next stage of the current pipeline.
    #[inline(always)]
    pub fn incr(&mut self) {
        debug_assert!((*self as u8) < Pick::Recaptures as u8);
        unsafe {
            *self = mem::transmute(*self as u8 + 1);
        }
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Pick::MainTT => "MainTT",
            Pick::CapturesInit => "CapturesInit",
            Pick::GoodCaptures => "GoodCaptures",
            Pick::KillerOne => "KillerOne",
            Pick::KillerTwo => "KillerTwo",
            Pick::CounterMove => "CounterMove",
            Pick::BishopTakesKnight => "BishopTakesKnight",
            Pick::QuietsInit => "QuietsInit",
            Pick::Quiets => "Quiets",
            Pick::BadCaptures => "BadCaptures",
            Pick::Delayed => "Delayed",
            Pick::EvasionTT => "EvasionTT",
            Pick::EvasionsInit => "EvasionsInit",
            Pick::AllEvasions => "AllEvasions",
            Pick::ProbCutTT => "ProbCutTT",
            Pick::ProbCutInit => "ProbCutInit",
            Pick::ProbCutCaptures => "ProbCutCaptures",
            Pick::QSearchTT => "QSearchTT",
            Pick::QCapturesInit => "QCapturesInit",
            Pick::QCaptures => "QCaptures",
            Pick::QChecksInit => "QChecksInit",
            Pick::QChecks => "QChecks",
            Pick::RecapturesInit => "RecapturesInit",
            Pick::Recaptures => "Recaptures",
        })
    }
}
