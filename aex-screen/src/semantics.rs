//! Display semantics for screening values
//!
//! Gives the raw stored strings their dashboard meaning: score bands for
//! color-coding and outcome classes for badge styling. Pure functions over
//! the display strings; the presentation layer decides what to do with the
//! buckets.

use aex_common::value::parse_numeric;
use serde::Serialize;

/// Score band for color-coding a score display string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// 80 and above
    High,
    /// 60 to just under 80
    Medium,
    /// Below 60
    Low,
    /// Absent or unparseable
    Unknown,
}

impl ScoreBand {
    /// Band a score display string; unparseable values are `Unknown`,
    /// never treated as zero.
    pub fn from_display(score: Option<&str>) -> Self {
        match score.and_then(parse_numeric) {
            Some(n) if n >= 80.0 => ScoreBand::High,
            Some(n) if n >= 60.0 => ScoreBand::Medium,
            Some(_) => ScoreBand::Low,
            None => ScoreBand::Unknown,
        }
    }
}

/// Outcome class for badge styling of a screening outcome label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeClass {
    /// pass / passed / selected
    Positive,
    /// reject / rejected
    Negative,
    /// pending / hold
    Pending,
    /// Anything else, including absent
    Neutral,
}

impl OutcomeClass {
    /// Classify an outcome label, case-insensitively
    pub fn classify(outcome: Option<&str>) -> Self {
        let Some(outcome) = outcome else {
            return OutcomeClass::Neutral;
        };
        match outcome.trim().to_lowercase().as_str() {
            "pass" | "passed" | "selected" => OutcomeClass::Positive,
            "reject" | "rejected" => OutcomeClass::Negative,
            "pending" | "hold" => OutcomeClass::Pending,
            _ => OutcomeClass::Neutral,
        }
    }
}
