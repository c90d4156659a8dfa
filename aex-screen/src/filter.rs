//! Filter pipeline
//!
//! Applies the active filter criteria to the reconciled list (logical AND
//! across criteria; an unset criterion matches everything) and derives the
//! filter facets (the distinct categorical values the consumer can filter
//! by) from the *unfiltered* reconciled set.

use std::collections::BTreeSet;

use aex_common::value::parse_numeric;
use serde::{Deserialize, Serialize};

use crate::record::ScreeningRecord;

/// Score range bounds when only one side of the final-score filter is set
pub const SCORE_RANGE_MIN: f64 = 0.0;
pub const SCORE_RANGE_MAX: f64 = 100.0;

/// Active filter criteria.
///
/// The score range is active as soon as either bound is set; the unset
/// bound defaults to the unbounded side of [0, 100]. A record whose final
/// score is absent or unparseable is excluded by an active score filter
/// (it cannot be judged against a bound) but passes when no score filter
/// is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub call_status: Option<String>,
    pub role_code: Option<String>,
    pub outcome: Option<String>,
    pub score_min: Option<f64>,
    pub score_max: Option<f64>,
}

impl Filters {
    /// Whether any criterion is set
    pub fn is_empty(&self) -> bool {
        *self == Filters::default()
    }

    fn score_range_active(&self) -> bool {
        self.score_min.is_some() || self.score_max.is_some()
    }

    /// Whether a record matches every active criterion
    pub fn matches(&self, record: &ScreeningRecord) -> bool {
        if let Some(want) = &self.call_status {
            if record.call_status.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = &self.role_code {
            if record.role_code.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = &self.outcome {
            if record.screening_outcome.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if self.score_range_active() {
            let Some(score) = record.final_score.as_deref().and_then(parse_numeric) else {
                return false;
            };
            let min = self.score_min.unwrap_or(SCORE_RANGE_MIN);
            let max = self.score_max.unwrap_or(SCORE_RANGE_MAX);
            if score < min || score > max {
                return false;
            }
        }
        true
    }
}

/// Apply the filters, producing a new sequence of the matching records
pub fn apply(records: &[ScreeningRecord], filters: &Filters) -> Vec<ScreeningRecord> {
    records
        .iter()
        .filter(|record| filters.matches(record))
        .cloned()
        .collect()
}

/// Distinct categorical values observed across the unfiltered reconciled
/// list, each lexicographically sorted. Recomputed whenever the reconciled
/// list changes, never when filters change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Facets {
    pub call_statuses: Vec<String>,
    pub role_codes: Vec<String>,
    pub outcomes: Vec<String>,
}

/// Derive filter facets from the reconciled set
pub fn derive_facets(records: &[ScreeningRecord]) -> Facets {
    let mut call_statuses = BTreeSet::new();
    let mut role_codes = BTreeSet::new();
    let mut outcomes = BTreeSet::new();

    for record in records {
        if let Some(v) = &record.call_status {
            call_statuses.insert(v.clone());
        }
        if let Some(v) = &record.role_code {
            role_codes.insert(v.clone());
        }
        if let Some(v) = &record.screening_outcome {
            outcomes.insert(v.clone());
        }
    }

    // BTreeSet iteration yields the lexicographic order the facet lists need
    Facets {
        call_statuses: call_statuses.into_iter().collect(),
        role_codes: role_codes.into_iter().collect(),
        outcomes: outcomes.into_iter().collect(),
    }
}
