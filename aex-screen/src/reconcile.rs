//! Reconciliation engine
//!
//! Decides, per application identifier, whether and how it appears in the
//! output. Admission is keyed per identifier so the engine never emits two
//! canonical records for the same application:
//!
//! 1. Queue status `Completed` → admit from the Tracker record,
//!    `is_waiting = false`.
//! 2. Queue status `Waiting` and `include_waiting` → admit from the Tracker
//!    record, `is_waiting = true`.
//! 3. Anything else (`Processing`, unknown, missing, or `Waiting` with the
//!    flag off) → not admitted via the Tracker path.
//!
//! A second pass (only when `include_waiting`) synthesizes standalone
//! waiting records for identifiers that are `Waiting` in the Queue but
//! absent from the Tracker collection entirely, backed by CandidateMaster
//! data alone. An identifier with no backing master row is silently
//! dropped; a record is never admitted without data from at least one
//! source.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::normalize::{CandidateRow, TrackerRow};
use crate::queue::QueueEntry;
use crate::record::ScreeningRecord;
use crate::store::RawRecord;

/// Result of the Tracker admission pass
#[derive(Debug, Default)]
pub struct TrackerPass {
    /// Records admitted via the Tracker path, in input order
    pub records: Vec<ScreeningRecord>,
    /// Every identifier seen in the Tracker collection, admitted or not;
    /// the standalone pass must exclude all of them
    pub seen: HashSet<String>,
}

/// Apply the admission rules to normalized Tracker rows.
///
/// Duplicate Tracker identifiers keep the first row in input order; later
/// duplicates are skipped to preserve the uniqueness invariant.
pub fn admit_tracker_rows(
    rows: Vec<TrackerRow>,
    index: &HashMap<String, QueueEntry>,
    include_waiting: bool,
) -> TrackerPass {
    let mut pass = TrackerPass::default();

    for row in rows {
        if !pass.seen.insert(row.application_id.clone()) {
            continue;
        }

        let Some(entry) = index.get(&row.application_id) else {
            continue;
        };
        if entry.is_completed() {
            pass.records.push(ScreeningRecord::from_tracker(row, false));
        } else if entry.is_waiting() && include_waiting {
            pass.records.push(ScreeningRecord::from_tracker(row, true));
        }
    }

    debug!(
        admitted = pass.records.len(),
        seen = pass.seen.len(),
        include_waiting,
        "tracker admission pass complete"
    );
    pass
}

/// Identifiers with queue status `Waiting` that never appeared in the
/// Tracker collection. Sorted so the follow-up fetch is deterministic.
pub fn standalone_waiting_ids(
    index: &HashMap<String, QueueEntry>,
    seen_in_tracker: &HashSet<String>,
) -> Vec<String> {
    let mut ids: Vec<String> = index
        .iter()
        .filter(|(id, entry)| entry.is_waiting() && !seen_in_tracker.contains(*id))
        .map(|(id, _)| id.clone())
        .collect();
    ids.sort();
    ids
}

/// Synthesize standalone waiting records from fetched CandidateMaster rows.
///
/// Only rows whose identifier is in `wanted` produce a record; duplicates
/// within the master fetch keep the first row. Identifiers with no master
/// row simply do not appear; they are dropped, not reported.
pub fn synthesize_standalone(
    master_rows: &[RawRecord],
    wanted: &[String],
    index: &HashMap<String, QueueEntry>,
) -> Vec<ScreeningRecord> {
    let wanted: HashSet<&String> = wanted.iter().collect();
    let mut emitted: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for raw in master_rows {
        let Some(row) = CandidateRow::from_raw(raw) else {
            continue;
        };
        if !wanted.contains(&row.application_id) || emitted.contains(&row.application_id) {
            continue;
        }
        let Some(entry) = index.get(&row.application_id) else {
            continue;
        };
        emitted.insert(row.application_id.clone());
        records.push(ScreeningRecord::from_candidate(row, entry));
    }

    debug!(
        synthesized = records.len(),
        requested = wanted.len(),
        "standalone waiting pass complete"
    );
    records
}
