//! Queue status index
//!
//! Builds a lookup from application identifier to current processing status
//! from the Queue collection. Building the index never fails; a missing or
//! empty Queue collection yields an empty index.

use std::collections::HashMap;

use aex_common::time::parse_timestamp;
use tracing::debug;

use crate::normalize::QueueRow;
use crate::store::RawRecord;

/// Queue status label for a completed screening
pub const STATUS_COMPLETED: &str = "Completed";
/// Queue status label for an application awaiting screening
pub const STATUS_WAITING: &str = "Waiting";
/// Queue status label for a screening in flight
pub const STATUS_PROCESSING: &str = "Processing";

/// One queue entry: the status label plus the queue row's creation
/// timestamp (kept as the raw string; it doubles as the date-created
/// fallback for standalone records).
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub status: String,
    pub created_at: Option<String>,
}

impl QueueEntry {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    pub fn is_waiting(&self) -> bool {
        self.status == STATUS_WAITING
    }
}

/// Build the application-id → status index from raw Queue rows.
///
/// Rows without an application identifier or without a status label are
/// skipped. Duplicate identifiers are resolved deterministically: the entry
/// with the latest parseable `created_at` wins; when neither side has one,
/// the later row in input order wins.
pub fn build_status_index(rows: &[RawRecord]) -> HashMap<String, QueueEntry> {
    let mut index: HashMap<String, QueueEntry> = HashMap::new();

    for raw in rows {
        let Some(row) = QueueRow::from_raw(raw) else {
            continue;
        };
        let Some(status) = row.status else {
            continue;
        };
        let entry = QueueEntry {
            status,
            created_at: row.created_at,
        };

        match index.get(&row.application_id) {
            Some(existing) if !newer_wins(&entry, existing) => {}
            _ => {
                index.insert(row.application_id, entry);
            }
        }
    }

    debug!(entries = index.len(), rows = rows.len(), "built queue status index");
    index
}

/// Duplicate tie-break: latest parseable timestamp wins, else the candidate
/// (the later row in input order) wins.
fn newer_wins(candidate: &QueueEntry, existing: &QueueEntry) -> bool {
    let candidate_ts = candidate.created_at.as_deref().and_then(parse_timestamp);
    let existing_ts = existing.created_at.as_deref().and_then(parse_timestamp);
    match (candidate_ts, existing_ts) {
        (Some(c), Some(e)) => c >= e,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn row(pairs: &[(&str, Value)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_input_empty_index() {
        assert!(build_status_index(&[]).is_empty());
    }

    #[test]
    fn test_basic_index() {
        let rows = vec![
            row(&[("Application ID", json!("A1")), ("Status", json!("Completed"))]),
            row(&[("application_id", json!("A2")), ("status", json!("Waiting"))]),
        ];
        let index = build_status_index(&rows);
        assert!(index["A1"].is_completed());
        assert!(index["A2"].is_waiting());
    }

    #[test]
    fn test_rows_without_id_or_status_skipped() {
        let rows = vec![
            row(&[("Status", json!("Completed"))]),
            row(&[("Application ID", json!("A1"))]),
        ];
        assert!(build_status_index(&rows).is_empty());
    }

    #[test]
    fn test_duplicate_latest_timestamp_wins() {
        let rows = vec![
            row(&[
                ("Application ID", json!("A1")),
                ("Status", json!("Completed")),
                ("created_at", json!("2024-03-05T10:00:00Z")),
            ]),
            row(&[
                ("Application ID", json!("A1")),
                ("Status", json!("Waiting")),
                ("created_at", json!("2024-03-01T10:00:00Z")),
            ]),
        ];
        // The earlier-timestamped row arrives second but must not win
        let index = build_status_index(&rows);
        assert_eq!(index["A1"].status, "Completed");
    }

    #[test]
    fn test_duplicate_without_timestamps_last_wins() {
        let rows = vec![
            row(&[("Application ID", json!("A1")), ("Status", json!("Waiting"))]),
            row(&[("Application ID", json!("A1")), ("Status", json!("Processing"))]),
        ];
        let index = build_status_index(&rows);
        assert_eq!(index["A1"].status, "Processing");
    }

    #[test]
    fn test_timestamped_beats_untimestamped() {
        let rows = vec![
            row(&[
                ("Application ID", json!("A1")),
                ("Status", json!("Completed")),
                ("created_at", json!("2024-03-01T10:00:00Z")),
            ]),
            row(&[("Application ID", json!("A1")), ("Status", json!("Waiting"))]),
        ];
        let index = build_status_index(&rows);
        assert_eq!(index["A1"].status, "Completed");
    }

    #[test]
    fn test_free_form_status_kept() {
        let rows = vec![row(&[
            ("Application ID", json!("A1")),
            ("Status", json!("No Response")),
        ])];
        let index = build_status_index(&rows);
        assert_eq!(index["A1"].status, "No Response");
        assert!(!index["A1"].is_completed());
        assert!(!index["A1"].is_waiting());
    }
}
