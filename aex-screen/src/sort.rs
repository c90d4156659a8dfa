//! Sort engine
//!
//! Stable, null-safe, direction-aware ordering by date-created. Records
//! with a missing or unparseable date always sort after every dated record
//! regardless of direction; two dateless records keep their relative input
//! order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::ScreeningRecord;

/// Sort direction for the date-created ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Newest first (descending)
    #[default]
    #[serde(rename = "new")]
    Newest,
    /// Oldest first (ascending)
    #[serde(rename = "old")]
    Oldest,
}

/// Stable-sort the records by date-created, producing a new sequence.
///
/// Dates are parsed once per record before sorting; the comparator itself
/// only compares cached keys.
pub fn by_date_created(records: Vec<ScreeningRecord>, direction: SortDirection) -> Vec<ScreeningRecord> {
    let mut keyed: Vec<_> = records
        .into_iter()
        .map(|record| (record.date_created_ts(), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Newest => b.cmp(a),
            SortDirection::Oldest => a.cmp(b),
        },
        // Dateless records go last in both directions
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, date: Option<&str>) -> ScreeningRecord {
        ScreeningRecord {
            application_id: id.to_string(),
            job_title: None,
            role_code: None,
            candidate_name: None,
            screening_outcome: None,
            screening_summary: None,
            call_status: None,
            call_score: None,
            similarity_score: None,
            final_score: None,
            conversation_id: None,
            recording_link: None,
            notice_period: None,
            current_ctc: None,
            expected_ctc: None,
            other_job_offers: None,
            current_location: None,
            call_route: None,
            similarity_summary: None,
            rejection_reason: None,
            date_created: date.map(str::to_string),
            is_waiting: false,
        }
    }

    fn ids(records: &[ScreeningRecord]) -> Vec<&str> {
        records.iter().map(|r| r.application_id.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let records = vec![
            record("jan", Some("2024-01-01")),
            record("mar", Some("2024-03-01")),
        ];
        let sorted = by_date_created(records, SortDirection::Newest);
        assert_eq!(ids(&sorted), vec!["mar", "jan"]);
    }

    #[test]
    fn test_oldest_first() {
        let records = vec![
            record("mar", Some("2024-03-01")),
            record("jan", Some("2024-01-01")),
        ];
        let sorted = by_date_created(records, SortDirection::Oldest);
        assert_eq!(ids(&sorted), vec!["jan", "mar"]);
    }

    #[test]
    fn test_dateless_last_in_both_directions() {
        let records = vec![
            record("none", None),
            record("jan", Some("2024-01-01")),
            record("mar", Some("2024-03-01")),
        ];
        let newest = by_date_created(records.clone(), SortDirection::Newest);
        assert_eq!(ids(&newest), vec!["mar", "jan", "none"]);

        let oldest = by_date_created(records, SortDirection::Oldest);
        assert_eq!(ids(&oldest), vec!["jan", "mar", "none"]);
    }

    #[test]
    fn test_unparseable_date_treated_as_dateless() {
        let records = vec![
            record("bad", Some("not a date")),
            record("jan", Some("2024-01-01")),
        ];
        let sorted = by_date_created(records, SortDirection::Newest);
        assert_eq!(ids(&sorted), vec!["jan", "bad"]);
    }

    #[test]
    fn test_dateless_keep_relative_input_order() {
        let records = vec![
            record("n1", None),
            record("jan", Some("2024-01-01")),
            record("n2", None),
            record("n3", None),
        ];
        let sorted = by_date_created(records, SortDirection::Newest);
        assert_eq!(ids(&sorted), vec!["jan", "n1", "n2", "n3"]);
    }
}
