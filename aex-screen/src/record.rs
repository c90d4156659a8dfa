//! Canonical screening record
//!
//! The unified per-application view produced by reconciliation. Score and
//! compensation fields stay display strings so source precision is
//! preserved; they are only parsed to f64 where filtering or banding needs it.

use aex_common::time::parse_timestamp;
use aex_common::value::parse_numeric;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::normalize::{CandidateRow, TrackerRow};
use crate::queue::QueueEntry;

/// One reconciled screening record.
///
/// `application_id` is the sole join key of the pipeline and the only
/// required field; the final output never contains two records sharing it.
/// `is_waiting` is the provenance flag: true only for records admitted via
/// a waiting branch, false for the completed branch.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningRecord {
    pub application_id: String,
    pub job_title: Option<String>,
    pub role_code: Option<String>,
    pub candidate_name: Option<String>,
    pub screening_outcome: Option<String>,
    pub screening_summary: Option<String>,
    pub call_status: Option<String>,
    pub call_score: Option<String>,
    pub similarity_score: Option<String>,
    pub final_score: Option<String>,
    pub conversation_id: Option<String>,
    pub recording_link: Option<String>,
    pub notice_period: Option<String>,
    pub current_ctc: Option<String>,
    pub expected_ctc: Option<String>,
    pub other_job_offers: Option<String>,
    pub current_location: Option<String>,
    pub call_route: Option<String>,
    pub similarity_summary: Option<String>,
    pub rejection_reason: Option<String>,
    pub date_created: Option<String>,
    pub is_waiting: bool,
}

impl ScreeningRecord {
    /// Build a record from a Tracker row (the completed or tracker-waiting
    /// admission branches). Date-created resolution: the row's `created_at`,
    /// else its explicit date-created field.
    pub fn from_tracker(row: TrackerRow, is_waiting: bool) -> Self {
        let date_created = row.created_at.or(row.date_created);
        Self {
            application_id: row.application_id,
            job_title: row.job_title,
            role_code: row.role_code,
            candidate_name: row.candidate_name,
            screening_outcome: row.screening_outcome,
            screening_summary: row.screening_summary,
            call_status: row.call_status,
            call_score: row.call_score,
            similarity_score: row.similarity_score,
            final_score: row.final_score,
            conversation_id: row.conversation_id,
            recording_link: row.recording_link,
            notice_period: row.notice_period,
            current_ctc: row.current_ctc,
            expected_ctc: row.expected_ctc,
            other_job_offers: row.other_job_offers,
            current_location: row.current_location,
            call_route: row.call_route,
            similarity_summary: row.similarity_summary,
            rejection_reason: row.rejection_reason,
            date_created,
            is_waiting,
        }
    }

    /// Synthesize a standalone waiting record from CandidateMaster data
    /// alone: job applied becomes the job title, the profile status becomes
    /// the call status, and every screening-specific field stays absent.
    /// Date-created falls back to the Queue row's creation timestamp when
    /// the master row has none.
    pub fn from_candidate(row: CandidateRow, queue_entry: &QueueEntry) -> Self {
        let date_created = row
            .created_at
            .or(row.date_created)
            .or_else(|| queue_entry.created_at.clone());
        Self {
            application_id: row.application_id,
            job_title: row.job_applied,
            role_code: row.role_code,
            candidate_name: row.candidate_name,
            screening_outcome: None,
            screening_summary: None,
            call_status: row.profile_status,
            call_score: None,
            similarity_score: None,
            final_score: None,
            conversation_id: None,
            recording_link: None,
            notice_period: row.notice_period,
            current_ctc: row.current_ctc,
            expected_ctc: row.salary_expectation,
            other_job_offers: None,
            current_location: row.current_location,
            call_route: None,
            similarity_summary: None,
            rejection_reason: None,
            date_created,
            is_waiting: true,
        }
    }

    /// Final score as a number; `None` when absent or unparseable
    pub fn final_score_value(&self) -> Option<f64> {
        self.final_score.as_deref().and_then(parse_numeric)
    }

    /// Parsed date-created; `None` when absent or unparseable
    pub fn date_created_ts(&self) -> Option<DateTime<Utc>> {
        self.date_created.as_deref().and_then(parse_timestamp)
    }
}
