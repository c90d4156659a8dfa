//! Field normalizer
//!
//! Rows in the store use one of two key conventions for the same semantic
//! field: a human-readable titled form (`"Application ID"`, `"Job Title"`)
//! written by the original ingest tooling, or a normalized snake_case form
//! (`application_id`, `job_title`) written by later tooling. Exactly one
//! form appears per record; the two are never mixed within a single record.
//!
//! The normalizer detects the key form once per record up front, then reads
//! every canonical field through a static titled/snake field table: typed
//! adapters per source collection, not per-field branching at read time.
//! All functions here are pure and side-effect-free. The only required
//! field is the application identifier; a record lacking it is not usable
//! and the adapter constructor returns `None` (the caller skips it, nothing
//! is raised).

use aex_common::value::display_string;

use crate::store::RawRecord;

/// Which key convention a record uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyForm {
    /// Human-readable titled keys (`"Application ID"`)
    Titled,
    /// Normalized snake_case keys (`application_id`)
    Snake,
}

/// A canonical field's key under each convention
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub titled: &'static str,
    pub snake: &'static str,
}

impl Field {
    const fn new(titled: &'static str, snake: &'static str) -> Self {
        Self { titled, snake }
    }

    fn key(&self, form: KeyForm) -> &'static str {
        match form {
            KeyForm::Titled => self.titled,
            KeyForm::Snake => self.snake,
        }
    }
}

const APPLICATION_ID: Field = Field::new("Application ID", "application_id");
const JOB_TITLE: Field = Field::new("Job Title", "job_title");
const ROLE_CODE: Field = Field::new("Role Code", "role_code");
const CANDIDATE_NAME: Field = Field::new("Candidate Name", "candidate_name");
const SCREENING_OUTCOME: Field = Field::new("Screening Outcome", "screening_outcome");
const SCREENING_SUMMARY: Field = Field::new("Screening Summary", "screening_summary");
const CALL_STATUS: Field = Field::new("Call Status", "call_status");
const CALL_SCORE: Field = Field::new("Call Score", "call_score");
const SIMILARITY_SCORE: Field = Field::new("Similarity Score", "similarity_score");
const FINAL_SCORE: Field = Field::new("Final Score", "final_score");
const CONVERSATION_ID: Field = Field::new("Conversation ID", "conversation_id");
const RECORDING_LINK: Field = Field::new("Recording Link", "recording_link");
const NOTICE_PERIOD: Field = Field::new("Notice Period", "notice_period");
const CURRENT_CTC: Field = Field::new("Current CTC", "current_ctc");
const EXPECTED_CTC: Field = Field::new("Expected CTC", "expected_ctc");
const OTHER_JOB_OFFERS: Field = Field::new("Other Job Offers", "other_job_offers");
const CURRENT_LOCATION: Field = Field::new("Current Location", "current_location");
const CALL_ROUTE: Field = Field::new("Call Route", "call_route");
const SIMILARITY_SUMMARY: Field = Field::new("Similarity Summary", "similarity_summary");
const REJECTION_REASON: Field = Field::new("Rejection Reason", "rejection_reason");
const DATE_CREATED: Field = Field::new("Date Created", "date_created");
const STATUS: Field = Field::new("Status", "status");
const JOB_APPLIED: Field = Field::new("Job Applied", "job_applied");
const PROFILE_STATUS: Field = Field::new("Profile Status", "profile_status");
// CandidateMaster names its expected-CTC column differently from Tracker
const SALARY_EXPECTATION: Field =
    Field::new("Candidate Salary Expectation", "candidate_salary_expectation");

/// `created_at` is a store-managed column and is snake_case under both
/// conventions, so it is read by exact key and excluded from form detection.
const CREATED_AT_KEY: &str = "created_at";

/// Detect which key convention a record uses: the presence of any titled
/// key from the source's field table implies the titled form.
fn detect_key_form(raw: &RawRecord, fields: &[Field]) -> KeyForm {
    if fields.iter().any(|f| raw.contains_key(f.titled)) {
        KeyForm::Titled
    } else {
        KeyForm::Snake
    }
}

/// Extract the application identifier from a raw record of any source,
/// under either key form. Shared with the in-memory store's id lookup.
pub fn application_id(raw: &RawRecord) -> Option<String> {
    raw.get(APPLICATION_ID.titled)
        .or_else(|| raw.get(APPLICATION_ID.snake))
        .and_then(display_string)
}

/// Form-aware field reader over one raw record
struct Reader<'a> {
    raw: &'a RawRecord,
    form: KeyForm,
}

impl<'a> Reader<'a> {
    fn new(raw: &'a RawRecord, fields: &[Field]) -> Self {
        Self {
            raw,
            form: detect_key_form(raw, fields),
        }
    }

    fn get(&self, field: Field) -> Option<String> {
        self.raw.get(field.key(self.form)).and_then(display_string)
    }

    fn created_at(&self) -> Option<String> {
        self.raw.get(CREATED_AT_KEY).and_then(display_string)
    }
}

const TRACKER_FIELDS: &[Field] = &[
    APPLICATION_ID,
    JOB_TITLE,
    ROLE_CODE,
    CANDIDATE_NAME,
    SCREENING_OUTCOME,
    SCREENING_SUMMARY,
    CALL_STATUS,
    CALL_SCORE,
    SIMILARITY_SCORE,
    FINAL_SCORE,
    CONVERSATION_ID,
    RECORDING_LINK,
    NOTICE_PERIOD,
    CURRENT_CTC,
    EXPECTED_CTC,
    OTHER_JOB_OFFERS,
    CURRENT_LOCATION,
    CALL_ROUTE,
    SIMILARITY_SUMMARY,
    REJECTION_REASON,
    DATE_CREATED,
];

const QUEUE_FIELDS: &[Field] = &[APPLICATION_ID, STATUS, DATE_CREATED];

const CANDIDATE_FIELDS: &[Field] = &[
    APPLICATION_ID,
    JOB_APPLIED,
    ROLE_CODE,
    CANDIDATE_NAME,
    PROFILE_STATUS,
    NOTICE_PERIOD,
    CURRENT_CTC,
    SALARY_EXPECTATION,
    CURRENT_LOCATION,
    DATE_CREATED,
];

/// Normalized Tracker row: one screening outcome per application
#[derive(Debug, Clone)]
pub struct TrackerRow {
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
    pub created_at: Option<String>,
    pub date_created: Option<String>,
}

impl TrackerRow {
    /// Adapt a raw Tracker record; `None` when the application identifier
    /// is missing (the record is discarded, not an error).
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let reader = Reader::new(raw, TRACKER_FIELDS);
        Some(Self {
            application_id: reader.get(APPLICATION_ID)?,
            job_title: reader.get(JOB_TITLE),
            role_code: reader.get(ROLE_CODE),
            candidate_name: reader.get(CANDIDATE_NAME),
            screening_outcome: reader.get(SCREENING_OUTCOME),
            screening_summary: reader.get(SCREENING_SUMMARY),
            call_status: reader.get(CALL_STATUS),
            call_score: reader.get(CALL_SCORE),
            similarity_score: reader.get(SIMILARITY_SCORE),
            final_score: reader.get(FINAL_SCORE),
            conversation_id: reader.get(CONVERSATION_ID),
            recording_link: reader.get(RECORDING_LINK),
            notice_period: reader.get(NOTICE_PERIOD),
            current_ctc: reader.get(CURRENT_CTC),
            expected_ctc: reader.get(EXPECTED_CTC),
            other_job_offers: reader.get(OTHER_JOB_OFFERS),
            current_location: reader.get(CURRENT_LOCATION),
            call_route: reader.get(CALL_ROUTE),
            similarity_summary: reader.get(SIMILARITY_SUMMARY),
            rejection_reason: reader.get(REJECTION_REASON),
            created_at: reader.created_at(),
            date_created: reader.get(DATE_CREATED),
        })
    }
}

/// Normalized Queue row: one processing-status entry per application
#[derive(Debug, Clone)]
pub struct QueueRow {
    pub application_id: String,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

impl QueueRow {
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let reader = Reader::new(raw, QUEUE_FIELDS);
        Some(Self {
            application_id: reader.get(APPLICATION_ID)?,
            status: reader.get(STATUS),
            created_at: reader.created_at(),
        })
    }
}

/// Normalized CandidateMaster row: applicant-submitted profile data
#[derive(Debug, Clone)]
pub struct CandidateRow {
    pub application_id: String,
    pub job_applied: Option<String>,
    pub role_code: Option<String>,
    pub candidate_name: Option<String>,
    pub profile_status: Option<String>,
    pub notice_period: Option<String>,
    pub current_ctc: Option<String>,
    pub salary_expectation: Option<String>,
    pub current_location: Option<String>,
    pub created_at: Option<String>,
    pub date_created: Option<String>,
}

impl CandidateRow {
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let reader = Reader::new(raw, CANDIDATE_FIELDS);
        Some(Self {
            application_id: reader.get(APPLICATION_ID)?,
            job_applied: reader.get(JOB_APPLIED),
            role_code: reader.get(ROLE_CODE),
            candidate_name: reader.get(CANDIDATE_NAME),
            profile_status: reader.get(PROFILE_STATUS),
            notice_period: reader.get(NOTICE_PERIOD),
            current_ctc: reader.get(CURRENT_CTC),
            salary_expectation: reader.get(SALARY_EXPECTATION),
            current_location: reader.get(CURRENT_LOCATION),
            created_at: reader.created_at(),
            date_created: reader.get(DATE_CREATED),
        })
    }
}
