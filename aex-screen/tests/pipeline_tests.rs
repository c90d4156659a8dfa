//! Integration tests for the screening reconciliation pipeline
//!
//! Runs the full pipeline against an in-memory record store, covering:
//! - Admission rules per queue status and include_waiting
//! - Output uniqueness and standalone exclusivity
//! - Source-failure degradation (Queue and CandidateMaster non-fatal,
//!   Tracker fatal)
//! - Filtering, facet derivation, and null-safe date ordering

use aex_screen::{
    Collection, CollectionNames, Filters, MemoryStore, RawRecord, RunConfig, ScreeningPipeline,
    SortDirection,
};
use serde_json::Value;
use std::collections::HashSet;

fn row(pairs: &[(&str, &str)]) -> RawRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

fn tracker_row(id: &str, name: &str) -> RawRecord {
    row(&[
        ("Application ID", id),
        ("Candidate Name", name),
        ("Job Title", "Backend Engineer"),
        ("Screening Outcome", "Selected"),
        ("Final Score", "70"),
    ])
}

fn queue_row(id: &str, status: &str) -> RawRecord {
    row(&[("Application ID", id), ("Status", status)])
}

fn master_row(id: &str, name: &str) -> RawRecord {
    row(&[
        ("Application ID", id),
        ("Candidate Name", name),
        ("Job Applied", "Data Analyst"),
        ("Role Code", "DA-02"),
        ("Profile Status", "Profile Submitted"),
    ])
}

fn store() -> (MemoryStore, CollectionNames) {
    (MemoryStore::new(), CollectionNames::default())
}

fn config(include_waiting: bool) -> RunConfig {
    RunConfig {
        include_waiting,
        ..RunConfig::default()
    }
}

// ============================================================================
// Admission rules
// ============================================================================

#[tokio::test]
async fn test_completed_tracker_record_admitted() {
    let (mut store, names) = store();
    store.insert(&names.tracker, vec![tracker_row("A1", "John Smith")]);
    store.insert(&names.queue, vec![queue_row("A1", "Completed")]);

    let pipeline = ScreeningPipeline::new(store);
    let view = pipeline.run(&config(false)).await.unwrap();

    assert_eq!(view.records.len(), 1);
    let record = &view.records[0];
    assert_eq!(record.application_id, "A1");
    assert_eq!(record.candidate_name.as_deref(), Some("John Smith"));
    assert_eq!(record.job_title.as_deref(), Some("Backend Engineer"));
    assert!(!record.is_waiting);
}

#[tokio::test]
async fn test_waiting_tracker_record_needs_flag() {
    let (mut store, names) = store();
    store.insert(&names.tracker, vec![tracker_row("A1", "John Smith")]);
    store.insert(&names.queue, vec![queue_row("A1", "Waiting")]);
    let pipeline = ScreeningPipeline::new(store);

    let view = pipeline.run(&config(false)).await.unwrap();
    assert!(view.records.is_empty());

    let view = pipeline.run(&config(true)).await.unwrap();
    assert_eq!(view.records.len(), 1);
    assert!(view.records[0].is_waiting);
    // Tracker-backed waiting records keep their Tracker fields
    assert_eq!(view.records[0].final_score.as_deref(), Some("70"));
}

#[tokio::test]
async fn test_processing_or_unqueued_never_admitted() {
    let (mut store, names) = store();
    store.insert(
        &names.tracker,
        vec![tracker_row("A1", "One"), tracker_row("A2", "Two")],
    );
    // A1 is Processing; A2 is absent from the queue entirely
    store.insert(&names.queue, vec![queue_row("A1", "Processing")]);

    let pipeline = ScreeningPipeline::new(store);
    let view = pipeline.run(&config(true)).await.unwrap();
    assert!(view.records.is_empty());
}

#[tokio::test]
async fn test_record_without_application_id_discarded() {
    let (mut store, names) = store();
    let mut orphan = tracker_row("A1", "John Smith");
    orphan.remove("Application ID");
    store.insert(&names.tracker, vec![orphan, tracker_row("A2", "Jane Doe")]);
    store.insert(
        &names.queue,
        vec![queue_row("A1", "Completed"), queue_row("A2", "Completed")],
    );

    let pipeline = ScreeningPipeline::new(store);
    let view = pipeline.run(&config(false)).await.unwrap();
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].application_id, "A2");
}

// ============================================================================
// Standalone waiting pass
// ============================================================================

#[tokio::test]
async fn test_standalone_waiting_synthesized_from_master() {
    let (mut store, names) = store();
    // A2 waits in the queue but has no Tracker entry yet
    store.insert(&names.queue, vec![queue_row("A2", "Waiting")]);
    store.insert(&names.candidate_master, vec![master_row("A2", "Jane Doe")]);
    let pipeline = ScreeningPipeline::new(store);

    let view = pipeline.run(&config(true)).await.unwrap();
    assert_eq!(view.records.len(), 1);
    let record = &view.records[0];
    assert_eq!(record.application_id, "A2");
    assert_eq!(record.candidate_name.as_deref(), Some("Jane Doe"));
    assert_eq!(record.job_title.as_deref(), Some("Data Analyst"));
    assert_eq!(record.call_status.as_deref(), Some("Profile Submitted"));
    assert!(record.is_waiting);
    // Screening-specific fields are all absent
    assert!(record.screening_outcome.is_none());
    assert!(record.final_score.is_none());
    assert!(record.recording_link.is_none());

    // With the flag off, A2 is absent from the output entirely
    let view = pipeline.run(&config(false)).await.unwrap();
    assert!(view.records.is_empty());
}

#[tokio::test]
async fn test_standalone_without_master_row_dropped() {
    let (mut store, names) = store();
    store.insert(&names.queue, vec![queue_row("A9", "Waiting")]);
    // No CandidateMaster row for A9

    let pipeline = ScreeningPipeline::new(store);
    let view = pipeline.run(&config(true)).await.unwrap();
    assert!(view.records.is_empty());
}

#[tokio::test]
async fn test_standalone_pass_never_duplicates_tracker_ids() {
    let (mut store, names) = store();
    store.insert(&names.tracker, vec![tracker_row("A1", "John Smith")]);
    store.insert(&names.queue, vec![queue_row("A1", "Waiting")]);
    // A master row exists for A1 too; it must not produce a second record
    store.insert(&names.candidate_master, vec![master_row("A1", "Shadow Copy")]);

    let pipeline = ScreeningPipeline::new(store);
    let view = pipeline.run(&config(true)).await.unwrap();

    assert_eq!(view.records.len(), 1);
    // The Tracker profile backs the record, not the master fallback
    assert_eq!(view.records[0].candidate_name.as_deref(), Some("John Smith"));
}

#[tokio::test]
async fn test_output_ids_unique_across_sources() {
    let (mut store, names) = store();
    store.insert(
        &names.tracker,
        vec![
            tracker_row("A1", "One"),
            tracker_row("A1", "One Duplicate"),
            tracker_row("A2", "Two"),
        ],
    );
    store.insert(
        &names.queue,
        vec![
            queue_row("A1", "Completed"),
            queue_row("A2", "Waiting"),
            queue_row("A3", "Waiting"),
        ],
    );
    store.insert(
        &names.candidate_master,
        vec![master_row("A3", "Three"), master_row("A3", "Three Duplicate")],
    );

    let pipeline = ScreeningPipeline::new(store);
    let view = pipeline.run(&config(true)).await.unwrap();

    let ids: Vec<&str> = view.records.iter().map(|r| r.application_id.as_str()).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len(), "duplicate ids in output: {ids:?}");
    assert_eq!(unique.len(), 3);
}

// ============================================================================
// Source-failure degradation
// ============================================================================

#[tokio::test]
async fn test_tracker_failure_is_fatal() {
    let (mut store, names) = store();
    store.insert(&names.queue, vec![queue_row("A1", "Completed")]);
    store.fail_table(&names.tracker);

    let pipeline = ScreeningPipeline::new(store);
    let err = pipeline.run(&config(false)).await.unwrap_err();
    assert!(err.to_string().contains(&names.tracker));
}

#[tokio::test]
async fn test_queue_failure_degrades_to_empty_index() {
    let (mut store, names) = store();
    store.insert(&names.tracker, vec![tracker_row("A1", "John Smith")]);
    store.fail_table(&names.queue);

    let pipeline = ScreeningPipeline::new(store);
    // Not an error, but nothing can be confirmed Completed either
    let view = pipeline.run(&config(true)).await.unwrap();
    assert!(view.records.is_empty());
}

#[tokio::test]
async fn test_master_failure_keeps_tracker_records() {
    let (mut store, names) = store();
    store.insert(&names.tracker, vec![tracker_row("A1", "John Smith")]);
    store.insert(
        &names.queue,
        vec![queue_row("A1", "Completed"), queue_row("A2", "Waiting")],
    );
    store.insert(&names.candidate_master, vec![master_row("A2", "Jane Doe")]);
    store.fail_table(&names.candidate_master);

    let pipeline = ScreeningPipeline::new(store);
    let view = pipeline.run(&config(true)).await.unwrap();

    // Standalone records are skipped this run; Tracker-path ones survive
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].application_id, "A1");
}

// ============================================================================
// Filtering, facets, ordering
// ============================================================================

#[tokio::test]
async fn test_score_filter_worked_example() {
    let (mut store, names) = store();
    let scores = [("A1", Some("55")), ("A2", Some("70")), ("A3", Some("—")), ("A4", None)];
    let mut tracker = Vec::new();
    let mut queue = Vec::new();
    for (id, score) in scores {
        let mut r = tracker_row(id, id);
        match score {
            Some(s) => {
                r.insert("Final Score".to_string(), Value::String(s.to_string()));
            }
            None => {
                r.remove("Final Score");
            }
        }
        tracker.push(r);
        queue.push(queue_row(id, "Completed"));
    }
    store.insert(&names.tracker, tracker);
    store.insert(&names.queue, queue);

    let pipeline = ScreeningPipeline::new(store);
    let mut cfg = config(false);
    cfg.filters = Filters {
        score_min: Some(60.0),
        score_max: Some(100.0),
        ..Filters::default()
    };

    let view = pipeline.run(&cfg).await.unwrap();
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].application_id, "A2");
    // total and facets reflect the unfiltered reconciled set
    assert_eq!(view.total, 4);
}

#[tokio::test]
async fn test_facets_derived_from_unfiltered_set() {
    let (mut store, names) = store();
    let mut a = tracker_row("A1", "One");
    a.insert("Call Status".to_string(), Value::String("Answered".to_string()));
    a.insert("Role Code".to_string(), Value::String("BE-01".to_string()));
    let mut b = tracker_row("A2", "Two");
    b.insert("Call Status".to_string(), Value::String("No Response".to_string()));
    b.insert("Role Code".to_string(), Value::String("DA-02".to_string()));
    store.insert(&names.tracker, vec![a, b]);
    store.insert(
        &names.queue,
        vec![queue_row("A1", "Completed"), queue_row("A2", "Completed")],
    );

    let pipeline = ScreeningPipeline::new(store);
    let mut cfg = config(false);
    cfg.filters.role_code = Some("BE-01".to_string());

    let view = pipeline.run(&cfg).await.unwrap();
    assert_eq!(view.records.len(), 1);
    // Facets keep the filtered-out values, lexicographically sorted
    assert_eq!(view.facets.role_codes, vec!["BE-01", "DA-02"]);
    assert_eq!(view.facets.call_statuses, vec!["Answered", "No Response"]);
}

#[tokio::test]
async fn test_date_ordering_worked_example() {
    let (mut store, names) = store();
    let mut jan = tracker_row("jan", "January");
    jan.insert("created_at".to_string(), Value::String("2024-01-01".to_string()));
    let mut mar = tracker_row("mar", "March");
    mar.insert("created_at".to_string(), Value::String("2024-03-01".to_string()));
    let undated = tracker_row("none", "Dateless");
    store.insert(&names.tracker, vec![jan, mar, undated]);
    store.insert(
        &names.queue,
        vec![
            queue_row("jan", "Completed"),
            queue_row("mar", "Completed"),
            queue_row("none", "Completed"),
        ],
    );
    let pipeline = ScreeningPipeline::new(store);

    let mut cfg = config(false);
    cfg.sort = SortDirection::Newest;
    let view = pipeline.run(&cfg).await.unwrap();
    let ids: Vec<&str> = view.records.iter().map(|r| r.application_id.as_str()).collect();
    assert_eq!(ids, vec!["mar", "jan", "none"]);

    cfg.sort = SortDirection::Oldest;
    let view = pipeline.run(&cfg).await.unwrap();
    let ids: Vec<&str> = view.records.iter().map(|r| r.application_id.as_str()).collect();
    assert_eq!(ids, vec!["jan", "mar", "none"]);
}

#[tokio::test]
async fn test_standalone_date_falls_back_to_queue_timestamp() {
    let (mut store, names) = store();
    let mut waiting = queue_row("A2", "Waiting");
    waiting.insert(
        "created_at".to_string(),
        Value::String("2024-02-10T08:00:00Z".to_string()),
    );
    store.insert(&names.queue, vec![waiting]);
    store.insert(&names.candidate_master, vec![master_row("A2", "Jane Doe")]);

    let pipeline = ScreeningPipeline::new(store);
    let view = pipeline.run(&config(true)).await.unwrap();
    assert_eq!(
        view.records[0].date_created.as_deref(),
        Some("2024-02-10T08:00:00Z")
    );
}

#[tokio::test]
async fn test_collection_name_overrides() {
    let mut store = MemoryStore::new();
    store.insert("custom_tracker", vec![tracker_row("A1", "John Smith")]);
    store.insert("custom_queue", vec![queue_row("A1", "Completed")]);

    let names = CollectionNames {
        tracker: "custom_tracker".to_string(),
        queue: "custom_queue".to_string(),
        candidate_master: "custom_master".to_string(),
    };
    assert_eq!(names.table(Collection::Tracker), "custom_tracker");

    let pipeline = ScreeningPipeline::with_names(store, names);
    let view = pipeline.run(&config(false)).await.unwrap();
    assert_eq!(view.records.len(), 1);
}
