//! Record query service interface
//!
//! The record store is externally managed; this module defines the seam the
//! pipeline consumes it through. Each call is an independent snapshot; the
//! store offers no transactional guarantee across calls.

use std::collections::{HashMap, HashSet};

use aex_common::StoreError;
use async_trait::async_trait;
use serde_json::Value;

use crate::normalize;

/// An untyped row as returned by the record store.
///
/// Values are strings, numbers, booleans, nulls, or timestamp-like strings;
/// keys may use either the human-readable titled form (`"Application ID"`)
/// or the normalized snake_case form (`application_id`). Exactly one form is
/// present per record, never both.
pub type RawRecord = serde_json::Map<String, Value>;

/// The three source collections the pipeline reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Completed or in-progress screening outcomes
    Tracker,
    /// Per-application processing status (`Waiting` / `Processing` / `Completed`)
    Queue,
    /// Raw applicant-submitted data, independent of screening status
    CandidateMaster,
}

/// Store table name per collection.
///
/// Defaults match the production store; deployments can override the names
/// without touching the store client.
#[derive(Debug, Clone)]
pub struct CollectionNames {
    pub tracker: String,
    pub queue: String,
    pub candidate_master: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            tracker: "AEX_Screening_Tracker".to_string(),
            queue: "AEX_Screening_Batch_Queue".to_string(),
            candidate_master: "AEX_Candidate_Data".to_string(),
        }
    }
}

impl CollectionNames {
    /// Resolve a collection to its store table name
    pub fn table(&self, collection: Collection) -> &str {
        match collection {
            Collection::Tracker => &self.tracker,
            Collection::Queue => &self.queue,
            Collection::CandidateMaster => &self.candidate_master,
        }
    }
}

/// Generic record query service.
///
/// Implemented by the PostgREST client in the dashboard service and by
/// [`MemoryStore`] for tests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every row of a table
    async fn fetch_all(&self, table: &str) -> Result<Vec<RawRecord>, StoreError>;

    /// Fetch rows whose application identifier is in `ids`
    async fn fetch_by_ids(&self, table: &str, ids: &[String]) -> Result<Vec<RawRecord>, StoreError>;

    /// Fetch rows where `field` equals `value` exactly
    async fn fetch_where(
        &self,
        table: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<RawRecord>, StoreError>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    async fn fetch_all(&self, table: &str) -> Result<Vec<RawRecord>, StoreError> {
        (**self).fetch_all(table).await
    }

    async fn fetch_by_ids(&self, table: &str, ids: &[String]) -> Result<Vec<RawRecord>, StoreError> {
        (**self).fetch_by_ids(table, ids).await
    }

    async fn fetch_where(
        &self,
        table: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<RawRecord>, StoreError> {
        (**self).fetch_where(table, field, value).await
    }
}

/// In-memory store for tests.
///
/// Holds rows per table and can be told to fail a table's fetches, which is
/// how source-unavailable degradation is exercised.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<RawRecord>>,
    failing: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to a table, creating it if needed
    pub fn insert(&mut self, table: &str, rows: Vec<RawRecord>) {
        self.tables.entry(table.to_string()).or_default().extend(rows);
    }

    /// Make every fetch against `table` fail with a transport error
    pub fn fail_table(&mut self, table: &str) {
        self.failing.insert(table.to_string());
    }

    fn rows_for(&self, table: &str) -> Result<&[RawRecord], StoreError> {
        if self.failing.contains(table) {
            return Err(StoreError::Transport(format!(
                "simulated outage for table {table}"
            )));
        }
        // A missing table reads as empty, matching a store with no rows yet
        Ok(self
            .tables
            .get(table)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(&self, table: &str) -> Result<Vec<RawRecord>, StoreError> {
        Ok(self.rows_for(table)?.to_vec())
    }

    async fn fetch_by_ids(&self, table: &str, ids: &[String]) -> Result<Vec<RawRecord>, StoreError> {
        let rows = self.rows_for(table)?;
        Ok(rows
            .iter()
            .filter(|row| {
                normalize::application_id(row).is_some_and(|id| ids.contains(&id))
            })
            .cloned()
            .collect())
    }

    async fn fetch_where(
        &self,
        table: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let rows = self.rows_for(table)?;
        Ok(rows
            .iter()
            .filter(|row| {
                row.get(field)
                    .and_then(aex_common::value::display_string)
                    .is_some_and(|v| v == value)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_fetch_all_missing_table_is_empty() {
        let store = MemoryStore::new();
        let rows = store.fetch_all("nope").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_by_ids_matches_either_key_form() {
        let mut store = MemoryStore::new();
        store.insert(
            "t",
            vec![
                row(&[("Application ID", json!("A1"))]),
                row(&[("application_id", json!("A2"))]),
                row(&[("Application ID", json!("A3"))]),
            ],
        );

        let rows = store
            .fetch_by_ids("t", &["A1".to_string(), "A2".to_string()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_where_exact_match() {
        let mut store = MemoryStore::new();
        store.insert(
            "q",
            vec![
                row(&[("Application ID", json!("A1")), ("Status", json!("Waiting"))]),
                row(&[("Application ID", json!("A2")), ("Status", json!("Completed"))]),
            ],
        );

        let rows = store.fetch_where("q", "Status", "Waiting").await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_failing_table_errors() {
        let mut store = MemoryStore::new();
        store.insert("t", vec![row(&[("Application ID", json!("A1"))])]);
        store.fail_table("t");
        assert!(store.fetch_all("t").await.is_err());
    }
}
