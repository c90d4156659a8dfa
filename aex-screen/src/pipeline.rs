//! Pipeline orchestration and view assembly
//!
//! Runs the stages strictly in order (fetch, normalize, reconcile, facet,
//! filter, sort) with each stage producing a new sequence, and assembles
//! the final view the consumer can trust. A run is a pure function of its
//! three source snapshots plus the configuration; nothing is shared
//! between runs.
//!
//! Failure semantics:
//! - Tracker fetch failure is fatal to the run and surfaces as the error.
//! - Queue fetch failure degrades to an empty status index (no Tracker
//!   record can then be confirmed `Completed`, so none is admitted).
//! - CandidateMaster fetch failure drops the standalone waiting records for
//!   this run only; Tracker-path admissions still appear.

use aex_common::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::filter::{self, Facets, Filters};
use crate::normalize::TrackerRow;
use crate::queue;
use crate::record::ScreeningRecord;
use crate::reconcile;
use crate::sort::{self, SortDirection};
use crate::store::{Collection, CollectionNames, RecordStore};

/// Configuration for one pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Admit waiting applications (Tracker-backed and standalone)
    pub include_waiting: bool,
    /// Active filter criteria
    pub filters: Filters,
    /// Date-created sort direction
    pub sort: SortDirection,
}

impl RunConfig {
    /// The reset-filters configuration: all filters cleared and the sort
    /// direction back to newest-first, with `include_waiting` preserved.
    pub fn reset_filters(&self) -> Self {
        Self {
            include_waiting: self.include_waiting,
            filters: Filters::default(),
            sort: SortDirection::Newest,
        }
    }
}

/// The assembled output of one run
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningView {
    /// Filtered, ordered canonical records
    pub records: Vec<ScreeningRecord>,
    /// Reconciled record count before filtering
    pub total: usize,
    /// Filter facets, derived from the unfiltered reconciled set
    pub facets: Facets,
}

/// The screening reconciliation pipeline over a record query service
pub struct ScreeningPipeline<S> {
    store: S,
    names: CollectionNames,
}

impl<S: RecordStore> ScreeningPipeline<S> {
    /// Pipeline over the default collection names
    pub fn new(store: S) -> Self {
        Self::with_names(store, CollectionNames::default())
    }

    /// Pipeline with overridden collection names
    pub fn with_names(store: S, names: CollectionNames) -> Self {
        Self { store, names }
    }

    /// Execute one full pipeline run.
    ///
    /// Tracker and Queue snapshots are fetched concurrently; the
    /// CandidateMaster fetch is conditional and must wait for both, since
    /// it needs the identifier sets to know which waiting applications are
    /// standalone.
    pub async fn run(&self, config: &RunConfig) -> Result<ScreeningView> {
        let tracker_table = self.names.table(Collection::Tracker);
        let queue_table = self.names.table(Collection::Queue);

        let (tracker_rows, queue_rows) = tokio::join!(
            self.store.fetch_all(tracker_table),
            self.store.fetch_all(queue_table),
        );

        // Tracker is the backbone of the view; losing it is fatal
        let tracker_rows = tracker_rows.map_err(|source| Error::Store {
            collection: tracker_table.to_string(),
            source,
        })?;

        // A lost Queue degrades to an empty index: statuses cannot be
        // confirmed, so no Tracker record is admitted this run
        let status_index = match queue_rows {
            Ok(rows) => queue::build_status_index(&rows),
            Err(err) => {
                warn!(collection = queue_table, error = %err, "queue fetch failed, proceeding with empty status index");
                Default::default()
            }
        };

        let normalized: Vec<TrackerRow> = tracker_rows
            .iter()
            .filter_map(TrackerRow::from_raw)
            .collect();
        debug!(
            raw = tracker_rows.len(),
            normalized = normalized.len(),
            "normalized tracker snapshot"
        );

        let pass = reconcile::admit_tracker_rows(normalized, &status_index, config.include_waiting);
        let mut records = pass.records;

        if config.include_waiting {
            let wanted = reconcile::standalone_waiting_ids(&status_index, &pass.seen);
            if !wanted.is_empty() {
                let master_table = self.names.table(Collection::CandidateMaster);
                match self.store.fetch_by_ids(master_table, &wanted).await {
                    Ok(master_rows) => {
                        records.extend(reconcile::synthesize_standalone(
                            &master_rows,
                            &wanted,
                            &status_index,
                        ));
                    }
                    Err(err) => {
                        warn!(collection = master_table, error = %err, "candidate master fetch failed, skipping standalone waiting records");
                    }
                }
            }
        }

        let facets = filter::derive_facets(&records);
        let total = records.len();
        let filtered = filter::apply(&records, &config.filters);
        let ordered = sort::by_date_created(filtered, config.sort);

        debug!(total, shown = ordered.len(), "pipeline run complete");
        Ok(ScreeningView {
            records: ordered,
            total,
            facets,
        })
    }
}
