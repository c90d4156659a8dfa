//! # AEX Screening Pipeline
//!
//! Reconciliation pipeline over the recruitment-screening record store.
//! Merges three independently updated collections (the processing Queue,
//! the completed-screening Tracker, and the CandidateMaster applicant list)
//! into one consistent, de-duplicated, filterable, sortable view.
//!
//! Data flows strictly one direction; each stage produces a new sequence:
//!
//! ```text
//! raw collections -> normalize -> reconcile -> filter -> sort -> view
//! ```
//!
//! The record store itself is an external collaborator, reached through the
//! [`RecordStore`] trait. Every pipeline run fetches fresh snapshots and
//! rebuilds the canonical records from scratch; there is no persisted or
//! incremental canonical state.

pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod queue;
pub mod record;
pub mod reconcile;
pub mod semantics;
pub mod sort;
pub mod store;

pub use filter::{Facets, Filters};
pub use pipeline::{RunConfig, ScreeningPipeline, ScreeningView};
pub use record::ScreeningRecord;
pub use semantics::{OutcomeClass, ScoreBand};
pub use sort::SortDirection;
pub use store::{Collection, CollectionNames, MemoryStore, RawRecord, RecordStore};
