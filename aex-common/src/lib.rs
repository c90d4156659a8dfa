//! # AEX Common Library
//!
//! Shared code for the AEX dashboard services:
//! - Error types ([`Error`], [`StoreError`])
//! - Lenient timestamp parsing for store-supplied date strings
//! - Raw JSON value helpers (display strings, score parsing)

pub mod error;
pub mod time;
pub mod value;

pub use error::{Error, Result, StoreError};
