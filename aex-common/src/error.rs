//! Common error types for the AEX dashboard

use thiserror::Error;

/// Common result type for AEX operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by a record query service.
///
/// The store is an external HTTP service; these cover the transport,
/// HTTP-status, and body-decode layers of a failed fetch.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Request could not be sent or timed out
    #[error("request failed: {0}")]
    Transport(String),

    /// Store answered with a non-success HTTP status
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected row collection
    #[error("failed to decode store response: {0}")]
    Decode(String),
}

/// Common error types across AEX services
#[derive(Error, Debug)]
pub enum Error {
    /// A source collection fetch failed.
    ///
    /// Only Tracker failures surface as this error; Queue and
    /// CandidateMaster failures are downgraded to warnings at the call
    /// site and degrade the affected branch instead.
    #[error("failed to read {collection}: {source}")]
    Store {
        collection: String,
        #[source]
        source: StoreError,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
