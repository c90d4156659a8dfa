//! PostgREST record store client
//!
//! The record store is a Supabase/PostgREST-style HTTP service: each table
//! is exposed at `{base}/rest/v1/{table}` and filtered through query
//! parameters (`select=*`, `{column}=eq.{value}`, `{column}=in.(...)`).
//! Every call is an independent snapshot; the store offers no transactional
//! guarantee across calls and none is assumed.

use std::time::Duration;

use aex_common::{Error, Result, StoreError};
use aex_screen::{RawRecord, RecordStore};
use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

/// Default timeout for store requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default application-identifier column for id-list fetches
const DEFAULT_ID_COLUMN: &str = "Application ID";

/// HTTP client for the record query service
pub struct RestStore {
    http_client: Client,
    base_url: String,
    id_column: String,
}

impl RestStore {
    /// Create a store client for the given base URL and API key.
    ///
    /// The key is sent both as `apikey` and as a bearer token, per the
    /// store's authentication scheme.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let key_value = header::HeaderValue::from_str(api_key)
            .map_err(|_| Error::Config("store API key contains invalid characters".to_string()))?;
        let bearer = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| Error::Config("store API key contains invalid characters".to_string()))?;

        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", key_value);
        headers.insert(header::AUTHORIZATION, bearer);

        let http_client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
        })
    }

    /// Override the application-identifier column name
    pub fn with_id_column(mut self, column: &str) -> Self {
        self.id_column = column.to_string();
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn get_rows(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<Vec<RawRecord>, StoreError> {
        let url = self.table_url(table);
        debug!(table, "fetching rows from record store");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<RawRecord>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// Quote a value for a PostgREST `in.(...)` list. Values are wrapped in
/// double quotes so ids containing commas or spaces survive; embedded
/// quotes are stripped (identifiers never legitimately contain them).
fn quote_in_list(ids: &[String]) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("\"{}\"", id.replace('"', "")))
        .collect();
    format!("in.({})", quoted.join(","))
}

#[async_trait]
impl RecordStore for RestStore {
    async fn fetch_all(&self, table: &str) -> std::result::Result<Vec<RawRecord>, StoreError> {
        self.get_rows(table, &[("select", "*".to_string())]).await
    }

    async fn fetch_by_ids(
        &self,
        table: &str,
        ids: &[String],
    ) -> std::result::Result<Vec<RawRecord>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.get_rows(
            table,
            &[
                ("select", "*".to_string()),
                (self.id_column.as_str(), quote_in_list(ids)),
            ],
        )
        .await
    }

    async fn fetch_where(
        &self,
        table: &str,
        field: &str,
        value: &str,
    ) -> std::result::Result<Vec<RawRecord>, StoreError> {
        self.get_rows(
            table,
            &[("select", "*".to_string()), (field, format!("eq.{value}"))],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = RestStore::new("https://store.example.com/", "key").unwrap();
        assert_eq!(
            store.table_url("AEX_Screening_Tracker"),
            "https://store.example.com/rest/v1/AEX_Screening_Tracker"
        );
    }

    #[test]
    fn test_quote_in_list() {
        let ids = vec!["A1".to_string(), "A 2,x".to_string(), "A\"3".to_string()];
        assert_eq!(quote_in_list(&ids), r#"in.("A1","A 2,x","A3")"#);
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        assert!(RestStore::new("https://store.example.com", "bad\nkey").is_err());
    }
}
