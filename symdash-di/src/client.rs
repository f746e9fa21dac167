//! Upstream symbol-store API client
//!
//! [REQ-DI-INT-010]: The symbol store is the source of truth for uploaded
//! debug files and the builtin symbol-source catalog. SYMDASH only reads
//! from it, plus one delete proxy.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use symdash_common::debug_files::{BuiltinSymbolSource, DebugFile};

const USER_AGENT: &str = concat!("SYMDASH/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Symbol-store client errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Symbol-store API client
pub struct SymbolStoreClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SymbolStoreClient {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// List the debug files uploaded for a debug id.
    ///
    /// `file_formats` is the upstream's optional comma-separated format
    /// filter (e.g. "breakpad,macho") and is passed through verbatim.
    pub async fn list_debug_files(
        &self,
        debug_id: &str,
        file_formats: Option<&str>,
    ) -> Result<Vec<DebugFile>, StoreError> {
        let mut url = format!("{}/debugfiles/{}/", self.base_url, debug_id);
        if let Some(formats) = file_formats {
            url = format!("{url}?file_formats={formats}");
        }

        tracing::debug!(debug_id = %debug_id, url = %url, "Querying symbol store for debug files");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let files: Vec<DebugFile> = parse_json(response).await?;

        tracing::debug!(
            debug_id = %debug_id,
            count = files.len(),
            "Retrieved debug files from symbol store"
        );

        Ok(files)
    }

    /// Fetch the static catalog of builtin (vendor-provided) symbol sources
    pub async fn list_builtin_sources(&self) -> Result<Vec<BuiltinSymbolSource>, StoreError> {
        let url = format!("{}/symbolsources/", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        parse_json(response).await
    }

    /// Delete a debug file from the internal store by id.
    ///
    /// A 404 is treated as success: the file is gone either way, and the
    /// display layer renders it as DELETED regardless.
    pub async fn delete_debug_file(&self, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/debugfiles/{}/", self.base_url, id);

        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();

        if status == 404 {
            tracing::debug!(id = %id, "Debug file already absent on delete");
            return Ok(());
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), error_text));
        }

        tracing::info!(id = %id, "Deleted debug file from symbol store");
        Ok(())
    }
}

/// Shared success/error triage for JSON GET responses
async fn parse_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, StoreError> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(StoreError::Api(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| StoreError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SymbolStoreClient::new("http://127.0.0.1:5700/api/0/");
        assert!(client.is_ok());
        // Trailing slash is normalized away
        assert_eq!(client.unwrap().base_url, "http://127.0.0.1:5700/api/0");
    }

    #[tokio::test]
    async fn test_unreachable_store_is_a_network_error() {
        // Port 9 (discard) refuses connections immediately
        let client = SymbolStoreClient::new("http://127.0.0.1:9").unwrap();
        let result = client.list_debug_files("abcd1234", None).await;
        assert!(matches!(result, Err(StoreError::Network(_))));
    }
}
