//! Remote keyed-document store for run snapshots.

use serde_json::Value;

use crate::error::{ScrapeError, ScrapeResult};

/// Capability to persist one keyed document per run: `store(key, doc)`
/// either acknowledges or fails. No retries at this seam.
pub trait DocumentStore {
    fn store(&self, key: &str, document: &Value) -> ScrapeResult<()>;
}

/// HTTP-backed document store.
///
/// Posts `{"key": …, "document": …}` as JSON to a fixed endpoint; the
/// key travels in the body because capture timestamps contain characters
/// that are awkward in a URL path.
pub struct RestDocumentStore {
    endpoint: String,
}

impl RestDocumentStore {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl DocumentStore for RestDocumentStore {
    fn store(&self, key: &str, document: &Value) -> ScrapeResult<()> {
        log::info!("Storing snapshot document under key: {}", key);

        let body = serde_json::json!({ "key": key, "document": document });
        let response = reqwest::blocking::Client::new()
            .post(&self.endpoint)
            .json(&body)
            .send()?;

        if !response.status().is_success() {
            return Err(ScrapeError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "docstore_tests.rs"]
mod docstore_tests;
