//! Blocking fetch of the catalog listing page.

use crate::error::{ScrapeError, ScrapeResult};

const USER_AGENT: &str = "Plugin-Price-Scraper/0.1";

/// Fetches the catalog page and returns its markup text.
///
/// Non-success statuses are failures. There is no retry and no timeout
/// beyond the client defaults; a hung request blocks the whole run.
pub fn fetch_catalog(url: &str) -> ScrapeResult<String> {
    log::info!("Fetching catalog page: {}", url);

    let response = reqwest::blocking::Client::new()
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()?;

    if !response.status().is_success() {
        return Err(ScrapeError::HttpStatus(response.status()));
    }

    let body = response.text()?;
    log::debug!("Fetched {} bytes of markup", body.len());
    Ok(body)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod catalog_tests;
