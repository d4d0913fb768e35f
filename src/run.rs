//! The synchronous scrape pipeline: fetch, extract, normalize, persist.
//!
//! Everything runs on one thread. Extraction is fail-fast: the first
//! item that cannot be extracted or normalized aborts the remaining
//! ones, and no snapshot is written for a failed run.

use scraper::Html;

use crate::api::catalog::fetch_catalog;
use crate::error::ScrapeResult;
use crate::extract::{catalog_items, ItemExtractor};
use crate::models::PluginRecord;
use crate::normalize::build_record;
use crate::snapshot::SnapshotExporter;
use crate::store::RowStore;

/// Summary of one completed run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub items: usize,
    pub on_sale: usize,
}

/// Extracts and normalizes every listing item of an already fetched
/// page into records sharing the run's `captured_at`.
pub fn extract_records(
    html: &str,
    captured_at: &str,
    extractor: &dyn ItemExtractor,
) -> ScrapeResult<Vec<PluginRecord>> {
    let doc = Html::parse_document(html);
    let items = catalog_items(&doc);
    log::info!("Found {} listing items", items.len());

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let raw = extractor.extract(item)?;
        let record = build_record(raw, captured_at)?;
        log::debug!(
            "{}: regular {} / sale {:?} ({}% off)",
            record.name,
            record.regular_price,
            record.sale_price,
            record.saving_percent
        );
        records.push(record);
    }
    Ok(records)
}

/// Appends every record to its per-plugin table, then exports the run
/// snapshot. Row appends are fail-fast; the snapshot's two writes are
/// best-effort relative to each other (see `SnapshotExporter`).
pub fn persist_records(
    captured_at: &str,
    records: &[PluginRecord],
    row_store: &RowStore,
    exporter: &SnapshotExporter<'_>,
) -> ScrapeResult<()> {
    for record in records {
        row_store.append(record)?;
    }
    exporter.export(captured_at, records)?;
    Ok(())
}

/// Scrapes an already fetched page end to end. Used directly by tests
/// that supply fixture markup.
pub fn process(
    html: &str,
    captured_at: &str,
    extractor: &dyn ItemExtractor,
    row_store: &RowStore,
    exporter: &SnapshotExporter<'_>,
) -> ScrapeResult<RunStats> {
    let records = extract_records(html, captured_at, extractor)?;
    persist_records(captured_at, &records, row_store, exporter)?;
    Ok(RunStats {
        items: records.len(),
        on_sale: records.iter().filter(|r| r.on_sale).count(),
    })
}

/// Full run against a live catalog URL. Each phase logs its own failure
/// before the error is handed back to the caller; there is no retry and
/// no partial-success accumulation.
pub fn run(
    catalog_url: &str,
    captured_at: &str,
    extractor: &dyn ItemExtractor,
    row_store: &RowStore,
    exporter: &SnapshotExporter<'_>,
) -> ScrapeResult<RunStats> {
    let html = match fetch_catalog(catalog_url) {
        Ok(html) => html,
        Err(e) => {
            log::error!("Fetch phase failed: {}", e);
            return Err(e);
        }
    };

    let records = match extract_records(&html, captured_at, extractor) {
        Ok(records) => records,
        Err(e) => {
            log::error!("Extraction phase failed: {}", e);
            return Err(e);
        }
    };

    if let Err(e) = persist_records(captured_at, &records, row_store, exporter) {
        log::error!("Persistence phase failed: {}", e);
        return Err(e);
    }

    let stats = RunStats {
        items: records.len(),
        on_sale: records.iter().filter(|r| r.on_sale).count(),
    };
    log::info!(
        "Run complete: {} items captured ({} on sale)",
        stats.items,
        stats.on_sale
    );
    Ok(stats)
}
