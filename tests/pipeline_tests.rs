//! End-to-end tests for the scrape pipeline, driven by fixture markup
//! shaped like the live catalog page.

use std::cell::RefCell;
use std::fs;

use plugin_price_scraper::{
    process, DocumentStore, RowSchema, RowStore, ScrapeError, ScrapeResult, SnapshotExporter,
};

/// In-memory stand-in for the remote document store.
struct RecordingStore {
    calls: RefCell<Vec<(String, serde_json::Value)>>,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl DocumentStore for RecordingStore {
    fn store(&self, key: &str, document: &serde_json::Value) -> ScrapeResult<()> {
        self.calls
            .borrow_mut()
            .push((key.to_string(), document.clone()));
        Ok(())
    }
}

fn regular_item(name: &str, price: &str) -> String {
    format!(
        r#"<li class="item" data-name="{name}">
             <h2 class="product-name"><a href="/{name}.html">{name}</a></h2>
             <div class="price-box">
               <span class="regular-price"><span class="price">{price}</span></span>
             </div>
           </li>"#,
        name = name,
        price = price,
    )
}

fn sale_item(name: &str, old: &str, special: &str) -> String {
    format!(
        r#"<li class="item" data-name="{name}">
             <h2 class="product-name"><a href="/{name}.html">{name}</a></h2>
             <div class="price-box">
               <p class="old-price"><span class="price">{old}</span></p>
               <p class="special-price"><span class="price">{special}</span></p>
             </div>
           </li>"#,
        name = name,
        old = old,
        special = special,
    )
}

fn catalog_page(items: &[String]) -> String {
    format!(
        r#"<html><body><ul class="products-grid">{}</ul></body></html>"#,
        items.join("")
    )
}

// ==================== End-to-End Scenarios ====================

mod scenarios {
    use super::*;

    #[test]
    fn regular_item_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordingStore::new();
        let row_store = RowStore::new(dir.path().join("tables"), RowSchema::Compact);
        let exporter =
            SnapshotExporter::new(&store, dir.path().join("snapshots"), RowSchema::Full);

        let page = catalog_page(&[regular_item("Manley Massive Passive EQ", "£299.00")]);
        let stats = process(&page, "13-05-2020 16:45",
            &plugin_price_scraper::UadItemExtractor, &row_store, &exporter).unwrap();

        assert_eq!(stats.items, 1);
        assert_eq!(stats.on_sale, 0);

        let calls = store.calls.borrow();
        let record = &calls[0].1["Manley Massive Passive EQ"];
        assert_eq!(record["onSale"], false);
        assert_eq!(record["regularPrice"], 299);
        assert_eq!(record["salePrice"], serde_json::Value::Null);
        assert_eq!(record["savingPercent"], 0);
        assert_eq!(record["capturedAt"], "13-05-2020 16:45");
    }

    #[test]
    fn sale_item_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordingStore::new();
        let row_store = RowStore::new(dir.path().join("tables"), RowSchema::Compact);
        let exporter =
            SnapshotExporter::new(&store, dir.path().join("snapshots"), RowSchema::Full);

        let page = catalog_page(&[sale_item("LA-2A Collection", "£299.00", "£149.00")]);
        let stats = process(&page, "13-05-2020 16:45",
            &plugin_price_scraper::UadItemExtractor, &row_store, &exporter).unwrap();

        assert_eq!(stats.items, 1);
        assert_eq!(stats.on_sale, 1);

        let calls = store.calls.borrow();
        let record = &calls[0].1["LA-2A Collection"];
        assert_eq!(record["onSale"], true);
        assert_eq!(record["regularPrice"], 299);
        assert_eq!(record["salePrice"], 149);
        assert_eq!(record["savingPercent"], 50);
    }

    #[test]
    fn mixed_page_snapshot_maps_every_item() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordingStore::new();
        let row_store = RowStore::new(dir.path().join("tables"), RowSchema::Compact);
        let exporter =
            SnapshotExporter::new(&store, dir.path().join("snapshots"), RowSchema::Full);

        let page = catalog_page(&[
            regular_item("Pultec EQ", "£149.00"),
            sale_item("LA-2A Collection", "£299.00", "£149.00"),
            regular_item("UAD Custom 2 Bundle", "£1,049.00"),
        ]);
        let stats = process(&page, "13-05-2020 16:45",
            &plugin_price_scraper::UadItemExtractor, &row_store, &exporter).unwrap();

        assert_eq!(stats.items, 3);

        let calls = store.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "13-05-2020 16:45");
        let doc = calls[0].1.as_object().unwrap();
        assert_eq!(doc.len(), 3);
        // The name-override bundle rule applies regardless of classes,
        // and the thousands separator parses away.
        assert_eq!(doc["UAD Custom 2 Bundle"]["bundle"], true);
        assert_eq!(doc["UAD Custom 2 Bundle"]["regularPrice"], 1049);

        // One per-plugin table each, plus the timestamped backup.
        assert!(dir.path().join("tables/pultec_eq.csv").exists());
        assert!(dir.path().join("tables/la-2a_collection.csv").exists());
        assert!(dir.path().join("tables/uad_custom_2_bundle.csv").exists());
        assert!(dir.path().join("snapshots/13-05-2020_16-45.csv").exists());
    }
}

// ==================== Accumulation Across Runs ====================

mod accumulation {
    use super::*;

    #[test]
    fn repeated_runs_append_one_row_each() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordingStore::new();
        let row_store = RowStore::new(dir.path().join("tables"), RowSchema::Compact);
        let exporter =
            SnapshotExporter::new(&store, dir.path().join("snapshots"), RowSchema::Full);

        let page = catalog_page(&[regular_item("Pultec EQ", "£149.00")]);
        process(&page, "13-05-2020 16:45",
            &plugin_price_scraper::UadItemExtractor, &row_store, &exporter).unwrap();
        process(&page, "14-05-2020 16:45",
            &plugin_price_scraper::UadItemExtractor, &row_store, &exporter).unwrap();

        let table = fs::read_to_string(dir.path().join("tables/pultec_eq.csv")).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        // One header and one data row per run, no deduplication.
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "name,price,on_sale,capturedAt");
        assert!(lines[1].ends_with("13-05-2020 16:45"));
        assert!(lines[2].ends_with("14-05-2020 16:45"));

        // Each run also leaves its own snapshot backup and document.
        assert!(dir.path().join("snapshots/13-05-2020_16-45.csv").exists());
        assert!(dir.path().join("snapshots/14-05-2020_16-45.csv").exists());
        assert_eq!(store.calls.borrow().len(), 2);
    }
}

// ==================== Failure Behavior ====================

mod failures {
    use super::*;

    #[test]
    fn broken_item_aborts_whole_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordingStore::new();
        let row_store = RowStore::new(dir.path().join("tables"), RowSchema::Compact);
        let exporter =
            SnapshotExporter::new(&store, dir.path().join("snapshots"), RowSchema::Full);

        // Second item is flagged on sale but has no old-price node.
        let broken = r#"<li class="item" data-name="Broken">
             <h2 class="product-name"><a href="/broken.html">Broken</a></h2>
             <p class="special-price"><span class="price">£49.00</span></p>
           </li>"#
            .to_string();
        let page = catalog_page(&[regular_item("Pultec EQ", "£149.00"), broken]);

        let result = process(&page, "13-05-2020 16:45",
            &plugin_price_scraper::UadItemExtractor, &row_store, &exporter);
        assert!(matches!(result, Err(ScrapeError::MissingNode { .. })));

        // Fail-fast: nothing persisted, no partial snapshot.
        assert!(!dir.path().join("tables/pultec_eq.csv").exists());
        assert!(store.calls.borrow().is_empty());
    }

    #[test]
    fn unparseable_price_aborts_whole_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordingStore::new();
        let row_store = RowStore::new(dir.path().join("tables"), RowSchema::Compact);
        let exporter =
            SnapshotExporter::new(&store, dir.path().join("snapshots"), RowSchema::Full);

        let page = catalog_page(&[regular_item("Pultec EQ", "Call for price")]);
        let result = process(&page, "13-05-2020 16:45",
            &plugin_price_scraper::UadItemExtractor, &row_store, &exporter);

        assert!(matches!(result, Err(ScrapeError::Price(_))));
        assert!(store.calls.borrow().is_empty());
    }
}
