use chrono::Utc;

use plugin_price_scraper::{
    capture_time, run, RestDocumentStore, RowSchema, RowStore, SnapshotExporter, UadItemExtractor,
};

/// Catalog listing page for the UAD plugin family.
const CATALOG_URL: &str = "https://www.uaudio.com/uad-plugins.html";
/// Per-plugin price history tables.
const DATA_DIR: &str = "data/UAD";
/// Timestamped flat backups, one per run.
const SNAPSHOT_DIR: &str = "data/UAD/snapshots";
/// Remote keyed-document store endpoint for run snapshots.
const SNAPSHOT_ENDPOINT: &str = "https://plugin-price-scraper.firebaseio.com/UAD.json";

fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    // Examples: RUST_LOG=info, RUST_LOG=plugin_price_scraper=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting UAD plugin price scraper");

    // One capture time per run, shared by every record and the snapshot
    // key, threaded through as a parameter.
    let captured_at = capture_time(Utc::now());

    let store = RestDocumentStore::new(SNAPSHOT_ENDPOINT);
    let row_store = RowStore::new(DATA_DIR, RowSchema::Compact);
    let exporter = SnapshotExporter::new(&store, SNAPSHOT_DIR, RowSchema::Full);

    if let Err(e) = run(
        CATALOG_URL,
        &captured_at,
        &UadItemExtractor,
        &row_store,
        &exporter,
    ) {
        log::error!("Run failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
