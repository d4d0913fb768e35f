pub mod api;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod run;
pub mod snapshot;
pub mod store;
pub mod utils;

// Re-export commonly used items
pub use api::{fetch_catalog, DocumentStore, RestDocumentStore};
pub use error::{ScrapeError, ScrapeResult};
pub use extract::{catalog_items, ItemExtractor, UadItemExtractor};
pub use models::{PluginRecord, RawItem};
pub use normalize::{build_record, parse_price, saving_percent};
pub use run::{process, run, RunStats};
pub use snapshot::{SnapshotExporter, SnapshotStats};
pub use store::{RowSchema, RowStore};
pub use utils::{capture_time, sanitize_name};
