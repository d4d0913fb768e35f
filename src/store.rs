//! Append-only per-plugin CSV tables.
//!
//! Every run appends one row per plugin. Rows are never deduplicated and
//! never rewritten; the header is written only when a file is first
//! created. Repeated runs accumulate one row per run per plugin.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::ScrapeResult;
use crate::models::PluginRecord;
use crate::utils::sanitize_name;

/// Row layouts for the price tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSchema {
    /// `name, price, on_sale, capturedAt`, where `price` is the
    /// effective price (sale price when on sale, regular otherwise).
    Compact,
    /// Compact plus url, bundle and the full price breakdown.
    Full,
}

impl RowSchema {
    pub fn header(&self) -> Vec<&'static str> {
        match self {
            RowSchema::Compact => vec!["name", "price", "on_sale", "capturedAt"],
            RowSchema::Full => vec![
                "name",
                "price",
                "on_sale",
                "capturedAt",
                "url",
                "bundle",
                "regularPrice",
                "salePrice",
                "savingPercent",
            ],
        }
    }

    pub fn row(&self, record: &PluginRecord) -> Vec<String> {
        let mut row = vec![
            record.name.clone(),
            record.current_price().to_string(),
            record.on_sale.to_string(),
            record.captured_at.clone(),
        ];
        if let RowSchema::Full = self {
            row.push(record.url.clone().unwrap_or_default());
            row.push(record.bundle.to_string());
            row.push(record.regular_price.to_string());
            row.push(
                record
                    .sale_price
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
            );
            row.push(record.saving_percent.to_string());
        }
        row
    }
}

/// Append-only store of one CSV file per plugin.
pub struct RowStore {
    dir: PathBuf,
    schema: RowSchema,
}

impl RowStore {
    pub fn new<P: AsRef<Path>>(dir: P, schema: RowSchema) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            schema,
        }
    }

    /// Appends one record to its per-plugin table, creating the table
    /// and its header on first contact. Returns the path written to.
    ///
    /// No check is made for an equivalent existing row.
    pub fn append(&self, record: &PluginRecord) -> ScrapeResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("{}.csv", sanitize_name(&record.name)));
        let is_new = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(self.schema.header())?;
        }
        writer.write_record(self.schema.row(record))?;
        writer.flush()?;

        log::debug!("Appended {} to {}", record.name, path.display());
        Ok(path)
    }
}
