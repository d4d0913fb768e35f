//! One run's records bundled into a timestamp-keyed snapshot.
//!
//! Two sinks per run: the remote keyed-document write and a flat CSV
//! backup named by the same timestamp. The writes are independent; a
//! failure of one never rolls back the other.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::docstore::DocumentStore;
use crate::error::ScrapeResult;
use crate::models::PluginRecord;
use crate::store::RowSchema;
use crate::utils::timestamp_file_stem;

/// Outcome of a snapshot export.
#[derive(Debug, Default)]
pub struct SnapshotStats {
    pub records: usize,
}

pub struct SnapshotExporter<'a> {
    store: &'a dyn DocumentStore,
    backup_dir: PathBuf,
    schema: RowSchema,
}

impl<'a> SnapshotExporter<'a> {
    pub fn new<P: AsRef<Path>>(
        store: &'a dyn DocumentStore,
        backup_dir: P,
        schema: RowSchema,
    ) -> Self {
        Self {
            store,
            backup_dir: backup_dir.as_ref().to_path_buf(),
            schema,
        }
    }

    /// Writes the keyed snapshot document and the flat CSV backup.
    ///
    /// Both writes are attempted regardless of the other's outcome; the
    /// first error, if any, is returned once both have run.
    pub fn export(
        &self,
        captured_at: &str,
        records: &[PluginRecord],
    ) -> ScrapeResult<SnapshotStats> {
        let mapping: BTreeMap<&str, &PluginRecord> =
            records.iter().map(|r| (r.name.as_str(), r)).collect();
        let document = serde_json::to_value(&mapping)?;

        let mut first_error = None;

        if let Err(e) = self.store.store(captured_at, &document) {
            log::warn!("Snapshot document write failed: {}", e);
            first_error = Some(e);
        }
        match self.write_backup(captured_at, records) {
            Ok(path) => log::info!("Snapshot backup written to {}", path.display()),
            Err(e) => {
                log::warn!("Snapshot backup write failed: {}", e);
                first_error = first_error.or(Some(e));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(SnapshotStats {
                records: records.len(),
            }),
        }
    }

    fn write_backup(
        &self,
        captured_at: &str,
        records: &[PluginRecord],
    ) -> ScrapeResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)?;
        let path = self
            .backup_dir
            .join(format!("{}.csv", timestamp_file_stem(captured_at)));
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(self.schema.header())?;
        for record in records {
            writer.write_record(self.schema.row(record))?;
        }
        writer.flush()?;
        Ok(path)
    }
}
