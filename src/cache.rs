//! JSON cache of an ingested [`ResultTable`].
//!
//! The cache is a memo of the last clean ingest of a directory. It is only
//! trusted while it is at least as new as every entry of the input directory.

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::schema::ResultTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, info};

pub const SCHEMA_VERSION: u32 = 1;

/// On-disk cache document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedTable {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    pub dataset: Dataset,
    pub created_at: DateTime<Utc>,
    pub table: ResultTable,
}

/// Result of looking up a cache file.
#[derive(Debug)]
pub enum CacheLookup {
    Fresh(ResultTable),
    Missing,
    /// Older than the newest entry of the input directory.
    Stale,
    /// Unreadable, or written for another schema version or dataset.
    Invalid(String),
}

/// Write `table` to `path` as pretty JSON, creating parent directories.
pub fn save(path: &Path, dataset: Dataset, table: &ResultTable) -> Result<()> {
    let doc = CachedTable {
        schema_version: SCHEMA_VERSION,
        dataset,
        created_at: Utc::now(),
        table: table.clone(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(&doc).map_err(|e| Error::Cache {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| Error::io(path, e))?;

    info!(path = %path.display(), rows = table.len(), "cache written");
    Ok(())
}

/// Read the cache at `path` if it exists and is not older than `input_dir`.
pub fn load_fresh(path: &Path, dataset: Dataset, input_dir: &Path) -> CacheLookup {
    let cache_mtime = match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CacheLookup::Missing,
        Err(e) => return CacheLookup::Invalid(format!("{}: {}", path.display(), e)),
    };

    match newest_mtime(input_dir) {
        Ok(input_mtime) if input_mtime > cache_mtime => {
            debug!(path = %path.display(), "cache older than input directory");
            return CacheLookup::Stale;
        }
        Ok(_) => {}
        Err(e) => return CacheLookup::Invalid(e.to_string()),
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return CacheLookup::Invalid(format!("{}: {}", path.display(), e)),
    };
    let doc: CachedTable = match serde_json::from_str(&contents) {
        Ok(d) => d,
        Err(e) => return CacheLookup::Invalid(format!("{}: {}", path.display(), e)),
    };

    if doc.schema_version != SCHEMA_VERSION {
        return CacheLookup::Invalid(format!(
            "schema version {} (expected {})",
            doc.schema_version, SCHEMA_VERSION
        ));
    }
    if doc.dataset != dataset {
        return CacheLookup::Invalid(format!("written for dataset {}", doc.dataset));
    }
    if doc.table.columns() != dataset.columns().as_slice() {
        return CacheLookup::Invalid("column set does not match dataset".to_string());
    }
    if let Err(e) = doc.table.validate() {
        return CacheLookup::Invalid(format!("{}: {}", path.display(), e));
    }

    debug!(path = %path.display(), created_at = %doc.created_at, "cache is fresh");
    CacheLookup::Fresh(doc.table)
}

/// Latest modification time of `dir` and its direct entries.
fn newest_mtime(dir: &Path) -> Result<SystemTime> {
    let mut newest = std::fs::metadata(dir)
        .and_then(|m| m.modified())
        .map_err(|e| Error::io(dir, e))?;
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .map_err(|e| Error::io(entry.path(), e))?;
        newest = newest.max(modified);
    }
    Ok(newest)
}
