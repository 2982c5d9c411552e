//! Result directory ingestion.
//!
//! Scans one directory per run, parses every regular file with the dataset's
//! strategy and collects the rows into a [`ResultTable`]. Entries are visited
//! in file-name order so two runs over the same directory build the same
//! table.

pub mod parsers;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::schema::ResultTable;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to do when a file does not match its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Skip the file, record it in [`IngestReport::failures`] and continue.
    #[default]
    SkipAndReport,
    /// Stop at the first malformed file and return its error.
    Abort,
}

/// A file that was skipped, with the reason.
#[derive(Debug)]
pub struct IngestFailure {
    /// Full path of the skipped file.
    pub path: PathBuf,
    /// Parse or read error; names the file and the offending field.
    pub error: Error,
}

/// Outcome of scanning a result directory.
#[derive(Debug)]
pub struct IngestReport {
    /// Rows of every file that parsed, in file-name order.
    pub table: ResultTable,
    /// Files that did not parse, in file-name order.
    pub failures: Vec<IngestFailure>,
    /// Regular files visited, parsed or not.
    pub files_seen: usize,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Ingestor {
    dataset: Dataset,
    policy: FailurePolicy,
}

impl Ingestor {
    pub fn new(dataset: Dataset, policy: FailurePolicy) -> Self {
        Self { dataset, policy }
    }

    /// Regular files of `dir`, sorted by file name.
    fn result_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            if file_type.is_file() {
                files.push(entry.path());
            } else {
                debug!(path = %entry.path().display(), "skipping non-regular entry");
            }
        }
        files.sort();
        Ok(files)
    }

    /// Parse every result file in `dir`.
    ///
    /// I/O errors on the directory itself are always fatal; per-file layout
    /// errors follow the configured [`FailurePolicy`].
    pub fn ingest_dir(&self, dir: &Path) -> Result<IngestReport> {
        let files = Self::result_files(dir)?;
        let mut table = self.dataset.empty_table();
        let mut failures = Vec::new();

        for path in &files {
            match self.ingest_file(path) {
                Ok(record) => table.push(record)?,
                Err(error) => match self.policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::SkipAndReport => {
                        warn!(%error, "skipping result file");
                        failures.push(IngestFailure {
                            path: path.clone(),
                            error,
                        });
                    }
                },
            }
        }

        info!(
            dataset = %self.dataset,
            dir = %dir.display(),
            rows = table.len(),
            skipped = failures.len(),
            "ingested result files"
        );

        Ok(IngestReport {
            table,
            failures,
            files_seen: files.len(),
        })
    }

    fn ingest_file(&self, path: &Path) -> Result<crate::schema::ResultRecord> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        debug!(file = %file_name, bytes = contents.len(), "parsing result file");
        self.dataset.parse(&file_name, &contents)
    }
}
