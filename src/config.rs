//! Pipeline configuration.
//!
//! Every path is explicit; defaults are filled in by the entry point through
//! [`PipelineConfig::for_dataset`].

use crate::dataset::Dataset;
use crate::ingest::FailurePolicy;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "graphs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachePolicy {
    /// Load the cache at this path when fresh, rewrite it after a clean ingest.
    Use(PathBuf),
    /// Always scan the input directory; never read or write a cache.
    Disabled,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub dataset: Dataset,
    pub input_dir: PathBuf,
    /// Charts and tables go to `<output_dir>/<dataset>/`.
    pub output_dir: PathBuf,
    pub cache: CachePolicy,
    pub failure_policy: FailurePolicy,
}

impl PipelineConfig {
    /// Conventional locations for `dataset`, relative to the working directory.
    pub fn for_dataset(dataset: Dataset) -> Self {
        let output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
        Self {
            dataset,
            input_dir: dataset.default_input_dir(),
            cache: CachePolicy::Use(default_cache_path(&output_dir, dataset)),
            output_dir,
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn report_dir(&self) -> PathBuf {
        self.output_dir.join(self.dataset.name())
    }
}

pub fn default_cache_path(output_dir: &std::path::Path, dataset: Dataset) -> PathBuf {
    output_dir.join(format!("{}-cache.json", dataset.name()))
}
