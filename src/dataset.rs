//! The three benchmark datasets and their fixed column sets.

use crate::ingest::parsers;
use crate::schema::{Column, ColumnRole, ResultRecord, ResultTable};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A benchmark dataset. Selects the column set, the parse strategy and the
/// report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Dataset {
    /// Single-source shortest path runs (`<algorithm>_<problem>.res`).
    ShortestPaths,
    /// Max-flow runs on hypercube graphs (`<algorithm>_<k>_<run>.txt`).
    MaxFlow,
    /// Bipartite matching runs (`<k>-<i>-<run>.txt`).
    Matching,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::ShortestPaths, Dataset::MaxFlow, Dataset::Matching];

    pub fn name(self) -> &'static str {
        match self {
            Dataset::ShortestPaths => "shortest-paths",
            Dataset::MaxFlow => "max-flow",
            Dataset::Matching => "matching",
        }
    }

    /// Directory the benchmark runs conventionally write their results to.
    pub fn default_input_dir(self) -> PathBuf {
        match self {
            Dataset::ShortestPaths => PathBuf::from("outputs"),
            Dataset::MaxFlow | Dataset::Matching => PathBuf::from("data"),
        }
    }

    pub fn columns(self) -> Vec<Column> {
        use ColumnRole::*;
        let cols: &[(&str, ColumnRole)] = match self {
            Dataset::ShortestPaths => &[
                ("algorithm", Label),
                ("nodes", Dimension),
                ("edges", Dimension),
                ("time", Measurement),
                ("min_cost", Dimension),
                ("max_cost", Dimension),
                ("problem", Dimension),
            ],
            Dataset::MaxFlow => &[
                ("algorithm", Label),
                ("k", Dimension),
                ("max_flow", Measurement),
                ("augmenting_paths", Measurement),
                ("seconds", Measurement),
            ],
            Dataset::Matching => &[
                ("k", Dimension),
                ("i", Dimension),
                ("matchings", Measurement),
                ("millis", Measurement),
            ],
        };
        cols.iter().map(|(n, r)| Column::new(n, *r)).collect()
    }

    pub fn empty_table(self) -> ResultTable {
        ResultTable::new(self.columns())
    }

    /// Extract one record from a result file, using this dataset's strategy.
    pub fn parse(self, file_name: &str, contents: &str) -> Result<ResultRecord> {
        match self {
            Dataset::ShortestPaths => parsers::positional_tokens(file_name, contents),
            Dataset::MaxFlow => parsers::key_value_lines(file_name, contents),
            Dataset::Matching => parsers::marker_substring(file_name, contents),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
