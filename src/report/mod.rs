//! Chart and table output.
//!
//! The reporter only draws what it is given: callers aggregate first. Every
//! method returns the written path, or `None` when the input table has no
//! rows, in which case nothing is written.

mod chart;
pub mod latex;
pub mod text;

use crate::error::{Error, Result};
use crate::schema::ResultTable;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bars of one measurement per category of a label column.
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    pub file_name: String,
    pub title: String,
    pub category: &'a str,
    pub value: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// One measurement against a numeric dimension, one line per series value.
#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    pub file_name: String,
    pub title: String,
    pub x: &'a str,
    pub y: &'a str,
    /// Column whose values split the rows into lines; `None` draws one line.
    pub series: Option<&'a str>,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub log_x: bool,
}

/// Writes chart and table files into one output directory.
pub struct Reporter {
    output_dir: PathBuf,
}

impl Reporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Target path for `file_name`, creating the output directory on demand.
    fn prepare(&self, file_name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;
        Ok(self.output_dir.join(file_name))
    }

    pub fn bar_chart(&self, table: &ResultTable, opts: &BarChart<'_>) -> Result<Option<PathBuf>> {
        if table.is_empty() {
            debug!(file = %opts.file_name, "no rows, bar chart skipped");
            return Ok(None);
        }
        let bars = chart::bar_data(table, opts)?;
        let path = self.prepare(&opts.file_name)?;
        chart::draw_bars(&path, opts, &bars).map_err(|e| Error::Chart {
            path: path.clone(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), bars = bars.len(), "bar chart written");
        Ok(Some(path))
    }

    pub fn line_chart(&self, table: &ResultTable, opts: &LineChart<'_>) -> Result<Option<PathBuf>> {
        if table.is_empty() {
            debug!(file = %opts.file_name, "no rows, line chart skipped");
            return Ok(None);
        }
        let series = chart::line_data(table, opts)?;
        let path = self.prepare(&opts.file_name)?;
        chart::draw_lines(&path, opts, &series).map_err(|e| Error::Chart {
            path: path.clone(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), lines = series.len(), "line chart written");
        Ok(Some(path))
    }

    /// Render `table` as a LaTeX `tabular` into `file_name`.
    pub fn latex_table(&self, table: &ResultTable, file_name: &str) -> Result<Option<PathBuf>> {
        if table.is_empty() {
            debug!(file = %file_name, "no rows, table skipped");
            return Ok(None);
        }
        let path = self.prepare(file_name)?;
        std::fs::write(&path, latex::render(table)).map_err(|e| Error::io(&path, e))?;
        info!(path = %path.display(), rows = table.len(), "table written");
        Ok(Some(path))
    }
}
