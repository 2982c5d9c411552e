//! Ingest -> aggregate -> report, one dataset per run.

use crate::aggregate::aggregate;
use crate::cache::{self, CacheLookup};
use crate::config::{CachePolicy, PipelineConfig};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::ingest::{IngestFailure, Ingestor};
use crate::report::{BarChart, LineChart, Reporter};
use crate::schema::ResultTable;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Where the run's table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    Files,
    Cache,
}

/// An aggregated table produced during reporting, kept for display.
#[derive(Debug, Clone)]
pub struct NamedTable {
    /// Short description of the grouping, used as a heading.
    pub name: String,
    pub table: ResultTable,
}

#[derive(Debug)]
pub struct RunSummary {
    pub dataset: Dataset,
    /// Whether the rows came from a fresh cache or a directory scan.
    pub source: TableSource,
    /// Every ingested row, before aggregation.
    pub table: ResultTable,
    /// Files skipped under the skip-and-report policy.
    pub failures: Vec<IngestFailure>,
    /// Chart and table files, in the order they were written.
    pub written: Vec<PathBuf>,
    /// Aggregated tables behind the written files.
    pub tables: Vec<NamedTable>,
}

#[derive(Default)]
struct Outputs {
    written: Vec<PathBuf>,
    tables: Vec<NamedTable>,
}

impl Outputs {
    fn record(&mut self, path: Option<PathBuf>) {
        self.written.extend(path);
    }

    fn keep(&mut self, name: impl Into<String>, table: ResultTable) {
        self.tables.push(NamedTable {
            name: name.into(),
            table,
        });
    }
}

/// Table for this run: a fresh cache if allowed, otherwise a directory scan.
pub fn load_table(config: &PipelineConfig) -> Result<(ResultTable, TableSource, Vec<IngestFailure>)> {
    let dataset = config.dataset;
    if let CachePolicy::Use(path) = &config.cache {
        match cache::load_fresh(path, dataset, &config.input_dir) {
            CacheLookup::Fresh(table) => {
                info!(path = %path.display(), rows = table.len(), "using cached table");
                return Ok((table, TableSource::Cache, Vec::new()));
            }
            CacheLookup::Missing => debug!(path = %path.display(), "no cache"),
            CacheLookup::Stale => info!(path = %path.display(), "cache is stale, rescanning"),
            CacheLookup::Invalid(reason) => warn!(path = %path.display(), %reason, "ignoring cache"),
        }
    }

    let report = Ingestor::new(dataset, config.failure_policy).ingest_dir(&config.input_dir)?;

    if let CachePolicy::Use(path) = &config.cache {
        if report.is_clean() {
            cache::save(path, dataset, &report.table)?;
        } else {
            info!(
                skipped = report.failures.len(),
                "cache not written, some files failed to parse"
            );
        }
    }

    Ok((report.table, TableSource::Files, report.failures))
}

/// Run the full pipeline for `config.dataset`.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let (table, source, failures) = load_table(config)?;

    if let Err(e) = table.ensure_non_empty(config.dataset.name(), &config.input_dir) {
        warn!(error = %e, "nothing to report");
    }

    let reporter = Reporter::new(config.report_dir());
    let mut out = Outputs::default();
    match config.dataset {
        Dataset::ShortestPaths => report_shortest_paths(&table, &reporter, &mut out)?,
        Dataset::MaxFlow => report_max_flow(&table, &reporter, &mut out)?,
        Dataset::Matching => report_matching(&table, &reporter, &mut out)?,
    }

    info!(
        dataset = %config.dataset,
        rows = table.len(),
        files_written = out.written.len(),
        skipped = failures.len(),
        "report complete"
    );

    Ok(RunSummary {
        dataset: config.dataset,
        source,
        table,
        failures,
        written: out.written,
        tables: out.tables,
    })
}

/// Per problem: a bar chart of mean time per algorithm, time against nodes,
/// edges and max cost on a log axis, and the sorted rows as a table.
fn report_shortest_paths(table: &ResultTable, reporter: &Reporter, out: &mut Outputs) -> Result<()> {
    for (problem, part) in table.partition("problem")? {
        let by_algorithm = aggregate(&part, &["algorithm"], &["time"])?;
        out.record(reporter.bar_chart(
            by_algorithm.table(),
            &BarChart {
                file_name: format!("{}_barplot.svg", problem),
                title: format!("Comparison of Time for Different Algorithms for {}", problem),
                category: "algorithm",
                value: "time",
                x_label: "Algorithm",
                y_label: "Time",
            },
        )?);

        for (x, x_label) in [("nodes", "Nodes"), ("edges", "Edges"), ("max_cost", "Max Cost")] {
            let by_x = aggregate(&part, &["algorithm", x], &["time"])?;
            out.record(reporter.line_chart(
                by_x.table(),
                &LineChart {
                    file_name: format!("{}_{}_lineplot.svg", problem, x),
                    title: format!(
                        "Comparison of Time for Different Algorithms based on {} for {}",
                        x_label, problem
                    ),
                    x,
                    y: "time",
                    series: Some("algorithm"),
                    x_label,
                    y_label: "Time",
                    log_x: true,
                },
            )?);
        }

        let sorted = part.sorted_by(&["algorithm", "nodes", "edges", "max_cost"])?;
        out.record(reporter.latex_table(&sorted, &format!("{}_table.tex", problem))?);
        out.keep(format!("{}: mean time per algorithm", problem), by_algorithm.into_table());
    }
    Ok(())
}

/// Mean time and augmenting paths per (algorithm, k).
fn report_max_flow(table: &ResultTable, reporter: &Reporter, out: &mut Outputs) -> Result<()> {
    let by_k = aggregate(
        table,
        &["algorithm", "k"],
        &["max_flow", "augmenting_paths", "seconds"],
    )?;

    for (y, y_label, file_name) in [
        ("seconds", "seconds", "seconds_by_k.svg"),
        ("augmenting_paths", "augmenting paths", "augmenting_paths_by_k.svg"),
    ] {
        out.record(reporter.line_chart(
            by_k.table(),
            &LineChart {
                file_name: file_name.to_string(),
                title: format!("Max flow: {} by k", y_label),
                x: "k",
                y,
                series: Some("algorithm"),
                x_label: "k",
                y_label,
                log_x: false,
            },
        )?);
    }

    out.record(reporter.latex_table(by_k.table(), "max_flow_table.tex")?);
    out.keep("mean per (algorithm, k)", by_k.into_table());
    Ok(())
}

/// Runs averaged per (k, i) first, then those means averaged per k and per i.
fn report_matching(table: &ResultTable, reporter: &Reporter, out: &mut Outputs) -> Result<()> {
    let per_pair = aggregate(table, &["k", "i"], &["matchings", "millis"])?;

    for key in ["k", "i"] {
        let by_key = aggregate(per_pair.table(), &[key], &["matchings", "millis"])?;
        for (y, y_label, stem) in [("millis", "time [ms]", "time"), ("matchings", "matchings", "matchings")] {
            out.record(reporter.line_chart(
                by_key.table(),
                &LineChart {
                    file_name: format!("{}_by_{}.svg", stem, key),
                    title: format!("Matching: {} by {}", y_label, key),
                    x: key,
                    y,
                    series: None,
                    x_label: key,
                    y_label,
                    log_x: false,
                },
            )?);
        }
    }

    out.record(reporter.latex_table(per_pair.table(), "matching_table.tex")?);
    out.keep("mean per (k, i)", per_pair.into_table());
    Ok(())
}
