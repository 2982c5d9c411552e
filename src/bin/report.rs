//! Benchmark report tool.
//!
//! Reads one dataset's result files, averages them and writes charts and
//! LaTeX tables.
//!
//! Usage: `cargo run --bin bench-report -- shortest-paths --input outputs --output graphs`

use anyhow::Context;
use clap::Parser;
use graph_bench_report::config::{default_cache_path, CachePolicy, PipelineConfig};
use graph_bench_report::dataset::Dataset;
use graph_bench_report::ingest::FailurePolicy;
use graph_bench_report::pipeline::{self, RunSummary, TableSource};
use graph_bench_report::report::text;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bench-report")]
#[command(about = "Aggregate graph-algorithm benchmark results into charts and LaTeX tables")]
struct Cli {
    /// Dataset layout of the result files
    #[arg(value_enum)]
    dataset: Dataset,

    /// Directory of result files [default: `outputs` for shortest-paths, `data` otherwise]
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for charts, tables and the cache
    #[arg(long, default_value = graph_bench_report::config::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Cache file [default: <output>/<dataset>-cache.json]
    #[arg(long, conflicts_with = "no_cache")]
    cache: Option<PathBuf>,

    /// Always rescan the input directory and do not write a cache
    #[arg(long)]
    no_cache: bool,

    /// Abort on the first malformed result file instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Print the aggregated tables to stdout
    #[arg(long)]
    print: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::for_dataset(self.dataset);
        if let Some(input) = self.input {
            config.input_dir = input;
        }
        config.cache = if self.no_cache {
            CachePolicy::Disabled
        } else {
            CachePolicy::Use(
                self.cache
                    .unwrap_or_else(|| default_cache_path(&self.output, self.dataset)),
            )
        };
        config.output_dir = self.output;
        if self.fail_fast {
            config.failure_policy = FailurePolicy::Abort;
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(summary: &RunSummary) {
    for named in &summary.tables {
        println!("== {} ==", named.name);
        print!("{}", text::render(&named.table));
        println!();
    }
    let source = match summary.source {
        TableSource::Files => "files",
        TableSource::Cache => "cache",
    };
    println!(
        "Rows: {} (from {}) | Skipped: {} | Written: {}",
        summary.table.len(),
        source,
        summary.failures.len(),
        summary.written.len()
    );
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let print = cli.print;
    let config = cli.into_config();
    let summary = pipeline::run(&config).with_context(|| {
        format!(
            "{} report from {} failed",
            config.dataset,
            config.input_dir.display()
        )
    })?;
    if print {
        print_summary(&summary);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
