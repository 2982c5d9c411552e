//! Ingest and aggregation throughput on a synthetic result directory.
//!
//! Run: `cargo bench --bench pipeline`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use graph_bench_report::aggregate::aggregate;
use graph_bench_report::dataset::Dataset;
use graph_bench_report::ingest::{FailurePolicy, Ingestor};
use std::path::Path;

// ---------------------------------------------------------------------------
// Fixture generation
// ---------------------------------------------------------------------------

fn write_max_flow_dir(dir: &Path, runs_per_k: u32) -> usize {
    let mut count = 0;
    for algo in ["dinic", "edmonds-karp"] {
        for k in 1..=16u32 {
            for run in 0..runs_per_k {
                let body = format!(
                    "k: {}\nMax flow: {}\nAugmenting paths: {}\nElapsed: {}.{:03}s\n",
                    k,
                    1u64 << k,
                    k * 7 + run,
                    run / 1000,
                    run % 1000
                );
                std::fs::write(dir.join(format!("{}_{}_{}.txt", algo, k, run)), body)
                    .expect("write fixture");
                count += 1;
            }
        }
    }
    count
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn ingest_and_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/max-flow");

    for runs_per_k in [4u32, 32] {
        let dir = tempfile::tempdir().expect("tempdir");
        let files = write_max_flow_dir(dir.path(), runs_per_k);
        group.throughput(Throughput::Elements(files as u64));

        let ingestor = Ingestor::new(Dataset::MaxFlow, FailurePolicy::Abort);
        group.bench_function(BenchmarkId::new("ingest", files), |b| {
            b.iter(|| ingestor.ingest_dir(dir.path()).expect("ingest"));
        });

        let table = ingestor.ingest_dir(dir.path()).expect("ingest").table;
        group.bench_function(BenchmarkId::new("aggregate", files), |b| {
            b.iter(|| {
                aggregate(
                    &table,
                    &["algorithm", "k"],
                    &["max_flow", "augmenting_paths", "seconds"],
                )
                .expect("aggregate")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, ingest_and_aggregate);
criterion_main!(benches);
