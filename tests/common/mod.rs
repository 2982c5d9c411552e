//! Shared helpers for writing result-file fixtures.

#![allow(dead_code)]

use graph_bench_report::config::{CachePolicy, PipelineConfig};
use graph_bench_report::dataset::Dataset;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Fixture directories
// =============================================================================

pub fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

/// A temp directory with `files` written into an `input/` subdirectory.
pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    pub fn new(files: &[(String, String)]) -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("input")).unwrap();
        for (name, body) in files {
            write_file(&root.path().join("input"), name, body);
        }
        Self { root }
    }

    pub fn input(&self) -> PathBuf {
        self.root.path().join("input")
    }

    pub fn output(&self) -> PathBuf {
        self.root.path().join("out")
    }

    pub fn cache_path(&self) -> PathBuf {
        self.output().join("cache.json")
    }

    pub fn config(&self, dataset: Dataset, cache: bool) -> PipelineConfig {
        let mut config = PipelineConfig::for_dataset(dataset);
        config.input_dir = self.input();
        config.output_dir = self.output();
        config.cache = if cache {
            CachePolicy::Use(self.cache_path())
        } else {
            CachePolicy::Disabled
        };
        config
    }
}

// =============================================================================
// Result file bodies
// =============================================================================

/// Three-line shortest-path result: preamble, size line, timing line.
pub fn shortest_path_body(algorithm: &str, nodes: u64, edges: u64, max_cost: u64, time: f64) -> String {
    format!(
        "p res sp ss {}\ng {} {} 1 {}\nt {}\n",
        algorithm, nodes, edges, max_cost, time
    )
}

pub fn max_flow_body(k: u32, flow: u64, paths: u64, seconds: f64) -> String {
    format!(
        "k: {}\nMax flow: {}\nAugmenting paths: {}\nElapsed: {:.3}s\n",
        k, flow, paths, seconds
    )
}

pub fn matching_body(matchings: u64, millis: u64) -> String {
    format!("Matching: {}\nTime: {}\n", matchings, millis)
}

/// Two problems, three algorithms, two graph sizes each.
pub fn shortest_path_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    for problem in ["Square-n", "Long-C"] {
        for (a, factor) in [("dijkstra", 1.0), ("dial", 0.8), ("radixheap", 0.6)] {
            for (n, m) in [(1024u64, 4096u64), (16384, 65536)] {
                files.push((
                    format!("{}_{}.{}.ss.res", a, problem, n),
                    shortest_path_body(a, n, m, n * 4, factor * n as f64 / 1e5),
                ));
            }
        }
    }
    files
}

pub fn max_flow_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    for algo in ["dinic", "edmonds-karp"] {
        for k in 1..=4u32 {
            for run in 1..=3u32 {
                files.push((
                    format!("{}_{}_{}.txt", algo, k, run),
                    max_flow_body(k, 1 << k, k as u64 * run as u64, 0.001 * (k * run) as f64),
                ));
            }
        }
    }
    files
}

pub fn matching_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    for k in 3..=5u64 {
        for i in 1..=k {
            for run in 1..=2u64 {
                files.push((
                    format!("{}-{}-{}.txt", k, i, run),
                    matching_body(k * i + run, k * 10 + run),
                ));
            }
        }
    }
    files
}

pub fn sorted_names(paths: &[PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
