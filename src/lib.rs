//! Benchmark result aggregation for graph-algorithm experiments.
//!
//! Result files written by shortest-path, max-flow and matching runs are
//! parsed into a [`schema::ResultTable`], averaged per group with
//! [`aggregate::aggregate`] and rendered as SVG charts and LaTeX tables by
//! [`report::Reporter`]. [`pipeline::run`] wires the stages together for one
//! [`dataset::Dataset`].

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod schema;

pub use error::{Error, Result};
