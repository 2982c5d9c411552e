//! Per-dataset result file parsers.
//!
//! Formats:
//! - positional tokens: `<tag> nodes edges min_cost max_cost` followed by
//!   `<tag> time`, optionally after a preamble line
//! - key-value lines: `k: 3`, `Max flow: 7`, `Augmenting paths: 4`,
//!   `Elapsed: 0.004s` in that order
//! - marker substrings: `Matching: <n>` and `Time: <ms>` anywhere in the body

use crate::error::{Error, Result};
use crate::schema::{FieldValue, ResultRecord};
use std::path::Path;

fn parse_int(file: &str, field: &str, raw: &str) -> Result<FieldValue> {
    raw.trim()
        .parse::<i64>()
        .map(FieldValue::Int)
        .map_err(|_| Error::non_numeric(file, field, raw.trim()))
}

/// Finite floats only; `inf` and `NaN` are rejected like any other bad token.
fn parse_float(file: &str, field: &str, raw: &str) -> Result<FieldValue> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(FieldValue::Float(v)),
        _ => Err(Error::non_numeric(file, field, raw.trim())),
    }
}

/// File name without its final extension.
fn file_stem(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
}

/// Text before the first `_` of the file name.
fn algorithm_from_name(file: &str) -> &str {
    file_stem(file).split('_').next().unwrap_or_default()
}

/// `<algorithm>_<problem>.<ext>` with `<tag> nodes edges min_cost max_cost`
/// and `<tag> time` lines.
pub fn positional_tokens(file: &str, contents: &str) -> Result<ResultRecord> {
    let mut name_parts = file.split('_');
    let algorithm = name_parts.next().unwrap_or_default();
    let problem = name_parts
        .next()
        .and_then(|p| p.split('.').next())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::malformed(file, "file name (expected `<algorithm>_<problem>.<ext>`)"))?;

    let lines: Vec<&str> = contents.lines().collect();
    let size_idx = lines
        .iter()
        .position(|l| is_size_line(l))
        .ok_or_else(|| {
            Error::malformed(file, "size line (expected `<tag> nodes edges min_cost max_cost`)")
        })?;
    let size: Vec<&str> = lines[size_idx].split_whitespace().collect();

    let timing_line = lines
        .get(size_idx + 1)
        .ok_or_else(|| Error::malformed(file, format!("timing line {} (expected `<tag> time`)", size_idx + 2)))?;
    let timing: Vec<&str> = timing_line.split_whitespace().collect();
    if timing.len() != 2 {
        return Err(Error::malformed(
            file,
            format!("timing line {}: '{}'", size_idx + 2, timing_line.trim()),
        ));
    }

    Ok(ResultRecord::new(vec![
        FieldValue::from(algorithm),
        parse_int(file, "nodes", size[1])?,
        parse_int(file, "edges", size[2])?,
        parse_float(file, "time", timing[1])?,
        parse_int(file, "min_cost", size[3])?,
        parse_int(file, "max_cost", size[4])?,
        FieldValue::from(problem),
    ]))
}

fn is_size_line(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len() == 5 && tokens[1..].iter().all(|t| t.parse::<i64>().is_ok())
}

const KEY_VALUE_FIELDS: [&str; 4] = ["k", "max_flow", "augmenting_paths", "seconds"];

/// Four `<name>: <value>` lines; the last value carries a unit suffix.
pub fn key_value_lines(file: &str, contents: &str) -> Result<ResultRecord> {
    let lines: Vec<&str> = contents.lines().collect();
    let mut raw = Vec::with_capacity(KEY_VALUE_FIELDS.len());
    for (i, field) in KEY_VALUE_FIELDS.iter().enumerate() {
        let line = lines
            .get(i)
            .ok_or_else(|| Error::malformed(file, format!("line {} ({})", i + 1, field)))?;
        let (_, value) = line.split_once(':').ok_or_else(|| {
            Error::malformed(file, format!("line {} ({}): '{}'", i + 1, field, line.trim()))
        })?;
        raw.push(value.trim());
    }

    let elapsed = raw[3]
        .strip_suffix(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(raw[3]);

    Ok(ResultRecord::new(vec![
        FieldValue::from(algorithm_from_name(file)),
        parse_int(file, KEY_VALUE_FIELDS[0], raw[0])?,
        parse_int(file, KEY_VALUE_FIELDS[1], raw[1])?,
        parse_int(file, KEY_VALUE_FIELDS[2], raw[2])?,
        parse_float(file, KEY_VALUE_FIELDS[3], elapsed)?,
    ]))
}

/// Text after `marker` up to the next line break.
fn marker_value<'a>(file: &str, contents: &'a str, marker: &str) -> Result<&'a str> {
    let (_, rest) = contents
        .split_once(marker)
        .ok_or_else(|| Error::malformed(file, format!("marker '{}'", marker.trim_end())))?;
    Ok(rest.lines().next().unwrap_or_default().trim())
}

/// `<k>-<i>[-...]` file names with `Matching: ` and `Time: ` markers.
pub fn marker_substring(file: &str, contents: &str) -> Result<ResultRecord> {
    let mut name_parts = file_stem(file).split('-');
    let (k, i) = match (name_parts.next(), name_parts.next()) {
        (Some(k), Some(i)) => (k, i),
        _ => return Err(Error::malformed(file, "file name (expected `<k>-<i>`)")),
    };

    let matchings = marker_value(file, contents, "Matching: ")?;
    let millis = marker_value(file, contents, "Time: ")?;

    Ok(ResultRecord::new(vec![
        parse_int(file, "k", k)?,
        parse_int(file, "i", i)?,
        parse_int(file, "matchings", matchings)?,
        parse_int(file, "millis", millis)?,
    ]))
}
