//! Grouped means over a result table.

use crate::error::{Error, Result};
use crate::schema::{Column, ColumnRole, FieldValue, ResultRecord, ResultTable};
use std::collections::BTreeMap;

/// Rows grouped by key columns with measurements replaced by group means.
///
/// Columns are the grouping keys followed by the measurements. Rows are in
/// the natural order of the key tuples.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedTable {
    table: ResultTable,
    group_sizes: Vec<usize>,
}

impl AggregatedTable {
    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    pub fn into_table(self) -> ResultTable {
        self.table
    }

    /// Number of input rows behind each output row.
    pub fn group_sizes(&self) -> &[usize] {
        &self.group_sizes
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Group `table` by `group_keys` and average every column in `measurements`.
///
/// Means are sum-then-divide over the group; a group of one keeps its value.
/// Fails on unknown columns and on the first non-numeric measurement value.
pub fn aggregate(
    table: &ResultTable,
    group_keys: &[&str],
    measurements: &[&str],
) -> Result<AggregatedTable> {
    let key_idx = group_keys
        .iter()
        .map(|k| table.column_index(k))
        .collect::<Result<Vec<_>>>()?;
    let measure_idx = measurements
        .iter()
        .map(|m| table.column_index(m))
        .collect::<Result<Vec<_>>>()?;

    // key tuple -> (per-measurement sums, member count)
    let mut groups: BTreeMap<Vec<FieldValue>, (Vec<f64>, usize)> = BTreeMap::new();
    for (row_no, row) in table.rows().iter().enumerate() {
        let key: Vec<FieldValue> = key_idx.iter().map(|&i| row.values[i].clone()).collect();
        let entry = groups
            .entry(key)
            .or_insert_with(|| (vec![0.0; measure_idx.len()], 0));
        for (slot, &i) in measure_idx.iter().enumerate() {
            let value = &row.values[i];
            let v = value.as_f64().ok_or_else(|| Error::NonNumericColumn {
                column: table.columns()[i].name.clone(),
                row: row_no,
                value: value.to_string(),
            })?;
            entry.0[slot] += v;
        }
        entry.1 += 1;
    }

    let columns = key_idx
        .iter()
        .map(|&i| table.columns()[i].clone())
        .chain(
            measurements
                .iter()
                .map(|m| Column::new(m, ColumnRole::Measurement)),
        )
        .collect();

    let mut out = ResultTable::new(columns);
    let mut group_sizes = Vec::with_capacity(groups.len());
    for (key, (sums, count)) in groups {
        let values = key
            .into_iter()
            .chain(sums.into_iter().map(|s| FieldValue::Float(s / count as f64)))
            .collect();
        out.push(ResultRecord::new(values))?;
        group_sizes.push(count);
    }

    Ok(AggregatedTable {
        table: out,
        group_sizes,
    })
}
