//! Tabular result types shared by every dataset.
//!
//! A [`ResultTable`] is built once per run (from result files or from the
//! cache), never mutated row-wise afterwards, and consumed by aggregation and
//! reporting. Derived tables are always new values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A single cell of a result table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, FieldValue::Text(_))
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Int(_) => 0,
            FieldValue::Float(_) => 1,
            FieldValue::Text(_) => 2,
        }
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// How a column takes part in grouping and charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Categorical key, e.g. the algorithm name.
    Label,
    /// Problem-size parameter or partition key.
    Dimension,
    /// Numeric value averaged during aggregation.
    Measurement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as used in group keys and chart options.
    pub name: String,
    pub role: ColumnRole,
}

impl Column {
    pub fn new(name: &str, role: ColumnRole) -> Self {
        Self {
            name: name.to_string(),
            role,
        }
    }
}

/// One benchmark observation, values aligned with the table's columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// One value per table column, in column order.
    pub values: Vec<FieldValue>,
}

impl ResultRecord {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }
}

/// Ordered rows under a fixed column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    columns: Vec<Column>,
    rows: Vec<ResultRecord>,
}

impl ResultTable {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. The row must have one value per column.
    pub fn push(&mut self, record: ResultRecord) -> Result<()> {
        if record.values.len() != self.columns.len() {
            return Err(Error::ArityMismatch {
                expected: self.columns.len(),
                got: record.values.len(),
            });
        }
        self.rows.push(record);
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[ResultRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// All values of one column, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<&FieldValue>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| &r.values[idx]).collect())
    }

    /// Split the table by the values of `column`, keyed in natural order.
    pub fn partition(&self, column: &str) -> Result<BTreeMap<FieldValue, ResultTable>> {
        let idx = self.column_index(column)?;
        let mut parts: BTreeMap<FieldValue, ResultTable> = BTreeMap::new();
        for row in &self.rows {
            parts
                .entry(row.values[idx].clone())
                .or_insert_with(|| ResultTable::new(self.columns.clone()))
                .rows
                .push(row.clone());
        }
        Ok(parts)
    }

    /// Rows sorted by `keys` (stable; earlier keys take precedence).
    pub fn sorted_by(&self, keys: &[&str]) -> Result<ResultTable> {
        let indices = keys
            .iter()
            .map(|k| self.column_index(k))
            .collect::<Result<Vec<_>>>()?;
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            indices
                .iter()
                .map(|&i| a.values[i].cmp(&b.values[i]))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(ResultTable {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Check every row against the column set: one value per column and a
    /// finite number in every measurement column.
    ///
    /// Tables built through [`ResultTable::push`] already hold the arity
    /// rule; deserialized tables do not.
    pub fn validate(&self) -> Result<()> {
        for (row_no, row) in self.rows.iter().enumerate() {
            if row.values.len() != self.columns.len() {
                return Err(Error::ArityMismatch {
                    expected: self.columns.len(),
                    got: row.values.len(),
                });
            }
            for (column, value) in self.columns.iter().zip(&row.values) {
                let finite = value.as_f64().is_some_and(f64::is_finite);
                if column.role == ColumnRole::Measurement && !finite {
                    return Err(Error::NonNumericColumn {
                        column: column.name.clone(),
                        row: row_no,
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Fails with [`Error::EmptyDataset`] when the table has no rows.
    pub fn ensure_non_empty(&self, dataset: &str, dir: &std::path::Path) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyDataset {
                dataset: dataset.to_string(),
                dir: dir.to_path_buf(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultTable {
        let mut t = ResultTable::new(vec![
            Column::new("algorithm", ColumnRole::Label),
            Column::new("n", ColumnRole::Dimension),
            Column::new("time", ColumnRole::Measurement),
        ]);
        for (a, n, time) in [("dijkstra", 10, 0.5), ("bfs", 2, 0.1), ("dijkstra", 2, 0.2)] {
            t.push(ResultRecord::new(vec![a.into(), FieldValue::Int(n), time.into()]))
                .unwrap();
        }
        t
    }

    #[test]
    fn push_rejects_wrong_arity() {
        let mut t = sample();
        let err = t.push(ResultRecord::new(vec!["x".into()])).unwrap_err();
        assert!(matches!(err, Error::ArityMismatch { expected: 3, got: 1 }));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn unknown_column_is_named() {
        let err = sample().column_index("edges").unwrap_err();
        assert_eq!(err.to_string(), "unknown column `edges`");
    }

    #[test]
    fn partition_orders_keys_naturally() {
        let parts = sample().partition("algorithm").unwrap();
        let keys: Vec<String> = parts.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["bfs", "dijkstra"]);
        assert_eq!(parts[&FieldValue::from("dijkstra")].len(), 2);
    }

    #[test]
    fn sorted_by_uses_keys_in_order() {
        let sorted = sample().sorted_by(&["algorithm", "n"]).unwrap();
        let ns: Vec<String> = sorted
            .column_values("n")
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(ns, vec!["2", "2", "10"]);
    }

    #[test]
    fn numeric_order_is_not_lexicographic() {
        assert!(FieldValue::Int(9) < FieldValue::Int(10));
        assert!(FieldValue::Float(0.5) < FieldValue::Float(10.0));
        assert!(FieldValue::Int(100) < FieldValue::from("a"));
    }

    #[test]
    fn untagged_json_keeps_variants() {
        let row = ResultRecord::new(vec![
            FieldValue::Int(5),
            FieldValue::Float(2.0),
            FieldValue::from("p1"),
        ]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"values":[5,2.0,"p1"]}"#);
        let back: ResultRecord = serde_json::from_str(&json).unwrap();
        assert!(matches!(back.values[1], FieldValue::Float(_)));
        assert_eq!(back, row);
    }

    #[test]
    fn validate_catches_rows_that_bypassed_push() {
        assert!(sample().validate().is_ok());

        let mut short = sample();
        short.rows[1].values.pop();
        assert!(matches!(
            short.validate(),
            Err(Error::ArityMismatch { expected: 3, got: 2 })
        ));

        let mut text = sample();
        text.rows[2].values[2] = "fast".into();
        assert!(matches!(
            text.validate(),
            Err(Error::NonNumericColumn { ref column, row: 2, .. }) if column == "time"
        ));

        let mut infinite = sample();
        infinite.rows[0].values[2] = FieldValue::Float(f64::INFINITY);
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn empty_table_reports_empty_dataset() {
        let t = ResultTable::new(vec![Column::new("k", ColumnRole::Dimension)]);
        let err = t
            .ensure_non_empty("matching", std::path::Path::new("data"))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyDataset { .. }));
    }
}
