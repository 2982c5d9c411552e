//! Plain-text table for terminal output.

use crate::schema::ResultTable;

/// Columns padded to their widest cell and separated by ` | `; numeric
/// cells are right-aligned.
pub fn render(table: &ResultTable) -> String {
    let header: Vec<String> = table.columns().iter().map(|c| c.name.clone()).collect();
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|r| r.values.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String], numeric: &dyn Fn(usize) -> bool| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if numeric(i) {
                    format!("{:>w$}", c, w = widths[i])
                } else {
                    format!("{:<w$}", c, w = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(&header, &|_| false));
    out.push('\n');
    let total = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for (row, raw) in rows.iter().zip(table.rows()) {
        out.push_str(&format_row(row, &|i| raw.values[i].is_numeric()));
        out.push('\n');
    }
    out
}
