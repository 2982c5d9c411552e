//! booktabs `tabular` rendering.

use crate::schema::{FieldValue, ResultTable};

/// Escape LaTeX special characters.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// The table as a `tabular` environment. Text columns are left-aligned,
/// numeric columns right-aligned.
pub fn render(table: &ResultTable) -> String {
    let align: String = (0..table.columns().len())
        .map(|i| {
            let numeric = !table.is_empty() && table.rows().iter().all(|r| r.values[i].is_numeric());
            if numeric {
                'r'
            } else {
                'l'
            }
        })
        .collect();

    let mut out = format!("\\begin{{tabular}}{{{}}}\n\\toprule\n", align);
    let header: Vec<String> = table.columns().iter().map(|c| escape(&c.name)).collect();
    out.push_str(&header.join(" & "));
    out.push_str(" \\\\\n\\midrule\n");
    for row in table.rows() {
        let cells: Vec<String> = row.values.iter().map(cell).collect();
        out.push_str(&cells.join(" & "));
        out.push_str(" \\\\\n");
    }
    out.push_str("\\bottomrule\n\\end{tabular}\n");
    out
}

fn cell(value: &FieldValue) -> String {
    match value {
        FieldValue::Float(v) => {
            let fixed = format!("{:.6}", v);
            let fixed = fixed.trim_end_matches('0').trim_end_matches('.');
            // below the fixed precision
            if (fixed == "0" || fixed == "-0") && *v != 0.0 {
                format!("{:e}", v)
            } else {
                fixed.to_string()
            }
        }
        other => escape(&other.to_string()),
    }
}
