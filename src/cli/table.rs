//! Aligned text-table rendering for query results.
//!
//! Every column header appears exactly once and every row value is
//! printed in declared column order. Numeric columns are right-aligned,
//! everything else left-aligned.

use crate::storage::{QueryResult, SqlValue};

/// Column gap in the rendered table.
const GAP: &str = "  ";

/// Renders a query result as an aligned text table.
///
/// Returns an empty string for a result with no columns (e.g. a
/// statement that produces nothing).
pub fn render(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return String::new();
    }

    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths = column_widths(&result.columns, &cells);
    let numeric = numeric_columns(result);

    let mut out = String::new();
    render_row(&mut out, &result.columns, &widths, &numeric);
    render_separator(&mut out, &widths);
    for row in &cells {
        render_row(&mut out, row, &widths, &numeric);
    }
    out
}

/// Width of each column: the widest of its header and all cell values.
fn column_widths(columns: &[String], cells: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in cells {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if len > widths[i] {
                widths[i] = len;
            }
        }
    }
    widths
}

/// A column is right-aligned when every non-null value in it is numeric
/// and it contains at least one value.
fn numeric_columns(result: &QueryResult) -> Vec<bool> {
    (0..result.column_count())
        .map(|i| {
            let mut seen = false;
            for row in &result.rows {
                match &row[i] {
                    SqlValue::Null => {}
                    value if value.is_numeric() => seen = true,
                    _ => return false,
                }
            }
            seen
        })
        .collect()
}

fn render_row<S: AsRef<str>>(out: &mut String, row: &[S], widths: &[usize], numeric: &[bool]) {
    let mut line = String::new();
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        let cell = cell.as_ref();
        let pad = widths[i].saturating_sub(cell.chars().count());
        if numeric[i] {
            line.extend(std::iter::repeat(' ').take(pad));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.extend(std::iter::repeat(' ').take(pad));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn render_separator(out: &mut String, widths: &[usize]) {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        line.extend(std::iter::repeat('-').take(*width));
    }
    out.push_str(&line);
    out.push('\n');
}

/// Renders a query result as CSV with a header record.
///
/// Fields containing commas, quotes, or newlines are quoted; embedded
/// quotes are doubled.
pub fn render_csv(result: &QueryResult) -> String {
    let mut out = String::new();

    let header: Vec<String> = result.columns.iter().map(|c| csv_escape(c)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in &result.rows {
        let record: Vec<String> = row.iter().map(|v| csv_escape(&v.to_string())).collect();
        out.push_str(&record.join(","));
        out.push('\n');
    }
    out
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
