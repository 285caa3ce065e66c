//! Plain-text rendering of query plans.
//!
//! A rendered plan is an ASCII table of operators (one row per plan row, tree
//! indentation already baked into the operator text) followed by a predicate
//! section that lists each row's predicates under the row's ID:
//!
//! ```text
//! +----+-------------------+
//! | ID | Operator          |
//! +----+-------------------+
//! |  0 | Distributed Union |
//! | *1 | +- Filter Scan    |
//! +----+-------------------+
//! Predicates(identified by ID):
//!  1: Residual Condition: ($Age > 30)
//! ```

use crate::models::{PlanRow, ResolvedChildLink};
use unicode_width::UnicodeWidthStr;

pub const ID_HEADER: &str = "ID";
pub const OPERATOR_HEADER: &str = "Operator";
pub const PREDICATES_HEADER: &str = "Predicates(identified by ID):";

/// Render the full plan report: operator table, then predicates.
///
/// An empty plan renders as an empty string.
pub fn format_plan(rows: &[PlanRow]) -> String {
    let max_id_length = max_id_length(rows);

    let mut output = format_tree_table(rows);
    output.push_str(&format_predicates(&predicate_lines(rows, max_id_length)));
    output
}

/// Number of decimal digits of the largest row ID, 0 for no rows.
pub fn max_id_length(rows: &[PlanRow]) -> usize {
    rows.iter()
        .map(|row| row.id.to_string().len())
        .max()
        .unwrap_or(0)
}

/// Render rows as a two column table: right-aligned ID, left-aligned operator.
///
/// Operator text is never wrapped; embedded newlines continue the cell on
/// the next table line. No rows means no table at all, header included.
pub fn format_tree_table(rows: &[PlanRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let cells: Vec<(String, Vec<&str>)> = rows
        .iter()
        .map(|row| (row.format_id(), row.text().split('\n').collect()))
        .collect();

    let id_width = cells
        .iter()
        .map(|(id, _)| id.width())
        .fold(ID_HEADER.width(), usize::max);
    let operator_width = cells
        .iter()
        .flat_map(|(_, lines)| lines.iter().map(|line| line.width()))
        .fold(OPERATOR_HEADER.width(), usize::max);

    let separator = format!(
        "+{}+{}+\n",
        "-".repeat(id_width + 2),
        "-".repeat(operator_width + 2)
    );

    let mut output = String::new();
    output.push_str(&separator);
    output.push_str(&format!(
        "| {} | {} |\n",
        pad_right(ID_HEADER, id_width),
        pad_right(OPERATOR_HEADER, operator_width)
    ));
    output.push_str(&separator);

    for (id, lines) in &cells {
        for (i, line) in lines.iter().enumerate() {
            let id_cell = if i == 0 { id.as_str() } else { "" };
            output.push_str(&format!(
                "| {} | {} |\n",
                pad_left(id_cell, id_width),
                pad_right(line, operator_width)
            ));
        }
    }

    output.push_str(&separator);
    output
}

/// Collect `"<prefix> <predicate>"` lines for every predicate of every row.
///
/// The first predicate of a row carries the row ID right-aligned to
/// `max_id_length` plus a colon; the rest of that row's predicates get blank
/// padding of the same width.
pub fn predicate_lines(rows: &[PlanRow], max_id_length: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for row in rows {
        for (i, predicate) in row.predicates.iter().enumerate() {
            let prefix = line_prefix(row.id, max_id_length, i == 0);
            lines.push(format!("{} {}", prefix, predicate));
        }
    }
    lines
}

/// Describe each row's typed child links, one line per link type.
///
/// Types are visited in sorted order. The untyped (empty) group is skipped,
/// and so is any type whose joined description is empty. These lines are
/// not part of [`format_plan`] output.
pub fn child_link_lines(rows: &[PlanRow], max_id_length: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for row in rows {
        let mut id_shown = false;
        for (link_type, links) in &row.child_links {
            if link_type.is_empty() {
                continue;
            }

            let joined = links
                .iter()
                .map(ResolvedChildLink::describe)
                .collect::<Vec<_>>()
                .join(", ");
            if joined.is_empty() {
                continue;
            }

            let prefix = line_prefix(row.id, max_id_length, !id_shown);
            id_shown = true;
            lines.push(format!("{} {}: {}", prefix, link_type, joined));
        }
    }
    lines
}

/// Predicate section with its header, or nothing when there are no lines.
pub fn format_predicates(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    output.push_str(PREDICATES_HEADER);
    output.push('\n');
    for line in lines {
        output.push_str(&format!(" {}\n", line));
    }
    output
}

fn line_prefix(id: u32, max_id_length: usize, first: bool) -> String {
    if first {
        format!("{:>width$}:", id, width = max_id_length)
    } else {
        " ".repeat(max_id_length + 1)
    }
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(s.width())), s)
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}
