// ABOUTME: INSERT statement synthesis from table snapshots
// ABOUTME: Renders type-aware literals and batches row tuples per table

use crate::backup::snapshot::{Cell, TableSnapshot};
use crate::utils::{quote_ident, quote_literal};
use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;

/// Render one cell as a SQL literal
///
/// NULLs render as the bare `NULL` keyword, integer cells as unquoted
/// decimals, and everything else as a single-quoted string with embedded
/// quotes doubled.
fn literal(cell: &Cell) -> String {
    match cell {
        Cell::Null => "NULL".to_string(),
        Cell::Integer(value) => value.to_string(),
        Cell::Text(value) => quote_literal(value),
    }
}

/// Render the multi-row INSERT statement for one snapshot
///
/// Returns `None` when the table has zero rows or zero columns; such tables
/// produce no statement at all.
pub fn render_insert(snapshot: &TableSnapshot) -> Option<String> {
    let grid = &snapshot.grid;
    if grid.rows.is_empty() || grid.columns.is_empty() {
        return None;
    }

    let tuples: Vec<String> = grid
        .rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(literal).collect();
            format!("({})", cells.join(", "))
        })
        .collect();

    Some(format!(
        "INSERT INTO {}.{} VALUES\n{};",
        snapshot.schema,
        quote_ident(&snapshot.table),
        tuples.join(",\n")
    ))
}

/// Build the export key for one emitted statement
///
/// Combines schema, table, and the UTC instant of emission so keys stay
/// unique across tables and across repeated runs in one process lifetime.
fn export_key(schema: &str, table: &str) -> String {
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    format!("{}-{}-{}", schema, table, stamp)
}

/// Convert snapshots into a mapping of export-key to rendered SQL text
///
/// Empty tables are omitted entirely. The mapping is unordered.
pub fn synthesize(snapshots: &[TableSnapshot]) -> HashMap<String, String> {
    let mut queries = HashMap::new();

    for snapshot in snapshots {
        if let Some(statement) = render_insert(snapshot) {
            queries.insert(export_key(&snapshot.schema, &snapshot.table), statement);
        }
    }

    queries
}
