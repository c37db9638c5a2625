// ABOUTME: Table materialization into in-memory grids
// ABOUTME: Reads full tables over the simple query protocol with typed cells

use crate::postgres::connect;
use crate::utils::quote_ident;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use tokio_postgres::SimpleQueryMessage;

/// A single cell value, classified once at read time
///
/// `Text` carries the server's textual rendering of every non-integer type
/// (text, dates, booleans, floating point, binary, ...); they all format
/// identically downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Null,
    Integer(i64),
    Text(String),
}

/// Ordered rows of ordered, named cells
///
/// Invariant: every row has exactly as many cells as the header has columns.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// One table's contents at read time, immutable after construction
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub schema: String,
    pub table: String,
    pub grid: Grid,
}

fn is_integer_type(data_type: &str) -> bool {
    matches!(data_type, "smallint" | "integer" | "bigint")
}

/// Read an entire table into an in-memory snapshot
///
/// Opens a fresh connection for this table alone; the connection is dropped
/// before the next table is processed. The whole result set is held in
/// memory, so very large tables are a known limitation of this tool.
///
/// The column-class map comes from `information_schema.columns`; the data
/// arrives over the simple query protocol, which renders every value in the
/// server's default textual form and reports column names in ordinal order.
pub async fn read_table(source_url: &str, schema: &str, table: &str) -> Result<TableSnapshot> {
    let client = connect(source_url).await?;

    let column_rows = client
        .query(
            "SELECT column_name, data_type
             FROM information_schema.columns
             WHERE table_schema = $1 AND table_name = $2
             ORDER BY ordinal_position",
            &[&schema, &table],
        )
        .await
        .with_context(|| format!("Failed to read column metadata for {}.{}", schema, table))?;

    let integer_columns: HashSet<String> = column_rows
        .iter()
        .filter(|row| is_integer_type(row.get(1)))
        .map(|row| row.get(0))
        .collect();

    let data_query = format!(
        "SELECT * FROM {}.{}",
        quote_ident(schema),
        quote_ident(table)
    );
    let messages = client
        .simple_query(&data_query)
        .await
        .with_context(|| format!("Failed to read table {}.{}", schema, table))?;

    let mut columns: Vec<String> = Vec::new();
    let mut integer_flags: Vec<bool> = Vec::new();
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for message in messages {
        match message {
            SimpleQueryMessage::RowDescription(description) => {
                columns = description
                    .iter()
                    .map(|column| column.name().to_string())
                    .collect();
                integer_flags = columns
                    .iter()
                    .map(|name| integer_columns.contains(name))
                    .collect();
            }
            SimpleQueryMessage::Row(row) => {
                if row.len() != columns.len() {
                    bail!(
                        "Row width mismatch in {}.{}: expected {} cells, got {}",
                        schema,
                        table,
                        columns.len(),
                        row.len()
                    );
                }

                let mut cells = Vec::with_capacity(columns.len());
                for idx in 0..row.len() {
                    cells.push(classify_cell(row.get(idx), integer_flags[idx]));
                }
                rows.push(cells);
            }
            SimpleQueryMessage::CommandComplete(_) => {}
            _ => {}
        }
    }

    tracing::debug!(
        "Materialized {}.{}: {} rows, {} columns",
        schema,
        table,
        rows.len(),
        columns.len()
    );

    Ok(TableSnapshot {
        schema: schema.to_string(),
        table: table.to_string(),
        grid: Grid { columns, rows },
    })
}

/// Classify one raw value into its cell variant
fn classify_cell(raw: Option<&str>, integer_column: bool) -> Cell {
    match raw {
        None => Cell::Null,
        Some(text) if integer_column => match text.parse::<i64>() {
            Ok(value) => Cell::Integer(value),
            Err(_) => Cell::Text(text.to_string()),
        },
        Some(text) => Cell::Text(text.to_string()),
    }
}
