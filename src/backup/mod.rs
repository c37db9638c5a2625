// ABOUTME: Backup pipeline module
// ABOUTME: Composes discovery, materialization, and statement synthesis

pub mod discovery;
pub mod snapshot;
pub mod synthesize;

pub use discovery::{list_schemas, list_tables};
pub use snapshot::{read_table, Cell, Grid, TableSnapshot};
pub use synthesize::synthesize;

use crate::config::BackupConfig;
use anyhow::Result;
use std::collections::HashMap;

/// Backup pipeline facade
///
/// Owns the run configuration and exposes the two operations callers build
/// on: materializing every non-ignored table, and producing the full mapping
/// of export-key to rendered SQL text. Display, disk output, and scheduling
/// belong to callers.
pub struct BackupHandler {
    config: BackupConfig,
}

impl BackupHandler {
    pub fn new(config: BackupConfig) -> Self {
        Self { config }
    }

    /// Materialize every non-ignored table as an in-memory snapshot
    ///
    /// Tables are read strictly one at a time, each over its own short-lived
    /// connection. A failure on any table aborts the whole run; there are no
    /// partial results and no retries.
    pub async fn snapshot_all(&self) -> Result<Vec<TableSnapshot>> {
        let schemas = list_schemas(&self.config.source_url, &self.config.ignore_schemas).await?;
        tracing::info!("Discovered {} schemas", schemas.len());

        let mut snapshots = Vec::new();
        for schema in &schemas {
            let tables = list_tables(&self.config.source_url, schema).await?;
            tracing::info!("Schema '{}': {} tables", schema, tables.len());

            for table in &tables {
                let table_snapshot = read_table(&self.config.source_url, schema, table).await?;
                tracing::info!(
                    "  ✓ {}.{}: {} rows, {} columns",
                    schema,
                    table,
                    table_snapshot.grid.rows.len(),
                    table_snapshot.grid.columns.len()
                );
                snapshots.push(table_snapshot);
            }
        }

        Ok(snapshots)
    }

    /// Produce the mapping of export-key to rendered INSERT statement
    pub async fn backup_queries(&self) -> Result<HashMap<String, String>> {
        let snapshots = self.snapshot_all().await?;
        Ok(synthesize(&snapshots))
    }
}
