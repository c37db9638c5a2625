// ABOUTME: Tables command implementation - Discovery preview
// ABOUTME: Lists the schemas and base tables a backup run would export

use crate::backup::{list_schemas, list_tables};
use crate::config::BackupConfig;
use crate::utils::validate_connection_string;
use anyhow::{Context, Result};

/// List the schemas and base tables that an export would cover
///
/// Performs discovery only; no table data is read. Useful for checking the
/// ignore-set before running a full export.
pub async fn tables(config: BackupConfig) -> Result<()> {
    validate_connection_string(&config.source_url)?;

    tracing::info!("Discovering schemas and tables...");

    let schemas = list_schemas(&config.source_url, &config.ignore_schemas)
        .await
        .context("Failed to discover schemas")?;

    if schemas.is_empty() {
        tracing::warn!("⚠ No schemas found outside the ignore-set");
        return Ok(());
    }

    let mut total_tables = 0;
    for schema in &schemas {
        let schema_tables = list_tables(&config.source_url, schema).await?;

        println!("{} ({} tables)", schema, schema_tables.len());
        for table in &schema_tables {
            println!("  {}", table);
        }

        total_tables += schema_tables.len();
    }

    tracing::info!("");
    tracing::info!(
        "✓ {} schema(s), {} base table(s)",
        schemas.len(),
        total_tables
    );
    Ok(())
}
