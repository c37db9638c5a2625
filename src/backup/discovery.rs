// ABOUTME: Schema and table discovery against the information_schema catalog
// ABOUTME: Lists user schemas outside the ignore-set and their base tables

use crate::postgres::connect;
use crate::utils::quote_literal;
use anyhow::{Context, Result};

/// Build the schema listing query for a given ignore-set
///
/// The ignore-set is rendered as a quoted literal exclusion list joined with
/// `, `. An empty ignore-set produces a query with no exclusion clause.
pub fn schema_list_query(ignore_schemas: &[String]) -> String {
    if ignore_schemas.is_empty() {
        return "SELECT schema_name FROM information_schema.schemata".to_string();
    }

    let excluded: Vec<String> = ignore_schemas.iter().map(|s| quote_literal(s)).collect();
    format!(
        "SELECT schema_name FROM information_schema.schemata WHERE schema_name NOT IN ({})",
        excluded.join(", ")
    )
}

/// List all schemas not present in the configured ignore-set
///
/// Opens a fresh connection for the single catalog query. Result ordering is
/// whatever the catalog returns.
pub async fn list_schemas(source_url: &str, ignore_schemas: &[String]) -> Result<Vec<String>> {
    let client = connect(source_url).await?;
    let query = schema_list_query(ignore_schemas);

    let rows = client
        .query(&query, &[])
        .await
        .context("Failed to list schemas")?;

    Ok(rows.iter().map(|row| row.get(0)).collect())
}

/// List all base tables within the given schema
///
/// Views, sequences, and foreign tables are excluded by the query predicate.
pub async fn list_tables(source_url: &str, schema: &str) -> Result<Vec<String>> {
    let client = connect(source_url).await?;

    let rows = client
        .query(
            "SELECT table_name
             FROM information_schema.tables
             WHERE table_type = 'BASE TABLE' AND table_schema = $1",
            &[&schema],
        )
        .await
        .with_context(|| format!("Failed to list tables in schema '{}'", schema))?;

    Ok(rows.iter().map(|row| row.get(0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_list_query_renders_exclusion_list() {
        let ignore = vec!["pg_catalog".to_string(), "information_schema".to_string()];
        assert_eq!(
            schema_list_query(&ignore),
            "SELECT schema_name FROM information_schema.schemata \
             WHERE schema_name NOT IN ('pg_catalog', 'information_schema')"
        );
    }

    // Regression: an empty ignore-set must still yield valid SQL
    #[test]
    fn test_schema_list_query_empty_ignore_set() {
        let query = schema_list_query(&[]);
        assert_eq!(query, "SELECT schema_name FROM information_schema.schemata");
        assert!(!query.contains("NOT IN"));
    }

    #[test]
    fn test_schema_list_query_single_entry() {
        let ignore = vec!["audit".to_string()];
        assert_eq!(
            schema_list_query(&ignore),
            "SELECT schema_name FROM information_schema.schemata \
             WHERE schema_name NOT IN ('audit')"
        );
    }

    #[test]
    fn test_schema_list_query_escapes_quotes() {
        let ignore = vec!["o'brien".to_string()];
        let query = schema_list_query(&ignore);
        assert!(query.contains("'o''brien'"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_list_schemas() {
        let url = std::env::var("TEST_SOURCE_URL").unwrap();
        let ignore = vec!["pg_catalog".to_string(), "information_schema".to_string()];

        let schemas = list_schemas(&url, &ignore).await.unwrap();

        println!("Found {} schemas", schemas.len());
        assert!(!schemas.contains(&"pg_catalog".to_string()));
        assert!(!schemas.contains(&"information_schema".to_string()));
    }

    #[tokio::test]
    #[ignore]
    async fn test_list_tables() {
        let url = std::env::var("TEST_SOURCE_URL").unwrap();

        let tables = list_tables(&url, "public").await.unwrap();

        // Result depends on test database, but should not error
        println!("Found {} tables in public", tables.len());
        for table in tables.iter().take(10) {
            println!("  - {}", table);
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_list_tables_unknown_schema_is_empty() {
        let url = std::env::var("TEST_SOURCE_URL").unwrap();

        let tables = list_tables(&url, "no_such_schema").await.unwrap();

        assert!(tables.is_empty());
    }
}
