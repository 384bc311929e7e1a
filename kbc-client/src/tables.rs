//! Storage table endpoints

use kbc_core::domain::table::Table;
use kbc_core::dto::table::TableResponse;
use tracing::debug;

use crate::KeboolaClient;
use crate::error::{ClientError, Result};

impl KeboolaClient {
    /// List all tables in the project, with bucket, metadata and column metadata
    ///
    /// # Example
    /// ```no_run
    /// # use kbc_client::KeboolaClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = KeboolaClient::new("https://connection.keboola.com", "token");
    /// let tables = client.list_tables().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_tables(&self) -> Result<Vec<Table>> {
        let url = format!(
            "{}/v2/storage/tables?include=buckets,metadata,columnMetadata",
            self.base_url
        );
        debug!("GET {}", url);
        let response = self.authorized(self.client.get(&url)).send().await?;

        let tables: Vec<TableResponse> = self.handle_response(response).await?;
        debug!("Fetched {} table(s)", tables.len());

        Ok(tables.into_iter().map(Table::from).collect())
    }

    /// Find one table by `schema.name`, bare name, or unambiguous prefix
    ///
    /// Exact matches win over prefixes. A bare name that exists in several
    /// buckets is ambiguous.
    pub async fn find_table(&self, query: &str) -> Result<Table> {
        let tables = self.list_tables().await?;
        resolve_table(tables, query)
    }
}

fn resolve_table(tables: Vec<Table>, query: &str) -> Result<Table> {
    if let Some(table) = tables.iter().find(|t| t.qualified_name() == query) {
        return Ok(table.clone());
    }

    let by_name: Vec<&Table> = tables.iter().filter(|t| t.name == query).collect();
    match by_name.len() {
        0 => {}
        1 => return Ok(by_name[0].clone()),
        _ => return Err(ambiguous(query, &by_name)),
    }

    let prefix = query.to_lowercase();
    let matches: Vec<&Table> = tables
        .iter()
        .filter(|t| t.qualified_name().to_lowercase().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(ClientError::NotFound(format!(
            "No table matches '{}'",
            query
        ))),
        1 => Ok(matches[0].clone()),
        _ => Err(ambiguous(query, &matches)),
    }
}

fn ambiguous(query: &str, candidates: &[&Table]) -> ClientError {
    let names: Vec<String> = candidates.iter().map(|t| t.qualified_name()).collect();
    ClientError::Ambiguous(format!(
        "'{}' matches multiple tables: {}",
        query,
        names.join(", ")
    ))
}
