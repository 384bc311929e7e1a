//! Table domain types

use serde::{Deserialize, Serialize};

use crate::dto::table::{ColumnMetadata, MetadataEntry, TableResponse};

const DESCRIPTION_KEY: &str = "KBC.description";
const BASETYPE_KEY: &str = "KBC.datatype.basetype";
const LENGTH_KEY: &str = "KBC.datatype.length";
const STORAGE_PROVIDER: &str = "storage";

/// A Storage table with its bucket and typed columns
///
/// Two tables are equal when they share name, schema and columns; description and
/// row count are informational and do not take part in the comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Display name of the bucket holding the table
    pub schema: String,
    pub description: Option<String>,
    pub row_count: Option<u64>,
    pub columns: Vec<Column>,
}

impl Table {
    /// Columns that are part of the primary key, in column order
    pub fn primary_keys(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.primary).collect()
    }

    /// `schema.name`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.schema == other.schema && self.columns == other.columns
    }
}

impl From<TableResponse> for Table {
    fn from(response: TableResponse) -> Self {
        let description = response
            .metadata
            .as_deref()
            .and_then(|entries| metadata_value(entries, DESCRIPTION_KEY, None));
        let primary_key = response.primary_key.unwrap_or_default();

        let columns = if response.column_metadata.is_empty() {
            // No typing info; fall back to bare column names
            response
                .columns
                .unwrap_or_default()
                .into_iter()
                .map(|name| Column::untyped(name, &primary_key))
                .collect()
        } else {
            Column::from_column_metadata(&response.column_metadata, &primary_key)
        };

        Self {
            name: response.display_name,
            schema: response.bucket.display_name,
            description,
            row_count: response.rows_count,
            columns,
        }
    }
}

/// A table column
///
/// Equality ignores `description` and `length`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Storage base type (`STRING`, `NUMERIC`, ...)
    pub data_type: Option<String>,
    pub description: Option<String>,
    pub primary: bool,
    pub length: Option<String>,
}

impl Column {
    /// Build columns from the per-column metadata map of a table
    pub fn from_column_metadata(metadata: &ColumnMetadata, primary_key: &[String]) -> Vec<Self> {
        metadata
            .iter()
            .map(|(name, entries)| Self {
                name: name.clone(),
                data_type: metadata_value(entries, BASETYPE_KEY, Some(STORAGE_PROVIDER)),
                length: metadata_value(entries, LENGTH_KEY, Some(STORAGE_PROVIDER)),
                description: metadata_value(entries, DESCRIPTION_KEY, None),
                primary: primary_key.contains(name),
            })
            .collect()
    }

    fn untyped(name: String, primary_key: &[String]) -> Self {
        let primary = primary_key.contains(&name);
        Self {
            name,
            data_type: None,
            description: None,
            primary,
            length: None,
        }
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.data_type == other.data_type && self.primary == other.primary
    }
}

/// First value stored under `key`, optionally restricted to one provider
fn metadata_value(entries: &[MetadataEntry], key: &str, provider: Option<&str>) -> Option<String> {
    entries
        .iter()
        .find(|entry| {
            entry.key == key
                && provider.is_none_or(|wanted| entry.provider.as_deref() == Some(wanted))
        })
        .map(|entry| entry.value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn orders_payload() -> serde_json::Value {
        json!({
            "id": "in.c-sales.orders",
            "displayName": "orders",
            "bucket": {"id": "in.c-sales", "displayName": "sales"},
            "rowsCount": 1200,
            "metadata": [
                {"key": "KBC.createdBy.component.id", "value": "keboola.ex-db", "provider": "system"},
                {"key": "KBC.description", "value": "All orders", "provider": "user"}
            ],
            "primaryKey": ["order_id"],
            "columns": ["order_id", "amount", "note"],
            "columnMetadata": {
                "order_id": [
                    {"key": "KBC.datatype.basetype", "value": "INTEGER", "provider": "keboola.ex-db"},
                    {"key": "KBC.datatype.basetype", "value": "NUMERIC", "provider": "storage"},
                    {"key": "KBC.datatype.length", "value": "38,0", "provider": "storage"}
                ],
                "amount": [
                    {"key": "KBC.datatype.basetype", "value": "NUMERIC", "provider": "storage"},
                    {"key": "KBC.description", "value": "Gross amount", "provider": "user"}
                ],
                "note": []
            }
        })
    }

    fn orders() -> Table {
        let response: TableResponse = serde_json::from_value(orders_payload()).unwrap();
        Table::from(response)
    }

    #[test]
    fn test_table_from_response() {
        let table = orders();

        assert_eq!(table.name, "orders");
        assert_eq!(table.schema, "sales");
        assert_eq!(table.qualified_name(), "sales.orders");
        assert_eq!(table.description.as_deref(), Some("All orders"));
        assert_eq!(table.row_count, Some(1200));
        assert_eq!(table.columns.len(), 3);
    }

    #[test]
    fn test_column_types_only_come_from_storage_provider() {
        let table = orders();
        let order_id = &table.columns[0];

        assert_eq!(order_id.name, "order_id");
        assert_eq!(order_id.data_type.as_deref(), Some("NUMERIC"));
        assert_eq!(order_id.length.as_deref(), Some("38,0"));
        assert!(order_id.primary);

        let note = &table.columns[2];
        assert_eq!(note.data_type, None);
        assert_eq!(note.description, None);
        assert!(!note.primary);
    }

    #[test]
    fn test_column_description_from_any_provider() {
        let table = orders();
        assert_eq!(table.columns[1].description.as_deref(), Some("Gross amount"));
    }

    #[test]
    fn test_primary_keys() {
        let table = orders();
        let keys: Vec<String> = table.primary_keys().iter().map(|c| c.name.clone()).collect();
        assert_eq!(keys, vec!["order_id"]);
    }

    #[test]
    fn test_falls_back_to_column_names_without_metadata() {
        let response: TableResponse = serde_json::from_value(json!({
            "displayName": "events",
            "bucket": {"displayName": "raw"},
            "primaryKey": ["id"],
            "columns": ["id", "payload"],
            "columnMetadata": []
        }))
        .unwrap();

        let table = Table::from(response);
        assert_eq!(table.columns.len(), 2);
        assert!(table.columns[0].primary);
        assert!(table.columns.iter().all(|c| c.data_type.is_none()));
    }

    #[test]
    fn test_equality_ignores_descriptive_fields() {
        let mut left = orders();
        let mut right = orders();
        right.description = Some("changed".to_string());
        right.row_count = None;
        right.columns[0].description = Some("changed".to_string());
        right.columns[0].length = None;
        assert_eq!(left, right);

        left.columns[0].data_type = Some("STRING".to_string());
        assert_ne!(left, right);
    }
}
