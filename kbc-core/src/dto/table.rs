//! Storage API table payloads

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A key/value metadata entry attached to a table or a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub provider: Option<String>,
}

/// The bucket a table lives in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketRef {
    #[serde(default)]
    pub id: Option<String>,
    pub display_name: String,
}

/// Per-column metadata, in the order the API listed the columns
///
/// The API sends an object keyed by column name, or an empty array when a table
/// has no column metadata at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMetadata(pub Vec<(String, Vec<MetadataEntry>)>);

impl ColumnMetadata {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Vec<MetadataEntry>)> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for ColumnMetadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, entries)| {
                    serde_json::from_value::<Vec<MetadataEntry>>(entries)
                        .map(|entries| (name, entries))
                        .map_err(D::Error::custom)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ColumnMetadata),
            Value::Null => Ok(Self::default()),
            Value::Array(items) if items.is_empty() => Ok(Self::default()),
            other => Err(D::Error::custom(format!(
                "expected column metadata object, got {}",
                other
            ))),
        }
    }
}

/// One element of `GET /v2/storage/tables?include=buckets,metadata,columnMetadata`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub display_name: String,
    pub bucket: BucketRef,
    #[serde(default)]
    pub metadata: Option<Vec<MetadataEntry>>,
    #[serde(default)]
    pub rows_count: Option<u64>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub column_metadata: ColumnMetadata,
    #[serde(default)]
    pub primary_key: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_metadata_keeps_api_order() {
        let payload = json!({
            "zeta": [{"key": "KBC.datatype.basetype", "value": "STRING", "provider": "storage"}],
            "alpha": [],
            "mid": []
        });

        let parsed: ColumnMetadata = serde_json::from_value(payload).unwrap();
        let names: Vec<&str> = parsed.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(parsed.0[0].1.len(), 1);
    }

    #[test]
    fn test_column_metadata_accepts_empty_array() {
        let parsed: ColumnMetadata = serde_json::from_value(json!([])).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_column_metadata_rejects_scalars() {
        assert!(serde_json::from_value::<ColumnMetadata>(json!("nope")).is_err());
    }

    #[test]
    fn test_table_response_minimal_payload() {
        let table: TableResponse = serde_json::from_value(json!({
            "displayName": "orders",
            "bucket": {"displayName": "sales"}
        }))
        .unwrap();

        assert_eq!(table.display_name, "orders");
        assert_eq!(table.bucket.display_name, "sales");
        assert!(table.column_metadata.is_empty());
        assert!(table.rows_count.is_none());
    }
}
