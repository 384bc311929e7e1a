//! Queue API job payloads

use serde::{Deserialize, Serialize};

use super::id_from_string_or_number;

/// Request body for `POST /jobs` on the Queue API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueJob {
    /// Component id, e.g. `keboola.ex-db-snowflake`
    pub component: String,
    /// Configuration id within the component
    pub config: String,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_values_data: Option<VariableValuesData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<u64>,
}

impl QueueJob {
    /// A plain `run` of a component configuration
    pub fn run(component: impl Into<String>, config: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            config: config.into(),
            mode: "run".to_string(),
            variable_values_data: None,
            branch_id: None,
        }
    }

    /// Add an inline variable value for this run
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variable_values_data
            .get_or_insert_with(VariableValuesData::default)
            .values
            .push(VariableValue {
                name: name.into(),
                value: value.into(),
            });
        self
    }

    /// Run the configuration on a development branch instead of the default one
    pub fn on_branch(mut self, branch_id: u64) -> Self {
        self.branch_id = Some(branch_id);
        self
    }
}

/// Inline variable values passed with a queued job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableValuesData {
    pub values: Vec<VariableValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableValue {
    pub name: String,
    pub value: String,
}

/// The part of the `POST /jobs` response the client cares about
#[derive(Debug, Clone, Deserialize)]
pub struct QueuedJob {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_run_omits_optional_fields() {
        let body = serde_json::to_value(QueueJob::run("keboola.ex-http", "123")).unwrap();
        assert_eq!(
            body,
            json!({"component": "keboola.ex-http", "config": "123", "mode": "run"})
        );
    }

    #[test]
    fn test_variables_and_branch_are_serialized() {
        let job = QueueJob::run("keboola.ex-http", "123")
            .with_variable("date", "2024-01-01")
            .with_variable("env", "prod")
            .on_branch(42);

        let body = serde_json::to_value(job).unwrap();
        assert_eq!(
            body,
            json!({
                "component": "keboola.ex-http",
                "config": "123",
                "mode": "run",
                "variableValuesData": {"values": [
                    {"name": "date", "value": "2024-01-01"},
                    {"name": "env", "value": "prod"}
                ]},
                "branchId": 42
            })
        );
    }

    #[test]
    fn test_queued_job_accepts_numeric_id() {
        let queued: QueuedJob = serde_json::from_value(json!({"id": 676625356})).unwrap();
        assert_eq!(queued.id, "676625356");

        let queued: QueuedJob = serde_json::from_value(json!({"id": "676625356"})).unwrap();
        assert_eq!(queued.id, "676625356");
    }
}
