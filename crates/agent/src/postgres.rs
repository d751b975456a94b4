//! PostgreSQL tools exposed to the agent runtime.
//!
//! Each tool deserializes its JSON input into the typed request and hands it
//! to the database action. Malformed input is a tool-level error surfaced to
//! the agent loop; database failures come back inside the `ActionResponse`
//! payload with `executed=false`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use pgcrew_core::{QueryRequest, TableInfoRequest};
use serde_json::{json, Value};

use crate::tools::Tool;

/// Runs one SQL statement against a PostgreSQL database.
pub struct QueryTool;

#[async_trait]
impl Tool for QueryTool {
    fn name(&self) -> &'static str {
        "run_postgresql_query"
    }

    fn description(&self) -> &'static str {
        "Execute a SQL query on a PostgreSQL database and return the results."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "connection_string": {
                    "type": "string",
                    "description": "PostgreSQL connection string"
                },
                "query": {
                    "type": "string",
                    "description": "SQL query to be executed on PostgreSQL"
                }
            },
            "required": ["connection_string", "query"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let request: QueryRequest =
            serde_json::from_value(input).context("invalid run_postgresql_query input")?;
        let response = pgcrew_db::execute_query(&request).await;
        Ok(serde_json::to_value(response)?)
    }
}

/// Reports column and constraint metadata for one table.
pub struct TableInfoTool;

#[async_trait]
impl Tool for TableInfoTool {
    fn name(&self) -> &'static str {
        "get_postgresql_table_info"
    }

    fn description(&self) -> &'static str {
        "Get column and constraint information for a table in a PostgreSQL database."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "connection_string": {
                    "type": "string",
                    "description": "PostgreSQL connection string"
                },
                "table_name": {
                    "type": "string",
                    "description": "Table name to get information for"
                }
            },
            "required": ["connection_string", "table_name"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let request: TableInfoRequest =
            serde_json::from_value(input).context("invalid get_postgresql_table_info input")?;
        let response = pgcrew_db::table_info(&request).await;
        Ok(serde_json::to_value(response)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{QueryTool, TableInfoTool};
    use crate::tools::Tool;

    #[test]
    fn query_tool_schema_declares_both_required_fields() {
        let schema = QueryTool.input_schema();
        assert_eq!(schema["properties"]["connection_string"]["type"], "string");
        assert_eq!(schema["properties"]["query"]["type"], "string");
        assert_eq!(schema["required"], json!(["connection_string", "query"]));
    }

    #[test]
    fn table_info_tool_schema_declares_both_required_fields() {
        let schema = TableInfoTool.input_schema();
        assert_eq!(schema["properties"]["table_name"]["type"], "string");
        assert_eq!(schema["required"], json!(["connection_string", "table_name"]));
    }

    #[tokio::test]
    async fn query_tool_rejects_input_missing_fields() {
        let error = QueryTool.execute(json!({"query": "SELECT 1"})).await.unwrap_err();
        assert!(error.to_string().contains("run_postgresql_query"));
    }

    #[tokio::test]
    async fn query_tool_folds_driver_errors_into_the_response() {
        let input = json!({
            "connection_string": "definitely-not-a-postgres-url",
            "query": "SELECT 1",
        });

        let value = QueryTool.execute(input).await.unwrap();
        assert_eq!(value["execution_details"]["executed"], Value::Bool(false));
        assert!(value["response_data"].as_str().unwrap().starts_with("PostgreSQL error: "));
    }
}
