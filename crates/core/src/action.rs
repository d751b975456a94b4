//! Wire types for the tool actions.
//!
//! The response shape is the contract the orchestration layer relies on:
//! `execution_details.executed` tells the caller whether the statement ran,
//! and `response_data` carries rows, a status message, or table metadata.
//! `ResponseData` is a tagged variant in Rust so callers can discriminate the
//! payload without inspecting its JSON shape; it serializes untagged to keep
//! the wire format stable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status string returned when a statement produced no result set.
pub const NO_ROWS_MESSAGE: &str = "Query executed successfully. No data to fetch.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// PostgreSQL connection string, passed through to the driver verbatim.
    pub connection_string: String,
    /// SQL text to execute as a single statement.
    pub query: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfoRequest {
    /// PostgreSQL connection string, passed through to the driver verbatim.
    pub connection_string: String,
    /// Table name to introspect within the `public` schema.
    pub table_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionDetails {
    pub executed: bool,
}

/// One fetched row, cells decoded to JSON in column order.
pub type Row = Vec<Value>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub table_name: String,
    pub columns: Vec<Row>,
    pub constraints: Vec<Row>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Driver error text or the fixed no-rows status message.
    Message(String),
    /// Result-set rows in the order the driver produced them.
    Rows(Vec<Row>),
    /// Combined column and constraint metadata for one table.
    TableInfo(TableInfo),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub execution_details: ExecutionDetails,
    pub response_data: ResponseData,
}

impl ActionResponse {
    pub fn success(response_data: ResponseData) -> Self {
        Self { execution_details: ExecutionDetails { executed: true }, response_data }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            execution_details: ExecutionDetails { executed: false },
            response_data: ResponseData::Message(message.into()),
        }
    }

    pub fn executed(&self) -> bool {
        self.execution_details.executed
    }
}
