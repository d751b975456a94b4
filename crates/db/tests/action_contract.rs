//! Contract tests for the action boundary that hold without a live server:
//! driver errors must come back as failure responses, never as panics or
//! propagated errors, and the wire shape must stay stable.

use pgcrew_core::{QueryRequest, TableInfoRequest};
use serde_json::Value;

#[tokio::test]
async fn query_with_malformed_conn_string_returns_failure_response() {
    let request = QueryRequest {
        connection_string: "definitely-not-a-postgres-url".to_string(),
        query: "SELECT 1".to_string(),
    };

    let response = pgcrew_db::execute_query(&request).await;

    assert!(!response.executed());
    let wire = serde_json::to_value(&response).unwrap();
    assert_eq!(wire["execution_details"]["executed"], Value::Bool(false));
    let message = wire["response_data"].as_str().expect("failure payload should be a string");
    assert!(message.starts_with("PostgreSQL error: "));
    assert!(message.len() > "PostgreSQL error: ".len(), "error text should be non-empty");
}

#[tokio::test]
async fn query_with_empty_conn_string_returns_failure_response() {
    let request = QueryRequest {
        connection_string: String::new(),
        query: "SELECT 1".to_string(),
    };

    let response = pgcrew_db::execute_query(&request).await;
    assert!(!response.executed());
}

#[tokio::test]
async fn table_info_with_malformed_conn_string_returns_failure_response() {
    let request = TableInfoRequest {
        connection_string: "definitely-not-a-postgres-url".to_string(),
        table_name: "users".to_string(),
    };

    let response = pgcrew_db::table_info(&request).await;

    assert!(!response.executed());
    let wire = serde_json::to_value(&response).unwrap();
    assert!(wire["response_data"].is_string());
}
