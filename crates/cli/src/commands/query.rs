use pgcrew_core::{AppConfig, QueryRequest};

use super::CommandResult;

/// Invoke the query action directly, bypassing the agent loop.
pub async fn run(config: &AppConfig, sql: &str) -> CommandResult {
    let request = QueryRequest {
        connection_string: config.database.conn_string.clone(),
        query: sql.to_string(),
    };

    let response = pgcrew_db::execute_query(&request).await;
    CommandResult::from_response(&response)
}
