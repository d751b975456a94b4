use pgcrew_core::{AppConfig, TableInfoRequest};

use super::CommandResult;

/// Invoke the table-info action directly, bypassing the agent loop.
pub async fn run(config: &AppConfig, table: &str) -> CommandResult {
    let request = TableInfoRequest {
        connection_string: config.database.conn_string.clone(),
        table_name: table.to_string(),
    };

    let response = pgcrew_db::table_info(&request).await;
    CommandResult::from_response(&response)
}
