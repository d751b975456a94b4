//! The two database actions behind the tool surface.
//!
//! Every driver error is folded into the failure response at this boundary:
//! callers always get an `ActionResponse`, never a propagated `sqlx::Error`.

use pgcrew_core::{
    ActionResponse, QueryRequest, ResponseData, Row, TableInfo, TableInfoRequest, NO_ROWS_MESSAGE,
};
use sqlx::postgres::PgConnection;
use sqlx::{Connection, Executor};
use tracing::error;

use crate::{connection, decode, introspect};

/// Execute one SQL statement and return its rows, or the fixed status string
/// when the statement produces no result set.
pub async fn execute_query(request: &QueryRequest) -> ActionResponse {
    match run_query(&request.connection_string, &request.query).await {
        Ok(data) => ActionResponse::success(data),
        Err(source) => failure("execute_query", source),
    }
}

/// Describe one table via `information_schema`: column metadata plus
/// constraint metadata. A nonexistent table yields empty sequences, not an
/// error.
pub async fn table_info(request: &TableInfoRequest) -> ActionResponse {
    match run_table_info(&request.connection_string, &request.table_name).await {
        Ok(info) => ActionResponse::success(ResponseData::TableInfo(info)),
        Err(source) => failure("table_info", source),
    }
}

async fn run_query(conn_string: &str, sql: &str) -> Result<ResponseData, sqlx::Error> {
    let mut conn = connection::connect(conn_string).await?;
    let mut tx = conn.begin().await?;

    // Prepared-statement metadata is the driver-level signal for "does this
    // statement return rows", covering SELECT as well as DML with RETURNING.
    let statement = (&mut *tx).describe(sql).await?;
    let data = if statement.columns().is_empty() {
        sqlx::query(sql).execute(&mut *tx).await?;
        ResponseData::Message(NO_ROWS_MESSAGE.to_string())
    } else {
        let rows = sqlx::query(sql).fetch_all(&mut *tx).await?;
        ResponseData::Rows(rows.iter().map(decode::row_values).collect())
    };

    // Commit before the connection closes, regardless of statement type.
    tx.commit().await?;
    let _ = conn.close().await;
    Ok(data)
}

async fn run_table_info(conn_string: &str, table_name: &str) -> Result<TableInfo, sqlx::Error> {
    let mut conn = connection::connect(conn_string).await?;

    let columns = fetch_rows(&mut conn, &introspect::column_query(table_name)).await?;
    let constraints = fetch_rows(&mut conn, &introspect::constraint_query(table_name)).await?;

    let _ = conn.close().await;
    Ok(TableInfo { table_name: table_name.to_string(), columns, constraints })
}

async fn fetch_rows(conn: &mut PgConnection, sql: &str) -> Result<Vec<Row>, sqlx::Error> {
    let rows = sqlx::query(sql).fetch_all(&mut *conn).await?;
    Ok(rows.iter().map(decode::row_values).collect())
}

fn failure(action: &'static str, source: sqlx::Error) -> ActionResponse {
    let message = format!("PostgreSQL error: {source}");
    error!(action, error = %source, "database action failed");
    ActionResponse::failure(message)
}
