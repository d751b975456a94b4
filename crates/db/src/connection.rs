use sqlx::postgres::PgConnection;
use sqlx::Connection;

/// Open a dedicated connection for one action call.
///
/// Connections are never pooled or reused: each action opens its own,
/// does its work, and closes it before returning.
pub async fn connect(conn_string: &str) -> Result<PgConnection, sqlx::Error> {
    PgConnection::connect(conn_string).await
}
