pub mod actions;
pub mod connection;
pub mod decode;
pub mod introspect;

pub use actions::{execute_query, table_info};
pub use connection::connect;
