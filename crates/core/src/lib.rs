pub mod action;
pub mod config;

pub use action::{
    ActionResponse, ExecutionDetails, QueryRequest, ResponseData, Row, TableInfo,
    TableInfoRequest, NO_ROWS_MESSAGE,
};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
