use pgcrew_core::AppConfig;
use serde_json::{json, Value};

use super::CommandResult;

/// Render the effective configuration. Secrets never leave the process: the
/// API key is replaced with a marker when set.
pub fn run(config: &AppConfig) -> CommandResult {
    let api_key = match &config.llm.api_key {
        Some(_) => Value::String("<redacted>".to_string()),
        None => Value::Null,
    };

    let payload = json!({
        "database": {
            "conn_string": config.database.conn_string,
        },
        "llm": {
            "api_key": api_key,
            "base_url": config.llm.base_url,
            "model": config.llm.model,
            "timeout_secs": config.llm.timeout_secs,
        },
        "logging": {
            "level": config.logging.level,
            "format": config.logging.format,
        },
    });

    match serde_json::to_string_pretty(&payload) {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult {
            exit_code: 1,
            output: format!("{{\"error\":\"serialization failed: {error}\"}}"),
        },
    }
}
