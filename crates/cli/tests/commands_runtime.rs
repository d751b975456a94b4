use std::sync::{Mutex, OnceLock};

use pgcrew_cli::commands::{config, query, table_info};
use pgcrew_core::config::{AppConfig, LoadOptions};
use serde_json::Value;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

const ENV_KEYS: &[&str] = &[
    "PG_CONN_STRING",
    "OPENAI_API_KEY",
    "PGCREW_LLM_BASE_URL",
    "PGCREW_LLM_MODEL",
    "PGCREW_LLM_TIMEOUT_SECS",
    "PGCREW_LOG_LEVEL",
    "PGCREW_LOG_FORMAT",
];

fn load_config(vars: &[(&str, &str)]) -> AppConfig {
    let _guard = env_lock().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    let config = AppConfig::load(LoadOptions::default()).expect("config should load");
    for (key, _) in vars {
        std::env::remove_var(key);
    }
    config
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

#[tokio::test]
async fn query_command_reports_driver_failure_as_data() {
    let config = load_config(&[("PG_CONN_STRING", "definitely-not-a-postgres-url")]);

    let result = query::run(&config, "SELECT 1").await;

    assert_eq!(result.exit_code, 1, "driver failure should map to a nonzero exit");
    let payload = parse_payload(&result.output);
    assert_eq!(payload["execution_details"]["executed"], Value::Bool(false));
    assert!(payload["response_data"].as_str().unwrap().starts_with("PostgreSQL error: "));
}

#[tokio::test]
async fn table_info_command_reports_driver_failure_as_data() {
    let config = load_config(&[("PG_CONN_STRING", "definitely-not-a-postgres-url")]);

    let result = table_info::run(&config, "users").await;

    assert_eq!(result.exit_code, 1);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["execution_details"]["executed"], Value::Bool(false));
}

#[test]
fn config_command_redacts_the_api_key() {
    let config = load_config(&[
        ("OPENAI_API_KEY", "sk-test-not-a-real-key"),
        ("PG_CONN_STRING", "postgres://localhost/composio"),
    ]);

    let result = config::run(&config);

    assert_eq!(result.exit_code, 0);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["llm"]["api_key"], Value::String("<redacted>".to_string()));
    assert_eq!(
        payload["database"]["conn_string"],
        Value::String("postgres://localhost/composio".to_string())
    );
    assert!(!result.output.contains("sk-test-not-a-real-key"));
}

#[test]
fn config_command_reports_missing_api_key_as_null() {
    let config = load_config(&[]);

    let result = config::run(&config);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["llm"]["api_key"], Value::Null);
    assert_eq!(payload["database"]["conn_string"], Value::String(String::new()));
}
