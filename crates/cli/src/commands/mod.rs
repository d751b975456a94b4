pub mod config;
pub mod query;
pub mod run;
pub mod table_info;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn from_response(response: &pgcrew_core::ActionResponse) -> Self {
        let exit_code = if response.executed() { 0 } else { 1 };
        match serde_json::to_string_pretty(response) {
            Ok(output) => Self { exit_code, output },
            Err(error) => Self {
                exit_code: 1,
                output: format!("{{\"error\":\"serialization failed: {error}\"}}"),
            },
        }
    }
}
