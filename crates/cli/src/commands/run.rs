//! The driver: one agent, one task, one crew, run once.

use anyhow::Result;
use pgcrew_agent::{Agent, Crew, OpenAiClient, QueryTool, Task, ToolRegistry};
use pgcrew_core::AppConfig;

const DEFAULT_DATABASE_DESCRIPTION: &str = "The database name is composio";
const DEFAULT_USER_REQUEST: &str = "fetch the rows in the users table";

pub async fn run(
    config: &AppConfig,
    request: Option<String>,
    description: Option<String>,
) -> Result<String> {
    let database_description =
        description.unwrap_or_else(|| DEFAULT_DATABASE_DESCRIPTION.to_string());
    let user_request = request.unwrap_or_else(|| DEFAULT_USER_REQUEST.to_string());
    let connection_string = config.database.conn_string.clone();

    let mut tools = ToolRegistry::default();
    tools.register(QueryTool);

    let llm = OpenAiClient::from_config(&config.llm)?;

    let agent = Agent {
        role: "Query Executor Agent".to_string(),
        goal: "Execute the SQL query and return the results.".to_string(),
        backstory: "You are an expert in SQL and database management, skilled at executing \
                    SQL queries and providing results efficiently."
            .to_string(),
        verbose: true,
    };

    let task = Task {
        description: format!(
            "This is the database description={database_description} \
             form a sql query based on this input={user_request} \
             Execute the SQL query formed by the Query Writer Agent, and return the results. \
             Pass the query and connection string parameter. \
             The connection string parameter={connection_string}"
        ),
        expected_output: "Results of the SQL query were returned. Stop once the goal is achieved"
            .to_string(),
    };

    let crew = Crew::new(agent, vec![task], tools, Box::new(llm));
    crew.kickoff().await
}
