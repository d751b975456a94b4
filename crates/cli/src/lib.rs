pub mod commands;
pub mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pgcrew_core::config::{AppConfig, ConfigOverrides, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "pgcrew",
    about = "PostgreSQL query tooling for LLM agents",
    long_about = "Run the query-executor crew against a PostgreSQL database, or invoke the \
                  underlying query and table-info actions directly.",
    after_help = "Examples:\n  pgcrew run --request \"fetch the rows in the users table\"\n  pgcrew query --sql \"SELECT 1\"\n  pgcrew table-info --table users"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a pgcrew.toml config file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the query-executor crew once and print its result")]
    Run {
        #[arg(long, help = "Natural-language request handed to the agent")]
        request: Option<String>,
        #[arg(long, help = "One-line description of the target database")]
        description: Option<String>,
    },
    #[command(about = "Execute one SQL statement directly and print the JSON response")]
    Query {
        #[arg(long, help = "SQL text to execute as a single statement")]
        sql: String,
        #[arg(long, help = "Connection string override; falls back to PG_CONN_STRING")]
        conn: Option<String>,
    },
    #[command(about = "Print column and constraint metadata for one table as JSON")]
    TableInfo {
        #[arg(long, help = "Table name in the public schema")]
        table: String,
        #[arg(long, help = "Connection string override; falls back to PG_CONN_STRING")]
        conn: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with secrets redacted")]
    Config,
}

impl Command {
    fn overrides(&self) -> ConfigOverrides {
        match self {
            Command::Query { conn, .. } | Command::TableInfo { conn, .. } => {
                ConfigOverrides { conn_string: conn.clone(), ..ConfigOverrides::default() }
            }
            Command::Run { .. } | Command::Config => ConfigOverrides::default(),
        }
    }
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    // Configuration is built once, here, at the entry point; nothing is read
    // from the environment after this.
    let options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: cli.command.overrides(),
    };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration error: {error}");
            return ExitCode::from(2);
        }
    };

    telemetry::init(&config.logging);

    match cli.command {
        Command::Run { request, description } => {
            // The driver layer deliberately adds no error handling: a failure
            // from the crew surfaces as a process error.
            match commands::run::run(&config, request, description).await {
                Ok(output) => {
                    println!("{output}");
                    ExitCode::SUCCESS
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Query { sql, .. } => finish(commands::query::run(&config, &sql).await),
        Command::TableInfo { table, .. } => {
            finish(commands::table_info::run(&config, &table).await)
        }
        Command::Config => finish(commands::config::run(&config)),
    }
}

fn finish(result: commands::CommandResult) -> ExitCode {
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
