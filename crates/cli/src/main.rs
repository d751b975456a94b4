use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    pgcrew_cli::run().await
}
