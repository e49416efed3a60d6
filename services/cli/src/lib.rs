mod cli;
mod demo;
mod infra;

use job_intake::error::AppError;
use std::process::ExitCode;

/// Run the CLI. A rejected `validate` value yields `ExitCode::FAILURE` rather than an error.
pub async fn run() -> Result<ExitCode, AppError> {
    cli::run().await
}
