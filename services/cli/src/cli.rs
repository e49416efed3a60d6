use crate::demo::{run_demo, run_replay, run_validate, DemoArgs, ReplayArgs, ValidateArgs};
use clap::{Parser, Subcommand};
use job_intake::config::AppConfig;
use job_intake::error::AppError;
use job_intake::telemetry;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Job Registration Intake",
    about = "Exercise the job registration form rules and submission flow from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through a rejected, corrected, and accepted application (default command)
    Demo(DemoArgs),
    /// Replay a JSON script of form events
    Replay(ReplayArgs),
    /// Validate a single field value
    Validate(ValidateArgs),
}

pub(crate) async fn run() -> Result<ExitCode, AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config).await?,
        Command::Replay(args) => run_replay(args, &config).await?,
        Command::Validate(args) => return Ok(run_validate(args)),
    }
    Ok(ExitCode::SUCCESS)
}
