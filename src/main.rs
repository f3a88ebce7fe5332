mod cmd;
mod config;
mod console;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod services;
mod workflow;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::commit::CommitOutcome;

/// Exit status when the user quits at a prompt.
const EXIT_CANCELLED: i32 = 130;

#[derive(Parser)]
#[command(
    name = "comet",
    author,
    version,
    about = "Generate a structured commit message from staged changes and link it to Jira"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Jira project key for newly created tickets (overrides JIRA_PROJECT_KEY).
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Language model to use (overrides OPENAI_MODEL).
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the staged changes, optionally link a Jira ticket, and commit (default).
    Commit,
    /// Show the resolved configuration (secrets masked).
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run().await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

async fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command.unwrap_or(Commands::Commit) {
        Commands::Config => {
            cmd::config::run()?;
            Ok(0)
        }
        Commands::Commit => {
            let outcome = run_commit(cli.project, cli.model).await?;
            Ok(exit_code(outcome))
        }
    }
}

fn exit_code(outcome: CommitOutcome) -> i32 {
    match outcome {
        CommitOutcome::Cancelled => EXIT_CANCELLED,
        CommitOutcome::NothingToCommit
        | CommitOutcome::GenerationFailed
        | CommitOutcome::Committed
        | CommitOutcome::CommitFailed
        | CommitOutcome::Discarded => 0,
    }
}

async fn run_commit(project: Option<String>, model: Option<String>) -> AppResult<CommitOutcome> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::from_env(&cwd)?.with_overrides(project, model);

    if !config.jira_missing.is_empty() {
        warn!(
            missing = %config.jira_missing.join(", "),
            "Jira not fully configured; ticket linking and creation will be skipped"
        );
    }

    let context = AppContext::from_config(config);
    cmd::commit::run(&context).await
}
