//! habit - track daily habits from the command line
//!
//! Talks to the habit-score API when it is reachable and keeps working from a
//! local snapshot when it is not.

mod cli;
mod commands;
mod config;
mod error;


use std::io::Write;
use std::path::Path;

use clap::Parser;

use cli::{Cli, Commands, CompletionShell};
use commands::add::run_add;
use commands::categories::run_categories;
use commands::config::run_config;
use commands::delete::run_delete;
use commands::list::run_list;
use commands::score::run_score;
use commands::status::run_status;
use commands::sync::run_sync;
use commands::toggle::run_toggle;
use config::{resolve_settings, CliConfig, Settings};
use error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive = "habit=warn"
        .parse()
        .map_err(|error: tracing_subscriber::filter::ParseError| {
            CliError::Config(error.to_string())
        })?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell, output } => write_completions(shell, output.as_deref()),
        Commands::Config { command } => run_config(command, cli.api_url, cli.snapshot_path),
        command => {
            let file_config = CliConfig::load().map_err(CliError::Config)?;
            let settings = resolve_settings(
                cli.api_url,
                cli.snapshot_path,
                |name| std::env::var(name).ok(),
                &file_config,
            );
            run_habit_command(command, &settings).await
        }
    }
}

async fn run_habit_command(command: Commands, settings: &Settings) -> Result<(), CliError> {
    match command {
        Commands::List { category, json } => run_list(category.as_deref(), json, settings).await,
        Commands::Add {
            name,
            category,
            points,
        } => run_add(&name, &category, &points, settings).await,
        Commands::Toggle { id } => run_toggle(&id, settings).await,
        Commands::Delete { id } => run_delete(&id, settings).await,
        Commands::Score => run_score(settings).await,
        Commands::Categories => run_categories(settings).await,
        Commands::Sync => run_sync(settings).await,
        Commands::Status => run_status(settings).await,
        // Handled in `run` before settings are resolved.
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}

fn write_completions(shell: CompletionShell, output: Option<&Path>) -> Result<(), CliError> {
    let script = shell.script();
    if let Some(path) = output {
        std::fs::write(path, &script)?;
        println!("{}", path.display());
    } else {
        std::io::stdout().write_all(&script)?;
    }
    Ok(())
}
