use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

#[derive(Parser)]
#[command(name = "habit")]
#[command(about = "Track daily habits and their score")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the habit API (e.g. http://localhost:3000/api/v1)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to the local habit snapshot file
    #[arg(long, global = true, value_name = "PATH")]
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List habits
    #[command(alias = "ls")]
    List {
        /// Only show habits in this category ("All" shows everything)
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new habit
    #[command(alias = "new")]
    Add {
        /// Habit name
        #[arg(required = true)]
        name: Vec<String>,
        /// Habit category
        #[arg(short, long)]
        category: String,
        /// Points earned when done (can be negative)
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        points: String,
    },
    /// Mark a habit done or not done for today
    #[command(alias = "done")]
    Toggle {
        /// Habit ID or unique ID prefix
        id: String,
    },
    /// Delete a habit
    #[command(alias = "rm")]
    Delete {
        /// Habit ID or unique ID prefix
        id: String,
    },
    /// Show today's score
    Score,
    /// List known categories
    Categories,
    /// Reload habits from the server
    Sync,
    /// Show API, sync and snapshot status
    Status,
    /// Manage the CLI config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl CompletionShell {
    const fn target(self) -> Shell {
        match self {
            Self::Bash => Shell::Bash,
            Self::Zsh => Shell::Zsh,
            Self::Fish => Shell::Fish,
        }
    }

    /// Completion script for the `habit` binary.
    pub fn script(self) -> Vec<u8> {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        let mut buffer = Vec::new();
        generate(self.target(), &mut command, name, &mut buffer);
        buffer
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the config file from --api-url and --snapshot-path
    Init,
    /// Print the effective settings and where they come from
    Show,
}
