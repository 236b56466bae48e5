//! tasklist CLI
//!
//! Command-line interface for tasklist - a todo list backed by a remote task
//! service.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tasklist_core::{Config, TaskId};

mod commands;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "tasklist - A todo list synced with a remote task service")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// List all tasks
    #[command(alias = "ls")]
    List,
    /// Add a new task
    #[command(alias = "create")]
    Add {
        /// Task title
        title: String,
    },
    /// Mark a task done, or reopen it if it is already done
    Toggle {
        /// Task ID
        id: TaskId,
    },
    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID
        id: TaskId,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (server_url, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need a server
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config = Config::load_with_cli_override(config_path)?;

    // Handle TUI (default when no command given)
    let command = match cli.command {
        Some(Commands::Tui) | None => return tui::run(config).await,
        Some(command) => command,
    };

    init_logging();

    match command {
        Commands::Tui => unreachable!(),           // Handled above
        Commands::List => commands::task::list(&config, &output).await,
        Commands::Add { title } => commands::task::add(&config, title, &output).await,
        Commands::Toggle { id } => commands::task::toggle(&config, id, &output).await,
        Commands::Delete { id } => commands::task::delete(&config, id, &output).await,
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Log to stderr for one-shot commands (level from TASKLIST_LOG, default warn)
fn init_logging() {
    let level = std::env::var("TASKLIST_LOG").unwrap_or_else(|_| "warn".to_string());
    let env_filter = EnvFilter::new(format!(
        "tasklist_core={},tasklist_cli={}",
        level, level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
