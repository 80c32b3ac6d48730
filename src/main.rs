//! postnorm CLI entry point.

mod commands;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use postnorm::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "postnorm",
    version,
    about = "Normalize nested platform post records into flat exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a batch of raw items from a JSON file.
    Run(commands::run::RunArgs),
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the current configuration as TOML.
    Show,
    /// Print the config file path.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(&config);

    match cli.command {
        Commands::Run(args) => commands::run::handle(args, &config),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "postnorm", &mut io::stdout());
            Ok(())
        }
    }
}

/// Install the tracing subscriber; RUST_LOG overrides the configured filter.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
