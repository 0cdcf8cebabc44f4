use anyhow::Result;
use clap::Parser;

use scriptree_cli::cli::{Cli, Commands};
use scriptree_cli::commands::{list_command, run_command, watch_command};

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List { dir, json } => list_command(dir.as_deref(), json),
        Commands::Run {
            project,
            script,
            dir,
            dry_run,
        } => run_command(&project, &script, dir.as_deref(), dry_run),
        Commands::Watch { dir } => watch_command(dir.as_deref()),
    }
}
