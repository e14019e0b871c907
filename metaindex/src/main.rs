// metaindex/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug metaindex index ... to see lookups and variant resolution.
    // Logs go to stderr, stdout is kept for command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index {
            project_dir,
            test_case,
        } => commands::index::execute(project_dir, test_case).await,
        Commands::Migrate { input, output } => commands::migrate::execute(input, output),
        Commands::Fields { project_dir } => commands::fields::execute(project_dir),
    }
}
