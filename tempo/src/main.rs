// tempo/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug tempo run ... pour voir les détails
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project_dir,
            append,
        } => commands::run::execute(project_dir, append).await,

        Commands::Check {
            project_dir,
            table,
            fail_fast,
        } => commands::check::execute(project_dir, table, fail_fast).await,

        Commands::Query { query, db_path } => commands::query::execute(query, db_path).await,

        Commands::Inspect {
            db_path,
            table,
            limit,
        } => commands::inspect::execute(db_path, table, limit),

        Commands::Clean { project_dir } => commands::clean::execute(project_dir),
    }
}
