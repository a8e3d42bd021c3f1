// tempo/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tempo")]
#[command(about = "The Star-Schema Warehouse Pipeline Tool", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the full pipeline (Stage -> Load -> Quality)
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Append to the fact table instead of truncating it first
        #[arg(long)]
        append: bool,
    },

    /// 🧪 Runs the quality suite of a single table
    Check {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Table whose suite should run (ex: "songplays")
        #[arg(long, short)]
        table: String,

        /// Stop at the first failing check
        #[arg(long)]
        fail_fast: bool,
    },

    /// ⚡ Executes a raw SQL statement (Ad-hoc)
    Query {
        query: String,
        #[arg(long, default_value = "tempo_db.duckdb")]
        db_path: String,
    },

    /// 🔍 Inspects a warehouse table (schema + sample rows)
    Inspect {
        /// Path to the DuckDB database file
        #[arg(long, default_value = "tempo_db.duckdb")]
        db_path: String,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// 🧹 Cleans build artifacts (target/ folder)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::parse_from(["tempo", "run"]);
        match args.command {
            Commands::Run {
                project_dir,
                append,
            } => {
                assert_eq!(project_dir.to_string_lossy(), ".");
                assert!(!append);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_append() -> Result<()> {
        let args = Cli::parse_from(["tempo", "run", "--append", "--project-dir", "/tmp"]);
        match args.command {
            Commands::Run {
                project_dir,
                append,
            } => {
                assert_eq!(project_dir.to_string_lossy(), "/tmp");
                assert!(append);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_check() -> Result<()> {
        let args = Cli::parse_from(["tempo", "check", "--table", "songplays", "--fail-fast"]);
        match args.command {
            Commands::Check {
                table, fail_fast, ..
            } => {
                assert_eq!(table, "songplays");
                assert!(fail_fast);
                Ok(())
            }
            _ => bail!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() -> Result<()> {
        let args = Cli::parse_from(["tempo", "inspect", "--table", "users", "--limit", "10"]);
        match args.command {
            Commands::Inspect {
                table,
                limit,
                db_path,
            } => {
                assert_eq!(table, "users");
                assert_eq!(limit, 10);
                assert_eq!(db_path, "tempo_db.duckdb");
                Ok(())
            }
            _ => bail!("Expected Inspect command"),
        }
    }
}
