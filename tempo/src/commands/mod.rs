// tempo/src/commands/mod.rs

pub mod check;
pub mod clean;
pub mod inspect;
pub mod query;
pub mod run;

use std::path::Path;

use anyhow::Context;
use tempo_core::domain::project::{Engine, PipelineConfig};
use tempo_core::infrastructure::adapters::duckdb::DuckDbWarehouse;
use tempo_core::ports::warehouse::Warehouse;

/// Instantiate the warehouse adapter declared by the project config.
/// A relative db-path resolves against the project directory.
pub(crate) fn open_warehouse(
    project_dir: &Path,
    config: &PipelineConfig,
) -> anyhow::Result<Box<dyn Warehouse>> {
    match config.engine {
        Engine::DuckDB => {
            let db_path = if config.db_path == ":memory:" {
                config.db_path.clone()
            } else {
                project_dir.join(&config.db_path).to_string_lossy().into_owned()
            };

            let warehouse = DuckDbWarehouse::new(&db_path)
                .with_context(|| format!("Failed to initialize DuckDB at {}", db_path))?;
            Ok(Box::new(warehouse))
        }
    }
}
