// tempo-core/src/application/load.rs
//
// The three load operators: staging (object storage -> staging table),
// fact (staging -> songplays) and dimension (staging/fact -> dimensions).
// Each one assembles statements from the static catalog and runs them
// through the instrumented engine.

use tracing::info;

use crate::application::engine;
use crate::domain::project::configuration::{StagingSource, StorageConfig, WriteDisposition};
use crate::domain::schema::statements;
use crate::domain::schema::Table;
use crate::error::TempoError;
use crate::ports::warehouse::Warehouse;

/// Load a dimension table: TRUNCATE, then INSERT from the catalog.
pub async fn load_dimension(warehouse: &dyn Warehouse, table: Table) -> Result<(), TempoError> {
    // Resolve the statement before touching the table: a missing catalog
    // entry must not leave the dimension truncated and empty.
    let insert = statements::insert_into(table)?;

    info!("🧹 Clearing dimension table '{}'", table);
    engine::execute_query(warehouse, &statements::truncate(table.name())).await?;

    info!("📥 Loading dimension table '{}'", table);
    engine::execute_query(warehouse, &insert).await
}

/// Load the fact table.
///
/// `Append` skips the TRUNCATE; both dispositions run the same insert
/// statement from the catalog.
pub async fn load_fact(
    warehouse: &dyn Warehouse,
    mode: WriteDisposition,
) -> Result<(), TempoError> {
    let table = Table::FACT;
    let insert = statements::insert_into(table)?;

    match mode {
        WriteDisposition::Truncate => {
            info!("🧹 Clearing fact table '{}'", table);
            engine::execute_query(warehouse, &statements::truncate(table.name())).await?;
            info!("📥 Loading fact table '{}'", table);
        }
        WriteDisposition::Append => {
            info!("📥 Appending to fact table '{}'", table);
        }
    }

    engine::execute_query(warehouse, &insert).await
}

/// Stage a JSON source: session settings for remote storage, TRUNCATE,
/// then bulk load.
pub async fn stage_table(
    warehouse: &dyn Warehouse,
    source: &StagingSource,
    storage: &StorageConfig,
) -> Result<(), TempoError> {
    if source.path.starts_with("s3://") {
        for setting in statements::session_settings(storage) {
            engine::execute_query(warehouse, &setting).await?;
        }
    }

    info!("🧹 Clearing staging table '{}'", source.table);
    engine::execute_query(warehouse, &statements::truncate(&source.table)).await?;

    info!("📦 Staging '{}' from {}", source.table, source.path);
    engine::execute_query(
        warehouse,
        &statements::staging_load(&source.table, &source.path, source.format),
    )
    .await
}
