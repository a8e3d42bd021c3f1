// tempo-core/src/application/pipeline.rs

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::info;

// Application Services
use crate::application::quality::{self, FailurePolicy};
use crate::application::{engine, load};

// Domain
use crate::domain::project::configuration::PipelineConfig;
use crate::domain::quality::QualitySuite;
use crate::domain::schema::statements;
use crate::domain::schema::Table;

// Infrastructure
use crate::infrastructure::artifacts;

use crate::error::TempoError;
use crate::ports::warehouse::Warehouse;

/// Summary of one end-to-end pipeline run, persisted to
/// `target/run_results.json`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct PipelineRun {
    pub success: bool,
    pub tables_loaded: usize,
    pub suites_passed: usize,
    pub suites_failed: usize,
    pub completed_at: String,
    pub errors: Vec<String>,
}

/// Run the whole pipeline, sequentially, in dependency order:
/// schema DDL → staging → fact → dimensions → quality suites → artifacts.
///
/// Scheduling, retries and parallelism belong to whatever invokes this; a
/// hard error (executor, config, IO) aborts immediately, while quality
/// failures are gathered across tables and reported together in the
/// returned summary.
pub async fn run_pipeline(
    config: &PipelineConfig,
    warehouse: &dyn Warehouse,
    project_dir: &Path,
) -> Result<PipelineRun, TempoError> {
    info!(
        "🚀 Starting pipeline '{}' (profile: {})",
        config.name, config.profile
    );
    let start_time = std::time::Instant::now();

    // 1. SETUP (Infra/IO)
    let target_dir = project_dir.join(&config.target_path);
    if !target_dir.exists() {
        fs::create_dir_all(&target_dir)?;
    }

    // 2. SCHEMA (idempotent DDL)
    info!("🏗️  Ensuring star schema tables exist");
    for ddl in statements::CREATE_TABLES {
        engine::execute_query(warehouse, ddl).await?;
    }

    // 3. STAGING
    let mut tables_loaded = 0;
    for source in &config.sources {
        load::stage_table(warehouse, source, &config.storage).await?;
        tables_loaded += 1;
    }

    // 4. FACT
    load::load_fact(warehouse, config.fact_load).await?;
    tables_loaded += 1;

    // 5. DIMENSIONS (fact first: the time dimension reads from songplays)
    for table in Table::DIMENSIONS {
        load::load_dimension(warehouse, table).await?;
        tables_loaded += 1;
    }

    // 6. QUALITY SUITES (full reports; failures gathered, not fail-fast)
    let mut errors = Vec::new();
    let mut suites_passed = 0;
    let mut suites_failed = 0;

    if config.quality.enabled && !config.quality.suites.is_empty() {
        let quality_dir = target_dir.join("quality");
        if !quality_dir.exists() {
            fs::create_dir_all(&quality_dir)?;
        }

        for table in suite_order(&config.quality.suites) {
            let Some(suite) = config.quality.suites.get(&table) else {
                continue;
            };

            let report =
                quality::run_suite(warehouse, &table, suite, FailurePolicy::RunAll).await?;
            artifacts::write_json(quality_dir.join(format!("{table}.json")), &report)?;

            match report.ensure_passed() {
                Ok(()) => suites_passed += 1,
                Err(e) => {
                    suites_failed += 1;
                    errors.push(e.to_string());
                }
            }
        }
    }

    // 7. FINALIZE
    let run = PipelineRun {
        success: errors.is_empty(),
        tables_loaded,
        suites_passed,
        suites_failed,
        completed_at: chrono::Utc::now().to_rfc3339(),
        errors,
    };
    artifacts::write_json(target_dir.join("run_results.json"), &run)?;

    info!(
        "✨ Done in {:.2}s. {} tables loaded, {} suite(s) passed, {} failed.",
        start_time.elapsed().as_secs_f64(),
        run.tables_loaded,
        run.suites_passed,
        run.suites_failed
    );

    Ok(run)
}

/// Suites run fact first, then dimensions, then any extra tables
/// alphabetically — deterministic regardless of map iteration order.
fn suite_order(suites: &HashMap<String, QualitySuite>) -> Vec<String> {
    let mut ordered: Vec<String> = [Table::FACT]
        .into_iter()
        .chain(Table::DIMENSIONS)
        .map(|t| t.name().to_string())
        .filter(|name| suites.contains_key(name))
        .collect();

    let mut rest: Vec<String> = suites
        .keys()
        .filter(|name| !ordered.contains(name))
        .cloned()
        .collect();
    rest.sort();
    ordered.extend(rest);

    ordered
}
