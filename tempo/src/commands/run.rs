// tempo/src/commands/run.rs
//
// USE CASE: Run the full pipeline (Stage -> Load -> Quality).

use std::path::PathBuf;

use anyhow::Context;
use tempo_core::application::run_pipeline;
use tempo_core::domain::project::WriteDisposition;
use tempo_core::infrastructure::config::load_pipeline_config;

use crate::commands::open_warehouse;

pub async fn execute(project_dir: PathBuf, append: bool) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let mut config = load_pipeline_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);

    if append {
        config.fact_load = WriteDisposition::Append;
    }

    // B. Instantiate the DB Adapter
    let warehouse = open_warehouse(&project_dir, &config)?;
    println!("   Engine: {} 🦆", warehouse.engine_name());

    // C. Run the Pipeline (Application Layer)
    let result = run_pipeline(&config, warehouse.as_ref(), &project_dir).await;

    match result {
        Ok(run) => {
            if run.success {
                println!(
                    "\n✨ SUCCESS! {} tables loaded, {} quality suite(s) passed in {:.2?}",
                    run.tables_loaded,
                    run.suites_passed,
                    start.elapsed()
                );
            } else {
                eprintln!("\n❌ FAILURE. {} quality suite(s) failed:", run.suites_failed);
                for error in &run.errors {
                    eprintln!("   - {}", error);
                }
                // Exit with error code for CI/CD
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
