// tempo/src/commands/check.rs
//
// USE CASE: Run one table's quality suite and render the report.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table as DisplayTable;
use tempo_core::application::{run_suite, FailurePolicy};
use tempo_core::domain::quality::RunReport;
use tempo_core::infrastructure::config::load_pipeline_config;

use crate::commands::open_warehouse;

pub async fn execute(project_dir: PathBuf, table: String, fail_fast: bool) -> anyhow::Result<()> {
    let config = load_pipeline_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;

    let suite = config
        .quality
        .suites
        .get(&table)
        .ok_or_else(|| anyhow::anyhow!("No quality suite configured for table '{}'", table))?;

    let warehouse = open_warehouse(&project_dir, &config)?;

    let policy = if fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::RunAll
    };

    println!("🧪 Quality suite for '{}' ({} check(s))", table, suite.len());
    let report = run_suite(warehouse.as_ref(), &table, suite, policy).await?;

    print_report(&report);

    if let Err(e) = report.ensure_passed() {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }

    println!("\n✅ All checks passed for '{}'", table);
    Ok(())
}

fn print_report(report: &RunReport) {
    let mut display = DisplayTable::new();
    display
        .load_preset(UTF8_FULL)
        .set_header(vec!["Check", "Status", "Observed", "Detail"]);

    for result in &report.results {
        display.add_row(vec![
            result.check.clone(),
            if result.passed { "✅ PASS" } else { "❌ FAIL" }.to_string(),
            result.observed.to_string(),
            result.detail.clone(),
        ]);
    }

    println!("{display}");
}
