// tempo-core/src/application/quality.rs

use tracing::{debug, info, warn};

// Imports Hexagonaux
use crate::application::engine;
use crate::domain::quality::{Check, CheckResult, Observed, QualitySuite, RunReport};
use crate::domain::schema::statements::quote_ident;
use crate::error::TempoError;
use crate::ports::warehouse::Warehouse;

/// What the runner does after a check fails.
///
/// `RunAll` evaluates every check and reports all outcomes — the default,
/// since a full report is strictly more informative. `FailFast` stops at
/// the first failure; later checks never run and are absent from the
/// report. Neither policy turns a failure into an error by itself: callers
/// do that via `RunReport::ensure_passed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    RunAll,
    FailFast,
}

/// Run one table's quality suite and return the report.
///
/// Every definition is resolved and validated before the first query, so
/// configuration errors (unknown check, missing parameter, bad bounds)
/// surface even under `FailFast`. Checks only read; nothing is mutated.
pub async fn run_suite(
    warehouse: &dyn Warehouse,
    table: &str,
    suite: &QualitySuite,
    policy: FailurePolicy,
) -> Result<RunReport, TempoError> {
    let checks = suite.validate()?;

    info!(
        "🧪 Running {} quality check(s) on '{}'",
        checks.len(),
        table
    );

    let mut report = RunReport::new(table);
    for check in &checks {
        let result = evaluate(warehouse, table, check).await?;

        if result.passed {
            info!("  ✅ PASS: {} on {}", result.check, table);
        } else {
            warn!("  ❌ FAIL: {} on {} ({})", result.check, table, result.detail);
        }

        let failed = !result.passed;
        report.push(result);

        if failed && policy == FailurePolicy::FailFast {
            debug!("Fail-fast: skipping remaining checks for '{}'", table);
            break;
        }
    }

    Ok(report)
}

/// Evaluate one check: one or two scalar-count queries plus a decision rule.
async fn evaluate(
    warehouse: &dyn Warehouse,
    table: &str,
    check: &Check,
) -> Result<CheckResult, TempoError> {
    let result = match check {
        Check::HasRows => {
            let count = fetch_row_count(warehouse, table).await?;
            CheckResult {
                check: check.kind().name().to_string(),
                passed: count > 0,
                observed: Observed::RowCount(count),
                detail: format!("row count {count}, expected at least 1"),
            }
        }
        Check::RowCountBetween {
            lower_bound,
            upper_bound,
        } => {
            let count = fetch_row_count(warehouse, table).await?;
            CheckResult {
                check: check.kind().name().to_string(),
                passed: (*lower_bound..=*upper_bound).contains(&count),
                observed: Observed::RowCount(count),
                detail: format!(
                    "row count {count}, expected within [{lower_bound}, {upper_bound}]"
                ),
            }
        }
        Check::NoNulls { column } => {
            let nulls = engine::fetch_scalar(
                warehouse,
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE {} IS NULL",
                    quote_ident(table),
                    quote_ident(column)
                ),
            )
            .await?;
            CheckResult {
                check: check.kind().name().to_string(),
                passed: nulls == 0,
                observed: Observed::NullCount(nulls),
                detail: format!("{nulls} NULL value(s) in '{column}', expected none"),
            }
        }
        Check::AllDistinct { column } => {
            let distinct = engine::fetch_scalar(
                warehouse,
                &format!(
                    "SELECT COUNT(DISTINCT {}) FROM {}",
                    quote_ident(column),
                    quote_ident(table)
                ),
            )
            .await?;
            let total = engine::fetch_scalar(
                warehouse,
                &format!(
                    "SELECT COUNT({}) FROM {}",
                    quote_ident(column),
                    quote_ident(table)
                ),
            )
            .await?;
            CheckResult {
                check: check.kind().name().to_string(),
                passed: distinct == total,
                observed: Observed::DistinctVsTotal { distinct, total },
                detail: format!(
                    "{distinct} distinct of {total} value(s) in '{column}', expected all distinct"
                ),
            }
        }
    };

    Ok(result)
}

async fn fetch_row_count(warehouse: &dyn Warehouse, table: &str) -> Result<i64, TempoError> {
    engine::fetch_scalar(
        warehouse,
        &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
    )
    .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::quality::CheckDefinition;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    // --- MOCK WAREHOUSE ---
    // Scripted scalar answers, popped in query order.
    #[derive(Clone, Default)]
    struct MockWarehouse {
        pub queries: Arc<Mutex<Vec<String>>>,
        pub scalars: Arc<Mutex<VecDeque<i64>>>,
    }

    impl MockWarehouse {
        fn with_scalars(scalars: &[i64]) -> Self {
            Self {
                queries: Arc::new(Mutex::new(Vec::new())),
                scalars: Arc::new(Mutex::new(scalars.iter().copied().collect())),
            }
        }

        fn query_count(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Warehouse for MockWarehouse {
        async fn execute(&self, query: &str) -> Result<(), TempoError> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(())
        }
        async fn query_scalar(&self, query: &str) -> Result<i64, TempoError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.scalars
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TempoError::InternalError("Mock ran out of scalars".into()))
        }
        fn engine_name(&self) -> &str {
            "mock"
        }
    }

    fn suite(definitions: Vec<CheckDefinition>) -> QualitySuite {
        QualitySuite::new(definitions)
    }

    fn full_suite(lower: i64, upper: i64, column: &str) -> QualitySuite {
        suite(vec![
            CheckDefinition::new("has_rows"),
            CheckDefinition::new("row_count_between")
                .with_param("lower_bound", lower)
                .with_param("upper_bound", upper),
            CheckDefinition::new("no_nulls").with_param("column", column),
            CheckDefinition::new("all_distinct").with_param("column", column),
        ])
    }

    #[tokio::test]
    async fn test_has_rows_empty_table_fails() {
        let warehouse = MockWarehouse::with_scalars(&[0]);
        let report = run_suite(
            &warehouse,
            "users",
            &suite(vec![CheckDefinition::new("has_rows")]),
            FailurePolicy::RunAll,
        )
        .await
        .unwrap();

        assert!(!report.passed());
        assert!(matches!(report.results[0].observed, Observed::RowCount(0)));
    }

    #[tokio::test]
    async fn test_has_rows_nonempty_table_passes() {
        let warehouse = MockWarehouse::with_scalars(&[1]);
        let report = run_suite(
            &warehouse,
            "users",
            &suite(vec![CheckDefinition::new("has_rows")]),
            FailurePolicy::RunAll,
        )
        .await
        .unwrap();

        assert!(report.passed());
    }

    #[tokio::test]
    async fn test_row_count_between_boundaries() {
        for (count, expected) in [(99, false), (100, true), (500, true), (501, false)] {
            let warehouse = MockWarehouse::with_scalars(&[count]);
            let report = run_suite(
                &warehouse,
                "users",
                &suite(vec![CheckDefinition::new("row_count_between")
                    .with_param("lower_bound", 100)
                    .with_param("upper_bound", 500)]),
                FailurePolicy::RunAll,
            )
            .await
            .unwrap();

            assert_eq!(report.passed(), expected, "count={count}");
        }
    }

    #[tokio::test]
    async fn test_row_count_between_detail_carries_observed() {
        let warehouse = MockWarehouse::with_scalars(&[501]);
        let report = run_suite(
            &warehouse,
            "users",
            &suite(vec![CheckDefinition::new("row_count_between")
                .with_param("lower_bound", 100)
                .with_param("upper_bound", 500)]),
            FailurePolicy::RunAll,
        )
        .await
        .unwrap();

        let failure = &report.results[0];
        assert!(!failure.passed);
        assert!(failure.detail.contains("501"));
        assert!(failure.detail.contains("[100, 500]"));
    }

    #[tokio::test]
    async fn test_no_nulls() {
        let clean = MockWarehouse::with_scalars(&[0]);
        let dirty = MockWarehouse::with_scalars(&[3]);
        let definitions = suite(vec![
            CheckDefinition::new("no_nulls").with_param("column", "playid"),
        ]);

        let ok = run_suite(&clean, "songplays", &definitions, FailurePolicy::RunAll)
            .await
            .unwrap();
        assert!(ok.passed());

        let ko = run_suite(&dirty, "songplays", &definitions, FailurePolicy::RunAll)
            .await
            .unwrap();
        assert!(!ko.passed());
        assert!(matches!(ko.results[0].observed, Observed::NullCount(3)));
    }

    #[tokio::test]
    async fn test_all_distinct() {
        let distinct = MockWarehouse::with_scalars(&[7000, 7000]);
        let duplicated = MockWarehouse::with_scalars(&[6900, 7000]);
        let definitions = suite(vec![
            CheckDefinition::new("all_distinct").with_param("column", "playid"),
        ]);

        let ok = run_suite(&distinct, "songplays", &definitions, FailurePolicy::RunAll)
            .await
            .unwrap();
        assert!(ok.passed());

        let ko = run_suite(&duplicated, "songplays", &definitions, FailurePolicy::RunAll)
            .await
            .unwrap();
        assert!(!ko.passed());
        assert!(matches!(
            ko.results[0].observed,
            Observed::DistinctVsTotal {
                distinct: 6900,
                total: 7000
            }
        ));
    }

    #[tokio::test]
    async fn test_songplays_scenario_passes_entirely() {
        // 7000 rows, no NULL playid, all playids distinct.
        let warehouse = MockWarehouse::with_scalars(&[7000, 7000, 0, 7000, 7000]);
        let report = run_suite(
            &warehouse,
            "songplays",
            &full_suite(5000, 10000, "playid"),
            FailurePolicy::RunAll,
        )
        .await
        .unwrap();

        assert!(report.passed());
        assert_eq!(report.results.len(), 4);
        assert!(report.ensure_passed().is_ok());
    }

    #[tokio::test]
    async fn test_empty_table_fail_fast_truncates_report() {
        // has_rows fails on the empty table; under fail-fast the three
        // remaining checks never run and are absent from the report.
        let warehouse = MockWarehouse::with_scalars(&[0]);
        let report = run_suite(
            &warehouse,
            "users",
            &full_suite(100, 500, "userid"),
            FailurePolicy::FailFast,
        )
        .await
        .unwrap();

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].check, "has_rows");
        assert_eq!(warehouse.query_count(), 1);

        let err = report.ensure_passed().unwrap_err();
        assert!(matches!(err, DomainError::CheckFailed { check, .. } if check == "has_rows"));
    }

    #[tokio::test]
    async fn test_empty_table_run_all_reports_everything() {
        // Same table under the default policy: all four checks report.
        // On an empty table no_nulls and all_distinct hold vacuously.
        let warehouse = MockWarehouse::with_scalars(&[0, 0, 0, 0, 0]);
        let report = run_suite(
            &warehouse,
            "users",
            &full_suite(100, 500, "userid"),
            FailurePolicy::RunAll,
        )
        .await
        .unwrap();

        assert_eq!(report.results.len(), 4);
        assert_eq!(report.failures().len(), 2);

        let err = report.ensure_passed().unwrap_err();
        assert!(matches!(err, DomainError::SuiteFailed { failures, .. } if failures.len() == 2));
    }

    #[tokio::test]
    async fn test_configuration_errors_surface_before_any_query() {
        let warehouse = MockWarehouse::with_scalars(&[1]);
        let bad_suite = suite(vec![
            CheckDefinition::new("has_rows"),
            CheckDefinition::new("freshness"),
        ]);

        let err = run_suite(&warehouse, "users", &bad_suite, FailurePolicy::FailFast)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TempoError::Domain(DomainError::UnknownCheck(name)) if name == "freshness"
        ));
        assert_eq!(warehouse.query_count(), 0);
    }

    #[tokio::test]
    async fn test_queries_are_read_only_counts() {
        let warehouse = MockWarehouse::with_scalars(&[7000, 7000, 0, 7000, 7000]);
        run_suite(
            &warehouse,
            "songplays",
            &full_suite(5000, 10000, "playid"),
            FailurePolicy::RunAll,
        )
        .await
        .unwrap();

        let queries = warehouse.queries.lock().unwrap();
        assert_eq!(queries.len(), 5);
        assert!(queries.iter().all(|q| q.starts_with("SELECT COUNT")));
        assert_eq!(queries[2], "SELECT COUNT(*) FROM \"songplays\" WHERE \"playid\" IS NULL");
        assert_eq!(queries[3], "SELECT COUNT(DISTINCT \"playid\") FROM \"songplays\"");
    }
}
