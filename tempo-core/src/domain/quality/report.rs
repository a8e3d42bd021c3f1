// tempo-core/src/domain/quality/report.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// The scalar evidence a check decision was based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observed {
    RowCount(i64),
    NullCount(i64),
    DistinctVsTotal { distinct: i64, total: i64 },
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observed::RowCount(count) => write!(f, "{count} row(s)"),
            Observed::NullCount(count) => write!(f, "{count} NULL(s)"),
            Observed::DistinctVsTotal { distinct, total } => {
                write!(f, "{distinct} distinct / {total} total")
            }
        }
    }
}

/// Outcome of one check invocation. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: String,
    pub passed: bool,
    pub observed: Observed,
    pub detail: String,
}

/// Ordered record of check outcomes for one table's quality suite.
///
/// Created empty by the runner, appended to as checks run, read-only for
/// everyone else. Turning failures into an error is the caller's decision
/// (`ensure_passed`), not the runner's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub table: String,
    pub results: Vec<CheckResult>,
}

impl RunReport {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            results: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn failures(&self) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    pub fn ensure_passed(&self) -> Result<(), DomainError> {
        let failures = self.failures();
        match failures.as_slice() {
            [] => Ok(()),
            [only] => Err(DomainError::CheckFailed {
                check: only.check.clone(),
                table: self.table.clone(),
                detail: only.detail.clone(),
            }),
            many => Err(DomainError::SuiteFailed {
                table: self.table.clone(),
                failures: many
                    .iter()
                    .map(|r| format!("{}: {}", r.check, r.detail))
                    .collect(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn result(check: &str, passed: bool) -> CheckResult {
        CheckResult {
            check: check.to_string(),
            passed,
            observed: Observed::RowCount(0),
            detail: format!("{check} detail"),
        }
    }

    #[test]
    fn test_empty_report_passes() {
        let report = RunReport::new("songplays");
        assert!(report.passed());
        assert!(report.ensure_passed().is_ok());
    }

    #[test]
    fn test_single_failure_is_check_failed() {
        let mut report = RunReport::new("users");
        report.push(result("has_rows", false));
        report.push(result("no_nulls", true));

        let err = report.ensure_passed().unwrap_err();
        assert!(matches!(
            err,
            DomainError::CheckFailed { check, table, .. }
                if check == "has_rows" && table == "users"
        ));
    }

    #[test]
    fn test_multiple_failures_are_aggregated() {
        let mut report = RunReport::new("users");
        report.push(result("has_rows", false));
        report.push(result("row_count_between", false));

        let err = report.ensure_passed().unwrap_err();
        match err {
            DomainError::SuiteFailed { table, failures } => {
                assert_eq!(table, "users");
                assert_eq!(failures.len(), 2);
            }
            other => panic!("Expected SuiteFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_observed_display() {
        assert_eq!(Observed::RowCount(7000).to_string(), "7000 row(s)");
        assert_eq!(
            Observed::DistinctVsTotal {
                distinct: 6900,
                total: 7000
            }
            .to_string(),
            "6900 distinct / 7000 total"
        );
    }
}
