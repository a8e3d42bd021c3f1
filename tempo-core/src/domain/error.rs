// tempo-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Unknown quality check '{0}'")]
    #[diagnostic(
        code(tempo::domain::unknown_check),
        help("Known checks: has_rows, row_count_between, no_nulls, all_distinct.")
    )]
    UnknownCheck(String),

    #[error("Quality check '{check}' is missing required parameter '{parameter}'")]
    #[diagnostic(code(tempo::domain::missing_parameter))]
    MissingParameter {
        check: &'static str,
        parameter: &'static str,
    },

    #[error("Quality check '{check}' parameter '{parameter}' must be {expected}")]
    #[diagnostic(code(tempo::domain::invalid_parameter))]
    InvalidParameter {
        check: &'static str,
        parameter: &'static str,
        expected: &'static str,
    },

    #[error("Invalid row count bounds: lower_bound {lower} > upper_bound {upper}")]
    #[diagnostic(
        code(tempo::domain::invalid_bounds),
        help("Swap the bounds so that lower_bound <= upper_bound.")
    )]
    InvalidBounds { lower: i64, upper: i64 },

    #[error("Quality check '{check}' failed on '{table}': {detail}")]
    #[diagnostic(code(tempo::domain::check_failed))]
    CheckFailed {
        check: String,
        table: String,
        detail: String,
    },

    #[error("Quality suite failed on '{table}': {}", .failures.join("; "))]
    #[diagnostic(code(tempo::domain::suite_failed))]
    SuiteFailed {
        table: String,
        failures: Vec<String>,
    },

    #[error("No insert statement registered for table '{0}'")]
    #[diagnostic(
        code(tempo::domain::no_insert_statement),
        help("Only the fact and dimension tables have transformation statements.")
    )]
    NoInsertStatement(String),

    #[error("Unknown table '{0}'")]
    #[diagnostic(code(tempo::domain::unknown_table))]
    UnknownTable(String),
}
