// tempo-core/src/ports/warehouse.rs

// This file defines what your application needs, without knowing how it's done.
// The connection behind this trait is owned by the caller; the pipeline and
// the quality engine only borrow it for the duration of a statement.

use crate::error::TempoError;
use async_trait::async_trait;

#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Run a statement for its side effects (DDL, TRUNCATE, INSERT, SET).
    async fn execute(&self, sql: &str) -> Result<(), TempoError>;

    /// Run a query and return the first column of the first row.
    /// An empty result set is an error.
    async fn query_scalar(&self, sql: &str) -> Result<i64, TempoError>;

    fn engine_name(&self) -> &str;
}
