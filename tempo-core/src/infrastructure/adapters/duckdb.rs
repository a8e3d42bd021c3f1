// tempo-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{Config, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// Imports Hexagonaux
use crate::error::TempoError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::warehouse::Warehouse;

pub struct DuckDbWarehouse {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbWarehouse {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, TempoError> {
        self.conn.lock().map_err(|_| {
            TempoError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

fn db_err(e: duckdb::Error) -> TempoError {
    TempoError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
}

#[async_trait]
impl Warehouse for DuckDbWarehouse {
    async fn execute(&self, query: &str) -> Result<(), TempoError> {
        let conn = self.lock()?;
        conn.execute(query, []).map(|_rows| ()).map_err(db_err)
    }

    async fn query_scalar(&self, query: &str) -> Result<i64, TempoError> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(query).map_err(db_err)?;
        let mut rows = stmt.query([]).map_err(db_err)?;

        let row = rows
            .next()
            .map_err(db_err)?
            .ok_or_else(|| TempoError::InternalError("No scalar value returned".into()))?;

        let value: i64 = row.get(0).map_err(db_err)?;
        Ok(value)
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[tokio::test]
    async fn test_duckdb_flow() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;

        warehouse
            .execute("CREATE TABLE plays (playid VARCHAR, userid INTEGER)")
            .await?;
        warehouse
            .execute("INSERT INTO plays VALUES ('a', 1), ('b', 2), ('b', NULL)")
            .await?;

        let count = warehouse.query_scalar("SELECT COUNT(*) FROM plays").await?;
        assert_eq!(count, 3);

        // The two count shapes the quality checks rely on.
        let nulls = warehouse
            .query_scalar("SELECT COUNT(*) FROM plays WHERE userid IS NULL")
            .await?;
        assert_eq!(nulls, 1);

        let distinct = warehouse
            .query_scalar("SELECT COUNT(DISTINCT playid) FROM plays")
            .await?;
        assert_eq!(distinct, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_truncate() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        warehouse.execute("CREATE TABLE t (x INTEGER)").await?;
        warehouse.execute("INSERT INTO t VALUES (1), (2)").await?;
        warehouse.execute("TRUNCATE \"t\"").await?;

        let count = warehouse.query_scalar("SELECT COUNT(*) FROM t").await?;
        assert_eq!(count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_error() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        // Invalid SQL
        let result = warehouse.execute("SELECT * FROM non_existent_table").await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_query_scalar_empty_result() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        warehouse.execute("CREATE TABLE t (x INTEGER)").await?;
        let result = warehouse.query_scalar("SELECT x FROM t").await;
        assert!(matches!(result, Err(TempoError::InternalError(_))));
        Ok(())
    }
}
