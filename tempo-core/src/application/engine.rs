// tempo-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

// Imports Hexagonaux corrects
use crate::error::TempoError;
use crate::ports::warehouse::Warehouse;

/// Exécute une requête SQL brute avec instrumentation (Logs + Timing).
/// Ce wrapper permet de surveiller la performance de toutes les requêtes.
#[instrument(skip(warehouse), fields(query.len = query.len()))]
pub async fn execute_query(warehouse: &dyn Warehouse, query: &str) -> Result<(), TempoError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    // Exécution déléguée au Port
    let result = warehouse.execute(query).await;

    let duration = start.elapsed();

    match result {
        Ok(_) => {
            debug!("✅ Query finished in {:.2?}", duration);
            Ok(())
        }
        Err(e) => {
            // On log l'erreur ici pour avoir le contexte de temps,
            // même si elle sera remontée plus haut.
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}

/// Variante scalaire : renvoie la première colonne de la première ligne.
/// C'est la forme qu'utilisent les checks qualité.
#[instrument(skip(warehouse), fields(query.len = query.len()))]
pub async fn fetch_scalar(warehouse: &dyn Warehouse, query: &str) -> Result<i64, TempoError> {
    let start = Instant::now();
    debug!("⚡ Scalar Query: {}", query);

    let result = warehouse.query_scalar(query).await;

    let duration = start.elapsed();

    match result {
        Ok(value) => {
            debug!("✅ Scalar {} in {:.2?}", value, duration);
            Ok(value)
        }
        Err(e) => {
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
