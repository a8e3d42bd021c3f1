// tempo-core/src/application/mod.rs

pub mod clean;
pub mod engine;
pub mod load;
pub mod pipeline;
pub mod quality;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use tempo_core::application::{run_pipeline, run_suite, clean_project};`
// sans avoir à connaître la structure interne des fichiers.

pub use clean::clean_project;
pub use engine::{execute_query, fetch_scalar};
pub use load::{load_dimension, load_fact, stage_table};
pub use pipeline::{run_pipeline, PipelineRun};
pub use quality::{run_suite, FailurePolicy};
